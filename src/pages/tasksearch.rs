use crate::tasksearch::Task;
use crate::view::{escape_html, Template};

/// Task search page model.
///
/// `results` is `None` before any search has run, which renders an empty
/// dropdown rather than the "no results" message.
#[derive(Debug, Clone, Default)]
pub struct TaskSearchPage {
    pub query: String,
    pub results: Option<Vec<Task>>,
    pub selected: Option<Task>,
}

impl TaskSearchPage {
    fn task_dropdown(&self) -> String {
        let inner = match &self.results {
            None => String::new(),
            Some(tasks) if tasks.is_empty() => {
                r#"<p class="text-muted mb-0">No tasks found matching your search</p>"#.to_string()
            }
            Some(tasks) => {
                let items: String = tasks
                    .iter()
                    .map(|task| {
                        format!(
                            r##"<button type="button" class="list-group-item list-group-item-action" hx-get="/tasksearch/{id}" hx-target="#task-detail" hx-swap="outerHTML">{name}</button>"##,
                            id = task.id,
                            name = escape_html(&task.name),
                        )
                    })
                    .collect();
                format!(r#"<div class="list-group">{}</div>"#, items)
            }
        };
        format!(r#"<div id="task-dropdown" class="mb-3">{}</div>"#, inner)
    }

    fn task_detail(&self) -> String {
        let inner = match &self.selected {
            Some(task) => format!(
                r#"<div class="card"><div class="card-body"><h5 class="card-title">{name}</h5><h6 class="card-subtitle mb-2 text-muted">Task #{id}</h6><p class="card-text">{description}</p></div></div>"#,
                name = escape_html(&task.name),
                id = task.id,
                description = escape_html(&task.description),
            ),
            None => String::new(),
        };
        format!(r#"<div id="task-detail">{}</div>"#, inner)
    }
}

impl Template for TaskSearchPage {
    const NAME: &'static str = "tasksearch";

    fn title(&self) -> &'static str {
        "Task Search"
    }

    fn body(&self) -> String {
        format!(
            r##"<h1>Task Search</h1>
<input type="search" name="query" class="form-control mb-3" placeholder="Search tasks..." autocomplete="off" value="{query}"
       hx-post="/tasksearch/search" hx-trigger="input changed delay:300ms, search, focus once" hx-target="#task-dropdown" hx-swap="outerHTML">
{dropdown}
{detail}"##,
            query = escape_html(&self.query),
            dropdown = self.task_dropdown(),
            detail = self.task_detail(),
        )
    }

    fn fragment(&self, name: &str) -> Option<String> {
        match name {
            "task-dropdown" => Some(self.task_dropdown()),
            "task-detail" => Some(self.task_detail()),
            _ => None,
        }
    }
}
