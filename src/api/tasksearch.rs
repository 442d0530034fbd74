//! Task search demo handlers.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};

use super::routes::AppState;
use super::types::SearchParams;
use crate::pages::TaskSearchPage;
use crate::view::View;

pub async fn index() -> View<TaskSearchPage> {
    View::page(TaskSearchPage::default())
}

/// Filter the dataset by name. A missing or blank query lists every task.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    body: Option<Form<SearchParams>>,
) -> View<TaskSearchPage> {
    let query = params
        .query
        .or_else(|| body.and_then(|Form(b)| b.query))
        .unwrap_or_default();
    let results = state.tasks.search(&query);
    tracing::debug!(query = %query, matches = results.len(), "Task search");

    View::fragment(
        "task-dropdown",
        TaskSearchPage {
            query,
            results: Some(results),
            selected: None,
        },
    )
}

/// Detail region for one task; empty when the id is unknown.
pub async fn task_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> View<TaskSearchPage> {
    let selected = state.tasks.get_task_by_id(id).cloned();
    if selected.is_none() {
        tracing::debug!(id, "No task with this id");
    }
    View::fragment(
        "task-detail",
        TaskSearchPage {
            selected,
            ..Default::default()
        },
    )
}
