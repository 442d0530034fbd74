use crate::view::Template;

pub struct CounterPage {
    pub count: u64,
}

impl CounterPage {
    fn count_display(&self) -> String {
        format!(
            r#"<div id="count-display"><div class="count">{}</div></div>"#,
            self.count
        )
    }
}

impl Template for CounterPage {
    const NAME: &'static str = "counter";

    fn title(&self) -> &'static str {
        "Counter Demo"
    }

    fn body(&self) -> String {
        format!(
            r##"<h1>Counter Demo</h1>
<p class="lead">Each click posts to the server, which returns only the updated count.</p>
{display}
<button class="btn btn-primary" hx-post="/counter/increment" hx-target="#count-display" hx-swap="outerHTML">Increment</button>"##,
            display = self.count_display(),
        )
    }

    fn fragment(&self, name: &str) -> Option<String> {
        match name {
            "count-display" => Some(self.count_display()),
            _ => None,
        }
    }
}
