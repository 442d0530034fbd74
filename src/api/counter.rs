//! Counter demo handlers.

use std::sync::Arc;

use axum::extract::State;

use super::routes::AppState;
use crate::pages::CounterPage;
use crate::view::View;

pub async fn index(State(state): State<Arc<AppState>>) -> View<CounterPage> {
    View::page(CounterPage {
        count: state.counter.get_count(),
    })
}

pub async fn increment(State(state): State<Arc<AppState>>) -> View<CounterPage> {
    View::fragment(
        "count-display",
        CounterPage {
            count: state.counter.increment(),
        },
    )
}
