//! HTTP API for the demos.
//!
//! ## Endpoints
//!
//! - `GET /` - Counter page
//! - `POST /counter/increment` - Increment, returns the count fragment
//! - `GET /tasksearch` - Task search page
//! - `POST /tasksearch/search` - Filtered task dropdown fragment
//! - `GET /tasksearch/{id}` - Task detail fragment
//! - `GET /userform` - User form page
//! - `POST /userform/validate` - Form section fragment with validation state
//! - `POST /userform/add-tag` - Tag list fragment after adding
//! - `POST /userform/remove-tag` - Tag list fragment after removing
//! - `POST /userform/submit` - Form section with errors, or the success fragment
//! - `GET /health` - Health check

mod counter;
mod routes;
pub mod session;
mod tasksearch;
pub mod types;
mod userform;

pub use routes::{build_router, serve, AppState};
pub use types::*;
