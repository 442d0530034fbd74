//! HTTP route table, shared state and server lifecycle.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::counter::CounterService;
use crate::tasksearch::TaskSearchService;
use crate::userform::FormSessionStore;

use super::counter;
use super::session;
use super::tasksearch;
use super::types::HealthResponse;
use super::userform;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Process-wide counter
    pub counter: CounterService,
    /// Immutable task dataset
    pub tasks: TaskSearchService,
    /// Per-session form state
    pub forms: FormSessionStore,
}

impl AppState {
    pub fn new(config: Config, tasks: TaskSearchService) -> Self {
        let forms = FormSessionStore::new(config.session_idle_timeout);
        Self {
            config,
            counter: CounterService::new(),
            tasks,
            forms,
        }
    }
}

/// Build the application router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Only the form demo needs a session.
    let session_routes = Router::new()
        .route("/userform", get(userform::index))
        .route("/userform/validate", post(userform::validate))
        .route("/userform/add-tag", post(userform::add_tag))
        .route("/userform/remove-tag", post(userform::remove_tag))
        .route("/userform/submit", post(userform::submit))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            session::ensure_session,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/", get(counter::index))
        .route("/counter/increment", post(counter::increment))
        .route("/tasksearch", get(tasksearch::index))
        .route("/tasksearch/search", post(tasksearch::search))
        .route("/tasksearch/:id", get(tasksearch::task_detail))
        .merge(session_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// Fails before binding if the task dataset cannot be loaded.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let tasks = TaskSearchService::load_tasks(config.tasks_path.as_deref())
        .context("Failed to load task dataset")?;
    match &config.tasks_path {
        Some(path) => tracing::info!("Loaded {} tasks from {}", tasks.len(), path.display()),
        None => tracing::info!("Loaded {} bundled tasks", tasks.len()),
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, tasks));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tasks: state.tasks.len(),
    })
}
