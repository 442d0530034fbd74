//! htmx demo - HTTP Server Entry Point
//!
//! Starts the HTTP server that serves the demo pages.

use htmx_demo::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "htmx_demo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: tasks={}, session_cookie={}, idle_timeout={}s",
        config
            .tasks_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(bundled)".to_string()),
        config.session_cookie,
        config.session_idle_timeout.as_secs()
    );

    info!("Starting server on {}", config.bind_addr());
    api::serve(config).await?;

    Ok(())
}
