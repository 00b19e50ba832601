//! Countdown Timer - A countdown engine with pause and stop controls
//! 
//! This is the main entry point for the countdown-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::tick_dispatch_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, progress={}",
          config.host, config.port, config.tick_ms, !config.no_progress);

    // Create application state
    let (state, tick_rx) = AppState::new(
        config.port,
        config.host.clone(),
        config.tick_period(),
        !config.no_progress,
    );
    let state = Arc::new(state);

    // Start the tick dispatch background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_dispatch_task(tick_state, tick_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start  - Start a countdown ({{hours, minutes, seconds}})");
    info!("  POST /timer/pause  - Pause or resume the countdown");
    info!("  POST /timer/stop   - Stop the countdown");
    info!("  GET  /timer/stream - Live display as server-sent events");
    info!("  GET  /status       - Check current timer status");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
