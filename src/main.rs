//! Roast Bench - A state-managed HTTP server for café timers and calculators
//! 
//! This is the main entry point for the roast-bench application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use roast_bench::{
    api::create_router,
    config::Config,
    services::check_cue_player,
    state::{AppState, TimerKind},
    tasks::spawn_timer_driver,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("roast_bench={},tower_http=info", config.log_level()))
        .init();

    info!("Starting roast-bench server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, cue={:?}, backwash_pause={}",
          config.host, config.port, config.tick_ms, config.cue, !config.no_backwash_pause);

    let settings = config.timer_settings();

    // A missing cue player only costs us the sound
    if let Err(e) = check_cue_player(&settings.cue_sink).await {
        warn!("{}", e);
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), settings));

    // Start one driver per timer before accepting requests
    spawn_timer_driver(Arc::clone(&state), TimerKind::Stopwatch);
    spawn_timer_driver(Arc::clone(&state), TimerKind::Backwash);

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /stopwatch            - Stopwatch snapshot");
    info!("  PUT  /stopwatch/config     - Set stage durations (resets)");
    info!("  POST /stopwatch/{{start,pause,toggle,reset}}");
    info!("  GET  /backwash             - Backwash snapshot");
    info!("  POST /backwash/{{start10,start5,pause,resume,reset}}");
    info!("  POST /calc/{{roast,cafe,mix,price-list}}");
    info!("  GET  /catalog?q=           - Product name lookup");
    info!("  GET  /status               - Both timers and server info");
    info!("  GET  /health               - Health check");

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
