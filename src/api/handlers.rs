//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    calc::{
        build_price_list, calculate_cafe_revenue, calculate_mix_price, calculate_roast,
        search_catalog, CafeInput, CafeReport, Catalog, MixInput, MixReport, PriceList,
        PriceListInput, RoastInput, RoastReport,
    },
    state::{AppState, TimerKind, TimerState},
    timer::{BackwashProgram, StopwatchFields},
};
use super::responses::{
    api_error, validation_error, ApiError, HealthResponse, StatusResponse, TimerResponse,
};

fn internal_error(context: &str, e: String) -> ApiError {
    error!("{}: {}", context, e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {}", context, e))
}

fn timer_snapshot(state: &AppState, kind: TimerKind) -> Result<TimerState, ApiError> {
    state
        .get_timer_state(kind)
        .map_err(|e| internal_error("Failed to get timer state", e))
}

// --- stopwatch -------------------------------------------------------------

/// Handle GET /stopwatch - Current stopwatch snapshot
pub async fn stopwatch_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerState>, ApiError> {
    timer_snapshot(&state, TimerKind::Stopwatch).map(Json)
}

/// Handle PUT /stopwatch/config - Load new stage durations and reset
pub async fn stopwatch_config_handler(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<StopwatchFields>,
) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state
        .configure_stopwatch(&fields)
        .map_err(|e| internal_error("Failed to configure stopwatch", e))?;
    info!("Stopwatch config endpoint called - display {}", timer.display);
    Ok(Json(TimerResponse::applied(
        "Stopwatch configured and reset".to_string(),
        timer,
    )))
}

/// Handle POST /stopwatch/start - Start or resume the stopwatch
pub async fn stopwatch_start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let (started, timer) = state
        .start_timer(TimerKind::Stopwatch)
        .map_err(|e| internal_error("Failed to start stopwatch", e))?;
    let message = if started {
        "Stopwatch running"
    } else {
        "Stopwatch not started (already running, complete, or zero-length stage 1)"
    };
    Ok(Json(TimerResponse::new(started, message.to_string(), timer)))
}

/// Handle POST /stopwatch/pause - Pause the stopwatch
pub async fn stopwatch_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let (paused, timer) = state
        .pause_timer(TimerKind::Stopwatch)
        .map_err(|e| internal_error("Failed to pause stopwatch", e))?;
    let message = if paused { "Stopwatch paused" } else { "Stopwatch was not running" };
    Ok(Json(TimerResponse::new(paused, message.to_string(), timer)))
}

/// Handle POST /stopwatch/toggle - Start/pause button
pub async fn stopwatch_toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let (changed, timer) = state
        .toggle_timer(TimerKind::Stopwatch)
        .map_err(|e| internal_error("Failed to toggle stopwatch", e))?;
    let message = match (changed, timer.is_running()) {
        (true, true) => "Stopwatch running",
        (true, false) => "Stopwatch paused",
        (false, _) => "Stopwatch unchanged",
    };
    Ok(Json(TimerResponse::new(changed, message.to_string(), timer)))
}

/// Handle POST /stopwatch/reset - Rewind to stage 1
pub async fn stopwatch_reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state
        .reset_timer(TimerKind::Stopwatch)
        .map_err(|e| internal_error("Failed to reset stopwatch", e))?;
    Ok(Json(TimerResponse::applied("Stopwatch reset".to_string(), timer)))
}

// --- backwash --------------------------------------------------------------

/// Handle GET /backwash - Current backwash snapshot
pub async fn backwash_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerState>, ApiError> {
    timer_snapshot(&state, TimerKind::Backwash).map(Json)
}

async fn run_backwash(
    state: &AppState,
    program: BackwashProgram,
) -> Result<Json<TimerResponse>, ApiError> {
    let (started, timer) = state
        .run_backwash(program)
        .map_err(|e| internal_error("Failed to run backwash", e))?;
    Ok(Json(TimerResponse::new(
        started,
        format!("Backwash {} started", program.label()),
        timer,
    )))
}

/// Handle POST /backwash/start10 - 10s on / 10s off x 5
pub async fn backwash_start10_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    run_backwash(&state, BackwashProgram::TenSecond).await
}

/// Handle POST /backwash/start5 - 5s on / 5s off x 10
pub async fn backwash_start5_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    run_backwash(&state, BackwashProgram::FiveSecond).await
}

fn require_backwash_pause(state: &AppState) -> Result<(), ApiError> {
    if state.settings.backwash_pause {
        return Ok(());
    }
    warn!("Backwash pause/resume requested but disabled");
    Err(api_error(
        StatusCode::CONFLICT,
        "Backwash pause/resume is disabled on this server",
    ))
}

/// Handle POST /backwash/pause - Pause a running cycle
pub async fn backwash_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    require_backwash_pause(&state)?;
    let (paused, timer) = state
        .pause_timer(TimerKind::Backwash)
        .map_err(|e| internal_error("Failed to pause backwash", e))?;
    let message = if paused { "Backwash paused" } else { "Backwash was not running" };
    Ok(Json(TimerResponse::new(paused, message.to_string(), timer)))
}

/// Handle POST /backwash/resume - Resume a paused cycle
pub async fn backwash_resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    require_backwash_pause(&state)?;
    let (resumed, timer) = state
        .start_timer(TimerKind::Backwash)
        .map_err(|e| internal_error("Failed to resume backwash", e))?;
    let message = if resumed { "Backwash resumed" } else { "Backwash was not paused" };
    Ok(Json(TimerResponse::new(resumed, message.to_string(), timer)))
}

/// Handle POST /backwash/reset - Stop and return to ready
pub async fn backwash_reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state
        .reset_timer(TimerKind::Backwash)
        .map_err(|e| internal_error("Failed to reset backwash", e))?;
    Ok(Json(TimerResponse::applied("Backwash reset".to_string(), timer)))
}

// --- calculators -----------------------------------------------------------

/// Handle POST /calc/roast - Roast shrinkage and cost
pub async fn roast_handler(Json(input): Json<RoastInput>) -> Result<Json<RoastReport>, ApiError> {
    calculate_roast(&input).map(Json).map_err(validation_error)
}

/// Handle POST /calc/cafe - Daily and monthly café revenue
pub async fn cafe_handler(Json(input): Json<CafeInput>) -> Result<Json<CafeReport>, ApiError> {
    calculate_cafe_revenue(&input).map(Json).map_err(validation_error)
}

/// Handle POST /calc/mix - Blended bean price
pub async fn mix_handler(Json(input): Json<MixInput>) -> Result<Json<MixReport>, ApiError> {
    calculate_mix_price(&input).map(Json).map_err(validation_error)
}

/// Handle POST /calc/price-list - Retail price list
pub async fn price_list_handler(
    Json(input): Json<PriceListInput>,
) -> Result<Json<PriceList>, ApiError> {
    let list = build_price_list(&input).map_err(validation_error)?;
    info!(
        "Price list built for {} ({} coffee, {} powder)",
        list.brand_name,
        list.coffee.len(),
        list.powder.len()
    );
    Ok(Json(list))
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Handle GET /catalog - Known product names, optionally filtered
pub async fn catalog_handler(Query(query): Query<CatalogQuery>) -> Json<Catalog> {
    Json(search_catalog(query.q.as_deref().unwrap_or("")))
}

// --- server ----------------------------------------------------------------

/// Handle GET /status - Both timers plus server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let stopwatch = timer_snapshot(&state, TimerKind::Stopwatch)?;
    let backwash = timer_snapshot(&state, TimerKind::Backwash)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        stopwatch,
        backwash,
        backwash_pause_enabled: state.settings.backwash_pause,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
