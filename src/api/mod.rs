//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Two-stage roast stopwatch
        .route("/stopwatch", get(stopwatch_status_handler))
        .route("/stopwatch/config", put(stopwatch_config_handler))
        .route("/stopwatch/start", post(stopwatch_start_handler))
        .route("/stopwatch/pause", post(stopwatch_pause_handler))
        .route("/stopwatch/toggle", post(stopwatch_toggle_handler))
        .route("/stopwatch/reset", post(stopwatch_reset_handler))
        // Backwash on/off cycles
        .route("/backwash", get(backwash_status_handler))
        .route("/backwash/start10", post(backwash_start10_handler))
        .route("/backwash/start5", post(backwash_start5_handler))
        .route("/backwash/pause", post(backwash_pause_handler))
        .route("/backwash/resume", post(backwash_resume_handler))
        .route("/backwash/reset", post(backwash_reset_handler))
        // Calculators
        .route("/calc/roast", post(roast_handler))
        .route("/calc/cafe", post(cafe_handler))
        .route("/calc/mix", post(mix_handler))
        .route("/calc/price-list", post(price_list_handler))
        .route("/catalog", get(catalog_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
