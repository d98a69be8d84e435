//! HTTP surface tests against the router

use std::sync::Arc;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use roast_bench::{
    api::create_router,
    services::CueSink,
    state::{AppState, TimerSettings},
};

fn router(backwash_pause: bool) -> Router {
    let state = Arc::new(AppState::new(
        20553,
        "127.0.0.1".to_string(),
        TimerSettings {
            cue_sink: CueSink::Silent,
            backwash_pause,
            ..TimerSettings::default()
        },
    ));
    create_router(state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_version() {
    let app = router(true);
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn stopwatch_config_start_pause_reset() {
    let app = router(true);

    let (status, body) = call(
        &app,
        Method::PUT,
        "/stopwatch/config",
        Some(json!({
            "stage1_minutes": "1",
            "stage1_seconds": 30,
            "stage2_minutes": "0",
            "stage2_seconds": "30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "01:30");
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["status_text"], "Ready");

    let (_, body) = call(&app, Method::POST, "/stopwatch/start", None).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["status_text"], "Stage 1 running");

    let (_, body) = call(&app, Method::POST, "/stopwatch/toggle", None).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["timer"]["status"], "paused");

    let (_, body) = call(&app, Method::POST, "/stopwatch/pause", None).await;
    assert_eq!(body["accepted"], false);
    assert_eq!(body["status"], "ignored");

    let (_, body) = call(&app, Method::POST, "/stopwatch/reset", None).await;
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["display"], "01:30");

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(body["last_action"], "stopwatch-reset");
    assert_eq!(body["port"], 20553);
}

#[tokio::test]
async fn non_numeric_stage_blocks_start() {
    let app = router(true);
    call(
        &app,
        Method::PUT,
        "/stopwatch/config",
        Some(json!({ "stage1_minutes": "abc", "stage1_seconds": "-4", "stage2_seconds": 30 })),
    )
    .await;

    let (status, body) = call(&app, Method::POST, "/stopwatch/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["timer"]["display"], "00:00");
}

#[tokio::test]
async fn backwash_trigger_and_reset() {
    let app = router(true);

    let (_, body) = call(&app, Method::GET, "/backwash", None).await;
    assert_eq!(body["status_text"], "Status: ready");

    let (_, body) = call(&app, Method::POST, "/backwash/start5", None).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["timer"]["total_rounds"], 10);
    assert_eq!(body["timer"]["display"], "00:05");

    let (_, body) = call(&app, Method::POST, "/backwash/pause", None).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["timer"]["status"], "paused");

    let (_, body) = call(&app, Method::POST, "/backwash/resume", None).await;
    assert_eq!(body["accepted"], true);

    let (_, body) = call(&app, Method::POST, "/backwash/reset", None).await;
    assert_eq!(body["timer"]["status_text"], "Status: ready");
    assert_eq!(body["timer"]["display"], "00:00");
}

#[tokio::test]
async fn backwash_pause_can_be_disabled() {
    let app = router(false);
    call(&app, Method::POST, "/backwash/start10", None).await;

    let (status, body) = call(&app, Method::POST, "/backwash/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (_, body) = call(&app, Method::GET, "/backwash", None).await;
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn roast_calculator_validates_and_computes() {
    let app = router(true);

    let (status, body) = call(
        &app,
        Method::POST,
        "/calc/roast",
        Some(json!({ "batch_input": 1000, "batch_output": 1200 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["batch_output"]));

    let (status, body) = call(
        &app,
        Method::POST,
        "/calc/roast",
        Some(json!({
            "batch_input": 1000,
            "batch_output": 800,
            "green_price": 800000,
            "roast_wage": 100000,
            "total_green": 50
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cost_per_kg_display"], "1,125,000 Toman/kg");
}

#[tokio::test]
async fn cafe_mix_and_price_list_calculators() {
    let app = router(true);

    let (status, body) = call(
        &app,
        Method::POST,
        "/calc/cafe",
        Some(json!({ "cost_per_kg": 1000000, "cost_single_shot": 50000, "sales_single": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily_revenue"], 500000.0);

    let (status, body) = call(
        &app,
        Method::POST,
        "/calc/mix",
        Some(json!({ "beans": [
            { "name": "Brazil", "price": 1000, "percentage": 50 },
            { "name": "Kenya", "price": 3000, "percentage": 50 }
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price_by_percentage"], 2000.0);
    assert_eq!(body["price_by_weight"], Value::Null);

    let (status, body) = call(
        &app,
        Method::POST,
        "/calc/price-list",
        Some(json!({ "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["items"]));
}

#[tokio::test]
async fn catalog_lookup() {
    let app = router(true);
    let (status, body) = call(&app, Method::GET, "/catalog?q=kenya", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coffee"], json!(["Kenya"]));
    assert_eq!(body["roasts"], json!(["Medium", "Chocolate", "Dark"]));
}
