//! Operational routes: liveness, readiness (store round trip) and build version.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Body shared by `/health` and `/ready`; `database` only appears on readiness.
#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl Status {
    const LIVE: Status = Status {
        status: "ok",
        database: None,
    };
    const READY: Status = Status {
        status: "ok",
        database: Some("ok"),
    };
    const DEGRADED: Status = Status {
        status: "degraded",
        database: Some("unavailable"),
    };
}

async fn health() -> Json<Status> {
    Json(Status::LIVE)
}

async fn ready(State(state): State<AppState>) -> Response {
    match state.products.ping().await {
        Ok(()) => Json(Status::READY).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Status::DEGRADED)).into_response()
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `/health`, `/ready` and `/version`, bound to the product store for readiness.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
