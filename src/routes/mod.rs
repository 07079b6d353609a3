//! Router assembly.

pub mod common;
pub mod product;

pub use common::common_routes_with_ready;
pub use product::{product_routes, PRODUCT_BASE_PATH};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: product routes, operational routes, request tracing and body limit.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(product_routes(state))
        .layer(middleware)
}
