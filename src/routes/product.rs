//! Product CRUD routes under `/api/Product`. Both the bare collection path and the
//! trailing-slash form are served.

use crate::handlers::product::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const PRODUCT_BASE_PATH: &str = "/api/Product";

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route(PRODUCT_BASE_PATH, get(list).post(create))
        .route(&format!("{}/", PRODUCT_BASE_PATH), get(list).post(create))
        .route(
            &format!("{}/:id", PRODUCT_BASE_PATH),
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
