//! Product CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::ValidJson;
use crate::model::Product;
use crate::routes::PRODUCT_BASE_PATH;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Update and delete target exactly one row; any other count means the id was absent.
fn expect_one(affected: u64, id_str: String) -> Result<StatusCode, AppError> {
    if affected == 1 {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::NotFound(id_str))
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let rows = state.products.list_all().await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .products
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<Product>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.products.insert(&body).await?;
    tracing::info!(id = row.id, "product created");
    let location = format!("{}/{}", PRODUCT_BASE_PATH, row.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<Product>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    let affected = state.products.update_by_id(id, &body).await?;
    expect_one(affected, id_str)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    let affected = state.products.delete_by_id(id).await?;
    expect_one(affected, id_str)
}
