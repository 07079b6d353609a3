//! Shared test helpers: an in-memory `ProductStore` and a request driver for the router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use product_api::{AppError, Product, ProductStore};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tower::ServiceExt;

#[derive(Default)]
struct Rows {
    next_id: i32,
    by_id: BTreeMap<i32, Product>,
}

/// Identity-style ids starting at 1, like the `"Product"` table.
#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Rows>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.rows.lock().unwrap().by_id.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        Ok(self.rows.lock().unwrap().by_id.get(&id).cloned())
    }

    async fn insert(&self, product: &Product) -> Result<Product, AppError> {
        let mut rows = self.rows.lock().unwrap();
        rows.next_id += 1;
        let row = Product {
            id: rows.next_id,
            ..product.clone()
        };
        rows.by_id.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_by_id(&self, id: i32, product: &Product) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.by_id.get_mut(&id) {
            Some(row) => {
                *row = Product {
                    id,
                    ..product.clone()
                };
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, AppError> {
        Ok(self.rows.lock().unwrap().by_id.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnreachableStore;

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<Product>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _product: &Product) -> Result<Product, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update_by_id(&self, _id: i32, _product: &Product) -> Result<u64, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete_by_id(&self, _id: i32) -> Result<u64, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body,
    }
}
