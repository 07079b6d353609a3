//! Shared application state for all routes.

use crate::store::ProductStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(products: impl ProductStore + 'static) -> Self {
        Self {
            products: Arc::new(products),
        }
    }
}
