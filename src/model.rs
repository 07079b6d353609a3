//! The product entity, shared by the store and the JSON surface.

use serde::{Deserialize, Serialize};

/// One row of the `"Product"` table. Missing JSON fields take their defaults
/// (`id` 0, text fields null, `quantity` 0); `id` is always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Product {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
}
