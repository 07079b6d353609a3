//! Product API: a PostgreSQL-backed CRUD service for a single `Product` resource.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, MigrationError};
pub use migration::{ensure_database_exists, run_migrations, MIGRATOR};
pub use model::Product;
pub use routes::{app, common_routes_with_ready, product_routes, PRODUCT_BASE_PATH};
pub use settings::Settings;
pub use state::AppState;
pub use store::{PgProductStore, ProductStore};
