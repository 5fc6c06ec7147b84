//! Unity API: REST backend for wedding planning. Weddings, their guests and their expenses,
//! stored in PostgreSQL behind a bearer-token protected `/api`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, RunMode};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Expense, Guest, Resource, Wedding};
pub use routes::{api_routes, app, common_routes, resource_routes};
pub use service::{CrudService, ExpensesService, GuestsService, WeddingsService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryRepository, PgRepository, Repository, StoreError};
