//! Student API: student CRUD over HTTP with soft delete, JWT auth and group permissions.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod request_log;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::{build_router, build_state, init_tracing};
pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use state::AppState;
pub use store::{MemoryStore, PermissionStore, PgStore, StudentStore};
