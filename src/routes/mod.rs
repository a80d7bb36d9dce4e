//! Route groups and the permission declarations they contribute.

mod apidoc;
mod cms;
mod common;
pub mod student;

pub use apidoc::{apidoc_routes, ApiDoc};
pub use cms::cms_routes;
pub use common::common_routes;
pub use student::student_routes;

use crate::auth::PermissionRegistry;
use crate::error::ConfigError;
use crate::state::AppState;
use axum::Router;

pub const V2_PREFIX: &str = "/v2";
pub const CMS_PREFIX: &str = "/cms";

/// v2 group: `/student`.
pub fn v2_routes(state: AppState) -> Router {
    Router::new().nest("/student", student_routes(state))
}

/// Permissions declared by every mounted group, keyed by full route path.
pub fn permission_registry() -> Result<PermissionRegistry, ConfigError> {
    let mut registry = PermissionRegistry::new();
    student::register_permissions(&mut registry, &format!("{V2_PREFIX}/student"))?;
    Ok(registry)
}
