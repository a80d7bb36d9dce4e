//! Student route group. Mounted by the v2 group under `/student`.

use crate::auth::{group_required, login_required, GroupGuard, PermissionMeta, PermissionRegistry};
use crate::error::ConfigError;
use crate::handlers::{create_student, delete_student, get_student, get_students, search, update_student};
use crate::state::AppState;
use axum::{
    http::Method,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

pub const DELETE_STUDENT: PermissionMeta = PermissionMeta::new("学生", "删除学生");

/// Declare this group's permissions for routes mounted at `mount`.
pub fn register_permissions(registry: &mut PermissionRegistry, mount: &str) -> Result<(), ConfigError> {
    registry.register(DELETE_STUDENT, Method::DELETE, format!("{mount}/:id"))
}

pub fn student_routes(state: AppState) -> Router {
    let login = from_fn_with_state(state.clone(), login_required);
    let delete_guard = from_fn_with_state(GroupGuard::new(state.clone(), DELETE_STUDENT), group_required);
    Router::new()
        .route(
            "/",
            get(get_students).merge(post(create_student).route_layer(login.clone())),
        )
        .route("/search", get(search))
        .route(
            "/:id",
            get(get_student)
                .merge(put(update_student).route_layer(login))
                .merge(delete(delete_student).route_layer(delete_guard)),
        )
        .with_state(state)
}
