//! CMS route group: permission administration for root group members.

use crate::auth::admin_required;
use crate::handlers::{dispatch_permission, list_permissions, remove_permission};
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

pub fn cms_routes(state: AppState) -> Router {
    Router::new()
        .route("/admin/permission", get(list_permissions))
        .route("/admin/permission/dispatch", post(dispatch_permission))
        .route("/admin/permission/remove", post(remove_permission))
        .route_layer(from_fn_with_state(state.clone(), admin_required))
        .with_state(state)
}
