//! Permission administration: list registered permissions, grant and revoke them per group.

use crate::auth::{CurrentUser, PermissionKey};
use crate::config::codemsg;
use crate::error::{AppError, ErrorBody};
use crate::extractors::ValidatedJson;
use crate::response::{success, SuccessBody};
use crate::service::{FieldRule, Schema};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct PermissionGrant {
    pub group: String,
    pub module: String,
    pub name: String,
}

impl Schema for PermissionGrant {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::string("group").required().max_length(60),
            FieldRule::string("module").required().max_length(50),
            FieldRule::string("name").required().max_length(60),
        ];
        RULES
    }
}

/// Registered permissions keyed by module name.
#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionsByModule(pub BTreeMap<String, Vec<PermissionKey>>);

impl PermissionGrant {
    /// The permission, if the registry declares it.
    fn registered_key(&self, state: &AppState) -> Result<PermissionKey, AppError> {
        if !state.registry.contains(&self.module, &self.name) {
            return Err(AppError::NotFound(format!("permission {}/{}", self.module, self.name)));
        }
        Ok(PermissionKey {
            module: self.module.clone(),
            name: self.name.clone(),
        })
    }
}

/// Registered permissions grouped by module.
#[utoipa::path(
    get,
    path = "/cms/admin/permission",
    responses(
        (status = 200, body = PermissionsByModule),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn list_permissions(State(state): State<AppState>) -> Json<PermissionsByModule> {
    Json(PermissionsByModule(state.registry.by_module()))
}

/// Grant a registered permission to a group.
#[utoipa::path(
    post,
    path = "/cms/admin/permission/dispatch",
    request_body = PermissionGrant,
    responses(
        (status = 201, description = "code 15", body = SuccessBody),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn dispatch_permission(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    ValidatedJson(grant): ValidatedJson<PermissionGrant>,
) -> Result<impl IntoResponse, AppError> {
    let key = grant.registered_key(&state)?;
    state.grants.grant(&grant.group, &key).await?;
    tracing::info!(admin = %admin.sub, group = %grant.group, module = %key.module, permission = %key.name, "permission dispatched");
    Ok(success(&state.settings.codes, codemsg::PERMISSION_DISPATCHED))
}

/// Revoke a group's grant.
#[utoipa::path(
    post,
    path = "/cms/admin/permission/remove",
    request_body = PermissionGrant,
    responses(
        (status = 201, description = "code 16", body = SuccessBody),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn remove_permission(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    ValidatedJson(grant): ValidatedJson<PermissionGrant>,
) -> Result<impl IntoResponse, AppError> {
    let key = grant.registered_key(&state)?;
    if !state.grants.revoke(&grant.group, &key).await? {
        return Err(AppError::NotFound(format!(
            "grant of {}/{} to {}",
            key.module, key.name, grant.group
        )));
    }
    tracing::info!(admin = %admin.sub, group = %grant.group, module = %key.module, permission = %key.name, "permission removed");
    Ok(success(&state.settings.codes, codemsg::PERMISSION_REMOVED))
}
