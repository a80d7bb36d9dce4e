//! Route-layer middleware: authenticate, then authorize, before extractors run.
//!
//! Each middleware stores the verified [`Claims`] in request extensions so handlers
//! can read them through [`CurrentUser`].

use super::{Claims, PermissionMeta};
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Verify the bearer token in `headers`.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::InvalidToken("expected a Bearer token".into()))?;
    state.jwt.verify(token.trim())
}

pub async fn login_required(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Members of the root group only.
pub async fn admin_required(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, request.headers())?;
    if !claims.in_group(&state.settings.root_group) {
        tracing::warn!(user = %claims.sub, path = %request.uri().path(), "admin route denied");
        return Err(AppError::Forbidden("administrator only".into()));
    }
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// State for [`group_required`]: the permission a route is registered under.
#[derive(Clone)]
pub struct GroupGuard {
    pub state: AppState,
    pub permission: PermissionMeta,
}

impl GroupGuard {
    pub fn new(state: AppState, permission: PermissionMeta) -> Self {
        GroupGuard { state, permission }
    }
}

/// Root group members pass; everyone else needs a group holding the grant.
pub async fn group_required(
    State(guard): State<GroupGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let state = &guard.state;
    let claims = authenticate(state, request.headers())?;
    if !claims.in_group(&state.settings.root_group) {
        let key = guard.permission.key();
        if !state.grants.is_granted(&claims.groups, &key).await? {
            tracing::warn!(
                user = %claims.sub,
                module = guard.permission.module,
                permission = guard.permission.name,
                "permission denied"
            );
            return Err(AppError::Forbidden(format!(
                "{}/{}",
                guard.permission.module, guard.permission.name
            )));
        }
    }
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Claims verified by one of the middleware above.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
