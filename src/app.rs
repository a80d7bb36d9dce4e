//! Startup: logging, stores, permission sync, and the assembled router.

use crate::config::Settings;
use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::request_log::log_request;
use crate::routes::{apidoc_routes, cms_routes, common_routes, permission_registry, v2_routes, CMS_PREFIX, V2_PREFIX};
use crate::state::AppState;
use crate::store::{MemoryStore, PermissionStore, PgStore, StudentStore};
use axum::{middleware::from_fn_with_state, Router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(settings: &Settings) {
    let level = settings.log.level.as_directive();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("student_api={level},tower_http={level}"))),
        )
        .init();
}

/// Connect the configured store, declare permissions and sync them.
pub async fn build_state(settings: Settings) -> Result<AppState, AppError> {
    let settings = Arc::new(settings);
    let registry = permission_registry()?;

    let (students, grants): (Arc<dyn StudentStore>, Arc<dyn PermissionStore>) = match &settings.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(url)
                .await?;
            apply_migrations(&pool).await?;
            let store = Arc::new(PgStore::new(pool));
            (store.clone(), store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let store = Arc::new(MemoryStore::new());
            (store.clone(), store)
        }
    };

    grants.sync(&registry.keys()).await?;
    for entry in registry.entries() {
        tracing::debug!(module = entry.meta.module, permission = entry.meta.name, method = %entry.method, path = %entry.path, "permission registered");
    }
    Ok(AppState::new(settings, students, grants, registry))
}

/// Every route group under its prefix, wrapped in body limit, CORS and request logging.
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(apidoc_routes())
        .nest(V2_PREFIX, v2_routes(state.clone()))
        .nest(CMS_PREFIX, cms_routes(state))
        .layer(from_fn_with_state(settings.clone(), log_request))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
}
