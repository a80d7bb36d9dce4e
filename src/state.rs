//! Shared application state for all routes. Built once at startup, never mutated.

use crate::auth::{JwtService, PermissionRegistry};
use crate::config::Settings;
use crate::service::StudentService;
use crate::store::{PermissionStore, StudentStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub students: StudentService,
    pub grants: Arc<dyn PermissionStore>,
    pub registry: Arc<PermissionRegistry>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        settings: Arc<Settings>,
        students: Arc<dyn StudentStore>,
        grants: Arc<dyn PermissionStore>,
        registry: PermissionRegistry,
    ) -> Self {
        let jwt = JwtService::new(&settings.secret_key, settings.token_expires_in);
        AppState {
            settings,
            students: StudentService::new(students),
            grants,
            registry: Arc::new(registry),
            jwt: Arc::new(jwt),
        }
    }
}
