//! Permission metadata and the registry that route groups declare into.

use crate::error::ConfigError;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Declared on a route: which module and named action it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermissionMeta {
    pub module: &'static str,
    pub name: &'static str,
}

impl PermissionMeta {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        PermissionMeta { module, name }
    }

    pub fn key(&self) -> PermissionKey {
        PermissionKey {
            module: self.module.to_string(),
            name: self.name.to_string(),
        }
    }
}

/// Owned permission identity, as stored and as carried in admin requests.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct PermissionKey {
    pub module: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct PermissionEntry {
    pub meta: PermissionMeta,
    pub method: Method,
    /// Full mounted route path, e.g. `/v2/student/:id`.
    pub path: String,
}

/// Every permission-guarded route in the application.
#[derive(Clone, Debug, Default)]
pub struct PermissionRegistry {
    entries: Vec<PermissionEntry>,
}

impl PermissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A permission may guard one route only.
    pub fn register(&mut self, meta: PermissionMeta, method: Method, path: impl Into<String>) -> Result<(), ConfigError> {
        if self.contains(meta.module, meta.name) {
            return Err(ConfigError::DuplicatePermission {
                module: meta.module.to_string(),
                name: meta.name.to_string(),
            });
        }
        self.entries.push(PermissionEntry {
            meta,
            method,
            path: path.into(),
        });
        Ok(())
    }

    pub fn entries(&self) -> &[PermissionEntry] {
        &self.entries
    }

    pub fn contains(&self, module: &str, name: &str) -> bool {
        self.entries.iter().any(|e| e.meta.module == module && e.meta.name == name)
    }

    pub fn keys(&self) -> Vec<PermissionKey> {
        self.entries.iter().map(|e| e.meta.key()).collect()
    }

    /// Permissions grouped by module, sorted by module name.
    pub fn by_module(&self) -> BTreeMap<String, Vec<PermissionKey>> {
        let mut out: BTreeMap<String, Vec<PermissionKey>> = BTreeMap::new();
        for e in &self.entries {
            out.entry(e.meta.module.to_string()).or_default().push(e.meta.key());
        }
        out
    }
}
