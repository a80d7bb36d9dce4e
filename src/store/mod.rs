//! Persistence seams: student records and group permission grants.

mod memory;
mod postgres;

pub use memory::{MemoryStore, RowTimes};
pub use postgres::PgStore;

use crate::auth::PermissionKey;
use crate::error::AppError;
use crate::model::{Student, StudentFields};
use async_trait::async_trait;

/// Student persistence. Every method sees active (not soft-deleted) records only.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// All active students ordered by id.
    async fn list(&self) -> Result<Vec<Student>, AppError>;

    /// Active students whose name contains `q` literally.
    async fn search(&self, q: &str) -> Result<Vec<Student>, AppError>;

    async fn create(&self, fields: &StudentFields) -> Result<Student, AppError>;

    /// Replace all writable fields. None when no active record has this id.
    async fn update(&self, id: i32, fields: &StudentFields) -> Result<Option<Student>, AppError>;

    /// Set the delete marker. False when no active record has this id.
    async fn soft_delete(&self, id: i32) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Group to permission grants, keyed by the permissions the registry declares.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Mount the declared permissions and unmount every other stored one.
    async fn sync(&self, declared: &[PermissionKey]) -> Result<(), AppError>;

    async fn grant(&self, group: &str, permission: &PermissionKey) -> Result<(), AppError>;

    /// False when the group did not hold the grant.
    async fn revoke(&self, group: &str, permission: &PermissionKey) -> Result<bool, AppError>;

    /// True when any of the groups holds a grant for a mounted permission.
    async fn is_granted(&self, groups: &[String], permission: &PermissionKey) -> Result<bool, AppError>;
}
