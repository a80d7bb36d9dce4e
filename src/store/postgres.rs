//! PostgreSQL store over a sqlx pool.

use super::{PermissionStore, StudentStore};
use crate::auth::PermissionKey;
use crate::error::AppError;
use crate::model::{Student, StudentFields};
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn get(&self, id: i32) -> Result<Option<Student>, AppError> {
        let sql = sql::select_active_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Student>, AppError> {
        let sql = sql::select_active();
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn search(&self, q: &str) -> Result<Vec<Student>, AppError> {
        let sql = sql::search_active_by_name();
        let pattern = sql::like_contains(q);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, fields: &StudentFields) -> Result<Student, AppError> {
        let sql = sql::insert_student();
        tracing::debug!(sql = %sql, "query");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&fields.name)
            .bind(&fields.parent)
            .bind(&fields.phone)
            .bind(&fields.address)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(&self, id: i32, fields: &StudentFields) -> Result<Option<Student>, AppError> {
        let sql = sql::update_student();
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let locked: Option<(i32,)> = sqlx::query_as(sql::LOCK_ACTIVE_BY_ID)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.parent)
            .bind(&fields.phone)
            .bind(&fields.address)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(row))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        tracing::debug!(sql = %sql::SOFT_DELETE_BY_ID, id, "query");
        let mut tx = self.pool.begin().await?;
        let deleted: Option<(i32,)> = sqlx::query_as(sql::SOFT_DELETE_BY_ID)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for PgStore {
    async fn sync(&self, declared: &[PermissionKey]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(sql::UNMOUNT_ALL_PERMISSIONS).execute(&mut *tx).await?;
        for key in declared {
            sqlx::query(sql::MOUNT_PERMISSION)
                .bind(&key.module)
                .bind(&key.name)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::info!(count = declared.len(), "permissions synchronized");
        Ok(())
    }

    async fn grant(&self, group: &str, permission: &PermissionKey) -> Result<(), AppError> {
        sqlx::query(sql::GRANT_PERMISSION)
            .bind(group)
            .bind(&permission.module)
            .bind(&permission.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn revoke(&self, group: &str, permission: &PermissionKey) -> Result<bool, AppError> {
        let result = sqlx::query(sql::REVOKE_PERMISSION)
            .bind(group)
            .bind(&permission.module)
            .bind(&permission.name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_granted(&self, groups: &[String], permission: &PermissionKey) -> Result<bool, AppError> {
        if groups.is_empty() {
            return Ok(false);
        }
        let granted: bool = sqlx::query_scalar(sql::IS_GRANTED)
            .bind(&permission.module)
            .bind(&permission.name)
            .bind(groups)
            .fetch_one(&self.pool)
            .await?;
        Ok(granted)
    }
}
