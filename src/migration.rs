//! Idempotent DDL for the student and permission tables, applied at startup.

use crate::error::AppError;
use sqlx::PgPool;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS student (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        parent VARCHAR(30) DEFAULT '未名',
        phone VARCHAR(50),
        address VARCHAR(5000),
        create_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        update_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        delete_time TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS student_active_idx ON student (id) WHERE delete_time IS NULL",
    r#"
    CREATE TABLE IF NOT EXISTS lin_permission (
        id SERIAL PRIMARY KEY,
        module VARCHAR(50) NOT NULL,
        name VARCHAR(60) NOT NULL,
        mount BOOLEAN NOT NULL DEFAULT TRUE,
        UNIQUE (module, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS lin_group_permission (
        group_name VARCHAR(60) NOT NULL,
        permission_id INTEGER NOT NULL REFERENCES lin_permission (id) ON DELETE CASCADE,
        PRIMARY KEY (group_name, permission_id)
    )
    "#,
];

/// Create tables and indexes if they do not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = DDL.len(), "schema migrations applied");
    Ok(())
}
