//! In-memory store: used by tests and when no database is configured.

use super::{PermissionStore, StudentStore};
use crate::auth::PermissionKey;
use crate::error::AppError;
use crate::model::{Student, StudentFields};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;

/// Bookkeeping timestamps of a stored row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowTimes {
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub delete_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
struct StudentRow {
    student: Student,
    times: RowTimes,
}

impl StudentRow {
    fn active(&self) -> Option<&Student> {
        self.times.delete_time.is_none().then_some(&self.student)
    }
}

#[derive(Default)]
struct StudentTable {
    last_id: i32,
    rows: BTreeMap<i32, StudentRow>,
}

#[derive(Default)]
struct PermissionTables {
    mounted: BTreeSet<PermissionKey>,
    grants: HashMap<String, BTreeSet<PermissionKey>>,
}

#[derive(Default)]
pub struct MemoryStore {
    students: RwLock<StudentTable>,
    permissions: RwLock<PermissionTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps of a stored row, active or not. None for unknown ids.
    pub async fn row_times(&self, id: i32) -> Option<RowTimes> {
        self.students.read().await.rows.get(&id).map(|r| r.times)
    }

    /// Rows held, including soft-deleted ones.
    pub async fn stored_rows(&self) -> usize {
        self.students.read().await.rows.len()
    }
}

fn write_fields(student: &mut Student, fields: &StudentFields) {
    student.name = fields.name.clone();
    student.parent = Some(fields.parent.clone());
    student.phone = fields.phone.clone();
    student.address = fields.address.clone();
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn get(&self, id: i32) -> Result<Option<Student>, AppError> {
        let table = self.students.read().await;
        Ok(table.rows.get(&id).and_then(StudentRow::active).cloned())
    }

    async fn list(&self) -> Result<Vec<Student>, AppError> {
        let table = self.students.read().await;
        Ok(table.rows.values().filter_map(StudentRow::active).cloned().collect())
    }

    async fn search(&self, q: &str) -> Result<Vec<Student>, AppError> {
        let table = self.students.read().await;
        Ok(table
            .rows
            .values()
            .filter_map(StudentRow::active)
            .filter(|s| s.name.contains(q))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: &StudentFields) -> Result<Student, AppError> {
        let mut table = self.students.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let mut student = Student {
            id,
            name: String::new(),
            parent: None,
            phone: None,
            address: None,
        };
        write_fields(&mut student, fields);
        let now = Utc::now();
        table.rows.insert(
            id,
            StudentRow {
                student: student.clone(),
                times: RowTimes {
                    create_time: now,
                    update_time: now,
                    delete_time: None,
                },
            },
        );
        Ok(student)
    }

    async fn update(&self, id: i32, fields: &StudentFields) -> Result<Option<Student>, AppError> {
        let mut table = self.students.write().await;
        let Some(row) = table.rows.get_mut(&id).filter(|r| r.times.delete_time.is_none()) else {
            return Ok(None);
        };
        write_fields(&mut row.student, fields);
        row.times.update_time = Utc::now();
        Ok(Some(row.student.clone()))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let mut table = self.students.write().await;
        match table.rows.get_mut(&id).filter(|r| r.times.delete_time.is_none()) {
            Some(row) => {
                row.times.delete_time = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn sync(&self, declared: &[PermissionKey]) -> Result<(), AppError> {
        let mut tables = self.permissions.write().await;
        tables.mounted = declared.iter().cloned().collect();
        Ok(())
    }

    async fn grant(&self, group: &str, permission: &PermissionKey) -> Result<(), AppError> {
        let mut tables = self.permissions.write().await;
        tables.grants.entry(group.to_string()).or_default().insert(permission.clone());
        Ok(())
    }

    async fn revoke(&self, group: &str, permission: &PermissionKey) -> Result<bool, AppError> {
        let mut tables = self.permissions.write().await;
        Ok(tables
            .grants
            .get_mut(group)
            .map(|held| held.remove(permission))
            .unwrap_or(false))
    }

    async fn is_granted(&self, groups: &[String], permission: &PermissionKey) -> Result<bool, AppError> {
        let tables = self.permissions.read().await;
        if !tables.mounted.contains(permission) {
            return Ok(false);
        }
        Ok(groups
            .iter()
            .filter_map(|g| tables.grants.get(g))
            .any(|held| held.contains(permission)))
    }
}
