//! Student operations over a [`StudentStore`], raising `StudentNotFound` for missing ids.

use crate::error::AppError;
use crate::model::{Student, StudentFields, StudentIn};
use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        StudentService { store }
    }

    pub async fn get(&self, id: i32) -> Result<Student, AppError> {
        self.store.get(id).await?.ok_or(AppError::StudentNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        self.store.list().await
    }

    pub async fn search(&self, q: &str) -> Result<Vec<Student>, AppError> {
        self.store.search(q).await
    }

    pub async fn create(&self, body: StudentIn) -> Result<Student, AppError> {
        self.store.create(&StudentFields::from(body)).await
    }

    /// Replace every writable field of an active student.
    pub async fn update(&self, id: i32, body: StudentIn) -> Result<Student, AppError> {
        self.store
            .update(id, &StudentFields::from(body))
            .await?
            .ok_or(AppError::StudentNotFound(id))
    }

    /// Soft delete: the row stays stored with its delete marker set.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.store.soft_delete(id).await? {
            Ok(())
        } else {
            Err(AppError::StudentNotFound(id))
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
