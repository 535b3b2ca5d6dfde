//! Storage contract for student records and its PostgreSQL and in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PgStudentStore;

use crate::error::AppError;
use crate::model::{Sort, Student, StudentFields};
use async_trait::async_trait;

/// Persistence for students. Every operation is atomic and visible to the next call.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Persist a new record under a fresh id. Ids increase and are never reused.
    async fn insert(&self, fields: &StudentFields) -> Result<Student, AppError>;

    async fn find_all(&self, sort: &Sort) -> Result<Vec<Student>, AppError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Student>, AppError>;

    /// Overwrite all fields of record `id`. When no such record exists the fields are
    /// persisted as a new record under a fresh id, which the returned student carries.
    async fn replace(&self, id: u64, fields: &StudentFields) -> Result<Student, AppError>;

    /// Remove record `id`. Removing a missing id is not an error.
    async fn delete_by_id(&self, id: u64) -> Result<(), AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
