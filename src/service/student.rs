//! Student service: the single seam between handlers and storage.

use crate::error::AppError;
use crate::model::{Sort, Student, StudentFields};
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

    /// Persist a student: insert when `id` is `None`, otherwise replace record `id`.
    pub async fn save(&self, id: Option<u64>, fields: &StudentFields) -> Result<Student, AppError> {
        match id {
            None => {
                tracing::debug!(?fields, "request to create student");
                self.store.insert(fields).await
            }
            Some(id) => {
                tracing::debug!(id, ?fields, "request to replace student");
                self.store.replace(id, fields).await
            }
        }
    }

    pub async fn find_all(&self, sort: &Sort) -> Result<Vec<Student>, AppError> {
        tracing::debug!(?sort, "request to get all students");
        self.store.find_all(sort).await
    }

    pub async fn find_one(&self, id: u64) -> Result<Option<Student>, AppError> {
        tracing::debug!(id, "request to get student");
        self.store.find_by_id(id).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        tracing::debug!(id, "request to delete student");
        self.store.delete_by_id(id).await
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.store.count().await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStudentStore;

    fn fields() -> StudentFields {
        StudentFields {
            firstname: "Grace".into(),
            lastname: "Hopper".into(),
            email: "grace@example.com".into(),
        }
    }

    #[tokio::test]
    async fn save_without_id_inserts_and_with_id_replaces() {
        let service = StudentService::new(Arc::new(MemoryStudentStore::new()));
        let created = service.save(None, &fields()).await.unwrap();
        let id = created.id.unwrap();

        let mut changed = fields();
        changed.lastname = "Murray".into();
        let updated = service.save(Some(id), &changed).await.unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(service.count().await.unwrap(), 1);

        let found = service.find_one(id).await.unwrap().unwrap();
        assert_eq!(found.lastname.as_deref(), Some("Murray"));
    }

    #[tokio::test]
    async fn delete_then_find_is_none() {
        let service = StudentService::new(Arc::new(MemoryStudentStore::new()));
        let id = service.save(None, &fields()).await.unwrap().id.unwrap();
        service.delete(id).await.unwrap();
        assert!(service.find_one(id).await.unwrap().is_none());
        assert!(service.find_all(&Sort::default()).await.unwrap().is_empty());
    }
}
