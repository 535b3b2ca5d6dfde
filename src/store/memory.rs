//! In-memory store used by tests and `STORE=memory`.

use crate::error::AppError;
use crate::model::{Sort, Student, StudentFields};
use crate::store::StudentStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    last_id: u64,
    rows: BTreeMap<u64, StudentFields>,
}

impl Inner {
    fn insert(&mut self, fields: &StudentFields) -> Student {
        self.last_id += 1;
        let id = self.last_id;
        self.rows.insert(id, fields.clone());
        Student::stored(id, fields.clone())
    }
}

#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<T>(_: T) -> AppError {
        AppError::Store("student store lock poisoned".into())
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, fields: &StudentFields) -> Result<Student, AppError> {
        let mut inner = self.inner.write().map_err(Self::poisoned)?;
        Ok(inner.insert(fields))
    }

    async fn find_all(&self, sort: &Sort) -> Result<Vec<Student>, AppError> {
        let inner = self.inner.read().map_err(Self::poisoned)?;
        let mut out: Vec<Student> = inner
            .rows
            .iter()
            .map(|(id, fields)| Student::stored(*id, fields.clone()))
            .collect();
        out.sort_by(|a, b| sort.compare(a, b));
        Ok(out)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Student>, AppError> {
        let inner = self.inner.read().map_err(Self::poisoned)?;
        Ok(inner
            .rows
            .get(&id)
            .map(|fields| Student::stored(id, fields.clone())))
    }

    async fn replace(&self, id: u64, fields: &StudentFields) -> Result<Student, AppError> {
        let mut inner = self.inner.write().map_err(Self::poisoned)?;
        match inner.rows.get_mut(&id) {
            Some(row) => {
                *row = fields.clone();
                Ok(Student::stored(id, fields.clone()))
            }
            None => Ok(inner.insert(fields)),
        }
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), AppError> {
        let mut inner = self.inner.write().map_err(Self::poisoned)?;
        inner.rows.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let inner = self.inner.read().map_err(Self::poisoned)?;
        Ok(inner.rows.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let _guard = self.inner.read().map_err(Self::poisoned)?;
        Ok(())
    }
}
