//! PostgreSQL store over a sqlx pool.

use crate::error::AppError;
use crate::model::{Sort, Student, StudentFields};
use crate::sql::{self, TableRef};
use crate::store::StudentStore;
use async_trait::async_trait;
use sqlx::PgPool;

/// Row tuple in `sql::STUDENT_COLUMNS` order.
type StudentRow = (i64, String, String, String);

fn row_to_student((id, firstname, lastname, email): StudentRow) -> Student {
    // BIGSERIAL ids start at 1.
    Student::stored(
        id as u64,
        StudentFields {
            firstname,
            lastname,
            email,
        },
    )
}

/// Ids above i64::MAX cannot exist in a BIGINT column.
fn db_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
    table: TableRef,
}

impl PgStudentStore {
    pub fn new(pool: PgPool, table: TableRef) -> Self {
        PgStudentStore { pool, table }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn insert(&self, fields: &StudentFields) -> Result<Student, AppError> {
        let sql = sql::insert(&self.table);
        tracing::debug!(sql = %sql, params = ?fields, "query");
        let row: StudentRow = sqlx::query_as(&sql)
            .bind(&fields.firstname)
            .bind(&fields.lastname)
            .bind(&fields.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row_to_student(row))
    }

    async fn find_all(&self, sort: &Sort) -> Result<Vec<Student>, AppError> {
        let sql = sql::select_list(&self.table, sort);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<StudentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_student).collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Student>, AppError> {
        let Some(id) = db_id(id) else {
            return Ok(None);
        };
        let sql = sql::select_by_id(&self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<StudentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_student))
    }

    async fn replace(&self, id: u64, fields: &StudentFields) -> Result<Student, AppError> {
        let mut tx = self.pool.begin().await?;
        let updated: Option<StudentRow> = match db_id(id) {
            Some(db_id) => {
                let sql = sql::update(&self.table);
                tracing::debug!(sql = %sql, id = db_id, params = ?fields, "query (tx)");
                sqlx::query_as(&sql)
                    .bind(&fields.firstname)
                    .bind(&fields.lastname)
                    .bind(&fields.email)
                    .bind(db_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };
        let row = match updated {
            Some(row) => row,
            None => {
                let sql = sql::insert(&self.table);
                tracing::debug!(sql = %sql, params = ?fields, "query (tx), no row to replace");
                sqlx::query_as(&sql)
                    .bind(&fields.firstname)
                    .bind(&fields.lastname)
                    .bind(&fields.email)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };
        tx.commit().await?;
        Ok(row_to_student(row))
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), AppError> {
        let Some(id) = db_id(id) else {
            return Ok(());
        };
        let sql = sql::delete(&self.table);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let sql = sql::count(&self.table);
        tracing::debug!(sql = %sql, "query");
        let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ensure_student_table;
    use crate::model::{Direction, StudentProperty};

    fn fields(first: &str) -> StudentFields {
        StudentFields {
            firstname: first.into(),
            lastname: "Doe".into(),
            email: format!("{}@example.com", first.to_lowercase()),
        }
    }

    /// Needs a reachable server: `DATABASE_URL=postgres://... cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn round_trip_against_postgres() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = PgPool::connect(&url).await.unwrap();
        let table = TableRef::new("public", format!("student_store_test_{}", std::process::id()));
        ensure_student_table(&pool, &table).await.unwrap();
        let store = PgStudentStore::new(pool.clone(), table.clone());

        let ann = store.insert(&fields("Ann")).await.unwrap();
        let ann_id = ann.id.unwrap();
        let bob = store.insert(&fields("Bob")).await.unwrap();
        assert!(bob.id.unwrap() > ann_id);

        let replaced = store.replace(ann_id, &fields("Zoe")).await.unwrap();
        assert_eq!(replaced.id, Some(ann_id));
        let found = store.find_by_id(ann_id).await.unwrap().unwrap();
        assert_eq!(found.firstname.as_deref(), Some("Zoe"));

        // No row to update: the fields land under a fresh id in the same transaction.
        let merged = store.replace(i64::MAX as u64, &fields("Cid")).await.unwrap();
        assert_ne!(merged.id, Some(i64::MAX as u64));
        assert!(store.find_by_id(i64::MAX as u64).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 3);

        let sorted = store
            .find_all(&Sort::by(StudentProperty::Firstname, Direction::Desc))
            .await
            .unwrap();
        let names: Vec<_> = sorted.iter().filter_map(|s| s.firstname.as_deref()).collect();
        assert_eq!(names, vec!["Zoe", "Cid", "Bob"]);

        store.delete_by_id(ann_id).await.unwrap();
        store.delete_by_id(ann_id).await.unwrap();
        assert!(store.find_by_id(ann_id).await.unwrap().is_none());
        assert!(store.find_by_id(u64::MAX).await.unwrap().is_none());
        store.ping().await.unwrap();

        sqlx::query(&format!("DROP TABLE {}", table.qualified()))
            .execute(&pool)
            .await
            .unwrap();
    }
}
