//! Database bootstrap: create the database if missing, then the student schema and table.

use crate::error::{AppError, ConfigError};
use crate::sql::{self, quoted, TableRef};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Create schema and student table if they do not exist. Idempotent.
pub async fn ensure_student_table(pool: &PgPool, table: &TableRef) -> Result<(), AppError> {
    let create_schema = format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&table.schema));
    tracing::debug!(sql = %create_schema, "migration");
    sqlx::query(&create_schema).execute(pool).await?;

    let ddl = sql::create_table(table);
    tracing::debug!(sql = %ddl, "migration");
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = %table.qualified(), "student table ready");
    Ok(())
}

/// Create the database named in `database_url` if it does not exist, connecting to the
/// `postgres` maintenance database on the same server. Runs before the main pool is built.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = maintenance_options(database_url)? else {
        return Ok(());
    };
    let mut conn = admin.connect().await?;
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` database on the server of `database_url`, paired with the
/// target database name. `None` when the URL names no database or names `postgres` itself.
fn maintenance_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        name: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_maintenance_database() {
        let (admin, name) = maintenance_options("postgres://u:p@localhost:5432/student_api")
            .unwrap()
            .unwrap();
        assert_eq!(name, "student_api");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn skips_when_url_names_postgres() {
        assert!(maintenance_options("postgres://localhost/postgres")
            .unwrap()
            .is_none());
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        assert!(matches!(
            maintenance_options("not a url"),
            Err(ConfigError::Invalid { name: "DATABASE_URL", .. })
        ));
    }
}
