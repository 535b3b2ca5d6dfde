//! Runtime settings from environment variables (after `dotenvy::dotenv()`).

use crate::error::ConfigError;
use crate::sql::TableRef;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/student_api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_APP_NAME: &str = "studentApp";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Which persistence backend the server runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::StoreKind(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Prefix of the alert headers (`X-<app_name>-alert`).
    pub app_name: String,
    pub table: TableRef,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub store: StoreKind,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable lookup. Unset or blank variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr: SocketAddr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?;
        let app_name = get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.into());
        let table = TableRef::new(
            get("STUDENT_SCHEMA").unwrap_or_else(|| "public".into()),
            get("STUDENT_TABLE").unwrap_or_else(|| "student".into()),
        );
        let max_connections: u32 = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), Some(5))?;
        let body_limit_bytes: usize = parse_or(
            "BODY_LIMIT_BYTES",
            get("BODY_LIMIT_BYTES"),
            Some(DEFAULT_BODY_LIMIT_BYTES),
        )?;
        let store = match get("STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };

        Ok(Settings {
            database_url,
            bind_addr,
            app_name,
            table,
            max_connections,
            body_limit_bytes,
            store,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { name, value: v }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.app_name, "studentApp");
        assert_eq!(s.table.qualified(), r#""public"."student""#);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.store, StoreKind::Postgres);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("STORE", "Memory"),
            ("STUDENT_SCHEMA", "school"),
            ("DB_MAX_CONNECTIONS", " 12 "),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.table.schema, "school");
        assert_eq!(s.max_connections, 12);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = settings(&[("APP_NAME", "  ")]).unwrap();
        assert_eq!(s.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            settings(&[("DB_MAX_CONNECTIONS", "many")]),
            Err(ConfigError::Invalid { name: "DB_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            settings(&[("STORE", "redis")]),
            Err(ConfigError::StoreKind(_))
        ));
    }
}
