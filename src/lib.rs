//! Student REST resource: create, read, update, and delete students over HTTP.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_student_table};
pub use model::{Sort, Student, StudentFields};
pub use routes::{app, common_routes, docs_routes, student_routes, ApiDoc};
pub use service::StudentService;
pub use state::AppState;
pub use store::{MemoryStudentStore, PgStudentStore, StudentStore};
