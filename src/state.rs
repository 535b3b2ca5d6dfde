//! Shared application state for all routes.

use crate::service::StudentService;
use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    /// Prefix for alert headers, e.g. `studentApp` gives `X-studentApp-alert`.
    pub app_name: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>, app_name: &str) -> Self {
        AppState {
            students: StudentService::new(store),
            app_name: Arc::from(app_name),
        }
    }
}
