//! Router assembly.

mod common;
mod docs;
mod student;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use student::student_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: common routes, OpenAPI document, and `/api/students`, with
/// request tracing and a request body limit. Axum's own 2 MiB extractor limit is
/// disabled so `body_limit_bytes` is the only cap, above or below that default.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .nest("/api", student_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
