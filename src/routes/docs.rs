//! OpenAPI document for the student resource.

use crate::handlers::student;
use crate::model::Student;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        student::create_student,
        student::update_student,
        student::get_all_students,
        student::get_student,
        student::delete_student,
    ),
    components(schemas(Student)),
    tags((name = "student", description = "Student CRUD resource"))
)]
pub struct ApiDoc;

async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /v3/api-docs.
pub fn docs_routes() -> Router {
    Router::new().route("/v3/api-docs", get(api_docs))
}
