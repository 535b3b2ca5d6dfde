//! Student resource routes. Mounted under `/api`.

use crate::handlers::student::{
    create_student, delete_student, get_all_students, get_student, update_student,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/students",
            get(get_all_students).post(create_student).put(update_student),
        )
        .route("/students/:id", get(get_student).delete(delete_student))
        .with_state(state)
}
