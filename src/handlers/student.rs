//! Student CRUD handlers: create, update, list, read, delete.

use crate::error::AppError;
use crate::model::{Sort, Student, ENTITY_NAME};
use crate::response::{entity_created_headers, entity_deleted_headers, entity_updated_headers};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn parse_id(id_str: &str) -> Result<u64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// Unwrap a JSON body. A body over the size limit is a 413; any other rejection
/// (bad syntax, wrong types, wrong content type) is a 400.
fn student_body(payload: Result<Json<Student>, JsonRejection>) -> Result<Student, AppError> {
    payload.map(|Json(student)| student).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })
}

fn stored_id(student: &Student) -> Result<u64, AppError> {
    student
        .id
        .ok_or_else(|| AppError::Store("stored student has no id".into()))
}

/// `POST /api/students`: create a new student.
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "student",
    request_body = Student,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Id already set, required field missing, or malformed body"),
        (status = 413, description = "Body over the configured size limit")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let student = student_body(payload)?;
    let fields = RequestValidator::validate(&student)?;
    if student.id.is_some() {
        return Err(AppError::bad_request_alert(
            &state.app_name,
            "A new student cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }
    let saved = state.students.save(None, &fields).await?;
    let id = stored_id(&saved)?;
    tracing::info!(id, "student created");
    Ok((
        StatusCode::CREATED,
        entity_created_headers(&state.app_name, ENTITY_NAME, id),
        Json(saved),
    ))
}

/// `PUT /api/students`: replace an existing student. The id travels in the body.
#[utoipa::path(
    put,
    path = "/api/students",
    tag = "student",
    request_body = Student,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Id missing, required field missing, or malformed body"),
        (status = 413, description = "Body over the configured size limit")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let student = student_body(payload)?;
    let fields = RequestValidator::validate(&student)?;
    let Some(id) = student.id else {
        return Err(AppError::bad_request_alert(
            &state.app_name,
            "Invalid id",
            ENTITY_NAME,
            "idnull",
        ));
    };
    let saved = state.students.save(Some(id), &fields).await?;
    let saved_id = stored_id(&saved)?;
    if saved_id != id {
        tracing::info!(requested = id, id = saved_id, "no student to replace, stored as new record");
    } else {
        tracing::info!(id, "student updated");
    }
    Ok((
        StatusCode::OK,
        entity_updated_headers(&state.app_name, ENTITY_NAME, saved_id),
        Json(saved),
    ))
}

/// `GET /api/students?sort=property,direction`: all students in the requested order.
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "student",
    params(
        ("sort" = Option<String>, Query, description = "property(,property)*(,asc|desc); may be repeated")
    ),
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 400, description = "Unknown sort property")
    )
)]
pub async fn get_all_students(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let sort = Sort::parse(
        params
            .iter()
            .filter(|(k, _)| k == "sort")
            .map(|(_, v)| v.as_str()),
    )?;
    let students = state.students.find_all(&sort).await?;
    Ok(Json(students))
}

/// `GET /api/students/{id}`: one student, or 404 with an empty body.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "student",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this id")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    let student = state
        .students
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Json(student))
}

/// `DELETE /api/students/{id}`: remove a student. Succeeds whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "student",
    params(("id" = u64, Path, description = "Student id")),
    responses((status = 204, description = "Student deleted or already absent"))
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.students.delete(id).await?;
    tracing::info!(id, "student deleted");
    Ok((
        StatusCode::NO_CONTENT,
        entity_deleted_headers(&state.app_name, ENTITY_NAME, id),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_u64_range() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("9223372036854775807").unwrap(), i64::MAX as u64);
        assert!(matches!(parse_id("-1"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }
}
