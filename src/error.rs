//! Typed errors and HTTP mapping.

use crate::response::{error_alert_headers, error_body};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("invalid store kind: '{0}' (expected postgres or memory)")]
    StoreKind(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {message}")]
    Validation {
        message: String,
        /// Names of the fields that failed, in declaration order.
        fields: Vec<&'static str>,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store: {0}")]
    Store(String),
    /// Client error that also carries an alert for the front end (entity name + i18n error key).
    #[error("{message}")]
    BadRequestAlert {
        message: String,
        app_name: Arc<str>,
        entity_name: &'static str,
        error_key: &'static str,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn bad_request_alert(
        app_name: &Arc<str>,
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        AppError::BadRequestAlert {
            message: message.into(),
            app_name: Arc::clone(app_name),
            entity_name,
            error_key,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequestAlert { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation { .. } => "validation_error",
            AppError::Db(sqlx::Error::RowNotFound) => "not_found",
            AppError::Db(_) => "database_error",
            AppError::Store(_) => "store_error",
            AppError::BadRequestAlert { error_key, .. } => *error_key,
            AppError::BadRequest(_) => "bad_request",
            AppError::PayloadTooLarge(_) => "payload_too_large",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let details = match &self {
            AppError::Validation { fields, .. } => Some(serde_json::Value::Array(
                fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "objectName": "student",
                            "field": f,
                            "message": "must not be null",
                        })
                    })
                    .collect(),
            )),
            _ => None,
        };
        let body = error_body(self.code(), self.to_string(), details);

        match &self {
            AppError::BadRequestAlert {
                app_name,
                entity_name,
                error_key,
                ..
            } => (
                status,
                error_alert_headers(app_name, entity_name, error_key),
                Json(body),
            )
                .into_response(),
            _ => (status, Json(body)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        let v = AppError::Validation {
            message: "firstname must not be null".into(),
            fields: vec!["firstname"],
        };
        assert_eq!(v.status(), StatusCode::BAD_REQUEST);
        let app: Arc<str> = Arc::from("studentApp");
        let a = AppError::bad_request_alert(&app, "Invalid id", "student", "idnull");
        assert_eq!(a.status(), StatusCode::BAD_REQUEST);
        assert_eq!(a.code(), "idnull");
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_body_maps_to_413() {
        let e = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(e.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(e.code(), "payload_too_large");
    }

    #[test]
    fn not_found_has_empty_body() {
        let resp = AppError::NotFound("42".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(axum::http::header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn row_not_found_is_404_other_db_errors_500() {
        assert_eq!(AppError::Db(sqlx::Error::RowNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
