//! Response helpers: alert headers, Location header, and the error envelope.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(n), Ok(v)) => {
            headers.insert(n, v);
        }
        _ => tracing::warn!(header = %name, value = %value, "skipping header with invalid name or value"),
    }
}

/// Alert headers for a successful change: `X-<app>-alert: <app>.<entity>.<action>` and `X-<app>-params: <param>`.
pub fn entity_alert_headers(app_name: &str, entity_name: &str, action: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert_header(
        &mut headers,
        &format!("x-{}-alert", app_name),
        &format!("{}.{}.{}", app_name, entity_name, action),
    );
    insert_header(&mut headers, &format!("x-{}-params", app_name), param);
    headers
}

pub fn entity_created_headers(app_name: &str, entity_name: &str, id: u64) -> HeaderMap {
    let mut headers = entity_alert_headers(app_name, entity_name, "created", &id.to_string());
    insert_header(
        &mut headers,
        header::LOCATION.as_str(),
        &format!("/api/{}s/{}", entity_name, id),
    );
    headers
}

pub fn entity_updated_headers(app_name: &str, entity_name: &str, id: u64) -> HeaderMap {
    entity_alert_headers(app_name, entity_name, "updated", &id.to_string())
}

pub fn entity_deleted_headers(app_name: &str, entity_name: &str, id: u64) -> HeaderMap {
    entity_alert_headers(app_name, entity_name, "deleted", &id.to_string())
}

/// Failure alert headers: `X-<app>-error: error.<key>` and `X-<app>-params: <entity>`.
pub fn error_alert_headers(app_name: &str, entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert_header(
        &mut headers,
        &format!("x-{}-error", app_name),
        &format!("error.{}", error_key),
    );
    insert_header(&mut headers, &format!("x-{}-params", app_name), entity_name);
    headers
}

pub fn error_body(code: &str, message: String, details: Option<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "details": details
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_headers_carry_alert_and_location() {
        let h = entity_created_headers("studentApp", "student", 7);
        assert_eq!(h["x-studentapp-alert"], "studentApp.student.created");
        assert_eq!(h["x-studentapp-params"], "7");
        assert_eq!(h[header::LOCATION], "/api/students/7");
    }

    #[test]
    fn error_headers_use_error_key() {
        let h = error_alert_headers("studentApp", "student", "idexists");
        assert_eq!(h["x-studentapp-error"], "error.idexists");
        assert_eq!(h["x-studentapp-params"], "student");
    }

    #[test]
    fn invalid_app_name_is_skipped() {
        let h = entity_updated_headers("bad app", "student", 1);
        assert!(h.is_empty());
    }
}
