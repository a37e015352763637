// Error envelope returned by every handler and middleware
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::services::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Rejected input, with the offending field
    Invalid {
        field: &'static str,
        reason: String,
    },
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn kind(&self) -> (StatusCode, &'static str) {
        use ApiError::*;
        match self {
            BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Invalid { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            InternalServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
            ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().0
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().1
    }

    /// Text safe to hand back to the client.
    pub fn message(&self) -> String {
        match self {
            ApiError::Invalid { field, .. } => format!("Invalid field '{}'", field),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
        });
        if let ApiError::Invalid { field, reason } = self {
            let mut fields = serde_json::Map::new();
            fields.insert(field.to_string(), Value::String(reason.clone()));
            body["field_errors"] = Value::Object(fields);
        }
        body
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            DatabaseError::InvalidReference(msg) => ApiError::bad_request(msg),
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => {
                tracing::error!("Database pool timed out");
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::Migration(msg) => {
                tracing::error!("Migration error: {}", msg);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            AuthError::InsufficientRole { .. } => ApiError::forbidden(err.to_string()),
            AuthError::MissingIdentity
            | AuthError::Signing(_)
            | AuthError::MissingSecret
            | AuthError::InvalidTtl(_) => {
                tracing::error!("Authentication pipeline failure: {}", err);
                ApiError::internal_server_error(err.to_string())
            }
            AuthError::PasswordHash(msg) => {
                tracing::error!("Password verification failed: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Invalid {
            field: err.field,
            reason: err.reason,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn unauthorized_renders_json_body() {
        let response = ApiError::unauthorized("Missing auth_token cookie").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Missing auth_token cookie");
    }

    #[test]
    fn auth_errors_map_to_expected_statuses() {
        assert_eq!(ApiError::from(AuthError::TokenExpired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::MissingToken).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(AuthError::InsufficientRole { required: "SuperAdmin".into() }).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::MissingIdentity).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(AuthError::Signing("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_hide_internals() {
        let err = ApiError::from(DatabaseError::Sqlx(sqlx::Error::RowNotFound));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Database error occurred");

        let err = ApiError::from(DatabaseError::NotFound("Restaurant 4 not found".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_error_carries_field() {
        let err = ApiError::from(ValidationError::new("email", "Invalid email format"));
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["email"], "Invalid email format");
    }
}
