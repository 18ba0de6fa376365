use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Domain errors surfaced by the auth slice. Everything that crosses the
/// HTTP boundary goes through the single `IntoResponse` translator below.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Please provide email and password")]
    MissingCredentials,

    /// Unknown email and wrong password collapse into this one variant so
    /// the response can never distinguish the two.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This email is already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Database(sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // Postgres unique_violation on the users email index becomes a
        // clean domain error instead of a leaked driver message.
        if let sqlx::Error::Database(ref db) = e {
            if db.code().as_deref() == Some("23505") {
                return ApiError::DuplicateEmail;
            }
        }
        ApiError::Database(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "fail", "message": msg }),
            ),
            ApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "fail", "message": self.to_string() }),
            ),
            // Fixed body: identical for unknown email and wrong password.
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid email or password" }),
            ),
            ApiError::DuplicateEmail => (
                StatusCode::CONFLICT,
                json!({ "status": "fail", "message": self.to_string() }),
            ),
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": "error", "message": "Something went wrong" }),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": "error", "message": "Something went wrong" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    /// Stands in for a Postgres driver error with a given SQLSTATE code.
    #[derive(Debug)]
    struct StubDbError(&'static str);

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "stub database error, code {}", self.0)
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "stub database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError(code)))
    }

    #[test]
    fn unique_violation_becomes_duplicate_email() {
        let err = ApiError::from(db_error("23505"));
        assert!(matches!(err, ApiError::DuplicateEmail));
    }

    #[test]
    fn other_database_codes_stay_database_errors() {
        let err = ApiError::from(db_error("23503"));
        assert!(matches!(err, ApiError::Database(_)));
    }

    #[test]
    fn non_database_sqlx_errors_stay_database_errors() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Database(_)));
    }

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_message() {
        let (status, body) = body_of(ApiError::Validation("Password too short".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Password too short");
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn missing_credentials_is_400() {
        let (status, body) = body_of(ApiError::MissingCredentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide email and password");
    }

    #[tokio::test]
    async fn invalid_credentials_body_is_fixed() {
        let (status, body) = body_of(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "message": "Invalid email or password" }));
    }

    #[tokio::test]
    async fn duplicate_email_is_409() {
        let (status, body) = body_of(ApiError::DuplicateEmail).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "This email is already registered");
    }

    #[tokio::test]
    async fn internal_errors_never_leak_details() {
        let (status, body) =
            body_of(ApiError::Internal(anyhow::anyhow!("secret connection string"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Something went wrong");
        assert!(!body.to_string().contains("secret"));
    }
}
