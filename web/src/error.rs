use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use domain::error::{DomainErrorKind, Error as DomainError, InputErrorKind};
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Render `message` in the error envelope with `status`.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    /// Only the auth header kinds map to 401. Every other failure of the
    /// login flow, including missing server configuration, is a 400.
    fn status_code(&self) -> StatusCode {
        match &self.0.error_kind {
            DomainErrorKind::Input(InputErrorKind::MissingAuthHeader)
            | DomainErrorKind::Input(InputErrorKind::InvalidAuthHeader) => StatusCode::UNAUTHORIZED,
            DomainErrorKind::Input(InputErrorKind::MissingCode)
            | DomainErrorKind::External(_)
            | DomainErrorKind::Internal(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.message();

        match &self.0.error_kind {
            DomainErrorKind::Internal(_) => error!("{status}: {message} ({:?})", self.0.source),
            _ => warn!("{status}: {message}"),
        }

        error_response(status, message)
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use domain::error::InternalErrorKind;
    use domain::line_login;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_auth_header_is_401_envelope() {
        let err: Error = line_login::bearer_token(None).unwrap_err().into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing authorization header");
        assert!(DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_auth_header_is_401() {
        let err: Error = line_login::bearer_token(Some("Bearer ")).unwrap_err().into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid authorization header"
        );
    }

    #[tokio::test]
    async fn test_missing_configuration_is_400() {
        let err = Error(DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "LINE login is not configured"
        );
    }

    #[tokio::test]
    async fn test_client_build_failure_is_400() {
        let err = Error(DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to build HTTP client".to_string(),
            )),
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Failed to build HTTP client"
        );
    }

    #[test]
    fn test_error_body_serializes_rfc3339_timestamp() {
        let body = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(body["error"], "boom");
        assert!(DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }
}
