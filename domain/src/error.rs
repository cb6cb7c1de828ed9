//! Error types for the `domain` layer.
use line_auth::error::{
    AuthHeaderErrorKind, Error as LineAuthError, ErrorKind as LineAuthErrorKind, HttpErrorKind,
    OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` but never directly on `line-auth`;
/// it maps the `error_kind`s to HTTP status codes and the messages to the error body.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Input(InputErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Problems with what the caller sent.
#[derive(Debug, PartialEq)]
pub enum InputErrorKind {
    MissingCode,
    MissingAuthHeader,
    InvalidAuthHeader,
}

#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

/// Failures talking to LINE. The `String` payloads are the end-user message,
/// including the provider's error payload.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    TokenExchange(String),
    ProfileFetch(String),
    Other(String),
}

impl Error {
    pub(crate) fn new(error_kind: DomainErrorKind) -> Self {
        Error {
            source: None,
            error_kind,
        }
    }

    /// Human readable message returned to the end user.
    pub fn message(&self) -> String {
        match &self.error_kind {
            DomainErrorKind::Input(InputErrorKind::MissingCode) => {
                "Missing authorization code".to_string()
            }
            DomainErrorKind::Input(InputErrorKind::MissingAuthHeader) => {
                "Missing authorization header".to_string()
            }
            DomainErrorKind::Input(InputErrorKind::InvalidAuthHeader) => {
                "Invalid authorization header".to_string()
            }
            DomainErrorKind::Internal(InternalErrorKind::Config) => {
                "LINE login is not configured".to_string()
            }
            DomainErrorKind::Internal(InternalErrorKind::Other(message)) => message.clone(),
            DomainErrorKind::External(ExternalErrorKind::TokenExchange(message))
            | DomainErrorKind::External(ExternalErrorKind::ProfileFetch(message))
            | DomainErrorKind::External(ExternalErrorKind::Other(message)) => message.clone(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `line-auth` layer to the `domain` layer.
impl From<LineAuthError> for Error {
    fn from(err: LineAuthError) -> Self {
        let error_kind = match &err.error_kind {
            LineAuthErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed) => {
                DomainErrorKind::External(ExternalErrorKind::TokenExchange(err.message()))
            }
            LineAuthErrorKind::OAuth(OAuthErrorKind::ProfileFetchFailed) => {
                DomainErrorKind::External(ExternalErrorKind::ProfileFetch(err.message()))
            }
            LineAuthErrorKind::OAuth(OAuthErrorKind::InvalidResponse) => {
                DomainErrorKind::External(ExternalErrorKind::Other(err.message()))
            }
            LineAuthErrorKind::AuthHeader(AuthHeaderErrorKind::Missing) => {
                DomainErrorKind::Input(InputErrorKind::MissingAuthHeader)
            }
            LineAuthErrorKind::AuthHeader(AuthHeaderErrorKind::Invalid) => {
                DomainErrorKind::Input(InputErrorKind::InvalidAuthHeader)
            }
            // Errors that result from issues building the reqwest::Client instance. This
            // type of error will occur prior to any network calls being made.
            LineAuthErrorKind::Http(HttpErrorKind::BuilderFailed) => DomainErrorKind::Internal(
                InternalErrorKind::Other("Failed to build HTTP client".to_string()),
            ),
            LineAuthErrorKind::Config => DomainErrorKind::Internal(InternalErrorKind::Config),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use line_auth::error::{auth_header_error, oauth_error};

    #[test]
    fn test_token_exchange_error_keeps_provider_payload() {
        let err: Error = oauth_error(
            OAuthErrorKind::TokenExchangeFailed,
            "Failed to exchange code for token: {\"error\":\"invalid_grant\"}",
        )
        .into();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::TokenExchange(
                "Failed to exchange code for token: {\"error\":\"invalid_grant\"}".to_string()
            ))
        );
        assert!(err.message().contains("invalid_grant"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_auth_header_errors_become_input_errors() {
        let missing: Error = auth_header_error(AuthHeaderErrorKind::Missing).into();
        assert_eq!(
            missing.error_kind,
            DomainErrorKind::Input(InputErrorKind::MissingAuthHeader)
        );
        assert_eq!(missing.message(), "Missing authorization header");

        let invalid: Error = auth_header_error(AuthHeaderErrorKind::Invalid).into();
        assert_eq!(
            invalid.error_kind,
            DomainErrorKind::Input(InputErrorKind::InvalidAuthHeader)
        );
    }

    #[test]
    fn test_missing_code_message() {
        let err = Error::new(DomainErrorKind::Input(InputErrorKind::MissingCode));
        assert_eq!(err.message(), "Missing authorization code");
    }
}
