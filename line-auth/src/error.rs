//! Error types for the `line-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for line-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in line-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    AuthHeader(AuthHeaderErrorKind),
    Http(HttpErrorKind),
    Config,
}

/// Errors from the LINE OAuth flow.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    TokenExchangeFailed,
    ProfileFetchFailed,
    InvalidResponse,
}

/// Errors from reading an inbound `Authorization` header.
#[derive(Debug, PartialEq)]
pub enum AuthHeaderErrorKind {
    Missing,
    Invalid,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
}

impl Error {
    /// Human readable message suitable for returning to an end user.
    ///
    /// Uses the message of the source error when one is attached.
    pub fn message(&self) -> String {
        match &self.source {
            Some(source) => source.to_string(),
            None => match &self.error_kind {
                ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed) => {
                    "Failed to exchange code for token".to_string()
                }
                ErrorKind::OAuth(OAuthErrorKind::ProfileFetchFailed) => {
                    "Failed to fetch user profile".to_string()
                }
                ErrorKind::OAuth(OAuthErrorKind::InvalidResponse) => {
                    "Invalid response from LINE".to_string()
                }
                ErrorKind::AuthHeader(AuthHeaderErrorKind::Missing) => {
                    "Missing authorization header".to_string()
                }
                ErrorKind::AuthHeader(AuthHeaderErrorKind::Invalid) => {
                    "Invalid authorization header".to_string()
                }
                ErrorKind::Http(kind) => format!("HTTP error: {:?}", kind),
                ErrorKind::Config => "LINE login is not configured".to_string(),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error ({:?}): {}", kind, self.message()),
            ErrorKind::AuthHeader(kind) => {
                write!(f, "Authorization header error ({:?}): {}", kind, self.message())
            }
            ErrorKind::Http(kind) => write!(f, "HTTP error ({:?}): {}", kind, self.message()),
            ErrorKind::Config => write!(f, "Configuration error: {}", self.message()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// Requests map their failures to the OAuth step they belong to, so the only
// reqwest errors converted here come from building the client.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
        }
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create authorization header errors.
pub fn auth_header_error(kind: AuthHeaderErrorKind) -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::AuthHeader(kind),
    }
}

/// Helper function to create configuration errors.
pub fn config_error(message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config,
    }
}
