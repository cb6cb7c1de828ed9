//! Error types for the session client.
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// No LINE channel id is configured, so no authorize URL can be built.
    NotConfigured,
    /// A configured URL or client setting was rejected. Carries the reason.
    Config(String),
    /// The `state` echoed back by LINE does not match the stored nonce.
    CsrfMismatch,
    MissingCode,
    InvalidRedirectUrl,
    /// The backend refused or failed the code exchange. Carries the message
    /// shown to the user.
    Backend(String),
    Storage,
}

impl Error {
    pub(crate) fn new(error_kind: ErrorKind) -> Self {
        Error {
            source: None,
            error_kind,
        }
    }

    pub(crate) fn with_source(
        error_kind: ErrorKind,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Error {
            source: Some(source.into()),
            error_kind,
        }
    }

    /// Message suitable for showing to the end user.
    pub fn message(&self) -> String {
        match &self.error_kind {
            ErrorKind::NotConfigured => {
                "LINE authentication is not configured. Please set the LINE_CHANNEL_ID environment variable.".to_string()
            }
            ErrorKind::Config(message) => message.clone(),
            ErrorKind::CsrfMismatch => "State mismatch - possible CSRF attack".to_string(),
            ErrorKind::MissingCode => "No authorization code received from LINE".to_string(),
            ErrorKind::InvalidRedirectUrl => "Could not parse the redirect URL".to_string(),
            ErrorKind::Backend(message) => message.clone(),
            ErrorKind::Storage => "Failed to access session storage".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Storage, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Storage, err)
    }
}

// Building the authorize URL or the HTTP client can only fail on bad configuration.
impl From<line_auth::Error> for Error {
    fn from(err: line_auth::Error) -> Self {
        Error::with_source(ErrorKind::Config(err.message()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_user_message() {
        let err = Error::new(ErrorKind::CsrfMismatch);
        assert_eq!(err.to_string(), "State mismatch - possible CSRF attack");

        let err = Error::new(ErrorKind::Backend("Backend error: 502".to_string()));
        assert_eq!(err.to_string(), "Backend error: 502");
    }

    #[test]
    fn test_io_errors_are_storage_errors() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.error_kind, ErrorKind::Storage);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_line_auth_errors_keep_their_message() {
        let err: Error = line_auth::error::config_error("Invalid authorize URL: empty host").into();

        assert_eq!(
            err.error_kind,
            ErrorKind::Config("Invalid authorize URL: empty host".to_string())
        );
        assert_eq!(err.to_string(), "Invalid authorize URL: empty host");
    }
}
