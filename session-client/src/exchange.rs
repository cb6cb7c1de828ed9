//! Turning an authorization code into a profile from the client side.

use std::time::Duration;

use async_trait::async_trait;
use line_auth::http::ClientBuilder;
use line_auth::UserProfile;
use log::*;
use rand::Rng;
use serde::Deserialize;

use crate::error::{Error, ErrorKind};

const BACKEND_TIMEOUT: Duration = Duration::from_secs(10);
const CALLBACK_PATH: &str = "/api/lineCallback";

const PLACEHOLDER_PICTURE_URL: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 200 200\"%3E%3Ccircle cx=\"100\" cy=\"100\" r=\"100\" fill=\"%2300B900\"/%3E%3Ctext x=\"100\" y=\"120\" font-size=\"40\" fill=\"white\" text-anchor=\"middle\" font-family=\"Arial\"%3ELINE%3C/text%3E%3C/svg%3E";
const PLACEHOLDER_STATUS_MESSAGE: &str = "Using CO2X Platform";

#[async_trait]
pub trait CodeExchanger: Send + Sync {
    async fn exchange(&self, code: &str) -> Result<UserProfile, Error>;
}

/// Pick the exchanger for `backend_url`.
///
/// Only an empty URL selects the placeholder. A configured backend that fails
/// is reported as a failure, never papered over with a demo profile.
pub fn exchanger_for(backend_url: &str) -> Result<Box<dyn CodeExchanger>, Error> {
    if backend_url.trim().is_empty() {
        warn!("LINE_BACKEND_URL is not configured; logins will receive a placeholder profile");
        Ok(Box::new(PlaceholderExchanger))
    } else {
        Ok(Box::new(BackendClient::new(backend_url)?))
    }
}

/// Exchanges codes through the backend's `/api/lineCallback` endpoint.
pub struct BackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CallbackResponse {
    user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http_client = ClientBuilder::new().with_timeout(BACKEND_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl CodeExchanger for BackendClient {
    async fn exchange(&self, code: &str) -> Result<UserProfile, Error> {
        let url = format!("{}{}", self.base_url, CALLBACK_PATH);
        debug!("Exchanging authorization code through {url}");

        let response = self
            .http_client
            .get(&url)
            .query(&[("code", code)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach backend: {:?}", e);
                Error::with_source(
                    ErrorKind::Backend(
                        "Failed to exchange authorization code with backend".to_string(),
                    ),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = backend_error_message(status, &body);
            warn!("Backend rejected the code exchange: {message}");
            return Err(Error::new(ErrorKind::Backend(message)));
        }

        let body: CallbackResponse = response.json().await.map_err(|e| {
            Error::with_source(
                ErrorKind::Backend("No user data returned from backend".to_string()),
                e,
            )
        })?;

        body.user.ok_or_else(|| {
            Error::new(ErrorKind::Backend(
                "No user data returned from backend".to_string(),
            ))
        })
    }
}

/// The backend's `{ "error": ... }` message when there is one, otherwise the
/// status reason, otherwise the bare status code.
fn backend_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error: Some(error) }) if !error.is_empty() => error,
        Ok(_) => format!("Backend error: {}", status.as_u16()),
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Backend error: {}", status.as_u16())),
    }
}

/// Demo stand-in used when no backend is configured. Makes no network call.
pub struct PlaceholderExchanger;

#[async_trait]
impl CodeExchanger for PlaceholderExchanger {
    async fn exchange(&self, _code: &str) -> Result<UserProfile, Error> {
        let user = placeholder_profile();
        info!("Created placeholder profile {}", user.user_id);
        Ok(user)
    }
}

fn placeholder_profile() -> UserProfile {
    UserProfile {
        user_id: format!("U{}", random_base36(8)),
        display_name: format!("LINE User {}", random_base36(5).to_uppercase()),
        picture_url: Some(PLACEHOLDER_PICTURE_URL.to_string()),
        status_message: Some(PLACEHOLDER_STATUS_MESSAGE.to_string()),
    }
}

fn random_base36(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_backend_client_returns_user() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/lineCallback")
            .match_query(Matcher::UrlEncoded("code".into(), "abc/123".into()))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"success": true, "user": {"userId": "U1", "displayName": "Alice"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = BackendClient::new(&format!("{}/", server.url())).unwrap();
        let user = client.exchange("abc/123").await.unwrap();

        assert_eq!(user.user_id, "U1");
        assert_eq!(user.display_name, "Alice");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_backend_client_surfaces_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/lineCallback")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(
                json!({
                    "error": "Failed to exchange code for token: {\"error\":\"invalid_grant\"}",
                    "timestamp": "2026-01-01T00:00:00Z"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = BackendClient::new(&server.url()).unwrap();
        let err = client.exchange("used").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::Backend(
                "Failed to exchange code for token: {\"error\":\"invalid_grant\"}".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_backend_client_falls_back_to_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/lineCallback")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body(json!({"message": "bad gateway"}).to_string())
            .create_async()
            .await;

        let client = BackendClient::new(&server.url()).unwrap();
        let err = client.exchange("abc").await.unwrap_err();

        assert_eq!(err.message(), "Backend error: 502");
    }

    #[tokio::test]
    async fn test_backend_client_missing_user() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/lineCallback")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"success": true}).to_string())
            .create_async()
            .await;

        let client = BackendClient::new(&server.url()).unwrap();
        let err = client.exchange("abc").await.unwrap_err();

        assert_eq!(err.message(), "No user data returned from backend");
    }

    #[test]
    fn test_backend_error_message_for_non_json_body() {
        assert_eq!(
            backend_error_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "<html>"),
            "Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_placeholder_profile_shape() {
        let user = PlaceholderExchanger.exchange("ignored").await.unwrap();

        assert!(user.user_id.starts_with('U'));
        assert!(user.display_name.starts_with("LINE User "));
        assert!(user
            .picture_url
            .as_deref()
            .unwrap()
            .starts_with("data:image/svg+xml"));
        assert_eq!(user.status_message.as_deref(), Some("Using CO2X Platform"));
    }
}
