//! LINE Login provider implementation.

use async_trait::async_trait;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::token::{TokenResponse, Tokens};
use crate::oauth::{AuthorizationRequest, CsrfState, Endpoints, ProviderKind};
use crate::profile::UserProfile;

/// Scopes requested when none are configured.
pub const DEFAULT_SCOPE: &str = "profile openid email";

/// Form body of the code-for-token exchange.
#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// LINE Login provider.
///
/// Performs the authorization-code exchange and the profile fetch against the
/// LINE Login v2.1 API.
pub struct Provider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    scope: String,
    endpoints: Endpoints,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new LINE provider.
    ///
    /// # Arguments
    ///
    /// * `client_id` - LINE Login channel ID
    /// * `client_secret` - LINE Login channel secret
    /// * `redirect_uri` - Redirect URI used on the authorize request
    /// * `endpoints` - Where the authorize, token and profile endpoints live
    /// * `http_client` - Client carrying the request timeout
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        redirect_uri: String,
        endpoints: Endpoints,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            scope: DEFAULT_SCOPE.to_string(),
            endpoints,
            http_client,
        }
    }

    /// Override the scopes requested on the authorize redirect.
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Line
    }

    fn authorization_url(&self, state: &CsrfState) -> Result<AuthorizationRequest, Error> {
        crate::oauth::authorization_url(
            &self.endpoints,
            &self.client_id,
            &self.redirect_uri,
            state,
            &self.scope,
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<Tokens, Error> {
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            redirect_uri: &self.redirect_uri,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
        };

        debug!("Exchanging LINE authorization code for tokens");

        let response = self
            .http_client
            .post(&self.endpoints.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach LINE token endpoint: {:?}", e);
                oauth_error(
                    OAuthErrorKind::TokenExchangeFailed,
                    &format!("Failed to exchange code for token: {}", describe_payload(&e.to_string())),
                )
            })?;

        if response.status().is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse LINE token response: {:?}", e);
                oauth_error(
                    OAuthErrorKind::InvalidResponse,
                    "Invalid token response from LINE",
                )
            })?;
            info!("Successfully exchanged LINE authorization code for tokens");
            Ok(tokens.into())
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("LINE token endpoint returned {}: {}", status, error_text);
            Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &format!(
                    "Failed to exchange code for token: {}",
                    describe_payload(&error_text)
                ),
            ))
        }
    }

    async fn get_user_profile(&self, access_token: &str) -> Result<UserProfile, Error> {
        get_user_profile(&self.http_client, &self.endpoints.profile_url, access_token).await
    }
}

/// Fetch the profile belonging to `access_token`.
///
/// Usable without channel credentials, so callers holding only a bearer token
/// can share the exact fetch the login flow performs.
pub async fn get_user_profile(
    http_client: &reqwest::Client,
    profile_url: &str,
    access_token: &str,
) -> Result<UserProfile, Error> {
    debug!("Fetching LINE user profile");

    let response = http_client
        .get(profile_url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| {
            warn!("Failed to reach LINE profile endpoint: {:?}", e);
            oauth_error(
                OAuthErrorKind::ProfileFetchFailed,
                &format!("Failed to fetch user profile: {}", describe_payload(&e.to_string())),
            )
        })?;

    if response.status().is_success() {
        let profile: UserProfile = response.json().await.map_err(|e| {
            warn!("Failed to parse LINE profile response: {:?}", e);
            oauth_error(
                OAuthErrorKind::InvalidResponse,
                "Invalid profile response from LINE",
            )
        })?;
        Ok(profile)
    } else {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!("LINE profile endpoint returned {}: {}", status, error_text);
        Err(oauth_error(
            OAuthErrorKind::ProfileFetchFailed,
            &format!(
                "Failed to fetch user profile: {}",
                describe_payload(&error_text)
            ),
        ))
    }
}

/// Render a provider error payload as compact JSON.
///
/// JSON bodies are re-serialized as-is, anything else becomes a JSON string.
fn describe_payload(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::oauth::Provider as _;
    use mockito::{Matcher, Server, ServerGuard};
    use secrecy::ExposeSecret;
    use serde_json::json;

    async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    fn create_provider(server: &ServerGuard) -> Provider {
        Provider::new(
            "1234567890".to_string(),
            SecretString::new("channel-secret".to_string()),
            "http://localhost:3000/callback".to_string(),
            Endpoints::from_bases(&server.url(), &server.url()),
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form_and_parses_tokens() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server);

        let mock = server
            .mock("POST", "/oauth2/v2.1/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "abc123".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:3000/callback".into(),
                ),
                Matcher::UrlEncoded("client_id".into(), "1234567890".into()),
                Matcher::UrlEncoded("client_secret".into(), "channel-secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"access_token": "tok1", "token_type": "Bearer", "expires_in": 2592000})
                    .to_string(),
            )
            .create_async()
            .await;

        let tokens = provider.exchange_code("abc123").await.unwrap();
        assert_eq!(tokens.access_token.expose_secret(), "tok1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_code_non_success_carries_payload() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server);

        let _mock = server
            .mock("POST", "/oauth2/v2.1/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"error": "invalid_grant", "error_description": "invalid authorization code"})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let err = provider.exchange_code("used-code").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
        let message = err.message();
        assert!(message.starts_with("Failed to exchange code for token: "));
        assert!(message.contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_exchange_code_invalid_body() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server);

        let _mock = server
            .mock("POST", "/oauth2/v2.1/token")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = provider.exchange_code("abc123").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::InvalidResponse)
        );
    }

    #[tokio::test]
    async fn test_exchange_code_network_failure() {
        let provider = Provider::new(
            "1234567890".to_string(),
            SecretString::new("channel-secret".to_string()),
            "http://localhost:3000/callback".to_string(),
            // Port 9 (discard) on localhost refuses connections.
            Endpoints::from_bases("http://127.0.0.1:9", "http://127.0.0.1:9"),
            reqwest::Client::new(),
        );

        let err = provider.exchange_code("abc123").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
    }

    #[tokio::test]
    async fn test_get_user_profile_sends_bearer_token() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server);

        let mock = server
            .mock("GET", "/v2/profile")
            .match_header("authorization", "Bearer tok1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"userId": "U1", "displayName": "Alice"}).to_string())
            .create_async()
            .await;

        let profile = provider.get_user_profile("tok1").await.unwrap();
        assert_eq!(
            profile,
            UserProfile {
                user_id: "U1".to_string(),
                display_name: "Alice".to_string(),
                picture_url: None,
                status_message: None,
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_profile_unauthorized() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server);

        let _mock = server
            .mock("GET", "/v2/profile")
            .with_status(401)
            .with_body(json!({"message": "invalid token"}).to_string())
            .create_async()
            .await;

        let err = provider.get_user_profile("expired").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::ProfileFetchFailed)
        );
        assert_eq!(
            err.message(),
            "Failed to fetch user profile: {\"message\":\"invalid token\"}"
        );
    }

    #[test]
    fn test_authorization_url_uses_configured_scope() {
        let provider = Provider::new(
            "1234567890".to_string(),
            SecretString::new("channel-secret".to_string()),
            "http://localhost:3000/callback".to_string(),
            Endpoints::default(),
            reqwest::Client::new(),
        )
        .with_scope("profile");

        let state = CsrfState::from_string("s1".to_string());
        let request = provider.authorization_url(&state).unwrap();
        assert!(request.url.contains("scope=profile&") || request.url.ends_with("scope=profile"));
        assert_eq!(provider.provider(), ProviderKind::Line);
    }

    #[test]
    fn test_describe_payload() {
        assert_eq!(describe_payload("{\"error\": \"x\"}"), "{\"error\":\"x\"}");
        assert_eq!(describe_payload("Bad Gateway"), "\"Bad Gateway\"");
    }
}
