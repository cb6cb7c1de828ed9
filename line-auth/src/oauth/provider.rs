//! OAuth provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::token::Tokens;
use super::{CsrfState, Endpoints};
use crate::error::{config_error, Error};
use crate::profile::UserProfile;

/// Known OAuth providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Line,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Line => "line",
        }
    }
}

/// Authorization request with URL and the state it carries.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// CSRF state parameter embedded in `url`.
    pub state: CsrfState,
}

/// Build the authorize URL for a full-page redirect.
///
/// The `redirect_uri` given here must be reused verbatim on the code exchange.
pub fn authorization_url(
    endpoints: &Endpoints,
    client_id: &str,
    redirect_uri: &str,
    state: &CsrfState,
    scope: &str,
) -> Result<AuthorizationRequest, Error> {
    let url = Url::parse_with_params(
        &endpoints.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("state", state.as_str()),
            ("scope", scope),
        ],
    )
    .map_err(|e| config_error(&format!("Invalid authorize URL: {e}")))?;

    Ok(AuthorizationRequest {
        url: url.into(),
        state: state.clone(),
    })
}

/// Trait for OAuth 2.0 providers.
///
/// Every method performs at most one outbound call and never retries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Generate the authorization URL carrying `state`.
    fn authorization_url(&self, state: &CsrfState) -> Result<AuthorizationRequest, Error>;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<Tokens, Error>;

    /// Fetch the user's profile with an access token.
    async fn get_user_profile(&self, access_token: &str) -> Result<UserProfile, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_carries_all_parameters() {
        let state = CsrfState::from_string("nonce123".to_string());
        let request = authorization_url(
            &Endpoints::default(),
            "1234567890",
            "http://localhost:3000/callback",
            &state,
            "profile openid email",
        )
        .unwrap();

        let url = Url::parse(&request.url).unwrap();
        assert_eq!(url.host_str(), Some("access.line.me"));
        assert_eq!(url.path(), "/oauth2/v2.1/authorize");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params,
            vec![
                ("response_type".to_string(), "code".to_string()),
                ("client_id".to_string(), "1234567890".to_string()),
                (
                    "redirect_uri".to_string(),
                    "http://localhost:3000/callback".to_string()
                ),
                ("state".to_string(), "nonce123".to_string()),
                ("scope".to_string(), "profile openid email".to_string()),
            ]
        );
        assert_eq!(request.state, state);
    }

    #[test]
    fn test_authorization_url_rejects_bad_endpoint() {
        let endpoints = Endpoints {
            authorize_url: "not a url".to_string(),
            token_url: String::new(),
            profile_url: String::new(),
        };
        let state = CsrfState::generate();
        let result = authorization_url(&endpoints, "id", "http://localhost/cb", &state, "profile");
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_kind_as_str() {
        assert_eq!(ProviderKind::Line.as_str(), "line");
    }
}
