//! OAuth token types.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Raw token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Tokens issued by a successful code exchange.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Bearer credential for the profile endpoint.
    pub access_token: SecretString,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// When the access token expires, if the provider said.
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_token: Option<SecretString>,
    /// OpenID Connect ID token, present when `openid` was requested.
    pub id_token: Option<SecretString>,
    /// Granted scopes.
    pub scopes: Vec<String>,
}

impl From<TokenResponse> for Tokens {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: SecretString::new(response.access_token),
            token_type: response.token_type,
            expires_at: response.expires_in.and_then(expires_at),
            refresh_token: response.refresh_token.map(SecretString::new),
            id_token: response.id_token.map(SecretString::new),
            scopes: response
                .scope
                .map(|scope| scope.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// Absolute expiry for an `expires_in` the provider sent. Values chrono cannot
/// represent are treated as unknown.
fn expires_at(expires_in: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(expires_in).and_then(|delta| Utc::now().checked_add_signed(delta))
}
