//! LINE Login endpoint locations.

pub const DEFAULT_AUTH_BASE_URL: &str = "https://access.line.me";
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

const AUTHORIZE_PATH: &str = "/oauth2/v2.1/authorize";
const TOKEN_PATH: &str = "/oauth2/v2.1/token";
const PROFILE_PATH: &str = "/v2/profile";

/// The three endpoints the login flow talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// User consent page the browser is redirected to.
    pub authorize_url: String,
    /// Code-for-token exchange endpoint.
    pub token_url: String,
    /// Profile endpoint, called with a bearer access token.
    pub profile_url: String,
}

impl Endpoints {
    /// Derive the endpoints from the authorization host and the API host.
    ///
    /// Trailing slashes on either base are ignored.
    pub fn from_bases(auth_base_url: &str, api_base_url: &str) -> Self {
        let auth_base = auth_base_url.trim_end_matches('/');
        let api_base = api_base_url.trim_end_matches('/');

        Self {
            authorize_url: format!("{auth_base}{AUTHORIZE_PATH}"),
            token_url: format!("{api_base}{TOKEN_PATH}"),
            profile_url: format!("{api_base}{PROFILE_PATH}"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_bases(DEFAULT_AUTH_BASE_URL, DEFAULT_API_BASE_URL)
    }
}
