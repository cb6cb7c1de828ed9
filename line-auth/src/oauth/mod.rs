//! OAuth 2.0 authorization-code flow for LINE Login.

mod endpoints;
mod provider;
mod state;
mod token;

pub mod providers;

pub use endpoints::{Endpoints, DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL};
pub use provider::{authorization_url, AuthorizationRequest, Provider, ProviderKind};
pub use state::CsrfState;
pub use token::{TokenResponse, Tokens};
