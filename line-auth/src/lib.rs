//! # line-auth
//!
//! LINE Login building blocks shared by the backend and the session client:
//! - OAuth 2.0 authorization-code flow against LINE (authorize URL, code exchange)
//! - Profile retrieval with a bearer access token
//! - CSRF state generation
//! - Bearer `Authorization` header parsing
//! - HTTP client building with a fixed timeout
//!
//! ## Usage
//!
//! ```rust,ignore
//! use line_auth::{
//!     http::ClientBuilder,
//!     oauth::{providers::line, Endpoints, Provider},
//! };
//!
//! let provider = line::Provider::new(channel_id, channel_secret, redirect_uri, Endpoints::default(), client);
//! let tokens = provider.exchange_code(code).await?;
//! let profile = provider.get_user_profile(tokens.access_token.expose_secret()).await?;
//! ```

pub mod bearer;
pub mod error;
pub mod http;
pub mod oauth;
pub mod profile;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use profile::UserProfile;
