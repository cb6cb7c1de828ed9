//! # session-client
//!
//! The browser side of LINE Login, for terminals and tests:
//! - starting a login with a CSRF nonce and the LINE authorize URL
//! - verifying the redirect and exchanging the code through the backend
//! - caching the signed-in profile between runs

pub mod callback;
pub mod config;
pub mod error;
pub mod exchange;
pub mod session;
pub mod storage;

pub use callback::CallbackParams;
pub use config::ClientConfig;
pub use error::{Error, ErrorKind};
pub use session::Session;
