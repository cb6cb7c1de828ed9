//! Domain layer for CO2X LINE Login.
//!
//! Re-exports the profile type so `web` does not depend on `line-auth` directly.
pub use line_auth::UserProfile;

pub mod error;
pub mod line_login;
