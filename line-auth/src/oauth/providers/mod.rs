//! OAuth provider implementations.

pub mod line;
