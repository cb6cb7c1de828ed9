//! HTTP client building.

mod client;

pub use client::{ClientBuilder, HttpClientConfig};

/// Client type produced by [`ClientBuilder`].
pub type HttpClient = reqwest::Client;
