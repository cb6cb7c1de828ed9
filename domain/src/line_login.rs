//! LINE Login: authorization-code callback and bearer profile lookup.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InputErrorKind, InternalErrorKind};
use line_auth::error::{Error as LineAuthError, ErrorKind as LineAuthErrorKind};
use line_auth::http::{ClientBuilder, HttpClient};
use line_auth::oauth::providers::line;
use line_auth::oauth::{Endpoints, Provider};
use line_auth::UserProfile;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use service::config::Config;
use std::time::Duration;

/// How much of an authorization code is written to the logs.
const LOGGED_CODE_PREFIX: usize = 10;

/// Outcome of a successful callback.
///
/// `access_token` is the upstream LINE credential. It is handed back for the
/// caller to discard and is never serialized.
#[derive(Debug)]
pub struct LoginResult {
    pub user: UserProfile,
    pub access_token: SecretString,
}

/// Convert an authorization code into a verified LINE profile.
///
/// Fails fast: an absent code makes no network call, and a failed exchange
/// never reaches the profile endpoint. Nothing is retried.
pub async fn handle_callback(config: &Config, code: Option<&str>) -> Result<LoginResult, Error> {
    let code = code.filter(|code| !code.is_empty()).ok_or_else(|| {
        info!("Missing authorization code");
        Error::new(DomainErrorKind::Input(InputErrorKind::MissingCode))
    })?;

    let provider = create_line_provider(config)?;

    info!(
        "Processing OAuth callback with code: {}...",
        code.chars().take(LOGGED_CODE_PREFIX).collect::<String>()
    );

    let tokens = provider
        .exchange_code(code)
        .await
        .map_err(|e| step_error(e, ExternalErrorKind::TokenExchange))?;

    let user = provider
        .get_user_profile(tokens.access_token.expose_secret())
        .await
        .map_err(|e| step_error(e, ExternalErrorKind::ProfileFetch))?;

    info!("Successfully authenticated user: {}", user.user_id);

    Ok(LoginResult {
        user,
        access_token: tokens.access_token,
    })
}

/// Fetch the profile for a bearer token supplied directly by the caller.
pub async fn fetch_profile(
    config: &Config,
    access_token: &SecretString,
) -> Result<UserProfile, Error> {
    let http_client = build_http_client(config)?;
    let endpoints = endpoints(config);

    debug!("Fetching profile for a caller supplied token");

    let user = line::get_user_profile(
        &http_client,
        &endpoints.profile_url,
        access_token.expose_secret(),
    )
    .await
    .map_err(|e| step_error(e, ExternalErrorKind::ProfileFetch))?;

    info!("Successfully fetched profile for user: {}", user.user_id);
    Ok(user)
}

/// Read the bearer token out of an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<SecretString, Error> {
    Ok(line_auth::bearer::parse_authorization(header)?)
}

/// Create a LINE provider from config.
fn create_line_provider(config: &Config) -> Result<impl Provider, Error> {
    let client_id = config.line_channel_id().ok_or_else(|| {
        warn!("LINE_CHANNEL_ID is not configured");
        Error::new(DomainErrorKind::Internal(InternalErrorKind::Config))
    })?;

    let client_secret = config.line_channel_secret().ok_or_else(|| {
        warn!("LINE_CHANNEL_SECRET is not configured");
        Error::new(DomainErrorKind::Internal(InternalErrorKind::Config))
    })?;

    Ok(line::Provider::new(
        client_id,
        SecretString::new(client_secret),
        config.line_redirect_uri().to_string(),
        endpoints(config),
        build_http_client(config)?,
    )
    .with_scope(config.line_scope()))
}

fn endpoints(config: &Config) -> Endpoints {
    Endpoints::from_bases(config.line_auth_base_url(), config.line_api_base_url())
}

fn build_http_client(config: &Config) -> Result<HttpClient, Error> {
    Ok(ClientBuilder::new()
        .with_timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?)
}

/// Attribute any OAuth failure to the step that produced it.
fn step_error(err: LineAuthError, step: fn(String) -> ExternalErrorKind) -> Error {
    if !matches!(err.error_kind, LineAuthErrorKind::OAuth(_)) {
        return err.into();
    }

    let message = err.message();
    Error {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::External(step(message)),
    }
}
