//! Standard Bearer token parsing for inbound requests.

use secrecy::SecretString;

use crate::error::{auth_header_error, AuthHeaderErrorKind, Error};

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// An absent header is `Missing`; anything that is not the bearer scheme
/// followed by a non-empty token is `Invalid`.
pub fn parse_authorization(header: Option<&str>) -> Result<SecretString, Error> {
    let header = header.ok_or_else(|| auth_header_error(AuthHeaderErrorKind::Missing))?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| auth_header_error(AuthHeaderErrorKind::Invalid))?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(auth_header_error(AuthHeaderErrorKind::Invalid));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(auth_header_error(AuthHeaderErrorKind::Invalid));
    }

    Ok(SecretString::new(token.to_string()))
}
