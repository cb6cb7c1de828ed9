use crate::Error;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::line_login;
use secrecy::SecretString;

/// The token carried by an `Authorization: Bearer <token>` header.
pub(crate) struct BearerToken(pub SecretString);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Error;

    // A header value that is not visible ASCII is treated like a malformed one.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default());

        Ok(BearerToken(line_login::bearer_token(header)?))
    }
}
