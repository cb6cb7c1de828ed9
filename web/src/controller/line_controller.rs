//! Controller for the LINE Login callback and bearer profile lookup.
//!
//! Both endpoints are reached from the browser SPA, so they answer GET and
//! POST alike and never redirect.

use crate::controller::UserResponse;
use crate::extractors::bearer_token::BearerToken;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json};
use domain::line_login::{self, LoginResult};
use log::*;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters LINE appends to the redirect URI.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code issued by LINE
    pub code: Option<String>,
    /// CSRF nonce. Verified by the client that issued it.
    pub state: Option<String>,
}

/// GET|POST /api/lineCallback
///
/// Exchanges the authorization code for a verified LINE profile. The upstream
/// access token is discarded here and never returned.
#[utoipa::path(
    get,
    path = "/api/lineCallback",
    params(CallbackParams),
    responses(
        (status = 200, description = "Successfully authenticated with LINE", body = UserResponse),
        (status = 400, description = "Missing code, LINE login not configured, or LINE rejected the exchange or profile fetch"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "LINE callback received (state present: {})",
        params.state.is_some()
    );

    let LoginResult { user, .. } =
        line_login::handle_callback(&app_state.config, params.code.as_deref()).await?;

    Ok(Json(UserResponse::new(user)))
}

/// GET|POST /api/lineProfile
///
/// Looks up the LINE profile for the bearer token the caller presents.
#[utoipa::path(
    get,
    path = "/api/lineProfile",
    responses(
        (status = 200, description = "Profile for the presented token", body = UserResponse),
        (status = 400, description = "LINE login not configured, or LINE rejected the token"),
        (status = 401, description = "Missing or invalid authorization header"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn profile(
    State(app_state): State<AppState>,
    BearerToken(access_token): BearerToken,
) -> Result<impl IntoResponse, Error> {
    let user = line_login::fetch_profile(&app_state.config, &access_token).await?;

    Ok(Json(UserResponse::new(user)))
}
