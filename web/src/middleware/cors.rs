use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, REFERER,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::*;

use crate::AppState;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS, PUT, DELETE";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// CORS middleware matching the request's `Origin` (or `Referer` when no
/// `Origin` is sent) against the configured allow-list by prefix.
///
/// Preflight `OPTIONS` requests are answered with 204 without reaching a handler.
/// Requests from origins outside the allow-list are still served, just without
/// any CORS headers.
pub(crate) async fn cors(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let allowed_origin = request_origin(request.headers()).filter(|origin| {
        is_allowed(
            &app_state.config.allowed_origins,
            origin.to_str().unwrap_or_default(),
        )
    });

    let mut response = if request.method() == Method::OPTIONS {
        trace!("Answering CORS preflight for {}", request.uri());
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    if let Some(origin) = allowed_origin {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }

    response
}

fn request_origin(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(ORIGIN)
        .or_else(|| headers.get(REFERER))
        .cloned()
}

fn is_allowed(allowed_origins: &[String], origin: &str) -> bool {
    !origin.is_empty()
        && allowed_origins
            .iter()
            .map(|allowed| allowed.trim())
            .filter(|allowed| !allowed.is_empty())
            .any(|allowed| origin.starts_with(allowed))
}
