use crate::{
    controller::{health_check_controller, line_controller},
    error::error_response,
    middleware::cors,
    AppState,
};
use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use log::*;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "CO2X LINE Login API"
        ),
        paths(
            health_check_controller::health_check,
            line_controller::callback,
            line_controller::profile,
        ),
        components(
            schemas(
                crate::controller::UserResponse,
                health_check_controller::HealthStatus,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "co2x_line_auth", description = "WinFor.Earth CO2X LINE Login API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines the LINE access token bearer requirement of the profile endpoint for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(line_routes(app_state.clone()))
        // **** FIXME: protect the OpenAPI web UI
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        // Outermost, so CORS headers are present on every response including errors.
        .layer(from_fn_with_state(app_state, cors::cors))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// `/callback` and `/profile` are the short aliases the SPA dev proxy uses.
fn line_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/lineCallback",
            get(line_controller::callback).post(line_controller::callback),
        )
        .route(
            "/callback",
            get(line_controller::callback).post(line_controller::callback),
        )
        .route(
            "/api/lineProfile",
            get(line_controller::profile).post(line_controller::profile),
        )
        .route(
            "/profile",
            get(line_controller::profile).post(line_controller::profile),
        )
        .with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!("Request handler panicked: {details}");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
