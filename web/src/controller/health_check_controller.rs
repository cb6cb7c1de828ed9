use axum::response::{IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    status: &'static str,
    #[schema(value_type = String, format = DateTime)]
    timestamp: DateTime<Utc>,
}

/// GET liveness of the API router
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = HealthStatus),
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
    })
}
