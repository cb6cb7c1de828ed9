use domain::UserProfile;
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod health_check_controller;
pub(crate) mod line_controller;

/// Successful LINE login or profile lookup.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    success: bool,
    #[schema(value_type = Object)]
    user: UserProfile,
}

impl UserResponse {
    pub fn new(user: UserProfile) -> Self {
        Self {
            success: true,
            user,
        }
    }
}
