use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileResponseData;
use crate::identity::models::RegisterCommand;
use crate::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup<S: IdentityServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .identity_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

/// HTTP request body for signup (raw, untrusted JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    fullname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl SignupRequest {
    /// No parsing here: the domain validator owns the signup policy and
    /// its rule ordering, including the missing-field check.
    fn into_command(self) -> RegisterCommand {
        RegisterCommand {
            full_name: self.fullname,
            email: self.email,
            password: self.password,
        }
    }
}
