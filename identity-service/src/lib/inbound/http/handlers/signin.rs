use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileResponseData;
use crate::identity::models::SigninCommand;
use crate::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn signin<S: IdentityServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<SigninRequest>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .identity_service
        .authenticate(SigninCommand {
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// HTTP request body for sign-in (raw, untrusted JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
