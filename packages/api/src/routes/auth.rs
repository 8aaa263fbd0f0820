use crate::error::ApiError;
use crate::middleware::admin::expected_password;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin", post(admin_login))
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
pub struct AdminLoginRequest {
    pub password: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
}

/// Plaintext comparison against the configured env var. There is no
/// session or token issuance; the admin client re-sends the password as a
/// header on every back-office request.
#[utoipa::path(
    post,
    path = "/auth/admin",
    tag = "auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Password accepted", body = AdminLoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 503, description = "Admin password not configured")
    )
)]
#[tracing::instrument(name = "POST /auth/admin", skip(state, request))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let expected = expected_password(&state)?;

    let provided = request
        .password
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing password"))?;

    if provided != expected {
        return Err(ApiError::unauthorized("Invalid password"));
    }

    Ok(Json(AdminLoginResponse { success: true }))
}
