//! Admin gate for the storefront back office.
//!
//! Deliberately primitive: the plaintext admin password from the
//! environment is compared against the `x-admin-password` header. There is
//! no session or token issuance and no rate limiting.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

pub fn expected_password(state: &AppState) -> Result<String, ApiError> {
    std::env::var(&state.hub.admin.password_env).map_err(|_| {
        ApiError::service_unavailable(format!(
            "Admin password env var {} not set",
            state.hub.admin.password_env
        ))
    })
}

pub async fn admin_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = expected_password(&state)?;

    let provided = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing admin password header"))?;

    if provided != expected {
        return Err(ApiError::unauthorized("Invalid admin password"));
    }

    Ok(next.run(req).await)
}
