use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use utoipa::ToSchema;

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct DbStateResponse {
    pub rtt: u128,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/db", get(get_db_health))
}

#[utoipa::path(
    get,
    path = "/health/db",
    tag = "health",
    responses(
        (status = 200, description = "Database connection status", body = DbStateResponse),
        (status = 500, description = "Database connection failed")
    )
)]
pub async fn get_db_health(
    State(state): State<AppState>,
) -> Result<Json<DbStateResponse>, ApiError> {
    let db = state.db.clone();
    let now = Instant::now();
    db.ping().await?;
    let elapsed = now.elapsed();
    Ok(Json(DbStateResponse {
        rtt: elapsed.as_millis(),
    }))
}
