use std::sync::Arc;

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use error::ApiError;
use shringar_types::Value;
use state::{AppState, State};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, decompression::RequestDecompressionLayer,
};

pub mod entity;
mod middleware;
mod routes;

pub mod error;
pub mod mail;
pub mod openapi;
pub mod payment;
pub mod state;
pub mod upload;

pub use axum;
pub use sea_orm;

use crate::middleware::admin::admin_middleware;

pub fn construct_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .route("/", get(store_info))
        .nest("/health", routes::health::routes())
        .nest("/products", routes::products::routes())
        .nest("/orders", routes::orders::routes())
        .nest("/payment", routes::payment::routes())
        .nest(
            "/upload",
            routes::upload::routes()
                .route_layer(from_fn_with_state(state.clone(), admin_middleware)),
        )
        .nest("/auth", routes::auth::routes())
        .nest("/admin", routes::admin::routes(state.clone()))
        .with_state(state)
        .route("/version", get(|| async { env!("CARGO_PKG_VERSION") }))
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        );

    Router::new().nest("/api/v1", router)
}

/// Public storefront metadata. Secrets and env-var names are stripped
/// before the config leaves the server.
#[tracing::instrument(name = "GET /", skip(state))]
async fn store_info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let mut hub_value: Value = serde_json::to_value(&state.hub)?;

    if let Some(hub) = hub_value.as_object_mut() {
        hub.remove("admin");
        if let Some(mail) = hub.get_mut("mail").and_then(|m| m.as_object_mut()) {
            mail.remove("smtp");
            mail.remove("resend");
            mail.remove("admin_email");
        }
        if let Some(payment) = hub.get_mut("payment").and_then(|p| p.as_object_mut()) {
            payment.remove("key_id_env");
            payment.remove("key_secret_env");
            payment.remove("api_base");
        }
        if let Some(uploads) = hub.get_mut("uploads").and_then(|u| u.as_object_mut()) {
            uploads.remove("api_key_env");
            uploads.remove("upload_url");
        }
    }

    Ok(Json(hub_value))
}
