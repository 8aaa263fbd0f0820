#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use shringar_api::axum::Router;
use shringar_api::{construct_router, state::State};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Shringar storefront API");

    let config = config::Config::from_env()?;

    let state = Arc::new(State::new().await);
    tracing::info!(store = %state.hub.name, "Loaded platform configuration");

    if state.gateway.is_none() {
        tracing::warn!("Payment gateway not configured, checkout will run without online payment");
    }
    if state.mail_client.is_none() {
        tracing::warn!("Mail client not configured, order emails are disabled");
    }

    let app = Router::new().merge(construct_router(state));

    let addr = config.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    shringar_api::axum::serve(listener, app).await?;

    Ok(())
}
