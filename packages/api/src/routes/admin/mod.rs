//! Back-office routes, gated by the admin password middleware.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;

use crate::middleware::admin::admin_middleware;
use crate::state::AppState;

pub mod add_product;
pub mod list_orders;
pub mod update_order;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", post(add_product::add_product))
        .route("/orders", get(list_orders::list_orders))
        .route(
            "/orders/{order_number}",
            patch(update_order::update_order),
        )
        .route_layer(from_fn_with_state(state, admin_middleware))
}
