//! Admin order status updates
//!
//! Partial update: only the supplied fields change. No transition rules;
//! any status may be set from any other.

use crate::entity::{order, prelude::*};
use crate::error::ApiError;
use crate::routes::orders::{OrderView, parse_payment_status, parse_status};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Clone, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// "PENDING" | "CONFIRMED" | "SHIPPED" | "DELIVERED" | "CANCELLED"
    pub status: Option<String>,
    /// "PENDING" | "PAID" | "FAILED" | "REFUNDED"
    pub payment_status: Option<String>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/admin/orders/{order_number}",
    tag = "admin",
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderView),
        (status = 400, description = "Invalid status value"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No order with this number")
    ),
    security(("admin_password" = []))
)]
#[tracing::instrument(name = "PATCH /admin/orders/{order_number}", skip(state, request))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<OrderView>, ApiError> {
    let existing = Order::find()
        .filter(order::Column::OrderNumber.eq(&order_number))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order not found: {}", order_number)))?;

    let mut active: order::ActiveModel = existing.into();

    if let Some(raw) = &request.status {
        active.status = Set(parse_status(raw)?);
    }
    if let Some(raw) = &request.payment_status {
        active.payment_status = Set(parse_payment_status(raw)?);
    }
    if let Some(tracking) = &request.tracking_number {
        active.tracking_number = Set(Some(tracking.clone()));
    }
    if let Some(notes) = &request.notes {
        active.notes = Set(Some(notes.clone()));
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(&state.db).await?;
    let items = updated.find_related(OrderItem).all(&state.db).await?;

    tracing::info!(order_number = %order_number, "Order updated");
    Ok(Json(OrderView::from_parts(updated, items)))
}
