//! Admin order overview

use crate::entity::{order, prelude::*};
use crate::error::ApiError;
use crate::routes::orders::{parse_status, payment_status_to_string, status_to_string};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Deserialize, Debug, IntoParams)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    pub order_number: String,
    pub customer_name: String,
    pub total: i64,
    pub status: String,
    pub payment_status: String,
    pub tracking_number: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderListItem>,
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "admin",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = ListOrdersResponse),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(("admin_password" = []))
)]
#[tracing::instrument(name = "GET /admin/orders", skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let mut select = Order::find().order_by_desc(order::Column::CreatedAt);

    if let Some(status_filter) = &query.status {
        let status = parse_status(status_filter)?;
        select = select.filter(order::Column::Status.eq(status));
    }

    let total_count = select.clone().count(&state.db).await?;

    let orders = select
        .paginate(&state.db, limit)
        .fetch_page(offset / limit)
        .await?;

    let items = orders
        .into_iter()
        .map(|o| OrderListItem {
            order_number: o.order_number,
            customer_name: o.shipping_name,
            total: o.total,
            status: status_to_string(&o.status),
            payment_status: payment_status_to_string(&o.payment_status),
            tracking_number: o.tracking_number,
            created_at: o.created_at.to_string(),
        })
        .collect();

    Ok(Json(ListOrdersResponse {
        orders: items,
        total_count,
        offset,
        limit,
    }))
}
