use crate::entity::{order, order_item, prelude::*, sea_orm_active_enums, user};
use crate::error::ApiError;
use crate::mail::{EmailMessage, templates};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get, routing::post};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order).get(list_orders_by_email))
        .route("/{order_number}", get(get_order))
}

/// Human-facing order number: millisecond timestamp plus a random suffix.
pub fn create_order_number() -> String {
    use shringar_types::rand::Rng;
    let suffix: u32 = shringar_types::rand::thread_rng().gen_range(1000..10000);
    format!("ORD-{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}

pub fn status_to_string(status: &sea_orm_active_enums::OrderStatus) -> String {
    use sea_orm_active_enums::OrderStatus;
    match status {
        OrderStatus::Pending => "PENDING",
        OrderStatus::Confirmed => "CONFIRMED",
        OrderStatus::Shipped => "SHIPPED",
        OrderStatus::Delivered => "DELIVERED",
        OrderStatus::Cancelled => "CANCELLED",
    }
    .to_string()
}

pub fn parse_status(raw: &str) -> Result<sea_orm_active_enums::OrderStatus, ApiError> {
    use sea_orm_active_enums::OrderStatus;
    match raw.to_uppercase().as_str() {
        "PENDING" => Ok(OrderStatus::Pending),
        "CONFIRMED" => Ok(OrderStatus::Confirmed),
        "SHIPPED" => Ok(OrderStatus::Shipped),
        "DELIVERED" => Ok(OrderStatus::Delivered),
        "CANCELLED" => Ok(OrderStatus::Cancelled),
        other => Err(ApiError::bad_request(format!(
            "Invalid order status: {}",
            other
        ))),
    }
}

pub fn payment_status_to_string(status: &sea_orm_active_enums::PaymentStatus) -> String {
    use sea_orm_active_enums::PaymentStatus;
    match status {
        PaymentStatus::Pending => "PENDING",
        PaymentStatus::Paid => "PAID",
        PaymentStatus::Failed => "FAILED",
        PaymentStatus::Refunded => "REFUNDED",
    }
    .to_string()
}

pub fn parse_payment_status(raw: &str) -> Result<sea_orm_active_enums::PaymentStatus, ApiError> {
    use sea_orm_active_enums::PaymentStatus;
    match raw.to_uppercase().as_str() {
        "PENDING" => Ok(PaymentStatus::Pending),
        "PAID" => Ok(PaymentStatus::Paid),
        "FAILED" => Ok(PaymentStatus::Failed),
        "REFUNDED" => Ok(PaymentStatus::Refunded),
        other => Err(ApiError::bad_request(format!(
            "Invalid payment status: {}",
            other
        ))),
    }
}

#[derive(Clone, Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
}

/// Checkout totals as the storefront computed them. They are persisted as
/// given; the server does not recompute them from the catalog.
#[derive(Clone, Deserialize, Debug, Default, ToSchema)]
pub struct TotalsPayload {
    pub subtotal: Option<i64>,
    pub shipping: Option<i64>,
    pub tax: Option<i64>,
    pub total: Option<i64>,
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    /// "PENDING" | "PAID" | "FAILED" | "REFUNDED"
    pub status: Option<String>,
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
pub struct CreateOrderRequest {
    pub customer: Option<CustomerPayload>,
    #[serde(default)]
    pub items: Vec<OrderItemPayload>,
    #[serde(default)]
    pub totals: TotalsPayload,
    pub payment: Option<PaymentPayload>,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_number: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
}

impl From<order_item::Model> for OrderItemView {
    fn from(model: order_item::Model) -> Self {
        Self {
            product_id: model.product_id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            size: model.size,
            color: model.color,
            image: model.image,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub total: i64,
    pub items: Vec<OrderItemView>,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_pincode: String,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderView {
    pub fn from_parts(order: order::Model, items: Vec<order_item::Model>) -> Self {
        Self {
            order_number: order.order_number,
            status: status_to_string(&order.status),
            payment_status: payment_status_to_string(&order.payment_status),
            subtotal: order.subtotal,
            shipping: order.shipping,
            tax: order.tax,
            total: order.total,
            items: items.into_iter().map(OrderItemView::from).collect(),
            shipping_name: order.shipping_name,
            shipping_phone: order.shipping_phone,
            shipping_address: order.shipping_address,
            shipping_city: order.shipping_city,
            shipping_state: order.shipping_state,
            shipping_pincode: order.shipping_pincode,
            tracking_number: order.tracking_number,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

fn field_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Collects every missing or invalid field so the 400 names all of them at
/// once instead of one per round trip.
pub fn validate_create_order(request: &CreateOrderRequest) -> Vec<String> {
    let mut missing = Vec::new();

    match &request.customer {
        None => missing.push("customer".to_string()),
        Some(customer) => {
            let required = [
                ("customer.name", &customer.name),
                ("customer.email", &customer.email),
                ("customer.phone", &customer.phone),
                ("customer.address", &customer.address),
                ("customer.city", &customer.city),
                ("customer.state", &customer.state),
                ("customer.pincode", &customer.pincode),
            ];
            for (label, value) in required {
                if !field_present(value) {
                    missing.push(label.to_string());
                }
            }
        }
    }

    if request.items.is_empty() {
        missing.push("items".to_string());
    }
    for (index, item) in request.items.iter().enumerate() {
        if !field_present(&item.product_id) {
            missing.push(format!("items[{}].productId", index));
        }
        if !field_present(&item.name) {
            missing.push(format!("items[{}].name", index));
        }
        if item.price.is_none_or(|p| p < 0) {
            missing.push(format!("items[{}].price", index));
        }
        if item.quantity.is_none_or(|q| q == 0) {
            missing.push(format!("items[{}].quantity", index));
        }
    }

    if request.totals.subtotal.is_none() {
        missing.push("totals.subtotal".to_string());
    }
    if request.totals.total.is_none() {
        missing.push("totals.total".to_string());
    }

    missing
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = CreateOrderResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
#[tracing::instrument(name = "POST /orders", skip(state, request))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let missing = validate_create_order(&request);
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing or invalid fields: {}",
            missing.join(", ")
        )));
    }

    // Validation guaranteed presence; the defaults below are unreachable.
    let customer = request.customer.clone().unwrap_or_default();
    let email = customer.email.unwrap_or_default().trim().to_lowercase();
    let name = customer.name.unwrap_or_default();
    let phone = customer.phone.unwrap_or_default();
    let address = customer.address.unwrap_or_default();
    let city = customer.city.unwrap_or_default();
    let customer_state = customer.state.unwrap_or_default();
    let pincode = customer.pincode.unwrap_or_default();

    let now = chrono::Utc::now().naive_utc();

    // Upsert the shipping contact by email. Deliberately not transactional
    // with the order insert; a failure in between leaves a contact with no
    // order, which is harmless.
    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    let user_model = match existing {
        Some(found) => {
            let mut active: user::ActiveModel = found.into();
            active.name = Set(name);
            active.phone = Set(phone);
            active.address = Set(address);
            active.city = Set(city);
            active.state = Set(customer_state);
            active.pincode = Set(pincode);
            active.updated_at = Set(now);
            active.update(&state.db).await?
        }
        None => {
            let active = user::ActiveModel {
                id: Set(shringar_types::create_id()),
                email: Set(email.clone()),
                name: Set(name),
                phone: Set(phone),
                address: Set(address),
                city: Set(city),
                state: Set(customer_state),
                pincode: Set(pincode),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(&state.db).await?
        }
    };

    let payment_status = match request.payment.as_ref().and_then(|p| p.status.as_deref()) {
        Some(raw) => parse_payment_status(raw)?,
        None => sea_orm_active_enums::PaymentStatus::Pending,
    };

    let order_id = shringar_types::create_id();
    let order_number = create_order_number();

    let new_order = order::ActiveModel {
        id: Set(order_id.clone()),
        order_number: Set(order_number.clone()),
        user_id: Set(user_model.id.clone()),
        subtotal: Set(request.totals.subtotal.unwrap_or(0)),
        shipping: Set(request.totals.shipping.unwrap_or(0)),
        tax: Set(request.totals.tax.unwrap_or(0)),
        total: Set(request.totals.total.unwrap_or(0)),
        status: Set(sea_orm_active_enums::OrderStatus::Pending),
        payment_status: Set(payment_status),
        gateway_order_id: Set(request
            .payment
            .as_ref()
            .and_then(|p| p.gateway_order_id.clone())),
        gateway_payment_id: Set(request
            .payment
            .as_ref()
            .and_then(|p| p.gateway_payment_id.clone())),
        gateway_signature: Set(request
            .payment
            .as_ref()
            .and_then(|p| p.gateway_signature.clone())),
        shipping_name: Set(user_model.name.clone()),
        shipping_phone: Set(user_model.phone.clone()),
        shipping_address: Set(user_model.address.clone()),
        shipping_city: Set(user_model.city.clone()),
        shipping_state: Set(user_model.state.clone()),
        shipping_pincode: Set(user_model.pincode.clone()),
        tracking_number: Set(None),
        notes: Set(request.notes.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let order_model = new_order.insert(&state.db).await?;

    let item_models: Vec<order_item::ActiveModel> = request
        .items
        .iter()
        .map(|item| order_item::ActiveModel {
            id: Set(shringar_types::create_id()),
            order_id: Set(order_id.clone()),
            product_id: Set(item.product_id.clone().unwrap_or_default()),
            name: Set(item.name.clone().unwrap_or_default()),
            price: Set(item.price.unwrap_or(0)),
            quantity: Set(item.quantity.unwrap_or(1) as i32),
            size: Set(item.size.clone()),
            color: Set(item.color.clone()),
            image: Set(item.image.clone()),
        })
        .collect();
    OrderItem::insert_many(item_models).exec(&state.db).await?;

    let items = order_model
        .find_related(OrderItem)
        .all(&state.db)
        .await?;

    dispatch_order_emails(&state, order_model, items, email);

    tracing::info!(order_number = %order_number, "Order placed");
    Ok(Json(CreateOrderResponse { order_number }))
}

/// Fire-and-forget confirmation + admin notification. Failures are logged
/// and never surface into the checkout response.
fn dispatch_order_emails(
    state: &AppState,
    order: order::Model,
    items: Vec<order_item::Model>,
    customer_email: String,
) {
    let Some(mail_client) = state.mail_client.clone() else {
        tracing::debug!("Mail client not configured, skipping order emails");
        return;
    };
    let store_name = state.hub.name.clone();
    let store_url = state.hub.web.clone();

    tokio::spawn(async move {
        let (subject, html) =
            templates::order_confirmation(&store_name, store_url.as_deref(), &order, &items);
        if let Err(e) = mail_client
            .send(EmailMessage {
                to: customer_email.clone(),
                subject,
                body_html: Some(html),
                body_text: None,
            })
            .await
        {
            tracing::warn!(order_number = %order.order_number, "Failed to send confirmation email: {}", e);
        }

        let (subject, html) =
            templates::admin_order_notification(&store_name, &customer_email, &order, &items);
        if let Err(e) = mail_client
            .send(EmailMessage {
                to: mail_client.admin_email().to_string(),
                subject,
                body_html: Some(html),
                body_text: None,
            })
            .await
        {
            tracing::warn!(order_number = %order.order_number, "Failed to send admin notification: {}", e);
        }
    });
}

#[utoipa::path(
    get,
    path = "/orders/{order_number}",
    tag = "orders",
    responses(
        (status = 200, description = "Order detail", body = OrderView),
        (status = 404, description = "No order with this number")
    )
)]
#[tracing::instrument(name = "GET /orders/{order_number}", skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let order = Order::find()
        .filter(order::Column::OrderNumber.eq(&order_number))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order not found: {}", order_number)))?;

    let items = order.find_related(OrderItem).all(&state.db).await?;

    Ok(Json(OrderView::from_parts(order, items)))
}

#[derive(Clone, Deserialize, Debug, IntoParams)]
pub struct OrdersByEmailQuery {
    pub email: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct OrderHistoryResponse {
    pub orders: Vec<OrderView>,
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    params(OrdersByEmailQuery),
    responses(
        (status = 200, description = "Order history for a shipping contact", body = OrderHistoryResponse),
        (status = 400, description = "Missing email parameter"),
        (status = 404, description = "No contact with this email")
    )
)]
#[tracing::instrument(name = "GET /orders", skip(state))]
pub async fn list_orders_by_email(
    State(state): State<AppState>,
    Query(query): Query<OrdersByEmailQuery>,
) -> Result<Json<OrderHistoryResponse>, ApiError> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing email parameter"))?
        .to_lowercase();

    let contact = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No orders for {}", email)))?;

    let orders = Order::find()
        .filter(order::Column::UserId.eq(&contact.id))
        .order_by_desc(order::Column::CreatedAt)
        .find_with_related(OrderItem)
        .all(&state.db)
        .await?;

    Ok(Json(OrderHistoryResponse {
        orders: orders
            .into_iter()
            .map(|(order, items)| OrderView::from_parts(order, items))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateOrderRequest {
        CreateOrderRequest {
            customer: Some(CustomerPayload {
                name: Some("Radha Sharma".into()),
                email: Some("radha@example.com".into()),
                phone: Some("9876543210".into()),
                address: Some("12 Gopal Lane".into()),
                city: Some("Vrindavan".into()),
                state: Some("UP".into()),
                pincode: Some("281121".into()),
            }),
            items: vec![OrderItemPayload {
                product_id: Some("p1".into()),
                name: Some("Peacock Mukut".into()),
                price: Some(549),
                quantity: Some(1),
                size: None,
                color: None,
                image: None,
            }],
            totals: TotalsPayload {
                subtotal: Some(549),
                shipping: Some(49),
                tax: Some(0),
                total: Some(598),
            },
            payment: None,
            notes: None,
        }
    }

    #[test]
    fn complete_request_validates_clean() {
        assert!(validate_create_order(&full_request()).is_empty());
    }

    #[test]
    fn missing_phone_is_reported_by_name() {
        let mut request = full_request();
        request.customer.as_mut().unwrap().phone = None;
        let missing = validate_create_order(&request);
        assert_eq!(missing, vec!["customer.phone".to_string()]);
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut request = full_request();
        request.customer.as_mut().unwrap().city = Some("   ".into());
        assert_eq!(
            validate_create_order(&request),
            vec!["customer.city".to_string()]
        );
    }

    #[test]
    fn empty_items_and_absent_customer_are_both_reported() {
        let request = CreateOrderRequest {
            customer: None,
            items: vec![],
            totals: TotalsPayload::default(),
            payment: None,
            notes: None,
        };
        let missing = validate_create_order(&request);
        assert!(missing.contains(&"customer".to_string()));
        assert!(missing.contains(&"items".to_string()));
        assert!(missing.contains(&"totals.total".to_string()));
    }

    #[test]
    fn zero_quantity_item_is_invalid() {
        let mut request = full_request();
        request.items[0].quantity = Some(0);
        assert_eq!(
            validate_create_order(&request),
            vec!["items[0].quantity".to_string()]
        );
    }

    #[test]
    fn order_numbers_have_the_expected_shape() {
        let number = create_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        let suffix: u32 = parts[2].parse().unwrap();
        assert!((1000..10000).contains(&suffix));
    }

    #[test]
    fn status_strings_round_trip() {
        for raw in ["PENDING", "CONFIRMED", "SHIPPED", "DELIVERED", "CANCELLED"] {
            let status = parse_status(raw).unwrap();
            assert_eq!(status_to_string(&status), raw);
        }
        assert!(parse_status("RETURNED").is_err());
        for raw in ["PENDING", "PAID", "FAILED", "REFUNDED"] {
            let status = parse_payment_status(raw).unwrap();
            assert_eq!(payment_status_to_string(&status), raw);
        }
    }
}
