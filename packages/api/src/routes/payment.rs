use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use shringar::money::to_minor_units;
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(create_gateway_order))
        .route("/verify", post(verify_payment))
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
pub struct CreateGatewayOrderRequest {
    /// Amount in whole rupees, as shown at checkout.
    pub amount: Option<i64>,
    /// Our order number, recorded as the gateway receipt.
    pub receipt: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGatewayOrderResponse {
    pub gateway_order_id: String,
    /// Amount in minor units, as the gateway carries it.
    pub amount: i64,
    pub currency: String,
    /// Public key id for the browser checkout widget.
    pub key_id: String,
}

#[utoipa::path(
    post,
    path = "/payment/order",
    tag = "payment",
    request_body = CreateGatewayOrderRequest,
    responses(
        (status = 200, description = "Gateway order created", body = CreateGatewayOrderResponse),
        (status = 400, description = "Missing or invalid amount"),
        (status = 503, description = "Payment gateway not configured")
    )
)]
#[tracing::instrument(name = "POST /payment/order", skip(state, request))]
pub async fn create_gateway_order(
    State(state): State<AppState>,
    Json(request): Json<CreateGatewayOrderRequest>,
) -> Result<Json<CreateGatewayOrderResponse>, ApiError> {
    let gateway = state
        .gateway
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Payment gateway not configured"))?;

    let amount = match request.amount {
        Some(amount) if amount > 0 => amount,
        _ => return Err(ApiError::bad_request("Missing or invalid amount")),
    };
    let receipt = request.receipt.as_deref().unwrap_or("");

    let order = gateway
        .create_order(to_minor_units(amount), receipt)
        .await
        .map_err(|e| ApiError::upstream("GATEWAY_ERROR", e))?;

    tracing::info!(gateway_order_id = %order.id, amount = order.amount, "Gateway order created");

    Ok(Json(CreateGatewayOrderResponse {
        gateway_order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: gateway.key_id().to_string(),
    }))
}

#[derive(Clone, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub signature: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct VerifyPaymentResponse {
    pub valid: bool,
}

#[utoipa::path(
    post,
    path = "/payment/verify",
    tag = "payment",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature verified", body = VerifyPaymentResponse),
        (status = 400, description = "Missing fields or signature mismatch"),
        (status = 503, description = "Payment gateway not configured")
    )
)]
#[tracing::instrument(name = "POST /payment/verify", skip(state, request))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let gateway = state
        .gateway
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Payment gateway not configured"))?;

    let mut missing = Vec::new();
    if request.gateway_order_id.as_deref().unwrap_or("").is_empty() {
        missing.push("gatewayOrderId");
    }
    if request
        .gateway_payment_id
        .as_deref()
        .unwrap_or("")
        .is_empty()
    {
        missing.push("gatewayPaymentId");
    }
    if request.signature.as_deref().unwrap_or("").is_empty() {
        missing.push("signature");
    }
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing or invalid fields: {}",
            missing.join(", ")
        )));
    }

    let order_id = request.gateway_order_id.as_deref().unwrap_or("");
    let payment_id = request.gateway_payment_id.as_deref().unwrap_or("");
    let signature = request.signature.as_deref().unwrap_or("");

    if !gateway.verify_signature(order_id, payment_id, signature) {
        return Err(ApiError::bad_request_code(
            "SIGNATURE_MISMATCH",
            "Payment signature verification failed",
        ));
    }

    tracing::info!(gateway_order_id = %order_id, gateway_payment_id = %payment_id, "Payment signature verified");
    Ok(Json(VerifyPaymentResponse { valid: true }))
}
