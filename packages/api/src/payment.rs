//! Payment gateway integration.
//!
//! The gateway contract is order-based: the server creates a gateway-side
//! order (amount in minor units) before the browser opens the payment
//! widget, and after payment the gateway hands the browser a signature the
//! server must verify, an HMAC-SHA256 over `"{order_id}|{payment_id}"`
//! keyed with the gateway secret.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use shringar::hub::GatewayConfig;
use shringar_types::Result;

type HmacSha256 = Hmac<Sha256>;

pub struct GatewayClient {
    client: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
    currency: String,
}

/// Gateway-side order record, as returned by the order-creation endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor units (paise)
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let key_id = std::env::var(&config.key_id_env).map_err(|_| {
            shringar_types::anyhow!("Gateway key env var {} not set", config.key_id_env)
        })?;
        let key_secret = std::env::var(&config.key_secret_env).map_err(|_| {
            shringar_types::anyhow!("Gateway secret env var {} not set", config.key_secret_env)
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
            currency: config.currency.clone(),
        })
    }

    /// Public key id, safe to hand to the browser checkout widget.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Create a gateway order for `amount_minor` minor units.
    pub async fn create_order(&self, amount_minor: i64, receipt: &str) -> Result<GatewayOrder> {
        let body = CreateOrderBody {
            amount: amount_minor,
            currency: &self.currency,
            receipt,
        };

        let response = self
            .client
            .post(format!("{}/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| shringar_types::anyhow!("Failed to reach payment gateway: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(shringar_types::anyhow!(
                "Payment gateway error: {} - {}",
                status,
                body
            ));
        }

        let order = response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| shringar_types::anyhow!("Invalid gateway order response: {}", e))?;

        Ok(order)
    }

    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(order_id, payment_id, signature, &self.key_secret)
    }
}

/// Hex HMAC-SHA256 of `"{order_id}|{payment_id}"`. What the gateway sends
/// back after a successful payment.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time verification of a gateway payment signature. A signature
/// that is not valid hex fails without further work.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_gateway_secret";

    #[test]
    fn valid_signature_verifies() {
        let signature = sign_payment("order_abc123", "pay_xyz789", SECRET);
        assert!(verify_payment_signature(
            "order_abc123",
            "pay_xyz789",
            &signature,
            SECRET
        ));
    }

    #[test]
    fn tampered_payment_id_fails() {
        let signature = sign_payment("order_abc123", "pay_xyz789", SECRET);
        assert!(!verify_payment_signature(
            "order_abc123",
            "pay_other",
            &signature,
            SECRET
        ));
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = sign_payment("order_abc123", "pay_xyz789", SECRET);
        assert!(!verify_payment_signature(
            "order_abc123",
            "pay_xyz789",
            &signature,
            "another_secret"
        ));
    }

    #[test]
    fn non_hex_signature_fails_cleanly() {
        assert!(!verify_payment_signature(
            "order_abc123",
            "pay_xyz789",
            "not-hex!!",
            SECRET
        ));
    }

    #[test]
    fn pipe_separator_is_part_of_the_contract() {
        // "a|bc" and "ab|c" must not collide.
        let first = sign_payment("a", "bc", SECRET);
        let second = sign_payment("ab", "c", SECRET);
        assert_ne!(first, second);
    }
}
