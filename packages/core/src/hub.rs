use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProviderType {
    Resend,
    Smtp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host_env: String,
    pub port_env: String,
    pub username_env: String,
    pub password_env: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResendSettings {
    pub api_key_env: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailConfig {
    pub provider: MailProviderType,
    pub from_email: String,
    pub from_name: String,
    /// Receives the internal copy of every order notification.
    pub admin_email: String,
    pub smtp: Option<SmtpSettings>,
    pub resend: Option<ResendSettings>,
}

/// Payment gateway connection. Key id is public (it is handed to the
/// browser checkout widget), the secret never leaves the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub api_base: String,
    pub key_id_env: String,
    pub key_secret_env: String,
    /// ISO currency code sent with gateway orders, e.g. "INR".
    pub currency: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Full URL of the image host's upload endpoint.
    pub upload_url: String,
    pub api_key_env: String,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

fn default_max_files() -> usize {
    5
}

fn default_max_file_bytes() -> usize {
    5 * 1024 * 1024
}

/// Cart/checkout shipping rule: flat fee below the threshold, free at or
/// above it. Amounts in whole rupees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_shipping_threshold: i64,
    pub flat_fee: i64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 999,
            flat_fee: 49,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password_env: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Production,
    Staging,
}

/// Platform configuration, parsed from `shringar.config.json` at the
/// repository root. Secrets are referenced by env-var name only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hub {
    pub name: String,
    pub description: String,
    pub domain: String,
    /// Public storefront base URL, used in email links.
    pub web: Option<String>,
    pub environment: Environment,
    pub admin: AdminConfig,
    pub mail: Option<MailConfig>,
    pub payment: Option<GatewayConfig>,
    pub uploads: Option<UploadConfig>,
    #[serde(default)]
    pub shipping: ShippingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let raw = r#"{
            "name": "Shringar",
            "description": "Devotional wear",
            "domain": "shringar.example",
            "web": "https://shringar.example",
            "environment": "Development",
            "admin": { "password_env": "ADMIN_PASSWORD" },
            "mail": null,
            "payment": null,
            "uploads": null
        }"#;
        let hub: Hub = serde_json::from_str(raw).unwrap();
        assert_eq!(hub.shipping, ShippingPolicy::default());
        assert!(hub.mail.is_none());
    }

    #[test]
    fn upload_limits_default() {
        let raw = r#"{ "upload_url": "https://img.example/upload", "api_key_env": "IMAGE_HOST_KEY" }"#;
        let uploads: UploadConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(uploads.max_files, 5);
        assert_eq!(uploads.max_file_bytes, 5 * 1024 * 1024);
    }
}
