use reqwest::Client;
use serde::Serialize;
use shringar::hub::{MailConfig, ResendSettings};
use shringar_types::Result;

use super::{EmailMessage, MailClient};

pub struct ResendMailClient {
    client: Client,
    api_key: String,
    from_email: String,
    from_name: String,
    admin_email: String,
}

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

impl ResendMailClient {
    pub fn new(config: &MailConfig, resend: &ResendSettings) -> Result<Self> {
        let api_key = std::env::var(&resend.api_key_env).map_err(|_| {
            shringar_types::anyhow!("Resend API key env var {} not set", resend.api_key_env)
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
            admin_email: config.admin_email.clone(),
        })
    }
}

#[async_trait::async_trait]
impl MailClient for ResendMailClient {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        if message.body_html.is_none() && message.body_text.is_none() {
            return Err(shringar_types::anyhow!(
                "Email must have either HTML or text body"
            ));
        }

        let email = ResendEmail {
            from: format!("{} <{}>", self.from_name, self.from_email),
            to: [message.to.as_str()],
            subject: &message.subject,
            html: message.body_html.as_deref(),
            text: message.body_text.as_deref(),
        };

        let response = self
            .client
            .post("https://api.resend.com/emails")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&email)
            .send()
            .await
            .map_err(|e| shringar_types::anyhow!("Failed to send email via Resend: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(shringar_types::anyhow!(
                "Resend API error: {} - {}",
                status,
                body
            ));
        }

        Ok(())
    }

    fn from_email(&self) -> &str {
        &self.from_email
    }

    fn from_name(&self) -> &str {
        &self.from_name
    }

    fn admin_email(&self) -> &str {
        &self.admin_email
    }
}
