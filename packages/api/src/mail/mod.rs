use std::sync::Arc;

use shringar::hub::{MailConfig, MailProviderType};
use shringar_types::Result;

#[cfg(feature = "resend")]
mod resend;
#[cfg(feature = "smtp")]
mod smtp;
pub mod templates;

#[cfg(feature = "resend")]
pub use resend::ResendMailClient;
#[cfg(feature = "smtp")]
pub use smtp::SmtpMailClient;

#[derive(Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_html: Option<String>,
    pub body_text: Option<String>,
}

#[async_trait::async_trait]
pub trait MailClient: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
    fn from_email(&self) -> &str;
    fn from_name(&self) -> &str;
    /// Internal address that receives the admin copy of order mails.
    fn admin_email(&self) -> &str;
}

pub type DynMailClient = Arc<dyn MailClient>;

pub fn create_mail_client(config: &MailConfig) -> Result<DynMailClient> {
    match config.provider {
        MailProviderType::Resend => {
            #[cfg(feature = "resend")]
            {
                let settings = config.resend.as_ref().ok_or_else(|| {
                    shringar_types::anyhow!("Resend settings required for Resend provider")
                })?;
                let client = ResendMailClient::new(config, settings)?;
                Ok(Arc::new(client))
            }
            #[cfg(not(feature = "resend"))]
            {
                Err(shringar_types::anyhow!("Resend feature not enabled"))
            }
        }
        MailProviderType::Smtp => {
            #[cfg(feature = "smtp")]
            {
                let settings = config.smtp.as_ref().ok_or_else(|| {
                    shringar_types::anyhow!("SMTP settings required for SMTP provider")
                })?;
                let client = SmtpMailClient::new(config, settings)?;
                Ok(Arc::new(client))
            }
            #[cfg(not(feature = "smtp"))]
            {
                Err(shringar_types::anyhow!("SMTP feature not enabled"))
            }
        }
    }
}
