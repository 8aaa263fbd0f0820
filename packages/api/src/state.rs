use std::{sync::Arc, time::Duration};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use shringar::hub::{Environment, Hub};
use shringar_types::Value;

use crate::mail::{DynMailClient, create_mail_client};
use crate::payment::GatewayClient;
use crate::upload::ImageHostClient;

pub type AppState = Arc<State>;

const CONFIG: &str = include_str!("../../../shringar.config.json");

pub struct State {
    pub hub: Hub,
    pub db: DatabaseConnection,
    pub mail_client: Option<DynMailClient>,
    pub gateway: Option<GatewayClient>,
    pub image_host: Option<ImageHostClient>,
    pub response_cache: moka::sync::Cache<String, Value>,
}

impl State {
    pub async fn new() -> Self {
        let hub: Hub = serde_json::from_str(CONFIG).expect("Failed to parse config file");

        let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let mut opt = ConnectOptions::new(db_url.to_owned());
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(hub.environment == Environment::Development);

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to database");

        let mail_client = if let Some(mail_config) = &hub.mail {
            match create_mail_client(mail_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to initialize mail client: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let gateway = if let Some(payment_config) = &hub.payment {
            match GatewayClient::new(payment_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to initialize payment gateway: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let image_host = if let Some(upload_config) = &hub.uploads {
            match ImageHostClient::new(upload_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to initialize image host: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let response_cache = moka::sync::Cache::builder()
            .max_capacity(16 * 1024 * 1024) // 16 MB
            .time_to_live(Duration::from_secs(60))
            .build();

        Self {
            hub,
            db,
            mail_client,
            gateway,
            image_host,
            response_cache,
        }
    }

    pub fn get_cache<T>(&self, key: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.response_cache
            .get(key)
            .and_then(|json_value| serde_json::from_value(json_value).ok())
    }

    pub fn set_cache<T>(&self, key: String, value: T)
    where
        T: serde::Serialize,
    {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.response_cache.insert(key, json_value);
        }
    }

    pub fn invalidate_cache(&self, key: &str) {
        self.response_cache.invalidate(key);
    }
}
