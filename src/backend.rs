//! Remote backend client
//!
//! The app initializes a hosted-backend client once at startup from a
//! configuration bundle. Nothing reads or writes through it yet; it is held
//! by the app shell as an optional collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend config is missing `{0}`")]
    MissingField(&'static str),
}

/// Connection settings for the hosted backend
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

// Keeps the API key out of logs
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// An initialized backend connection
pub trait BackendClient {
    fn project_id(&self) -> &str;
    fn config(&self) -> &BackendConfig;
}

/// Client for the hosted app backend
#[derive(Debug)]
pub struct RemoteApp {
    config: BackendConfig,
}

impl BackendClient for RemoteApp {
    fn project_id(&self) -> &str {
        &self.config.project_id
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// Validate the bundle and create the client. No network traffic happens here.
pub fn initialize_app(config: BackendConfig) -> Result<RemoteApp, BackendError> {
    let required = [
        ("api_key", &config.api_key),
        ("project_id", &config.project_id),
        ("app_id", &config.app_id),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(BackendError::MissingField(name));
        }
    }
    Ok(RemoteApp { config })
}

/// Build the optional backend client from configuration, logging failures
pub fn init_from_config(config: Option<&BackendConfig>) -> Option<Box<dyn BackendClient>> {
    let Some(config) = config else {
        log::info!("no backend configured");
        return None;
    };
    match initialize_app(config.clone()) {
        Ok(app) => {
            log::info!("backend client ready for project {}", app.project_id());
            Some(Box::new(app))
        }
        Err(e) => {
            log::warn!("backend disabled: {}", e);
            None
        }
    }
}
