use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;

/// Configuration for the forms module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(default = "default_login_redirect_delay", with = "humantime_serde")]
    pub login_redirect_delay: Duration,
    #[serde(default = "default_register_redirect_delay", with = "humantime_serde")]
    pub register_redirect_delay: Duration,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_path: default_submit_path(),
            request_timeout: default_request_timeout(),
            login_redirect_delay: default_login_redirect_delay(),
            register_redirect_delay: default_register_redirect_delay(),
        }
    }
}

impl FormsConfig {
    pub fn submit_url(&self) -> Result<Url, DomainError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| DomainError::validation("base_url", e.to_string()))?;
        base.join(&self.submit_path)
            .map_err(|e| DomainError::validation("submit_path", e.to_string()))
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            login_redirect_delay: self.login_redirect_delay,
            register_redirect_delay: self.register_redirect_delay,
        }
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_submit_path() -> String {
    "/posts".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_login_redirect_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_register_redirect_delay() -> Duration {
    Duration::from_secs(3)
}
