use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::contract::model::{DetailField, RosterField};
use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;

/// Configuration for the roster module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_users_path")]
    pub users_path: String,
    #[serde(default = "default_refresh_interval", with = "humantime_serde")]
    pub refresh_interval: Duration,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_size_choices")]
    pub page_size_choices: Vec<usize>,
    #[serde(default = "default_columns")]
    pub columns: Vec<RosterField>,
    #[serde(default = "default_detail_fields")]
    pub detail_fields: Vec<DetailField>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            users_path: default_users_path(),
            refresh_interval: default_refresh_interval(),
            request_timeout: default_request_timeout(),
            default_page_size: default_page_size(),
            page_size_choices: default_page_size_choices(),
            columns: default_columns(),
            detail_fields: default_detail_fields(),
        }
    }
}

impl RosterConfig {
    /// Absolute URL of the user list endpoint.
    pub fn users_url(&self) -> Result<Url, DomainError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| DomainError::validation("base_url", e.to_string()))?;
        base.join(&self.users_path)
            .map_err(|e| DomainError::validation("users_path", e.to_string()))
    }

    /// Validate the display options and turn them into the service config.
    pub fn service_config(&self) -> Result<ServiceConfig, DomainError> {
        if self.refresh_interval.is_zero() {
            return Err(DomainError::validation(
                "refresh_interval",
                "must be greater than zero",
            ));
        }
        let default_page_size = NonZeroUsize::new(self.default_page_size)
            .ok_or_else(|| DomainError::validation("default_page_size", "must be positive"))?;
        let page_size_choices = self
            .page_size_choices
            .iter()
            .map(|n| {
                NonZeroUsize::new(*n).ok_or_else(|| {
                    DomainError::validation("page_size_choices", "sizes must be positive")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !page_size_choices.is_empty() && !page_size_choices.contains(&default_page_size) {
            return Err(DomainError::validation(
                "default_page_size",
                format!(
                    "{} is not one of page_size_choices {:?}",
                    self.default_page_size, self.page_size_choices
                ),
            ));
        }
        if self.columns.is_empty() {
            return Err(DomainError::validation("columns", "at least one column is required"));
        }

        Ok(ServiceConfig {
            refresh_interval: self.refresh_interval,
            default_page_size,
            page_size_choices,
            columns: self.columns.clone(),
            detail_fields: self.detail_fields.clone(),
        })
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_users_path() -> String {
    "/users".to_string()
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_page_size() -> usize {
    5
}

fn default_page_size_choices() -> Vec<usize> {
    vec![5, 10, 20]
}

fn default_columns() -> Vec<RosterField> {
    ServiceConfig::default().columns
}

fn default_detail_fields() -> Vec<DetailField> {
    DetailField::ALL.to_vec()
}
