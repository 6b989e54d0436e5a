//! Process configuration, read once at startup from the environment.

use thiserror::Error;

use billdesk_core::TenantId;
use billdesk_observability::{LogFormat, UnknownLogFormat};

pub const LOG_FORMAT_VAR: &str = "BILLDESK_LOG_FORMAT";
pub const TENANT_ID_VAR: &str = "BILLDESK_TENANT_ID";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BILLDESK_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),

    #[error("BILLDESK_TENANT_ID: {0}")]
    TenantId(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub log_format: LogFormat,
    /// Tenant used when a caller does not name one (dev/single-tenant setups).
    /// `None` means "not configured"; startup picks a fresh id.
    pub default_tenant: Option<TenantId>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => LogFormat::default(),
        };

        let default_tenant = match lookup(TENANT_ID_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.parse::<TenantId>()
                    .map_err(|e| ConfigError::TenantId(e.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            log_format,
            default_tenant,
        })
    }
}
