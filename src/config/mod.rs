//! Configuration module for the admin client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::str::FromStr;

use crate::errors::ClientError;

/// What `submit()` does with a draft that has field errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Field errors stop the request
    #[default]
    Blocking,
    /// Field errors are displayed and the request is sent anyway
    Advisory,
}

impl FromStr for SubmitPolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocking" => Ok(SubmitPolicy::Blocking),
            "advisory" => Ok(SubmitPolicy::Advisory),
            other => Err(ClientError::Config(format!(
                "Invalid SMS_SUBMIT_POLICY '{other}' (expected blocking or advisory)"
            ))),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and authority of the REST API, without the `/api` prefix
    pub api_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Submit gate for drafts with field errors
    pub submit_policy: SubmitPolicy,
    /// Accept self-signed certificates (development API)
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://localhost:7016".to_string(),
            log_level: "info".to_string(),
            submit_policy: SubmitPolicy::default(),
            accept_invalid_certs: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_base_url = env::var("SMS_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let log_level = env::var("SMS_LOG_LEVEL").unwrap_or(defaults.log_level);

        let submit_policy = match env::var("SMS_SUBMIT_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.submit_policy,
        };

        let accept_invalid_certs = match env::var("SMS_ACCEPT_INVALID_CERTS") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => defaults.accept_invalid_certs,
        };

        Ok(Self {
            api_base_url,
            log_level,
            submit_policy,
            accept_invalid_certs,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ClientError::Config(format!(
            "Invalid SMS_ACCEPT_INVALID_CERTS '{other}'"
        ))),
    }
}
