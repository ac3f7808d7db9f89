//! Startup configuration
//!
//! Everything is resolved once from the environment before the server
//! accepts requests.

use crate::sms::{Account, RecipientList};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_USERNAME: &str = "sandbox";
const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("AT_API_KEY is missing. Add it to the environment and restart.")]
    MissingApiKey,
    #[error("GUARDIAN_PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
    #[error("{name} must be true or false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub account: Account,
    /// Rangers notified for every report
    pub recipients: RecipientList,
    pub port: u16,
    /// SQLite file for reports. When unset reports are kept in memory.
    pub db_path: Option<PathBuf>,
    /// Whether to try initializing the primary SMS channel
    pub primary_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup so tests need not touch the
    /// process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let username = var("AT_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let api_key = var("AT_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let mut account = Account::new(username, api_key);
        if let Some(gateway) = var("SMS_GATEWAY") {
            account = account.with_gateway(gateway);
        }

        let recipients = RecipientList::parse(&var("RANGERS").unwrap_or_default());

        let port = match var("GUARDIAN_PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let db_path = var("GUARDIAN_DB_PATH").map(PathBuf::from);

        let primary_enabled = match var("SMS_PRIMARY_ENABLED") {
            Some(v) => parse_flag("SMS_PRIMARY_ENABLED", &v)?,
            None => true,
        };

        Ok(Self {
            account,
            recipients,
            port,
            db_path,
            primary_enabled,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
