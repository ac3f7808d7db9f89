//! Messaging account identity and endpoint selection

use std::fmt;

const SANDBOX_BASE_URL: &str = "https://api.sandbox.africastalking.com";
const PRODUCTION_BASE_URL: &str = "https://api.africastalking.com";

/// Which API deployment the account lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// The reserved `sandbox` username selects the sandbox API
    pub fn for_username(username: &str) -> Self {
        if username.eq_ignore_ascii_case("sandbox") {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

/// Credentials shared by both SMS channels
#[derive(Clone)]
pub struct Account {
    pub username: String,
    pub api_key: String,
    /// Base URL override (e.g. `http://127.0.0.1:8080`), replaces the
    /// environment's API host for every channel
    pub gateway: Option<String>,
}

impl Account {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            gateway: None,
        }
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    pub fn environment(&self) -> Environment {
        Environment::for_username(&self.username)
    }

    /// Full URL for an API path such as `/version1/messaging`
    pub fn endpoint(&self, path: &str) -> String {
        let base = match &self.gateway {
            Some(gw) => gw.trim_end_matches('/'),
            None => self.environment().base_url(),
        };
        format!("{base}{path}")
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("gateway", &self.gateway)
            .finish()
    }
}
