use serde::Deserialize;

use crate::config::environment::Environment;
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_SAFETY_MARGIN_SECS, DEFAULT_TOKEN_SCOPE, TOKEN_TTL_SECS,
};

/// ================================
/// Client-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,
    /// overrides the environment's API base URL
    pub api_domain: Option<String>,
    /// overrides the environment's OAuth base URL
    pub oauth_domain: Option<String>,
    #[serde(default)]
    pub token: TokenSettings,
    #[serde(default)]
    pub http: HttpSettings,
    /// label columns with Portuguese display names instead of wire names
    #[serde(default)]
    pub display_names: bool,
    pub logging: Option<LoggingConfig>,
}

impl ClientConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    pub fn api_domain(&self) -> &str {
        self.api_domain
            .as_deref()
            .unwrap_or_else(|| self.environment.api_domain())
            .trim_end_matches('/')
    }

    pub fn oauth_domain(&self) -> &str {
        self.oauth_domain
            .as_deref()
            .unwrap_or_else(|| self.environment.oauth_domain())
            .trim_end_matches('/')
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenSettings {
    /// server-defined lifetime of an access token
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// renew this many seconds before the lifetime runs out
    /// invariant: < ttl_seconds
    #[serde(default = "default_safety_margin_seconds")]
    pub safety_margin_seconds: u64,
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            safety_margin_seconds: default_safety_margin_seconds(),
            scope: default_scope(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_ms: default_timeout_ms() }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_ttl_seconds() -> u64 {
    TOKEN_TTL_SECS
}

fn default_safety_margin_seconds() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

fn default_scope() -> String {
    DEFAULT_TOKEN_SCOPE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
