use std::path::Path;

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{ClientConfig, LoggingConfig};
use crate::utils::constants::MAX_TOKEN_SECS;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ClientConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("cannot read config {}: {}", path.display(), e))?;

    parse_config(&expand_env_vars(&content))
}

pub fn parse_config(content: &str) -> Result<ClientConfig> {
    let mut config: ClientConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if config.logging.is_none() {
        config.logging = Some(LoggingConfig::default());
    }

    debug!("validating config ...");
    validate(&config).map_err(|errors| anyhow!("Invalid config: {}", errors.join("; ")))?;

    Ok(config)
}

/// Aggregates every problem instead of stopping at the first one.
pub fn validate(config: &ClientConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.token.ttl_seconds == 0 {
        errors.push("token.ttl_seconds must be > 0".to_string());
    }
    for (name, value) in [
        ("ttl_seconds", config.token.ttl_seconds),
        ("safety_margin_seconds", config.token.safety_margin_seconds),
    ] {
        if value > MAX_TOKEN_SECS {
            errors.push(format!("token.{name} ({value}) must be <= {MAX_TOKEN_SECS}"));
        }
    }
    if config.token.safety_margin_seconds >= config.token.ttl_seconds {
        errors.push(format!(
            "token.safety_margin_seconds ({}) must be < token.ttl_seconds ({})",
            config.token.safety_margin_seconds, config.token.ttl_seconds
        ));
    }
    if config.token.scope.trim().is_empty() {
        errors.push("token.scope must not be empty".to_string());
    }
    if config.http.timeout_ms == 0 {
        errors.push("http.timeout_ms must be > 0".to_string());
    }
    for (name, value) in [
        ("api_domain", &config.api_domain),
        ("oauth_domain", &config.oauth_domain),
    ] {
        if let Some(url) = value {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("{name} '{url}' must start with http:// or https://"));
            }
        }
    }
    if let Some(logging) = &config.logging {
        let allowed = ["trace", "debug", "info", "warn", "error"];
        if !allowed.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!("logging.level '{}' is not one of {:?}", logging.level, allowed));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
