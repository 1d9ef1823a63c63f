//! Credential resolution.
//!
//! Each field prefers the explicitly passed value and falls back to a named
//! environment variable. Resolution happens once, when a client is built.

use std::env;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{ApiError, Result};
use crate::utils::constants::{ENV_APP_KEY, ENV_CLIENT_ID, ENV_CLIENT_SECRET};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_key: String,
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(
        app_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Resolve against the process environment.
    pub fn resolve(
        app_key: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self> {
        Self::resolve_with(app_key, client_id, client_secret, |name| env::var(name).ok())
    }

    /// Resolve with a custom variable lookup. Empty values count as absent.
    pub fn resolve_with<F>(
        app_key: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app_key: pick("app_key", ENV_APP_KEY, app_key, &lookup)?,
            client_id: pick("client_id", ENV_CLIENT_ID, client_id, &lookup)?,
            client_secret: pick("client_secret", ENV_CLIENT_SECRET, client_secret, &lookup)?,
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `Authorization` header value for the token endpoint.
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

fn pick<F>(
    field: &'static str,
    env_var: &'static str,
    explicit: Option<String>,
    lookup: &F,
) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| lookup(env_var).filter(|v| !v.is_empty()))
        .ok_or(ApiError::MissingCredential { field, env_var })
}
