//! Access token lifecycle.
//!
//! Two states: no token, or a held token with its issue instant. A held token
//! is reused until `ttl - safety_margin` has elapsed, then replaced by a new
//! issuance. The check-then-issue sequence runs under one async mutex, so
//! concurrent callers sharing a client trigger at most one issuance. Forced
//! renewals name the token the server rejected; callers holding the same
//! rejected token share one replacement.

use std::sync::Arc;

use chrono::Duration;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::token::Token;
use crate::config::credentials::Credentials;
use crate::config::settings::ClientConfig;
use crate::error::{ApiError, Result};
use crate::helpers::time::{seconds, Clock};
use crate::observability::metrics::{get_metrics, OUTCOME_FAILURE, OUTCOME_SUCCESS};
use crate::transport::{RequestBody, Transport, TransportRequest};
use crate::utils::constants::TOKEN_PATH;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct TokenManager<T> {
    credentials: Arc<Credentials>,
    token_url: String,
    scope: String,
    ttl: Duration,
    safety_margin: Duration,
    transport: Arc<T>,
    clock: Arc<dyn Clock>,
    state: Mutex<Option<Token>>,
}

impl<T: Transport> TokenManager<T> {
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<Credentials>,
        transport: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            token_url: format!("{}{}", config.oauth_domain(), TOKEN_PATH),
            scope: config.token.scope.clone(),
            ttl: seconds(config.token.ttl_seconds),
            safety_margin: seconds(config.token.safety_margin_seconds),
            transport,
            clock,
            state: Mutex::new(None),
        }
    }

    /// Cached token while it is inside its validity window, a fresh one otherwise.
    pub async fn get_valid_token(&self) -> Result<String> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(token) = state.as_ref().filter(|t| t.is_valid_at(now, self.safety_margin)) {
            debug!(age_seconds = token.age(now).num_seconds(), "reusing cached access token");
            get_metrics().token_reuses.inc();
            return Ok(token.value.clone());
        }

        let token = self.issue().await?;
        let value = token.value.clone();
        *state = Some(token);
        Ok(value)
    }

    /// Replace `stale` after the server rejected it, even inside its window.
    ///
    /// If the cache already holds a different valid token, another caller
    /// renewed first and that token is returned without a new issuance.
    pub async fn force_renew(&self, stale: &str) -> Result<String> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(token) = state
            .as_ref()
            .filter(|t| t.value != stale && t.is_valid_at(now, self.safety_margin))
        {
            debug!("rejected token already replaced, reusing the renewed one");
            get_metrics().token_reuses.inc();
            return Ok(token.value.clone());
        }

        warn!("forcing access token renewal");

        let token = self.issue().await?;
        let value = token.value.clone();
        *state = Some(token);
        Ok(value)
    }

    /// Snapshot of the held token, if any.
    pub async fn current(&self) -> Option<Token> {
        self.state.lock().await.clone()
    }

    // A failed issuance leaves `state` untouched.
    async fn issue(&self) -> Result<Token> {
        let metrics = get_metrics();

        let mut authorization = HeaderValue::from_str(&self.credentials.basic_authorization())?;
        authorization.set_sensitive(true);

        let mut request = TransportRequest::new(Method::POST, self.token_url.as_str());
        request.headers.insert(AUTHORIZATION, authorization);
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request.body = RequestBody::Form(vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("scope".to_string(), self.scope.clone()),
        ]);

        // stamp before sending: the server's window cannot start earlier
        let requested_at = self.clock.now();
        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(error = %e, "token request failed");
            metrics.token_issuances.with_label_values(&[OUTCOME_FAILURE]).inc();
        })?;

        if !response.status.is_success() {
            warn!(status = %response.status, "token endpoint rejected credentials");
            metrics.token_issuances.with_label_values(&[OUTCOME_FAILURE]).inc();
            return Err(ApiError::TokenIssuance {
                status: response.status.as_u16(),
                message: response.body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body).map_err(|e| {
            metrics.token_issuances.with_label_values(&[OUTCOME_FAILURE]).inc();
            ApiError::InvalidResponse(format!("token response without access_token: {e}"))
        })?;

        metrics.token_issuances.with_label_values(&[OUTCOME_SUCCESS]).inc();
        info!(client_id = %self.credentials.client_id(), "access token issued");
        Ok(Token::new(parsed.access_token, requested_at, self.ttl))
    }
}
