// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::header::AUTHORIZATION;
use http::StatusCode;

use crate::api::{OversightAgencyApi, TransferringAgencyApi};
use crate::config::credentials::Credentials;
use crate::config::settings::ClientConfig;
use crate::error::Result;
use crate::helpers::time::ManualClock;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use crate::utils::constants::TOKEN_PATH;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Default config; domains point nowhere real.
pub fn test_config() -> ClientConfig {
    ClientConfig::default()
}

/// Config with both domains pointed at one local server.
pub fn local_config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api_domain = Some(base_url.to_string());
    config.oauth_domain = Some(base_url.to_string());
    config.http.timeout_ms = 5_000;
    config
}

pub fn test_credentials() -> Credentials {
    Credentials::new("app-key", "client-id", "client-secret")
}

pub fn transferring_client(base_url: &str) -> TransferringAgencyApi<ReqwestTransport> {
    let config = local_config(base_url);
    let transport = ReqwestTransport::new(config.http.timeout_ms).expect("reqwest transport");
    TransferringAgencyApi::with_parts(
        &config,
        test_credentials(),
        Arc::new(transport),
        Arc::new(ManualClock::default()),
    )
}

pub fn oversight_client(base_url: &str) -> OversightAgencyApi<ReqwestTransport> {
    let config = local_config(base_url);
    let transport = ReqwestTransport::new(config.http.timeout_ms).expect("reqwest transport");
    OversightAgencyApi::with_parts(
        &config,
        test_credentials(),
        Arc::new(transport),
        Arc::new(ManualClock::default()),
    )
}

#[derive(Default)]
struct Script {
    token_responses: VecDeque<TransportResponse>,
    api_responses: VecDeque<TransportResponse>,
    token_requests: Vec<TransportRequest>,
    api_requests: Vec<TransportRequest>,
}

/// In-memory transport with queued responses.
///
/// Requests to the token path are answered from the token queue (default:
/// 200 with `token-N`), everything else from the api queue (default: 200 `{}`).
/// An api request carrying the rejected bearer token gets a 401 instead.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
    token_delay: Option<Duration>,
    api_delay: Option<Duration>,
    rejected_bearer: Option<String>,
}

impl ScriptedTransport {
    pub fn with_token_delay_ms(mut self, ms: u64) -> Self {
        self.token_delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn with_api_delay_ms(mut self, ms: u64) -> Self {
        self.api_delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn rejecting_token(mut self, token: &str) -> Self {
        self.rejected_bearer = Some(format!("Bearer {token}"));
        self
    }

    pub fn push_token(&self, status: StatusCode, body: &str) {
        self.script.lock().unwrap().token_responses.push_back(TransportResponse::new(status, body));
    }

    pub fn push_api(&self, status: StatusCode, body: &str) {
        self.script.lock().unwrap().api_responses.push_back(TransportResponse::new(status, body));
    }

    pub fn token_calls(&self) -> usize {
        self.script.lock().unwrap().token_requests.len()
    }

    pub fn api_calls(&self) -> usize {
        self.script.lock().unwrap().api_requests.len()
    }

    pub fn token_requests(&self) -> Vec<TransportRequest> {
        self.script.lock().unwrap().token_requests.clone()
    }

    pub fn api_requests(&self) -> Vec<TransportRequest> {
        self.script.lock().unwrap().api_requests.clone()
    }

    fn answer(&self, request: TransportRequest) -> TransportResponse {
        let mut script = self.script.lock().unwrap();
        if request.url.ends_with(TOKEN_PATH) {
            script.token_requests.push(request);
            let n = script.token_requests.len();
            script.token_responses.pop_front().unwrap_or_else(|| {
                TransportResponse::json(StatusCode::OK, &json!({"access_token": format!("token-{n}")}))
            })
        } else {
            let rejected = self.rejected_bearer.as_deref().is_some_and(|bearer| {
                request.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(bearer)
            });
            script.api_requests.push(request);
            if rejected {
                return TransportResponse::new(StatusCode::UNAUTHORIZED, r#"{"error":"invalid_token"}"#);
            }
            script
                .api_responses
                .pop_front()
                .unwrap_or_else(|| TransportResponse::new(StatusCode::OK, "{}"))
        }
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let delay = if request.url.ends_with(TOKEN_PATH) {
            self.token_delay
        } else {
            self.api_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.answer(request))
    }
}
