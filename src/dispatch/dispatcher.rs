//! Authenticated request dispatch.
//!
//! 1. normalize every parameter (fails before any network call)
//! 2. attach the cached token and the application key
//! 3. one forced renewal + resend on 401
//! 4. 2xx payloads become tables, everything else is a `RemoteApi` error

use std::sync::Arc;
use std::time::Instant;

use http::header::{ACCEPT, AUTHORIZATION};
use http::{HeaderValue, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::token_manager::TokenManager;
use crate::config::credentials::Credentials;
use crate::config::settings::ClientConfig;
use crate::error::{ApiError, Result};
use crate::helpers::time::Clock;
use crate::normalize::Params;
use crate::observability::metrics::get_metrics;
use crate::resilience::auth_retry::run_with_auth_retry;
use crate::table::{Table, TableShape};
use crate::transport::{RequestBody, Transport, TransportRequest, TransportResponse};
use crate::utils::constants::APP_KEY_PARAM;

/// One endpoint call before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Params,
    pub body: Option<Params>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }
}

/// Request with every parameter already in wire format.
#[derive(Debug, Clone)]
struct Prepared {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

pub struct Dispatcher<T> {
    api_domain: String,
    display_names: bool,
    credentials: Arc<Credentials>,
    tokens: TokenManager<T>,
    transport: Arc<T>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(
        config: &ClientConfig,
        credentials: Credentials,
        transport: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials = Arc::new(credentials);
        Self {
            api_domain: config.api_domain().to_string(),
            display_names: config.display_names,
            tokens: TokenManager::new(config, credentials.clone(), transport.clone(), clock),
            credentials,
            transport,
        }
    }

    pub fn token_manager(&self) -> &TokenManager<T> {
        &self.tokens
    }

    /// Whole payload as one table.
    pub async fn call(&self, request: ApiRequest) -> Result<Table> {
        self.call_shaped(request, &TableShape::PLAIN).await
    }

    pub async fn call_shaped(&self, request: ApiRequest, shape: &TableShape) -> Result<Table> {
        let payload = self.call_json(request).await?;
        self.present(shape, &payload)
    }

    /// Shapes `payload`, relabelling columns when display names are on.
    pub fn present(&self, shape: &TableShape, payload: &Value) -> Result<Table> {
        let mut table = shape.apply(payload)?;
        if self.display_names {
            shape.relabel(&mut table);
        }
        Ok(table)
    }

    /// Raw JSON payload of a successful call; `null` for an empty body.
    pub async fn call_json(&self, request: ApiRequest) -> Result<Value> {
        let prepared = self.prepare(request)?;

        let token = self.tokens.get_valid_token().await?;
        let response = run_with_auth_retry(
            token,
            |token| self.send_once(&prepared, token),
            |stale| async move { self.tokens.force_renew(&stale).await },
        )
        .await?;

        if !response.status.is_success() {
            warn!(
                method = %prepared.method,
                url = %prepared.url,
                status = %response.status,
                "remote API returned an error"
            );
            return Err(ApiError::RemoteApi {
                status: response.status.as_u16(),
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    fn prepare(&self, request: ApiRequest) -> Result<Prepared> {
        let ApiRequest { method, path, query, body } = request;

        let mut wire_query = vec![(APP_KEY_PARAM.to_string(), self.credentials.app_key().to_string())];
        wire_query.extend(query.to_query()?);

        let body = match body {
            Some(params) => RequestBody::Json(params.to_json()?),
            None => RequestBody::Empty,
        };

        Ok(Prepared {
            method,
            url: format!("{}{}", self.api_domain, path),
            query: wire_query,
            body,
        })
    }

    async fn send_once(&self, prepared: &Prepared, token: String) -> Result<TransportResponse> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))?;
        authorization.set_sensitive(true);

        let mut request = TransportRequest::new(prepared.method.clone(), prepared.url.as_str());
        request.headers.insert(AUTHORIZATION, authorization);
        request.headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        request.query = prepared.query.clone();
        request.body = prepared.body.clone();

        let metrics = get_metrics();
        let started = Instant::now();
        let response = self.transport.send(request).await?;

        metrics
            .api_request_duration
            .with_label_values(&[prepared.method.as_str()])
            .observe(started.elapsed().as_secs_f64());
        metrics
            .api_requests
            .with_label_values(&[prepared.method.as_str(), response.status.as_str()])
            .inc();
        debug!(method = %prepared.method, url = %prepared.url, status = %response.status, "response received");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::time::ManualClock;
    use crate::tests::common::{test_config, ScriptedTransport};
    use http::StatusCode;
    use serde_json::json;

    fn dispatcher(transport: Arc<ScriptedTransport>) -> Dispatcher<ScriptedTransport> {
        Dispatcher::new(
            &test_config(),
            Credentials::new("app-key", "client-id", "client-secret"),
            transport,
            Arc::new(ManualClock::default()),
        )
    }

    #[tokio::test]
    async fn attaches_token_app_key_and_normalized_query() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::OK, r#"{"listaAgencia": [], "quantidadeAgencia": 0}"#);
        let d = dispatcher(transport.clone());

        let request = ApiRequest::get("/accountability/v3/agencias-proximas").query(
            Params::new()
                .document("cnpj", "12.345.678/0001-95")
                .postal_code("cep", "12345-678"),
        );
        d.call(request).await.unwrap();

        let sent = transport.api_requests().remove(0);
        assert!(sent.url.ends_with("/accountability/v3/agencias-proximas"));
        assert_eq!(
            sent.query,
            vec![
                ("gw-dev-app-key".to_string(), "app-key".to_string()),
                ("cnpj".to_string(), "12345678000195".to_string()),
                ("cep".to_string(), "12345678".to_string()),
            ]
        );
        assert_eq!(sent.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(), "Bearer token-1");
    }

    #[tokio::test]
    async fn invalid_input_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::default());
        let d = dispatcher(transport.clone());

        let request = ApiRequest::get("/x").query(Params::new().document("cnpj", "123"));
        assert!(matches!(d.call(request).await, Err(ApiError::InvalidDocument { .. })));
        assert_eq!(transport.token_calls(), 0);
        assert_eq!(transport.api_calls(), 0);
    }

    #[tokio::test]
    async fn retries_once_after_auth_failure() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::UNAUTHORIZED, r#"{"error":"invalid_token"}"#);
        transport.push_api(StatusCode::OK, r#"[{"codigo": 1}]"#);
        let d = dispatcher(transport.clone());

        let table = d.call(ApiRequest::get("/x")).await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(transport.api_calls(), 2);
        assert_eq!(transport.token_calls(), 2);
        let tokens: Vec<String> = transport
            .api_requests()
            .iter()
            .map(|r| r.headers.get(AUTHORIZATION).unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(tokens, vec!["Bearer token-1", "Bearer token-2"]);
    }

    #[tokio::test]
    async fn two_auth_failures_surface_authentication_error() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::UNAUTHORIZED, "expired");
        transport.push_api(StatusCode::UNAUTHORIZED, "still expired");
        let d = dispatcher(transport.clone());

        let err = d.call(ApiRequest::get("/x")).await.unwrap_err();
        match err {
            ApiError::Authentication { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "still expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.api_calls(), 2);
    }

    #[tokio::test]
    async fn remote_errors_pass_through_verbatim() {
        let transport = Arc::new(ScriptedTransport::default());
        let body = r#"{"erros":[{"codigo":"4","mensagem":"Conta inexistente"}]}"#;
        transport.push_api(StatusCode::UNPROCESSABLE_ENTITY, body);
        let d = dispatcher(transport.clone());

        let err = d.call(ApiRequest::get("/x")).await.unwrap_err();
        match err {
            ApiError::RemoteApi { status, body: got } => {
                assert_eq!(status, 422);
                assert_eq!(got, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.api_calls(), 1);
    }

    #[tokio::test]
    async fn post_body_is_normalized_json() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::CREATED, r#"{"ok": true}"#);
        let d = dispatcher(transport.clone());

        let request = ApiRequest::post("/x").body(
            Params::new()
                .integer("numeroBancario", 1)
                .date("dataLancamento", "15/03/2024"),
        );
        d.call(request).await.unwrap();

        let sent = transport.api_requests().remove(0);
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({"numeroBancario": 1, "dataLancamento": "2024-03-15"}))
        );
    }

    #[tokio::test]
    async fn empty_success_body_is_empty_table() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::NO_CONTENT, "");
        let d = dispatcher(transport.clone());

        let table = d.call(ApiRequest::delete("/x")).await.unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[tokio::test]
    async fn token_is_reused_across_calls() {
        let transport = Arc::new(ScriptedTransport::default());
        let d = dispatcher(transport.clone());

        d.call(ApiRequest::get("/a")).await.unwrap();
        d.call(ApiRequest::get("/b")).await.unwrap();

        assert_eq!(transport.token_calls(), 1);
        assert_eq!(transport.api_calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rejections_share_one_forced_renewal() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .with_api_delay_ms(30)
                .rejecting_token("token-1"),
        );
        let d = Arc::new(dispatcher(transport.clone()));
        d.token_manager().get_valid_token().await.unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let d = d.clone();
                tokio::spawn(async move { d.call(ApiRequest::get("/x")).await })
            })
            .collect();

        for h in handles {
            assert!(h.await.unwrap().is_ok());
        }
        // warm-up issuance plus a single forced renewal
        assert_eq!(transport.token_calls(), 2);
        assert_eq!(transport.api_calls(), 8);
    }

    #[tokio::test]
    async fn display_names_relabel_shaped_columns_when_enabled() {
        const SHAPE: TableShape = TableShape::rows("categorias").display(&[("nome", "Nome Categoria")]);
        let body = r#"{"categorias": [{"codigo": 1, "nome": "Obras"}]}"#;

        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::OK, body);
        let plain = dispatcher(transport).call_shaped(ApiRequest::get("/x"), &SHAPE).await.unwrap();
        assert_eq!(plain.columns(), ["codigo", "nome"]);

        let mut config = test_config();
        config.display_names = true;
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::OK, body);
        let d = Dispatcher::new(
            &config,
            Credentials::new("app-key", "client-id", "client-secret"),
            transport,
            Arc::new(ManualClock::default()),
        );
        let labelled = d.call_shaped(ApiRequest::get("/x"), &SHAPE).await.unwrap();
        assert_eq!(labelled.columns(), ["codigo", "Nome Categoria"]);
    }
}
