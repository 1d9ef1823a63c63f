use std::sync::Arc;

use crate::api::shared::{account_key, required, ExpenseDocument, SharedOperations};
use crate::config::credentials::Credentials;
use crate::config::settings::ClientConfig;
use crate::dispatch::ApiRequest;
use crate::error::Result;
use crate::helpers::time::Clock;
use crate::normalize::{DateLike, Params};
use crate::table::{display, Table, TableShape};
use crate::transport::{ReqwestTransport, Transport};
use crate::utils::constants::API_PREFIX;

const CURRENT_ACCOUNTS: TableShape = TableShape::rows("listaContaCorrente")
    .insert(&["numeroRegistroConsultar", "quantidadeContaCorrente"])
    .display(display::CURRENT_ACCOUNTS);

/// Client for oversight agencies (órgãos de controle).
///
/// Statement endpoints are the transferring-agency ones routed under the
/// control-agency paths.
pub struct OversightAgencyApi<T> {
    shared: SharedOperations<T>,
}

impl OversightAgencyApi<ReqwestTransport> {
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            shared: SharedOperations::connect(config, credentials)?,
        })
    }

    pub fn from_env(config: &ClientConfig) -> Result<Self> {
        Self::new(config, Credentials::resolve(None, None, None)?)
    }
}

impl<T: Transport> OversightAgencyApi<T> {
    pub fn with_parts(
        config: &ClientConfig,
        credentials: Credentials,
        transport: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shared: SharedOperations::with_parts(config, credentials, transport, clock),
        }
    }

    pub fn shared(&self) -> &SharedOperations<T> {
        &self.shared
    }

    pub async fn nearby_branches(&self, cnpj: &str, cep: &str) -> Result<Table> {
        self.shared.nearby_branches(cnpj, cep).await
    }

    pub async fn expense_document(
        &self,
        branch: &str,
        account: &str,
        transaction_id: &str,
        document_id: &str,
        booking_date: impl Into<DateLike>,
    ) -> Result<ExpenseDocument> {
        self.shared
            .expense_document(branch, account, transaction_id, document_id, booking_date)
            .await
    }

    pub async fn accountability_expense_document(
        &self,
        branch: &str,
        account: &str,
        transaction_id: &str,
        subtransaction_id: &str,
        document_id: &str,
        booking_date: impl Into<DateLike>,
    ) -> Result<ExpenseDocument> {
        self.shared
            .accountability_expense_document(branch, account, transaction_id, subtransaction_id, document_id, booking_date)
            .await
    }

    pub async fn program_statement(
        &self,
        branch: &str,
        account: &str,
        start: impl Into<DateLike>,
        end: impl Into<DateLike>,
    ) -> Result<Table> {
        let path = format!("{API_PREFIX}/statements/{}/control-agencies", account_key(branch, account)?);
        self.shared.statement_at(path, start.into(), end.into()).await
    }

    pub async fn program_subtransactions(&self, branch: &str, account: &str, debit_id: &str) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/statements/{}/debits/{}/control-agencies/subtransactions",
            account_key(branch, account)?,
            required("debit_id", debit_id)?,
        );
        self.shared.subtransactions_at(path, Params::new()).await
    }

    pub async fn investment_fund_statement(
        &self,
        branch: &str,
        account: &str,
        fund_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/extratos/{}/fundos-investimentos/{}/control-agencies",
            account_key(branch, account)?,
            required("fund_id", fund_id)?,
        );
        self.shared.fund_statement_at(path, month, year).await
    }

    /// Savings statement filtered by variation code rather than by month.
    pub async fn savings_statement(
        &self,
        branch: &str,
        account: &str,
        variation: &str,
        variation_code: i64,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/extratos/{}/poupanca/{}/orgao-controle",
            account_key(branch, account)?,
            required("variation", variation)?,
        );
        let query = Params::new().integer("codigoVariacao", variation_code);
        self.shared.savings_statement_at(path, query).await
    }

    /// Checking accounts visible to the agency with this registry number (CNPJ).
    pub async fn current_accounts(&self, registry_number: &str) -> Result<Table> {
        let request = ApiRequest::get(format!("{API_PREFIX}/conta-corrente/orgaos-controle"))
            .query(Params::new().document("numeroRegistro", registry_number));
        self.shared.dispatcher().call_shaped(request, &CURRENT_ACCOUNTS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::helpers::time::ManualClock;
    use crate::tests::common::{json, test_config, test_credentials, ScriptedTransport};
    use http::StatusCode;

    fn api(transport: Arc<ScriptedTransport>) -> OversightAgencyApi<ScriptedTransport> {
        OversightAgencyApi::with_parts(&test_config(), test_credentials(), transport, Arc::new(ManualClock::default()))
    }

    #[tokio::test]
    async fn statements_use_control_agency_paths() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(StatusCode::OK, "{}");
        transport.push_api(StatusCode::OK, "{}");
        transport.push_api(StatusCode::OK, r#"{"extrato": {}}"#);
        let client = api(transport.clone());

        client.program_statement("1", "2", "2024-03-01", "2024-03-31").await.unwrap();
        client.program_subtransactions("1", "2", "3").await.unwrap();
        client.investment_fund_statement("1", "2", "4", 3, 2024).await.unwrap();
        client.savings_statement("1", "2", "51", 7).await.unwrap();

        let urls: Vec<String> = transport.api_requests().into_iter().map(|r| r.url).collect();
        assert!(urls[0].ends_with("/accountability/v3/statements/1-2/control-agencies"));
        assert!(urls[1].ends_with("/statements/1-2/debits/3/control-agencies/subtransactions"));
        assert!(urls[2].ends_with("/extratos/1-2/fundos-investimentos/4/control-agencies"));
        assert!(urls[3].ends_with("/extratos/1-2/poupanca/51/orgao-controle"));
        assert_eq!(transport.token_calls(), 1);
    }

    #[tokio::test]
    async fn savings_rows_carry_balances() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(
            StatusCode::OK,
            &json!({
                "nomeCliente": "Municipio X",
                "saldoAtual": 10.0,
                "listaLancamentos": [{"valor": 1.0}, {"valor": 2.0}]
            })
            .to_string(),
        );
        let client = api(transport.clone());

        let table = client.savings_statement("1", "2", "51", 7).await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column("saldoAtual").unwrap(), vec![&json!(10.0); 2]);
        assert_eq!(table.column("saldoBloqueado").unwrap(), vec![&serde_json::Value::Null; 2]);
        let sent = transport.api_requests().remove(0);
        assert_eq!(sent.query_value("codigoVariacao"), Some("7"));
        assert_eq!(sent.query_value("mes"), None);
    }

    #[tokio::test]
    async fn current_accounts_normalizes_registry_number() {
        let transport = Arc::new(ScriptedTransport::default());
        transport.push_api(
            StatusCode::OK,
            r#"{"numeroRegistroConsultar": 12345678000195, "quantidadeContaCorrente": 1, "listaContaCorrente": [{"agencia": 1, "contaCorrente": 2}]}"#,
        );
        let client = api(transport.clone());

        let table = client.current_accounts("12.345.678/0001-95").await.unwrap();

        assert_eq!(table.get(0, "quantidadeContaCorrente"), Some(&json!(1)));
        let sent = transport.api_requests().remove(0);
        assert!(sent.url.ends_with("/accountability/v3/conta-corrente/orgaos-controle"));
        assert_eq!(sent.query_value("numeroRegistro"), Some("12345678000195"));
    }

    #[tokio::test]
    async fn malformed_registry_number_is_rejected_locally() {
        let transport = Arc::new(ScriptedTransport::default());
        let client = api(transport.clone());

        let err = client.current_accounts("1234").await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidDocument { digits: 4, .. }));
        assert_eq!(transport.api_calls(), 0);
    }
}
