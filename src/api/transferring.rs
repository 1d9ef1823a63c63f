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

const UPDATED_ENTRIES: TableShape = TableShape::rows("listaLancamentos")
    .insert(&["totalPaginas"])
    .display(display::UPDATED_ENTRIES);
const UPDATED_SUB_ENTRIES: TableShape = TableShape::rows("listaSublancamentos")
    .insert(&["totalPaginas"])
    .display(display::UPDATED_SUB_ENTRIES);
const CATEGORIES: TableShape = TableShape::rows("categorias").display(display::CATEGORIES);
const FINANCIAL_BALANCE: TableShape = TableShape::rows("operacoes")
    .insert(&["dataSaldo", "valorDisponibilidade"])
    .display(display::FINANCIAL_BALANCE);
const CHECKING_BALANCE: TableShape = TableShape::PLAIN.display(display::CHECKING_BALANCE);
const DEBIT_IDENTIFICATIONS: TableShape = TableShape::rows("listaLancamento")
    .insert(&["numeroPaginaTotal", "quantidadeIdentificacaoLancamento"])
    .display(display::DEBIT_IDENTIFICATIONS);

/// Expense category assigned to a credit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditExpenseCategory {
    pub branch: i64,
    pub account: i64,
    pub contract_code: i64,
    pub management_unit_code: String,
    pub expense_category_code: i64,
    pub client_listing_code: String,
}

impl CreditExpenseCategory {
    fn to_params(&self) -> Params {
        Params::new()
            .integer("agencia", self.branch)
            .integer("contaCorrente", self.account)
            .integer("codigoContrato", self.contract_code)
            .text("codigoUnidadeGestora", self.management_unit_code.as_str())
            .integer("codigoCategoriaDespesa", self.expense_category_code)
            .text("codigoListagemCliente", self.client_listing_code.as_str())
    }
}

/// Identification of who a credit entry came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditEntryIdentification {
    pub bank_number: i64,
    pub bank_order_sequence: i64,
    pub entry_date: DateLike,
    pub company_number: i64,
    pub fractional_value: i64,
    pub identification_type: i64,
    pub identification_code: String,
}

impl CreditEntryIdentification {
    fn to_params(&self) -> Params {
        Params::new()
            .integer("numeroBancario", self.bank_number)
            .integer("numeroSequencialOrdemBancaria", self.bank_order_sequence)
            .date("dataLancamento", self.entry_date.clone())
            .integer("numeroCompanhia", self.company_number)
            .integer("valorFracionado", self.fractional_value)
            .integer("tipoIdentificacao", self.identification_type)
            .text("codigoIdentificacao", self.identification_code.as_str())
    }
}

/// Client for transferring agencies (órgãos de repasse).
pub struct TransferringAgencyApi<T> {
    shared: SharedOperations<T>,
}

impl TransferringAgencyApi<ReqwestTransport> {
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            shared: SharedOperations::connect(config, credentials)?,
        })
    }

    /// Credentials from `BB_API_APP_KEY`, `BB_API_CLIENT_ID`, `BB_API_CLIENT_SECRET`.
    pub fn from_env(config: &ClientConfig) -> Result<Self> {
        Self::new(config, Credentials::resolve(None, None, None)?)
    }
}

impl<T: Transport> TransferringAgencyApi<T> {
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
        let path = format!("{API_PREFIX}/statements/{}", account_key(branch, account)?);
        self.shared.statement_at(path, start.into(), end.into()).await
    }

    pub async fn program_subtransactions(
        &self,
        branch: &str,
        account: &str,
        debit_id: &str,
        subtransaction_id: Option<&str>,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/statements/{}/debits/{}/subtransactions",
            account_key(branch, account)?,
            required("debit_id", debit_id)?,
        );
        let query = Params::new().optional_text("idSubtransaction", subtransaction_id);
        self.shared.subtransactions_at(path, query).await
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
            "{API_PREFIX}/extratos/{}/fundos-investimentos/{}",
            account_key(branch, account)?,
            required("fund_id", fund_id)?,
        );
        self.shared.fund_statement_at(path, month, year).await
    }

    pub async fn savings_statement(
        &self,
        branch: &str,
        account: &str,
        variation: &str,
        month: u32,
        year: i32,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/extratos/{}/poupanca/{}",
            account_key(branch, account)?,
            required("variation", variation)?,
        );
        let query = Params::new()
            .integer("mes", i64::from(month))
            .integer("ano", i64::from(year));
        self.shared.savings_statement_at(path, query).await
    }

    /// Entries updated in the period, one page at a time.
    pub async fn updated_entries(
        &self,
        program: &str,
        start: impl Into<DateLike>,
        end: impl Into<DateLike>,
        page: u32,
    ) -> Result<Table> {
        let request = self.updated_request("lancamentos-atualizados", program, start.into(), end.into(), page)?;
        self.shared.dispatcher().call_shaped(request, &UPDATED_ENTRIES).await
    }

    pub async fn updated_sub_entries(
        &self,
        program: &str,
        start: impl Into<DateLike>,
        end: impl Into<DateLike>,
        page: u32,
    ) -> Result<Table> {
        let request = self.updated_request("sublancamentos-atualizados", program, start.into(), end.into(), page)?;
        self.shared.dispatcher().call_shaped(request, &UPDATED_SUB_ENTRIES).await
    }

    fn updated_request(
        &self,
        resource: &str,
        program: &str,
        start: DateLike,
        end: DateLike,
        page: u32,
    ) -> Result<ApiRequest> {
        let path = format!(
            "{API_PREFIX}/programas-governo/{}/orgaos-repasse/{resource}",
            required("program", program)?,
        );
        Ok(ApiRequest::get(path).query(
            Params::new()
                .date("dataInicio", start)
                .date("dataFim", end)
                .integer("pagina", i64::from(page)),
        ))
    }

    pub async fn program_categories(&self, program: &str) -> Result<Table> {
        let path = format!("{API_PREFIX}/programas-governo/{}/categorias", required("program", program)?);
        self.shared.dispatcher().call_shaped(ApiRequest::get(path), &CATEGORIES).await
    }

    pub async fn financial_investment_balance(&self, branch: &str, account: &str) -> Result<Table> {
        let path = format!("{API_PREFIX}/saldos/{}/aplicacoes-financeiras", account_key(branch, account)?);
        self.shared.dispatcher().call_shaped(ApiRequest::get(path), &FINANCIAL_BALANCE).await
    }

    pub async fn checking_account_balance(&self, branch: &str, account: &str) -> Result<Table> {
        let path = format!("{API_PREFIX}/saldos/{}/conta-corrente", account_key(branch, account)?);
        self.shared.dispatcher().call_shaped(ApiRequest::get(path), &CHECKING_BALANCE).await
    }

    pub async fn assign_credit_expense_category(
        &self,
        bank_order: &str,
        item: &str,
        category: &CreditExpenseCategory,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/orgaos-repasse/lancamentos-credito/{}-{}/categorias-despesa",
            required("bank_order", bank_order)?,
            required("item", item)?,
        );
        self.shared
            .dispatcher()
            .call(ApiRequest::post(path).body(category.to_params()))
            .await
    }

    pub async fn identify_credit_entry(
        &self,
        branch: &str,
        account: &str,
        identification: &CreditEntryIdentification,
    ) -> Result<Table> {
        let path = format!("{API_PREFIX}/orgaos-repasse/{}/lancamentos-credito", account_key(branch, account)?);
        self.shared
            .dispatcher()
            .call(ApiRequest::post(path).body(identification.to_params()))
            .await
    }

    pub async fn delete_credit_entry_identification(
        &self,
        branch: &str,
        account: &str,
        entry_sequence: &str,
        identification_sequence: &str,
    ) -> Result<Table> {
        let path = format!(
            "{API_PREFIX}/orgaos-repasse/{}/lancamentos-credito/{}-{}",
            account_key(branch, account)?,
            required("entry_sequence", entry_sequence)?,
            required("identification_sequence", identification_sequence)?,
        );
        self.shared.dispatcher().call(ApiRequest::delete(path)).await
    }

    pub async fn debit_entry_identifications(&self, branch: &str, account: &str, page: u32) -> Result<Table> {
        let path = format!("{API_PREFIX}/orgaos-repasse/{}/lancamentos-debito", account_key(branch, account)?);
        let request = ApiRequest::get(path).query(Params::new().integer("numeroPagina", i64::from(page)));
        self.shared.dispatcher().call_shaped(request, &DEBIT_IDENTIFICATIONS).await
    }
}
