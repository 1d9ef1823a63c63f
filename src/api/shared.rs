//! Operations available to both agency roles.
//!
//! Role wrappers own a `SharedOperations` and route the role-specific
//! variants of the statement endpoints through the `*_at` helpers below.

use std::sync::Arc;

use serde_json::Value;

use crate::config::credentials::Credentials;
use crate::config::settings::ClientConfig;
use crate::dispatch::{ApiRequest, Dispatcher};
use crate::error::{ApiError, Result};
use crate::helpers::time::{Clock, SystemClock};
use crate::normalize::{DateLike, Params};
use crate::table::{display, Table, TableShape};
use crate::transport::{ReqwestTransport, Transport};
use crate::utils::constants::API_PREFIX;

pub(crate) const GOVERNMENT_PROGRAM: &[&str] = &[
    "governmentProgramCode",
    "governmentProgramName",
    "governmentSubProgramCode",
    "governmentSubProgramName",
];

pub(crate) const PROGRAMA_GOVERNO: &[&str] = &[
    "codigoProgramaGoverno",
    "nomeProgramaGoverno",
    "codigoSubProgramaGoverno",
    "nomeSubProgramaGoverno",
];

const DOCUMENT_HEADER: &[&str] = &[
    "accessKey",
    "receiptTypeCode",
    "typeCode",
    "serialCode",
    "number",
    "issueDate",
    "movementDate",
    "itemDeliveryDate",
    "value",
    "operationTypeName",
    "operation",
    "paymentMethod",
    "digitalSignatureCode",
    "pronafAbilityRegistration",
    "timestamp",
    "userId",
    "discountValue",
    "totalDiscountValue",
    "realeaseInstrumentCode",
    "realeaseInstrumentName",
    "realeaseInstrumentDate",
    "additionalInformation",
];

const FUND_HEADER: &[&str] = &[
    "numeroAgenciaRecebedora",
    "digitoVerificadorContaRecebedora",
    "numeroContaCorrenteRecebedora",
    "numeroDigitoVerificadorContaCorrenteRecebedora",
    "nomeClienteRecebedor",
    "nomeFundoInvestimento",
    "CNPJFundoInvestimento",
    "valorCotaExtrato",
    "dataAfericaoValorCota",
    "ultimaCotacaoCota",
    "dataUltimaCotacaoCota",
    "sinalRentabilidadeMes",
    "valorRentabilidadeMes",
    "sinalRentabilidadeAno",
    "valorRentabilidadeAno",
    "sinalRentabilidadeResgateTotal",
    "valorRentabilidadeResgateTotal",
    "valorDisponivelResgate",
    "valorCarenciaResgate",
    "valorIRPrevisto",
    "percentualIRPrevisto",
    "valorIRComplementarPrevisto",
    "valorIOFPrevisto",
    "valorTaxaSaida",
    "valorBonusDesempenho",
    "valorBloqueado",
    "valorAplicado",
    "valorResgate",
    "valorSaldoAnterior",
    "quantidadeCotaAnterior",
    "dataSaldoAnterior",
    "valorTotalAplicadoPeriodo",
    "valorTotalResgatadoPeriodo",
    "sinalRendimentoBrutoPeriodo",
    "valorRendimentoBrutoPeriodo",
    "valorTotalIRPeriodo",
    "valorTotalIOFPeriodo",
    "valorTotalTaxaSaidaPeriodo",
    "valorTotalBonusDesempenhoPeriodo",
    "sinalRendimentoLiquido",
    "valorRendimentoLiquido",
    "valorSaldoMesAnterior",
    "quantidadeCotaMesAnterior",
    "dataSaldoMesAnterior",
    "numeroLancamento",
];

const SAVINGS_HEADER: &[&str] = &[
    "codigoProgramaGoverno",
    "nomeProgramaGoverno",
    "codigoSubProgramaGoverno",
    "nomeSubProgramaGoverno",
    "nomeCliente",
    "identificadorCliente",
    "saldoAnterior",
    "saldoAtual",
    "saldoBloqueado",
    "saldoDisponivel",
];

const NEARBY_BRANCHES: TableShape = TableShape::rows("listaAgencia")
    .insert(&["quantidadeAgencia"])
    .display(display::NEARBY_BRANCHES);
const ISSUER: TableShape = TableShape::PLAIN.display(display::ISSUER);
const RECIPIENT: TableShape = TableShape::PLAIN.display(display::RECIPIENT);
const DOCUMENT_ITEMS: TableShape = TableShape::rows("items")
    .section("expenseDocument")
    .insert(DOCUMENT_HEADER)
    .display(display::DOCUMENT_ITEMS);
const STATEMENT: TableShape = TableShape::rows("transactions")
    .insert(GOVERNMENT_PROGRAM)
    .explode(&["expensesDocuments"])
    .display(display::STATEMENT);
const SUBTRANSACTIONS: TableShape = TableShape::rows("subtransactions")
    .insert(GOVERNMENT_PROGRAM)
    .explode(&["expensesCategory", "expensesDocuments"])
    .display(display::SUBTRANSACTIONS);
const FUND_STATEMENT: TableShape = TableShape::rows("listaLancamentosExtrato")
    .section("extrato")
    .insert(FUND_HEADER);
const SAVINGS_STATEMENT: TableShape = TableShape::rows("listaLancamentos").insert(SAVINGS_HEADER);

/// The three parts of a fiscal expense document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDocument {
    pub issuer: Table,
    pub recipient: Table,
    /// one row per item, document header repeated on each
    pub document: Table,
}

/// Trimmed path segment; empty means the caller forgot it.
pub(crate) fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingParameter(name));
    }
    Ok(trimmed)
}

/// `{branch}-{account}` as used in every account-scoped path.
pub(crate) fn account_key(branch: &str, account: &str) -> Result<String> {
    Ok(format!("{}-{}", required("branch", branch)?, required("account", account)?))
}

fn part<'a>(payload: &'a Value, key: &str) -> Result<&'a Value> {
    payload
        .get(key)
        .ok_or_else(|| ApiError::InvalidResponse(format!("response has no '{key}' object")))
}

pub struct SharedOperations<T> {
    dispatcher: Dispatcher<T>,
}

impl SharedOperations<ReqwestTransport> {
    /// reqwest transport with the configured timeout, system clock.
    pub fn connect(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        let transport = ReqwestTransport::new(config.http.timeout_ms)?;
        Ok(Self::with_parts(config, credentials, Arc::new(transport), Arc::new(SystemClock)))
    }
}

impl<T: Transport> SharedOperations<T> {
    pub fn with_parts(
        config: &ClientConfig,
        credentials: Credentials,
        transport: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, credentials, transport, clock),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    pub async fn nearby_branches(&self, cnpj: &str, cep: &str) -> Result<Table> {
        let request = ApiRequest::get(format!("{API_PREFIX}/agencias-proximas"))
            .query(Params::new().document("cnpj", cnpj).postal_code("cep", cep));
        self.dispatcher.call_shaped(request, &NEARBY_BRANCHES).await
    }

    pub async fn expense_document(
        &self,
        branch: &str,
        account: &str,
        transaction_id: &str,
        document_id: &str,
        booking_date: impl Into<DateLike>,
    ) -> Result<ExpenseDocument> {
        let path = format!(
            "{API_PREFIX}/expenses/{}/transactions/{}/documents/{}",
            account_key(branch, account)?,
            required("transaction_id", transaction_id)?,
            required("document_id", document_id)?,
        );
        self.fetch_expense_document(path, booking_date.into()).await
    }

    /// Document attached to a subtransaction of an accountability entry.
    pub async fn accountability_expense_document(
        &self,
        branch: &str,
        account: &str,
        transaction_id: &str,
        subtransaction_id: &str,
        document_id: &str,
        booking_date: impl Into<DateLike>,
    ) -> Result<ExpenseDocument> {
        let path = format!(
            "{API_PREFIX}/expenses/{}/transactions/{}/subTransactions/{}/documents/{}",
            account_key(branch, account)?,
            required("transaction_id", transaction_id)?,
            required("subtransaction_id", subtransaction_id)?,
            required("document_id", document_id)?,
        );
        self.fetch_expense_document(path, booking_date.into()).await
    }

    async fn fetch_expense_document(&self, path: String, booking_date: DateLike) -> Result<ExpenseDocument> {
        let request = ApiRequest::get(path).query(Params::new().date("bookingDate", booking_date));
        let payload = self.dispatcher.call_json(request).await?;

        Ok(ExpenseDocument {
            issuer: self.dispatcher.present(&ISSUER, part(&payload, "issuer")?)?,
            recipient: self.dispatcher.present(&RECIPIENT, part(&payload, "recipient")?)?,
            document: self.dispatcher.present(&DOCUMENT_ITEMS, &payload)?,
        })
    }

    pub(crate) async fn statement_at(
        &self,
        path: String,
        start: DateLike,
        end: DateLike,
    ) -> Result<Table> {
        let request = ApiRequest::get(path)
            .query(Params::new().date("startDate", start).date("endDate", end));
        self.dispatcher.call_shaped(request, &STATEMENT).await
    }

    pub(crate) async fn subtransactions_at(&self, path: String, query: Params) -> Result<Table> {
        let request = ApiRequest::get(path).query(query);
        self.dispatcher.call_shaped(request, &SUBTRANSACTIONS).await
    }

    pub(crate) async fn fund_statement_at(&self, path: String, month: u32, year: i32) -> Result<Table> {
        let request = ApiRequest::get(path).query(
            Params::new()
                .integer("mes", i64::from(month))
                .integer("ano", i64::from(year)),
        );
        let mut payload = self.dispatcher.call_json(request).await?;

        // the statement's own quota value would clash with the entries' `valorCota`
        if let Some(extrato) = payload.get_mut("extrato").and_then(Value::as_object_mut) {
            if let Some(quota) = extrato.remove("valorCota") {
                extrato.insert("valorCotaExtrato".to_string(), quota);
            }
        }

        let mut table = FUND_STATEMENT.apply(&payload)?;
        for field in PROGRAMA_GOVERNO {
            table.insert_column(field, payload.get(*field).cloned().unwrap_or(Value::Null));
        }
        Ok(table)
    }

    pub(crate) async fn savings_statement_at(&self, path: String, query: Params) -> Result<Table> {
        let request = ApiRequest::get(path).query(query);
        self.dispatcher.call_shaped(request, &SAVINGS_STATEMENT).await
    }
}
