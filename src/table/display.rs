//! Portuguese display labels for wire field names, applied only when
//! `display_names` is enabled. Fields without an entry keep their wire name.

pub type DisplayNames = &'static [(&'static str, &'static str)];

pub const NEARBY_BRANCHES: DisplayNames = &[
    ("quantidadeAgencia", "Quantidade Agências"),
    ("codigo", "Código"),
    ("digito", "Dígito"),
    ("nome", "Nome"),
    ("cep", "CEP"),
    ("logradouro", "Logradouro"),
    ("bairro", "Bairro"),
    ("municipio", "Munícipio"),
    ("siglaUF", "Sigla UF"),
    ("sugerida", "Sugerida"),
];

pub const STATEMENT: DisplayNames = &[
    ("governmentProgramCode", "Código Programa Governo"),
    ("governmentProgramName", "Nome Programa Governo"),
    ("governmentSubProgramCode", "Código SubPrograma Governo"),
    ("governmentSubProgramName", "Nome SubPrograma Governo"),
    ("id", "ID Transação"),
    ("bookingDate", "Data Agendamento"),
    ("orderIndex", "Índice Ordem"),
    ("valueDate", "Data Valor"),
    ("referenceNumber", "Número Referência"),
    ("value", "Valor"),
    ("accountBalance", "Saldo Conta"),
    ("descriptionCode", "Código Descrição"),
    ("descriptionName", "Nome Descrição"),
    ("descriptionBatchNumber", "Número Lote Descrição"),
    ("creditDebitIndicator", "Indicador Crédito Débito"),
    ("beneficiaryBankIdentifierCode", "Código Identificador Banco Beneficiário"),
    ("beneficiaryBranchCode", "Código Agência Beneficiário"),
    ("beneficiaryAccountNumber", "Número Conta Beneficiário"),
    ("beneficiaryPersonType", "Tipo Pessoa Beneficiário"),
    ("beneficiaryDocumentId", "ID Documento Beneficiário"),
    ("beneficiaryName", "Nome Beneficiário"),
    ("pendingExpenseConciliation", "Conciliação Despesa Pendente"),
    ("attachedExpenseDocumentIndicator", "Indicador Anexo Documento Despesa"),
    ("expenseCategoryCode", "Código Categoria Despesa"),
    ("expenseIdentificationStatus", "Status Identificação Despesa"),
    ("subTransactionQuantity", "Quantidade Subtransações"),
    ("bankOrderRuleCode", "Código Ordem Pagamento Banco"),
    ("bankOrderPurposeCode", "Código Finalidade Ordem Banco"),
    ("bankOrderPurposeDescription", "Descrição Finalidade Ordem Banco"),
    ("expenseSequentialNumber", "Número Sequencial Despesa"),
    ("expensesCategory", "Categoria Despesa"),
    ("expensesDocuments", "ID Documento Despesa"),
];

// `code` would collide with `expenseCategoryCode`'s label and keeps its wire name
pub const SUBTRANSACTIONS: DisplayNames = &[
    ("governmentProgramCode", "Código Programa Governo"),
    ("governmentProgramName", "Nome Programa Governo"),
    ("governmentSubProgramCode", "Código SubPrograma Governo"),
    ("governmentSubProgramName", "Nome SubPrograma Governo"),
    ("id", "ID"),
    ("codeSubtransactionState", "Estado Código Subtransação"),
    ("paymentState", "Estado Pagamento"),
    ("paymentDate", "Data Pagamento"),
    ("value", "Valor"),
    ("beneficiaryBankIdentifierCode", "Código Identificador Banco Beneficiário"),
    ("beneficiaryBranchCode", "Código Agência Beneficiário"),
    ("beneficiaryAccountNumber", "Número Conta Beneficiário"),
    ("beneficiaryPersonType", "Tipo Pessoa Beneficiário"),
    ("beneficiaryDocumentId", "ID Documento Beneficiário"),
    ("beneficiaryName", "Nome Beneficiário"),
    ("attachedExpenseDocumentIndicator", "Indicador Anexo Documento Despesa"),
    ("expenseCategoryCode", "Código Categoria Despesa"),
    ("subtransactionAccountabilityIndicator", "Indicador Contabilidade Subtransação"),
    ("subtransactionAccountabilityName", "Nome Contabilidade Subtransação"),
    ("bankOrderPurposeCode", "Código Finalidade Ordem Banco"),
    ("bankOrderRuleCode", "Código Ordem Pagamento Banco"),
    ("bankOrderPurposeDescription", "Descrição Finalidade Ordem Banco"),
    ("expenseSequentialNumber", "Número Sequencial Despesa"),
    ("parentCode", "Código Pai Categoria Despesa"),
    ("name", "Nome Categoria Despesa"),
    ("expensesDocuments", "Documentos Despesa"),
];

pub const ISSUER: DisplayNames = &[
    ("corporateTaxPayerRegistry", "CNPJ"),
    ("individualTaxPayerRegistry", "CPF"),
    ("stateRegistrationNumber", "RG"),
    ("legalName", "Nome Legal"),
    ("tradeName", "Nome Social"),
    ("countryName", "Nacionalidade"),
    ("stateAbbreviation", "UF"),
    ("cityName", "Cidade"),
    ("districtName", "Bairro"),
    ("additionalAddressInformation", "Endereço"),
    ("postalCode", "CEP"),
    ("phoneNumber", "Telefone"),
];

pub const RECIPIENT: DisplayNames = &[
    ("corporateTaxPayerRegistry", "CNPJ"),
    ("individualTaxPayerRegistry", "CPF"),
    ("stateRegistrationNumber", "RG"),
    ("legalName", "Nome Legal"),
    ("tradeName", "Nome Social"),
    ("countryName", "Nacionalidade"),
    ("stateAbbreviation", "UF"),
    ("cityName", "Cidade"),
    ("districtName", "Bairro"),
    ("additionalAddressInformation", "Endereço"),
    ("postalCode", "CEP"),
    ("phoneNumber", "Telefone"),
    ("presenceTypeCode", "Código Tipo Presença"),
    ("typeConsumerCode", "Código Tipo Consumidor"),
];

pub const DOCUMENT_ITEMS: DisplayNames = &[
    ("accessKey", "Chave Acesso"),
    ("receiptTypeCode", "Código Tipo Recibo"),
    ("typeCode", "Código Tipo"),
    ("serialCode", "Código Série"),
    ("number", "Número"),
    ("issueDate", "Data Emissão"),
    ("movementDate", "Data Movimentação"),
    ("itemDeliveryDate", "Data Entrega"),
    ("value", "Valor"),
    ("operationTypeName", "Nome Tipo Operação"),
    ("operation", "Operação"),
    ("paymentMethod", "Método Pagamento"),
    ("digitalSignatureCode", "Código Assinatura Digital"),
    ("pronafAbilityRegistration", "Registro Habilidade Pronaf"),
    ("timestamp", "Momento"),
    ("userId", "ID Usuário"),
    ("discountValue", "Valor Desconto"),
    ("totalDiscountValue", "Valor Total Desconto"),
    ("realeaseInstrumentCode", "Código Liberação de Instrumento"),
    ("realeaseInstrumentName", "Nome Liberação Instrumento"),
    ("realeaseInstrumentDate", "Data Liberação Instrumento"),
    ("additionalInformation", "Informação Adicional"),
    ("description", "Descrição Item"),
    ("quantity", "Quantidade Item"),
    ("metric", "Métrica Item"),
    ("unitValue", "Valor Unitário Item"),
    ("totalValue", "Valor Total Item"),
    ("mercosurCommonNameId", "ID Nome Comum Mercosul"),
    ("itemDiscountValue", "Valor Desconto Item"),
];

pub const UPDATED_ENTRIES: DisplayNames = &[
    ("totalPaginas", "Total Páginas"),
    ("agencia", "Agência"),
    ("contaCorrente", "Conta Corrente"),
    ("sequencialLancamento", "Sequencial Lançamento"),
];

pub const UPDATED_SUB_ENTRIES: DisplayNames = &[
    ("totalPaginas", "Total Páginas"),
    ("agencia", "Agência"),
    ("contaCorrente", "Conta Corrente"),
    ("sequencialLancamento", "Sequencial Lançamento"),
    ("sequencialSublancamento", "Sequencial Sublançamento"),
];

pub const CATEGORIES: DisplayNames = &[
    ("codigo", "Código Categoria"),
    ("nome", "Nome Categoria"),
    ("codigoCategoriaAgrupadora", "Código Categoria Agrupadora"),
    ("indicadorDespesaAtiva", "Indicador Despesa Ativa"),
];

pub const FINANCIAL_BALANCE: DisplayNames = &[
    ("dataSaldo", "Data Saldo"),
    ("valorDisponibilidade", "Valor Disponibilidade"),
    ("codigo", "Código"),
    ("valor", "Valor"),
    ("indicadorSaldoNaoDisponivel", "Indicador Saldo Não Disponível"),
    ("mensagemSaldoApurado", "Mensagem Saldo Apurado"),
];

pub const CHECKING_BALANCE: DisplayNames = &[
    ("dataSaldo", "Data Saldo"),
    ("valorDisponibilidade", "Valor Disponibilidade"),
];

pub const DEBIT_IDENTIFICATIONS: DisplayNames = &[
    ("numeroPaginaTotal", "Número Página Total"),
    ("quantidadeIdentificacaoLancamento", "Quantidade Identificação Lançamento"),
    ("numeroSequencialLancamentoContaCorrente", "Número Sequencial Lançamento Conta Corrente"),
    ("numeroSequencialIdentificacaoLancamento", "Número Sequencial Identificação Lançamento"),
    ("tipoIdentificacao", "Tipo Identificação"),
    ("tipoIdentificacaoTexto", "Tipo Identificação Texto"),
    ("codigoIdentificacao", "Código Identificação"),
    ("numeroCompanhia", "Número Companhia"),
    ("valorFracionado", "Valor Fracionado"),
];

pub const CURRENT_ACCOUNTS: DisplayNames = &[
    ("numeroRegistroConsultar", "Número Registro Consultar"),
    ("quantidadeContaCorrente", "Quantidade Conta Corrente"),
    ("codigoProgramaGoverno", "Código Programa Governo"),
    ("nomeProgramaGoverno", "Nome Programa Governo"),
    ("cnpj", "CNPJ"),
    ("agencia", "Agência"),
    ("nomeAgencia", "Nome Agência"),
    ("contaCorrente", "Conta Corrente"),
];
