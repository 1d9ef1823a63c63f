use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use bb_accountability::api::{OversightAgencyApi, TransferringAgencyApi};
use bb_accountability::config::loader;
use bb_accountability::config::{ClientConfig, Credentials, Environment};
use bb_accountability::observability::metrics;
use bb_accountability::table::Table;
use bb_accountability::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML client config; defaults apply when omitted
    #[arg(short, long, env = "CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// overrides the environment from the config file
    #[arg(long, value_enum)]
    environment: Option<Environment>,
    #[arg(long)]
    app_key: Option<String>,
    #[arg(long)]
    client_id: Option<String>,
    #[arg(long)]
    client_secret: Option<String>,
    /// print the metrics exposition after the call
    #[arg(long)]
    metrics: bool,
    /// Portuguese column labels instead of wire names
    #[arg(long)]
    display_names: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Transferring,
    Oversight,
}

#[derive(Subcommand)]
enum Command {
    /// Branches close to a postal code
    NearbyBranches {
        #[arg(long)]
        cnpj: String,
        #[arg(long)]
        cep: String,
    },
    /// Government program statement of an account
    Statement {
        #[arg(long, value_enum, default_value = "transferring")]
        role: Role,
        #[arg(long)]
        branch: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Expense categories of a government program
    Categories {
        #[arg(long)]
        program: String,
    },
    /// Checking accounts visible to an oversight agency
    CurrentAccounts {
        #[arg(long)]
        registry_number: String,
    },
    /// Savings statement; month/year for transferring, variation code for oversight
    SavingsStatement {
        #[arg(long, value_enum, default_value = "transferring")]
        role: Role,
        #[arg(long)]
        branch: String,
        #[arg(long)]
        account: String,
        #[arg(long)]
        variation: String,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        variation_code: Option<i64>,
    },
    CheckingBalance {
        #[arg(long)]
        branch: String,
        #[arg(long)]
        account: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Config and logging
    // -------------------------------

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::file_to_config(path).await?,
        None => ClientConfig::default(),
    };
    if let Some(environment) = args.environment {
        config.environment = environment;
    }
    config.display_names |= args.display_names;
    logging::run(&config, args.log_level);

    // -------------------------------
    // 2. Credentials, once
    // -------------------------------

    let credentials = Credentials::resolve(
        args.app_key.clone(),
        args.client_id.clone(),
        args.client_secret.clone(),
    )?;
    info!(environment = ?config.environment, api = config.api_domain(), "client configured");

    // -------------------------------
    // 3. Run the requested operation
    // -------------------------------

    let table = run_command(args.command, &config, credentials).await?;
    print!("{table}");

    if args.metrics {
        println!();
        print!("{}", metrics::render());
    }
    Ok(())
}

async fn run_command(command: Command, config: &ClientConfig, credentials: Credentials) -> Result<Table> {
    let table = match command {
        Command::NearbyBranches { cnpj, cep } => {
            TransferringAgencyApi::new(config, credentials)?
                .nearby_branches(&cnpj, &cep)
                .await?
        }
        Command::Statement { role: Role::Transferring, branch, account, start, end } => {
            TransferringAgencyApi::new(config, credentials)?
                .program_statement(&branch, &account, start.as_str(), end.as_str())
                .await?
        }
        Command::Statement { role: Role::Oversight, branch, account, start, end } => {
            OversightAgencyApi::new(config, credentials)?
                .program_statement(&branch, &account, start.as_str(), end.as_str())
                .await?
        }
        Command::Categories { program } => {
            TransferringAgencyApi::new(config, credentials)?
                .program_categories(&program)
                .await?
        }
        Command::CurrentAccounts { registry_number } => {
            OversightAgencyApi::new(config, credentials)?
                .current_accounts(&registry_number)
                .await?
        }
        Command::SavingsStatement { role: Role::Transferring, branch, account, variation, month, year, .. } => {
            let month = month.context("--month is required for the transferring role")?;
            let year = year.context("--year is required for the transferring role")?;
            TransferringAgencyApi::new(config, credentials)?
                .savings_statement(&branch, &account, &variation, month, year)
                .await?
        }
        Command::SavingsStatement { role: Role::Oversight, branch, account, variation, variation_code, .. } => {
            let code = variation_code.context("--variation-code is required for the oversight role")?;
            OversightAgencyApi::new(config, credentials)?
                .savings_statement(&branch, &account, &variation, code)
                .await?
        }
        Command::CheckingBalance { branch, account } => {
            TransferringAgencyApi::new(config, credentials)?
                .checking_account_balance(&branch, &account)
                .await?
        }
    };
    Ok(table)
}
