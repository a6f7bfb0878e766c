//! Tally command-line front end.
//!
//! Opens the store once, runs one command, prints the result as JSON on
//! stdout and closes the store. Failures are written to stderr as JSON and
//! mapped to a non-zero exit code.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::ledger::{CreateEntryInput, EntryFilter, LedgerError, NewAccount};
use tally_db::{
    AccountRepository, AuditRepository, CompanyRepository, LedgerRepository, ReportRepository,
    SeedOutcome, Store, StoreError, initialize,
};
use tally_shared::types::EntryId;
use tally_shared::{AppConfig, AppError, DatabaseConfig, LoggingConfig};

use cli::{Cli, Command, ReportCommand};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging);

    if let Some(path) = &cli.db {
        config.database.url = DatabaseConfig::sqlite_file(path).url;
    }

    let store = Store::open(&config.database).await?;
    let seeded = initialize(&store, &config.company).await?;
    debug!(?seeded, "Store ready");

    let outcome = dispatch(&store, cli.command, seeded).await;
    store.close().await?;

    let output = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output only
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[allow(clippy::too_many_lines)]
async fn dispatch(store: &Store, command: Command, seeded: SeedOutcome) -> anyhow::Result<Value> {
    let ledger = LedgerRepository::new(store.clone());

    match command {
        Command::Init => to_json(seeded),

        Command::Accounts {
            account_type,
            parent,
        } => {
            let accounts = AccountRepository::new(store.clone());
            let listed = match (account_type, parent) {
                (Some(account_type), _) => accounts.accounts_by_type(account_type).await?,
                (None, Some(parent)) => accounts.accounts_by_parent(&parent).await?,
                (None, None) => accounts.list_accounts().await?,
            };
            to_json(listed)
        }

        Command::AddAccount {
            code,
            name,
            parent,
            account_type,
        } => {
            let recorded = AccountRepository::new(store.clone())
                .create_account(&NewAccount {
                    code,
                    name,
                    parent_code: parent,
                    account_type,
                })
                .await?;
            to_json(recorded)
        }

        Command::RenameAccount { code, name } => {
            let recorded = AccountRepository::new(store.clone())
                .rename_account(&code, &name)
                .await?;
            to_json(recorded)
        }

        Command::Post {
            date,
            concept,
            lines,
        } => {
            let recorded = ledger
                .create_entry(&CreateEntryInput {
                    date,
                    concept,
                    lines,
                })
                .await?;
            info!(id = %recorded.value.entry.id, "Entry posted");
            to_json(recorded)
        }

        Command::Entries { from, to, concept } => {
            let filter = EntryFilter {
                from_date: from,
                to_date: to,
                concept_contains: concept,
            };
            to_json(ledger.list_entries(&filter).await?)
        }

        Command::Show { id } => to_json(ledger.get_entry_detail(EntryId::new(id)).await?),

        Command::Delete { id } => to_json(ledger.delete_entry(EntryId::new(id)).await?),

        Command::Balance { code, as_of } => {
            let balance = ledger.account_balance(&code, as_of).await?;
            Ok(json!({ "code": code, "as_of": as_of, "balance": balance }))
        }

        Command::Report { report } => {
            let reports = ReportRepository::new(store.clone());
            match report {
                ReportCommand::BalanceSheet { as_of } => to_json(reports.balance_sheet(as_of).await?),
                ReportCommand::IncomeStatement { as_of } => {
                    to_json(reports.income_statement(as_of).await?)
                }
                ReportCommand::TrialBalance { as_of } => to_json(reports.trial_balance(as_of).await?),
                ReportCommand::Ledger { account, from, to } => {
                    to_json(reports.general_ledger(account.as_deref(), from, to).await?)
                }
                ReportCommand::Journal { from, to } => to_json(reports.journal(from, to).await?),
            }
        }

        Command::Audit { entry, limit } => {
            let audit = AuditRepository::new(store.clone());
            match entry {
                Some(id) => to_json(audit.for_entry(EntryId::new(id)).await?),
                None => to_json(audit.recent(limit).await?),
            }
        }

        Command::Company(args) => {
            let company = CompanyRepository::new(store.clone());
            let current = company.get_company_config().await?;
            if args.is_empty() {
                return to_json(current);
            }
            to_json(company.save_company_config(&args.apply(current)).await?)
        }
    }
}

fn to_json(value: impl Serialize) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Prints `err` as JSON on stderr and picks the exit code.
fn fail(err: &anyhow::Error) -> ExitCode {
    let (code, message, exit) = if let Some(ledger) = err.downcast_ref::<LedgerError>() {
        let app = AppError::from(ledger);
        (ledger.error_code(), app.to_string(), app.exit_code())
    } else if let Some(app) = err.downcast_ref::<AppError>() {
        (app.error_code(), app.to_string(), app.exit_code())
    } else {
        let app = match err.downcast_ref::<StoreError>() {
            Some(store) => AppError::Storage(store.to_string()),
            None => AppError::Internal(format!("{err:#}")),
        };
        (app.error_code(), app.to_string(), app.exit_code())
    };

    eprintln!("{}", json!({ "error": { "code": code, "message": message } }));
    ExitCode::from(u8::try_from(exit).unwrap_or(1))
}
