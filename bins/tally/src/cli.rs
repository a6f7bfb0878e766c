//! Command-line definitions.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tally_core::ledger::{AccountType, CompanyProfile, EntryLineInput, parse_entry_date};

/// Local double-entry bookkeeping ledger.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// SQLite file to use instead of the configured database URL.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed the chart of accounts and company profile if the store is new.
    Init,
    /// List accounts, optionally by type or parent.
    Accounts {
        /// Only accounts of this type.
        #[arg(long = "type", value_name = "TYPE")]
        account_type: Option<AccountType>,
        /// Only direct children of this account ("" for roots).
        #[arg(long, conflicts_with = "account_type")]
        parent: Option<String>,
    },
    /// Add a user account to the chart.
    AddAccount {
        /// Account code.
        code: String,
        /// Account name.
        name: String,
        /// Parent account code; omit for a root account.
        #[arg(long)]
        parent: Option<String>,
        /// Account type.
        #[arg(long = "type", value_name = "TYPE")]
        account_type: AccountType,
    },
    /// Rename a user account.
    RenameAccount {
        /// Account code.
        code: String,
        /// New name.
        name: String,
    },
    /// Post a journal entry.
    Post {
        /// Entry date (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Description of the entry.
        #[arg(long)]
        concept: String,
        /// One line as CODE:DEBIT:CREDIT; an empty amount means zero.
        #[arg(long = "line", value_name = "CODE:DEBIT:CREDIT", value_parser = parse_line, required = true)]
        lines: Vec<EntryLineInput>,
    },
    /// List entries, newest first.
    Entries {
        /// Earliest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
        /// Case-insensitive substring of the concept.
        #[arg(long)]
        concept: Option<String>,
    },
    /// Show an entry with its lines.
    Show {
        /// Entry id.
        id: i64,
    },
    /// Delete an entry and its lines.
    Delete {
        /// Entry id.
        id: i64,
    },
    /// Balance of one account.
    Balance {
        /// Account code.
        code: String,
        /// Only count entries dated on or before this day.
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Financial reports.
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
    /// Audit trail.
    Audit {
        /// Only records about this entry.
        #[arg(long)]
        entry: Option<i64>,
        /// Number of most recent records to show.
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Show the company profile, or update the given fields.
    Company(CompanyArgs),
}

/// Report commands.
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Assets against liabilities and equity.
    BalanceSheet {
        /// Report date.
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Income against expenses.
    IncomeStatement {
        /// Report date.
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Debit and credit totals per account.
    TrialBalance {
        /// Report date.
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Postings per account with running balances.
    Ledger {
        /// Only this account.
        #[arg(long)]
        account: Option<String>,
        /// Earliest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Entries in date order with their lines.
    Journal {
        /// Earliest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive.
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
}

/// Company profile fields to change.
#[derive(Debug, Default, Args)]
pub struct CompanyArgs {
    /// Company name.
    #[arg(long)]
    pub name: Option<String>,
    /// Contact phone.
    #[arg(long)]
    pub phone: Option<String>,
    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,
    /// Postal address.
    #[arg(long)]
    pub address: Option<String>,
    /// Tax identifier.
    #[arg(long)]
    pub tax_id: Option<String>,
    /// Logo as a data URL; an empty value removes it.
    #[arg(long)]
    pub logo: Option<String>,
}

impl CompanyArgs {
    /// True when no field was given.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.tax_id.is_none()
            && self.logo.is_none()
    }

    /// Overwrites the given fields of `profile`.
    pub fn apply(self, mut profile: CompanyProfile) -> CompanyProfile {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(address) = self.address {
            profile.address = address;
        }
        if let Some(tax_id) = self.tax_id {
            profile.tax_id = tax_id;
        }
        if let Some(logo) = self.logo {
            profile.logo = (!logo.is_empty()).then_some(logo);
        }
        profile
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_entry_date(raw).map_err(|err| err.to_string())
}

/// Parses `CODE:DEBIT:CREDIT`.
///
/// Amount checks beyond "is a number" are left to entry validation so the
/// error names the offending line.
fn parse_line(raw: &str) -> Result<EntryLineInput, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(code), Some(debit), Some(credit)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected CODE:DEBIT:CREDIT, got '{raw}'"));
    };

    Ok(EntryLineInput {
        account_code: code.trim().to_string(),
        debit: parse_amount(debit)?,
        credit: parse_amount(credit)?,
    })
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw).map_err(|_| format!("invalid amount '{raw}'"))
}
