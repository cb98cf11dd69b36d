use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{AppError, CategoryReport, LedgerService, LedgerSummary, MonthlyReport};
use crate::domain::{Flow, Record, format_amount, parse_amount};
use crate::io::{ExportFormat, Exporter};
use crate::storage::{
    DEFAULT_DATA_FILE, DEFAULT_TABLE, ENV_DATA_FILE, ENV_SERVICE_KEY, ENV_SERVICE_URL,
    StoreConfig,
};

/// Kakeibo - household expense and income book
#[derive(Parser)]
#[command(name = "kakeibo")]
#[command(about = "A small expense/income ledger stored in a JSON file or a hosted table")]
#[command(version)]
pub struct Cli {
    /// Ledger file used when no hosted table is configured
    #[arg(long, env = ENV_DATA_FILE, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Hosted database URL; together with the key selects the remote table
    #[arg(long, env = ENV_SERVICE_URL, hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// Hosted database service key
    #[arg(long, env = ENV_SERVICE_KEY, hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Remote table name
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new record (an expense unless --income is given)
    Add {
        /// Amount without sign (e.g., "1200" or "1,200")
        amount: String,

        /// Category (e.g., "食費"); blank becomes "uncategorized"
        #[arg(short, long, default_value = "")]
        category: String,

        /// Date of the record (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Record as income instead of expense
        #[arg(short, long)]
        income: bool,
    },

    /// Show every record and the current balance
    List,

    /// Show the current balance
    Balance,

    /// Aggregated reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Delete all records (irreversible)
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Export records to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Net total per month
    Monthly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Breakdown by category for expenses or income
    Categories {
        /// Which side to break down: expense, income
        #[arg(long, default_value = "expense")]
        flow: Flow,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    /// Backend configuration gathered from flags and environment.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_settings(
            &self.data_file,
            self.supabase_url.as_deref(),
            self.supabase_key.as_deref(),
            &self.table,
        )
    }

    pub async fn run(self) -> Result<()> {
        let service = LedgerService::open(&self.store_config())?;
        tracing::debug!(backend = service.backend_name(), "ledger opened");

        match self.command {
            Commands::Add {
                amount,
                category,
                date,
                income,
            } => {
                let magnitude =
                    parse_amount(&amount).context("Invalid amount format. Use '1200' or '1,200'")?;

                let date = match date {
                    Some(date_str) => parse_date(&date_str)?,
                    None => Local::now().date_naive(),
                };

                let flow = Flow::from_income_flag(income);
                let record = service.add_record(date, &category, magnitude, flow).await?;
                println!(
                    "Recorded {}: {} {} {}",
                    flow,
                    record.date,
                    record.category,
                    format_amount(record.amount)
                );
            }

            Commands::List => {
                let records = service.records().await?;
                print_history(&records);
            }

            Commands::Balance => {
                let summary = service.summary().await?;
                print_summary(&summary);
            }

            Commands::Report(report_cmd) => {
                run_report_command(&service, report_cmd).await?;
            }

            Commands::Clear { yes } => {
                if !yes {
                    bail!("Refusing to delete all records without --yes");
                }
                service.clear().await?;
                println!("Deleted all records.");
            }

            Commands::Export { format, output } => {
                run_export_command(&service, format, output.as_deref()).await?;
            }
        }

        Ok(())
    }
}

fn print_history(records: &[Record]) {
    if records.is_empty() {
        println!("No records yet. Add one with `kakeibo add <AMOUNT>`.");
        return;
    }

    println!("{:<12} {:<20} {:>14}", "DATE", "CATEGORY", "AMOUNT");
    println!("{}", "-".repeat(48));
    for record in records {
        println!(
            "{:<12} {:<20} {:>14}",
            record.date.to_string(),
            truncate(&record.category, 20),
            format_amount(record.amount)
        );
    }
    println!("{}", "-".repeat(48));
    println!();
    print_summary(&LedgerSummary::from_records(records));
}

fn print_summary(summary: &LedgerSummary) {
    println!("Balance:        {:>15}", format_amount(summary.balance));
    if summary.record_count > 0 {
        println!("  Income:       {:>15}", format_amount(summary.total_income));
        println!("  Expense:      {:>15}", format_amount(summary.total_expense));
        println!("  Records:      {:>15}", summary.record_count);
    }
}

async fn run_report_command(service: &LedgerService, cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Monthly { format } => {
            let report = service.monthly_report().await?;
            print_monthly_report(&report, &format)?;
        }

        ReportCommands::Categories { flow, format } => {
            let report = service.category_report(flow).await?;
            print_category_report(&report, &format)?;
        }
    }

    Ok(())
}

fn print_monthly_report(report: &MonthlyReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        "csv" => {
            println!("month,net");
            for month in &report.months {
                println!("{},{}", month.month, month.net);
            }
        }
        "table" => {
            if report.months.is_empty() {
                println!("No records yet.");
                return Ok(());
            }

            println!("Monthly Summary");
            println!();
            println!("{:<10} {:>15}", "MONTH", "NET");
            println!("{}", "-".repeat(26));
            for month in &report.months {
                println!("{:<10} {:>15}", month.month, format_amount(month.net));
            }
            println!("{}", "-".repeat(26));
            println!("{:<10} {:>15}", "BALANCE", format_amount(report.balance));
        }
        other => bail!("Unknown format '{}'. Valid: table, json, csv", other),
    }

    Ok(())
}

fn print_category_report(report: &CategoryReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        "csv" => {
            println!("category,total,percentage");
            for cat in &report.categories {
                println!("{},{},{:.2}", cat.category, cat.total, cat.percentage);
            }
        }
        "table" => {
            if report.categories.is_empty() {
                println!("No {} records.", report.flow);
                return Ok(());
            }

            let title = match report.flow {
                Flow::Expense => "Expenses by Category",
                Flow::Income => "Income by Category",
            };
            println!("{}", title);
            println!();
            println!("{:<20} {:>14} {:>8}", "CATEGORY", "TOTAL", "PERCENT");
            println!("{}", "-".repeat(44));
            for cat in &report.categories {
                println!(
                    "{:<20} {:>14} {:>7.1}%",
                    truncate(&cat.category, 20),
                    format_amount(cat.total),
                    cat.percentage
                );
            }
            println!("{}", "-".repeat(44));
            println!("{:<20} {:>14}", "TOTAL", format_amount(report.total));
        }
        other => bail!("Unknown format '{}'. Valid: table, json, csv", other),
    }

    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    format: ExportFormat,
    output: Option<&str>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    let count = match output {
        Some(path) => {
            // Render fully before touching the target, which may be the ledger file itself
            let mut buffer = Vec::new();
            let count = exporter.export(format, &mut buffer).await?;
            std::fs::write(path, &buffer).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("Exported {} record(s) to {}", count, path);
            count
        }
        None => exporter.export(format, std::io::stdout()).await?,
    };

    tracing::debug!(count, ?format, "export finished");
    Ok(())
}

/// Shorten to `max_len` characters, ending with "..." when cut.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(date_str.to_string()))
}
