// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use kakeibo::application::LedgerService;
use kakeibo::domain::{Flow, Record};
use kakeibo::storage::StoreConfig;
use tempfile::TempDir;

/// Helper to create a file-backed service in a temporary directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let config = StoreConfig::local(temp_dir.path().join("budget_data.json"));
    let service = LedgerService::open(&config)?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// The three-record ledger used across the aggregate tests
pub struct SampleLedger;

impl SampleLedger {
    pub fn records() -> Vec<Record> {
        vec![
            Record::normalize(parse_date("2024-01-05"), "食費", 1200.0, Flow::Expense),
            Record::normalize(parse_date("2024-01-20"), "給与", 300000.0, Flow::Income),
            Record::normalize(parse_date("2024-02-01"), "食費", 800.0, Flow::Expense),
        ]
    }

    /// Record the sample through the service, in order
    pub async fn record_all(service: &LedgerService) -> Result<()> {
        service
            .add_record(parse_date("2024-01-05"), "食費", 1200.0, Flow::Expense)
            .await?;
        service
            .add_record(parse_date("2024-01-20"), "給与", 300000.0, Flow::Income)
            .await?;
        service
            .add_record(parse_date("2024-02-01"), "食費", 800.0, Flow::Expense)
            .await?;
        Ok(())
    }
}
