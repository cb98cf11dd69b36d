use chrono::NaiveDate;

use crate::domain::{Amount, Flow, Record};
use crate::storage::{LedgerBackend, LedgerStore, StoreConfig};

use super::{AppError, CategoryReport, LedgerSummary, MonthlyReport};

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, form UI, etc.).
pub struct LedgerService {
    store: LedgerStore,
}

impl LedgerService {
    /// Create a new ledger service over an already selected store.
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Select the backend from configuration and wrap it.
    pub fn open(config: &StoreConfig) -> Result<Self, AppError> {
        Ok(Self::new(LedgerStore::open(config)?))
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Record a new expense or income entry and return it as stored.
    pub async fn add_record(
        &self,
        date: NaiveDate,
        category: &str,
        magnitude: Amount,
        flow: Flow,
    ) -> Result<Record, AppError> {
        // The sign comes from `flow`; a negative magnitude would flip it
        if !magnitude.is_finite() {
            return Err(AppError::InvalidAmount(
                "Amount must be a finite number".to_string(),
            ));
        }
        if magnitude < 0.0 {
            return Err(AppError::InvalidAmount(
                "Amount must not be negative, the expense/income choice sets the sign".to_string(),
            ));
        }

        let record = Record::normalize(date, category, magnitude, flow);
        self.store.append(&record).await?;

        tracing::info!(
            date = %record.date,
            category = %record.category,
            amount = record.amount,
            "recorded {}",
            flow
        );
        Ok(record)
    }

    /// All records in insertion order.
    pub async fn records(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.store.load().await?)
    }

    /// Delete every record.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.clear().await?;
        Ok(())
    }

    pub async fn summary(&self) -> Result<LedgerSummary, AppError> {
        let records = self.records().await?;
        Ok(LedgerSummary::from_records(&records))
    }

    pub async fn monthly_report(&self) -> Result<MonthlyReport, AppError> {
        let records = self.records().await?;
        Ok(MonthlyReport::from_records(&records))
    }

    pub async fn category_report(&self, flow: Flow) -> Result<CategoryReport, AppError> {
        let records = self.records().await?;
        Ok(CategoryReport::from_records(&records, flow))
    }
}
