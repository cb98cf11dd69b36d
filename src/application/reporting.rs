use serde::{Deserialize, Serialize};

use crate::domain::{
    Amount, CategoryShare, Flow, Record, balance, category_shares, category_split, flow_total,
    monthly_series,
};

/// Headline numbers shown under the history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub record_count: usize,
    pub balance: Amount,
    pub total_income: Amount,
    /// Positive total of all expenses
    pub total_expense: Amount,
}

impl LedgerSummary {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            record_count: records.len(),
            balance: balance(records),
            total_income: flow_total(records, Flow::Income),
            total_expense: flow_total(records, Flow::Expense),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyTotal>,
    pub balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub net: Amount,
}

impl MonthlyReport {
    pub fn from_records(records: &[Record]) -> Self {
        let months = monthly_series(records)
            .into_iter()
            .map(|(month, net)| MonthlyTotal {
                month: month.to_string(),
                net,
            })
            .collect();

        Self {
            months,
            balance: balance(records),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub flow: Flow,
    pub categories: Vec<CategoryShare>,
    pub total: Amount,
}

impl CategoryReport {
    pub fn from_records(records: &[Record], flow: Flow) -> Self {
        let categories = category_shares(&category_split(records, flow));
        let total = categories.iter().map(|c| c.total).sum();

        Self {
            flow,
            categories,
            total,
        }
    }
}
