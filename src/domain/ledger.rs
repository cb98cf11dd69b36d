use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Amount, Flow, Record};

/// Calendar month used to group records. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Compute the running balance: the sum of every stored amount.
pub fn balance(records: &[Record]) -> Amount {
    records.iter().map(|r| r.amount).sum()
}

/// Sum amounts per calendar month, keyed chronologically.
pub fn monthly_series(records: &[Record]) -> BTreeMap<MonthKey, Amount> {
    let mut series: BTreeMap<MonthKey, Amount> = BTreeMap::new();

    for record in records {
        *series.entry(MonthKey::of(record.date)).or_insert(0.0) += record.amount;
    }

    series
}

/// Sum absolute amounts per category for records of the given flow.
/// Zero amounts belong to neither flow, and categories without a matching
/// record are absent from the result.
pub fn category_split(records: &[Record], flow: Flow) -> BTreeMap<String, Amount> {
    let mut split: BTreeMap<String, Amount> = BTreeMap::new();

    for record in records.iter().filter(|r| r.flow() == Some(flow)) {
        *split.entry(record.category.clone()).or_insert(0.0) += record.amount.abs();
    }

    split
}

/// Total of one flow, as a positive number.
pub fn flow_total(records: &[Record], flow: Flow) -> Amount {
    records
        .iter()
        .filter(|r| r.flow() == Some(flow))
        .map(|r| r.amount.abs())
        .sum()
}

/// A category's slice of an expense or income split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    pub percentage: f64,
}

/// Turn a split into shares of its total, largest first.
/// Ties keep the split's alphabetical order.
pub fn category_shares(split: &BTreeMap<String, Amount>) -> Vec<CategoryShare> {
    let grand_total: Amount = split.values().sum();

    let mut shares: Vec<CategoryShare> = split
        .iter()
        .map(|(category, total)| CategoryShare {
            category: category.clone(),
            total: *total,
            percentage: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    shares.sort_by(|a, b| b.total.total_cmp(&a.total));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: &str, amount: Amount) -> Record {
        Record {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.to_string(),
            amount,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("2024-01-05", "食費", -1200.0),
            record("2024-01-20", "給与", 300000.0),
            record("2024-02-01", "食費", -800.0),
        ]
    }

    #[test]
    fn test_balance() {
        assert_eq!(balance(&[]), 0.0);
        assert_eq!(balance(&[record("2024-01-05", "食費", -1200.0)]), -1200.0);
        assert_eq!(balance(&sample()), 298000.0);
    }

    #[test]
    fn test_balance_is_order_independent() {
        let mut records = sample();
        records.reverse();
        assert_eq!(balance(&records), 298000.0);
    }

    #[test]
    fn test_monthly_series() {
        let series = monthly_series(&sample());

        let entries: Vec<(String, Amount)> = series
            .iter()
            .map(|(month, total)| (month.to_string(), *total))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("2024-01".to_string(), 298800.0),
                ("2024-02".to_string(), -800.0)
            ]
        );
    }

    #[test]
    fn test_monthly_series_orders_chronologically() {
        let records = vec![
            record("2024-03-01", "a", 1.0),
            record("2023-12-31", "a", 2.0),
            record("2024-01-15", "a", 3.0),
            record("2023-12-01", "a", 4.0),
        ];
        let months: Vec<String> = monthly_series(&records)
            .keys()
            .map(|m| m.to_string())
            .collect();

        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(monthly_series(&records)[&MonthKey::new(2023, 12)], 6.0);
    }

    #[test]
    fn test_category_split() {
        let records = sample();

        let expense = category_split(&records, Flow::Expense);
        assert_eq!(expense.len(), 1);
        assert_eq!(expense["食費"], 2000.0);

        let income = category_split(&records, Flow::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income["給与"], 300000.0);
    }

    #[test]
    fn test_zero_amount_is_in_neither_split() {
        let mut records = sample();
        records.push(record("2024-02-10", "free", 0.0));

        assert!(!category_split(&records, Flow::Expense).contains_key("free"));
        assert!(!category_split(&records, Flow::Income).contains_key("free"));
        assert_eq!(balance(&records), 298000.0);
        assert_eq!(monthly_series(&records)[&MonthKey::new(2024, 2)], -800.0);
    }

    #[test]
    fn test_splits_partition_nonzero_records() {
        let records = vec![
            record("2024-01-01", "rent", -90000.0),
            record("2024-01-02", "refund", 500.0),
            record("2024-01-03", "refund", -200.0),
            record("2024-01-04", "bonus", 10000.0),
        ];
        let expense = category_split(&records, Flow::Expense);
        let income = category_split(&records, Flow::Income);

        let expense_total: Amount = expense.values().sum();
        let income_total: Amount = income.values().sum();
        let abs_total: Amount = records.iter().map(|r| r.amount.abs()).sum();

        assert_eq!(expense_total + income_total, abs_total);
        assert_eq!(expense["refund"], 200.0);
        assert_eq!(income["refund"], 500.0);
        assert_eq!(flow_total(&records, Flow::Expense), expense_total);
        assert_eq!(flow_total(&records, Flow::Income), income_total);
    }

    #[test]
    fn test_empty_aggregates() {
        assert!(monthly_series(&[]).is_empty());
        assert!(category_split(&[], Flow::Expense).is_empty());
        assert!(category_split(&[], Flow::Income).is_empty());
        assert!(category_shares(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_category_shares() {
        let records = vec![
            record("2024-01-01", "食費", -750.0),
            record("2024-01-02", "交通費", -250.0),
            record("2024-01-03", "食費", -1000.0),
        ];
        let shares = category_shares(&category_split(&records, Flow::Expense));

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "食費");
        assert_eq!(shares[0].total, 1750.0);
        assert!((shares[0].percentage - 87.5).abs() < 1e-9);
        assert_eq!(shares[1].category, "交通費");
        assert!((shares[1].percentage - 12.5).abs() < 1e-9);
    }
}
