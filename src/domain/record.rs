use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category stored when the entered category is empty or whitespace only.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Direction of money for a record: spent or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Expense,
    Income,
}

impl Flow {
    /// Maps the "this is income" checkbox of an entry form. Unchecked means expense.
    pub fn from_income_flag(is_income: bool) -> Self {
        if is_income { Flow::Income } else { Flow::Expense }
    }

    /// Classify a stored amount by its sign. Zero (and NaN) belongs to neither flow.
    pub fn of(amount: f64) -> Option<Self> {
        if amount > 0.0 {
            Some(Flow::Income)
        } else if amount < 0.0 {
            Some(Flow::Expense)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Expense => "expense",
            Flow::Income => "income",
        }
    }
}

impl std::str::FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" => Ok(Flow::Expense),
            "income" => Ok(Flow::Income),
            other => Err(format!("unknown flow '{other}', expected expense or income")),
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ledger entry.
///
/// Expenses carry a negative `amount` and income a positive one. The sign is
/// fixed when the record is created and never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub category: String,
    /// Signed amount in the ledger's currency unit
    pub amount: f64,
}

impl Record {
    /// Build a record from raw form input.
    ///
    /// `magnitude` is expected to be non-negative; it is not checked here, so a
    /// negative magnitude entered as an expense ends up positive.
    pub fn normalize(date: NaiveDate, category: &str, magnitude: f64, flow: Flow) -> Self {
        let category = match category.trim() {
            "" => UNCATEGORIZED.to_string(),
            trimmed => trimmed.to_string(),
        };
        let amount = match flow {
            Flow::Income => magnitude,
            Flow::Expense => -magnitude,
        };

        Self {
            date,
            category,
            amount,
        }
    }

    /// The flow this record belongs to, `None` for zero amounts.
    pub fn flow(&self) -> Option<Flow> {
        Flow::of(self.amount)
    }
}
