use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::period::PeriodKey;
use crate::errors::CoreError;

/// Largest amount a single transaction may carry (10^15).
///
/// Sums of up to 10^13 such amounts stay inside `Decimal` range, so
/// aggregation over an accepted ledger cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Suggested labels for expense transactions. Not enforced.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Housing",
    "Utilities",
    "To Lend",
    "Needs",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Education",
];

/// Suggested labels for income transactions. Not enforced.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Other Income",
];

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    /// The recommended category labels for this kind.
    pub fn recommended_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Whether `label` is one of the recommended categories for this kind.
    pub fn is_recommended_category(&self, label: &str) -> bool {
        self.recommended_categories().contains(&label)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(CoreError::ValidationError(format!(
                "Unknown transaction type '{other}': expected 'income' or 'expense'"
            ))),
        }
    }
}

/// A single income or expense record owned by one user.
///
/// Field names follow the hosted store's row layout (`user_id`, `type`),
/// so records deserialize straight from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Owning user
    #[serde(rename = "user_id")]
    pub owner_id: Uuid,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always non-negative; the kind carries the sign.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Free-form label
    pub category: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Calendar date, no time component
    #[serde(with = "iso_date")]
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a fresh record for `owner_id` from submitted form fields.
    pub fn new(owner_id: Uuid, input: TransactionInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            kind: input.kind,
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every user-editable field. Identity, owner and `created_at` are kept.
    pub fn apply(&mut self, input: TransactionInput) {
        self.kind = input.kind;
        self.amount = input.amount;
        self.category = input.category;
        self.description = input.description;
        self.date = input.date;
        self.updated_at = Utc::now();
    }

    /// +amount for income, -amount for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// The year-month this transaction falls into.
    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.date)
    }
}

/// Form payload for creating or fully updating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    pub category: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(with = "iso_date")]
    pub date: NaiveDate,
}

impl TransactionInput {
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: None,
            date,
        }
    }

    /// Attach a description. Blank text clears it.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Build an input from raw form strings, rejecting anything the
    /// aggregation layer could not interpret.
    pub fn parse(
        kind: &str,
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, CoreError> {
        let kind = kind.parse::<TransactionKind>()?;
        let amount = parse_amount(amount)?;

        let category = category.trim();
        if category.is_empty() {
            return Err(CoreError::ValidationError("Category must not be empty".into()));
        }

        let date = parse_iso_date(date.trim())?;

        Ok(Self::new(kind, amount, category, date).with_description(description))
    }
}

/// Parse a decimal amount in `0..=MAX_AMOUNT`.
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    let amount =
        Decimal::from_str(trimmed).map_err(|_| CoreError::InvalidAmount(raw.to_string()))?;
    if !is_valid_amount(amount) {
        return Err(CoreError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// Whether `amount` is one a transaction may carry.
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Parse a fixed-width `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(CoreError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Serde adapter enforcing the fixed-width date format on the wire.
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }
}
