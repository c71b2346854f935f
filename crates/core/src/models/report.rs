use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::period::PeriodKey;

/// Category label → summed amount, for one kind and an optional period.
pub type CategoryBreakdown = HashMap<String, Decimal>;

/// Balance of a selected month, split into what was carried in and what
/// happened inside the month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Signed sum of everything dated before the period
    pub previous_balance: Decimal,

    /// Income inside the period
    pub current_income: Decimal,

    /// Expense inside the period
    pub current_expense: Decimal,

    /// `current_income - current_expense`
    pub current_balance: Decimal,

    /// `previous_balance + current_balance`
    pub total_balance: Decimal,
}

/// One month of the income/expense trend.
///
/// Months with no transactions never appear, so consecutive points
/// are not necessarily consecutive months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub period: PeriodKey,
    pub income: Decimal,
    pub expense: Decimal,

    /// Cumulative net across this and all earlier months
    pub balance: Decimal,
}
