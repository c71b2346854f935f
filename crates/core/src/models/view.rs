use serde::{Deserialize, Serialize};

use super::period::PeriodKey;
use super::report::{CategoryBreakdown, MonthlyPoint, PeriodTotals};
use super::transaction::{Transaction, TransactionKind};

/// Availability of the data a view was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DataState {
    /// No fetch has been attempted yet
    NotLoaded,
    /// The snapshot reflects the latest successful fetch
    Ready,
    /// The latest refresh failed; the previous snapshot is still shown
    Stale { reason: String },
    /// A refresh failed and nothing was ever loaded
    Unavailable { reason: String },
}

impl DataState {
    /// Whether aggregates computed under this state reflect real data.
    pub fn has_data(&self) -> bool {
        matches!(self, DataState::Ready | DataState::Stale { .. })
    }
}

/// Filter applied to the transactions list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// `None` shows both kinds
    pub kind: Option<TransactionKind>,

    /// `None` shows all history
    pub period: Option<PeriodKey>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_period(period: PeriodKey) -> Self {
        Self {
            kind: None,
            period: Some(period),
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(period) = self.period {
            if !period.contains(transaction.date) {
                return false;
            }
        }
        true
    }
}

/// Everything the dashboard renders for one selected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub period: PeriodKey,
    pub totals: PeriodTotals,
    pub expense_by_category: CategoryBreakdown,
    pub income_by_category: CategoryBreakdown,

    /// Full history, not just the selected month
    pub monthly_series: Vec<MonthlyPoint>,

    /// Latest entries of the selected month, newest first
    pub recent: Vec<Transaction>,

    pub data_state: DataState,
}

/// The transactions list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsView {
    pub filter: TransactionFilter,

    /// Filtered rows, newest first
    pub transactions: Vec<Transaction>,

    /// Period totals when a month is selected, all-time totals otherwise.
    /// The kind filter does not affect them.
    pub totals: PeriodTotals,

    pub data_state: DataState,
}
