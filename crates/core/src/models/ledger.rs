use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::Transaction;

/// The last successfully fetched transaction list for one owner.
///
/// Every view is computed from this snapshot. Transactions are kept in
/// ascending date order; records sharing a date keep their fetch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub owner_id: Uuid,

    pub transactions: Vec<Transaction>,

    /// When the snapshot was last replaced by a full fetch
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Ledger {
    /// An empty, never-fetched ledger.
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            transactions: Vec::new(),
            fetched_at: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }
}
