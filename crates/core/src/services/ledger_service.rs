use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::transaction::{is_valid_amount, Transaction, TransactionInput};

/// Keeps the ledger snapshot consistent with the store and rejects input
/// the aggregation layer could not interpret.
///
/// Pure business logic, no I/O.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a submitted form before it reaches the store.
    ///
    /// Rules:
    /// - Amount must lie in `0..=MAX_AMOUNT`
    /// - Category must not be blank
    pub fn validate_input(&self, input: &TransactionInput) -> Result<(), CoreError> {
        Self::check_fields(input.amount, &input.category)
    }

    /// Validate a record coming back from a store.
    pub fn validate_record(&self, transaction: &Transaction) -> Result<(), CoreError> {
        Self::check_fields(transaction.amount, &transaction.category)
            .map_err(|e| CoreError::ValidationError(format!("record {}: {e}", transaction.id)))
    }

    /// Replace the whole snapshot with a fresh fetch.
    pub fn replace_all(&self, ledger: &mut Ledger, mut transactions: Vec<Transaction>) {
        transactions.sort_by_key(|t| t.date); // stable: same-date rows keep fetch order
        ledger.transactions = transactions;
        ledger.fetched_at = Some(Utc::now());
    }

    /// Insert a record, or replace the one with the same id.
    /// The snapshot stays date-ordered.
    pub fn upsert(&self, ledger: &mut Ledger, transaction: Transaction) {
        if let Some(idx) = ledger.transactions.iter().position(|t| t.id == transaction.id) {
            ledger.transactions.remove(idx);
        }
        Self::ordered_insert(&mut ledger.transactions, transaction);
    }

    /// Remove a record by id and return it.
    pub fn remove(&self, ledger: &mut Ledger, transaction_id: Uuid) -> Result<Transaction, CoreError> {
        let idx = ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        Ok(ledger.transactions.remove(idx))
    }

    fn check_fields(amount: Decimal, category: &str) -> Result<(), CoreError> {
        if !is_valid_amount(amount) {
            return Err(CoreError::InvalidAmount(amount.to_string()));
        }
        if category.trim().is_empty() {
            return Err(CoreError::ValidationError("Category must not be empty".into()));
        }
        Ok(())
    }

    /// Insert after every record with an equal or earlier date (O(log n) search).
    fn ordered_insert(transactions: &mut Vec<Transaction>, transaction: Transaction) {
        let pos = transactions.partition_point(|t| t.date <= transaction.date);
        transactions.insert(pos, transaction);
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
