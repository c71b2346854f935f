use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionInput};
use crate::services::ledger_service::LedgerService;

const STORE_NAME: &str = "InMemory";

/// Process-local store. Useful for offline use, demos and tests.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<Transaction>>,
    ledger_service: LedgerService,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records (e.g. imported from elsewhere).
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            rows: Mutex::new(transactions),
            ledger_service: LedgerService::new(),
        }
    }

    /// Number of records across all owners.
    ///
    /// Counts through a poisoned lock: the rows are still there even though
    /// the async operations refuse to touch them.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Transaction>>, CoreError> {
        self.rows.lock().map_err(|_| CoreError::Store {
            store: STORE_NAME.into(),
            message: "store lock poisoned".into(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for InMemoryStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let rows = self.rows()?;
        let mut owned: Vec<Transaction> = rows
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.date);
        Ok(owned)
    }

    async fn create(
        &self,
        owner_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError> {
        self.ledger_service.validate_input(input)?;
        let transaction = Transaction::new(owner_id, input.clone());
        self.rows()?.push(transaction.clone());
        Ok(transaction)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        transaction_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError> {
        self.ledger_service.validate_input(input)?;
        let mut rows = self.rows()?;
        let record = rows
            .iter_mut()
            .find(|t| t.id == transaction_id && t.owner_id == owner_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        record.apply(input.clone());
        Ok(record.clone())
    }

    async fn delete(&self, owner_id: Uuid, transaction_id: Uuid) -> Result<(), CoreError> {
        let mut rows = self.rows()?;
        let idx = rows
            .iter()
            .position(|t| t.id == transaction_id && t.owner_id == owner_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        rows.remove(idx);
        Ok(())
    }
}
