use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionInput};

/// Trait abstraction for the external data store holding transaction rows.
///
/// Implementations own persistence and schema enforcement. The core only
/// fetches a user's full set and routes create / full update / delete.
/// Every operation is scoped to one owner: a record owned by someone else
/// behaves as if it did not exist.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// All transactions owned by `owner_id`, oldest first. No pagination.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError>;

    /// Persist a new record and return it as stored (id and timestamps assigned).
    async fn create(
        &self,
        owner_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError>;

    /// Replace every editable field of an existing record.
    async fn update(
        &self,
        owner_id: Uuid,
        transaction_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError>;

    /// Delete a record permanently.
    async fn delete(&self, owner_id: Uuid, transaction_id: Uuid) -> Result<(), CoreError>;
}
