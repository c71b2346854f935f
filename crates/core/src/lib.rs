pub mod errors;
pub mod models;
pub mod services;
pub mod store;

use models::{
    ledger::Ledger,
    period::PeriodKey,
    report::{CategoryBreakdown, MonthlyPoint, PeriodTotals},
    settings::Settings,
    transaction::{Transaction, TransactionInput, TransactionKind},
    view::{DashboardView, DataState, TransactionFilter, TransactionsView},
};
use rust_decimal::Decimal;
use services::{
    activity_service::ActivityService, balance_service::BalanceService,
    dashboard_service::DashboardService, ledger_service::LedgerService,
    report_service::ReportService,
};
use store::{postgrest::PostgrestStore, traits::TransactionStore};
use tracing::{debug, info, warn};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Finance Tracker core library.
///
/// Owns one user's ledger snapshot, the store it is fetched from, and the
/// services that turn the snapshot into view models. Fetch-then-compute:
/// aggregates are always derived from a complete snapshot, never from a
/// partially loaded one.
#[must_use]
pub struct FinanceTracker {
    owner_id: Uuid,
    store: Box<dyn TransactionStore>,
    settings: Settings,
    ledger: Ledger,
    data_state: DataState,
    ledger_service: LedgerService,
    balance_service: BalanceService,
    report_service: ReportService,
    activity_service: ActivityService,
    dashboard_service: DashboardService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("owner_id", &self.owner_id)
            .field("store", &self.store.name())
            .field("transactions", &self.ledger.transactions.len())
            .field("data_state", &self.data_state)
            .finish()
    }
}

impl FinanceTracker {
    /// Create a tracker for `owner_id` backed by `store`, with default settings.
    /// Nothing is fetched until [`refresh`](Self::refresh) is called.
    pub fn new(owner_id: Uuid, store: Box<dyn TransactionStore>) -> Self {
        Self::build(owner_id, store, Settings::default())
    }

    /// Create a tracker with explicit settings.
    pub fn with_settings(
        owner_id: Uuid,
        store: Box<dyn TransactionStore>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(owner_id, store, settings))
    }

    /// Create a tracker talking to the hosted store named in `settings.store`.
    pub fn connect(owner_id: Uuid, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let config = settings.store.clone().ok_or_else(|| {
            CoreError::Configuration("No store configured in settings".into())
        })?;
        let store = PostgrestStore::new(config)?;
        Ok(Self::build(owner_id, Box::new(store), settings))
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch the owner's full transaction set and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept untouched and the data state
    /// becomes `Stale` (something was loaded before) or `Unavailable`.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        match self.store.list_for_owner(self.owner_id).await {
            Ok(transactions) => {
                info!(
                    store = self.store.name(),
                    count = transactions.len(),
                    "ledger refreshed"
                );
                self.ledger_service.replace_all(&mut self.ledger, transactions);
                self.data_state = DataState::Ready;
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(store = self.store.name(), error = %reason, "ledger refresh failed");
                self.data_state = if self.ledger.is_loaded() {
                    DataState::Stale { reason }
                } else {
                    DataState::Unavailable { reason }
                };
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn data_state(&self) -> &DataState {
        &self.data_state
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Create a transaction in the store and add it to the snapshot.
    pub async fn add_transaction(&mut self, input: TransactionInput) -> Result<Uuid, CoreError> {
        self.ledger_service.validate_input(&input)?;
        let stored = self.store.create(self.owner_id, &input).await?;
        let id = stored.id;
        info!(%id, kind = %stored.kind, "transaction created");
        self.ledger_service.upsert(&mut self.ledger, stored);
        Ok(id)
    }

    /// Replace every editable field of an existing transaction.
    pub async fn update_transaction(
        &mut self,
        transaction_id: Uuid,
        input: TransactionInput,
    ) -> Result<(), CoreError> {
        self.ledger_service.validate_input(&input)?;
        let stored = self
            .store
            .update(self.owner_id, transaction_id, &input)
            .await?;
        info!(id = %transaction_id, "transaction updated");
        self.ledger_service.upsert(&mut self.ledger, stored);
        Ok(())
    }

    /// Delete a transaction from the store and the snapshot. Irreversible.
    pub async fn delete_transaction(&mut self, transaction_id: Uuid) -> Result<(), CoreError> {
        self.store.delete(self.owner_id, transaction_id).await?;
        info!(id = %transaction_id, "transaction deleted");
        // The store is authoritative; a row missing locally just means the
        // snapshot predates it.
        match self.ledger_service.remove(&mut self.ledger, transaction_id) {
            Ok(_) => Ok(()),
            Err(CoreError::TransactionNotFound(_)) => {
                debug!(id = %transaction_id, "deleted row was not in the local snapshot");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Get a single transaction by its ID.
    #[must_use]
    pub fn get_transaction(&self, transaction_id: Uuid) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == transaction_id)
    }

    /// All transactions in the snapshot, oldest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Everything the dashboard shows for `period`.
    #[must_use]
    pub fn dashboard(&self, period: PeriodKey) -> DashboardView {
        self.dashboard_service.build_dashboard(
            &self.ledger,
            period,
            self.settings.recent_limit,
            self.data_state.clone(),
        )
    }

    /// The transactions list page under `filter`.
    #[must_use]
    pub fn transactions_view(&self, filter: TransactionFilter) -> TransactionsView {
        self.dashboard_service
            .build_transactions_view(&self.ledger, filter, self.data_state.clone())
    }

    // ── Aggregates ──────────────────────────────────────────────────

    #[must_use]
    pub fn period_totals(&self, period: PeriodKey) -> PeriodTotals {
        self.balance_service
            .period_totals(&self.ledger.transactions, period)
    }

    /// Balance across the whole history.
    #[must_use]
    pub fn current_balance(&self) -> Decimal {
        self.balance_service
            .all_time_totals(&self.ledger.transactions)
            .total_balance
    }

    #[must_use]
    pub fn category_breakdown(
        &self,
        kind: TransactionKind,
        period: Option<PeriodKey>,
    ) -> CategoryBreakdown {
        self.report_service
            .category_breakdown(&self.ledger.transactions, kind, period)
    }

    #[must_use]
    pub fn monthly_series(&self) -> Vec<MonthlyPoint> {
        self.report_service.monthly_series(&self.ledger.transactions)
    }

    /// The `n` latest transactions of `period`, newest first.
    #[must_use]
    pub fn recent(&self, period: PeriodKey, n: usize) -> Vec<Transaction> {
        let in_period: Vec<Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect();
        self.activity_service.select_recent(&in_period, n)
    }

    /// Months that have at least one transaction, oldest first.
    #[must_use]
    pub fn active_periods(&self) -> Vec<PeriodKey> {
        let mut periods: Vec<PeriodKey> =
            self.ledger.transactions.iter().map(Transaction::period).collect();
        periods.dedup(); // snapshot is date-ordered
        periods
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set how many entries the dashboard's recent-activity list keeps.
    pub fn set_recent_limit(&mut self, limit: usize) -> Result<(), CoreError> {
        if limit == 0 {
            return Err(CoreError::Configuration(
                "recent_limit must be at least 1".into(),
            ));
        }
        self.settings.recent_limit = limit;
        Ok(())
    }

    #[must_use]
    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(owner_id: Uuid, store: Box<dyn TransactionStore>, settings: Settings) -> Self {
        Self {
            owner_id,
            store,
            settings,
            ledger: Ledger::new(owner_id),
            data_state: DataState::NotLoaded,
            ledger_service: LedgerService::new(),
            balance_service: BalanceService::new(),
            report_service: ReportService::new(),
            activity_service: ActivityService::new(),
            dashboard_service: DashboardService::new(),
        }
    }
}
