use crate::models::ledger::Ledger;
use crate::models::period::PeriodKey;
use crate::models::transaction::{Transaction, TransactionKind};
use crate::models::view::{DashboardView, DataState, TransactionFilter, TransactionsView};
use crate::services::activity_service::ActivityService;
use crate::services::balance_service::BalanceService;
use crate::services::report_service::ReportService;

/// Assembles the view models the dashboard and the transactions page render.
///
/// Every call recomputes from the snapshot; nothing is cached between calls.
pub struct DashboardService {
    balance_service: BalanceService,
    report_service: ReportService,
    activity_service: ActivityService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            balance_service: BalanceService::new(),
            report_service: ReportService::new(),
            activity_service: ActivityService::new(),
        }
    }

    /// Dashboard for one month.
    ///
    /// - Totals and category breakdowns are scoped to `period`
    /// - The monthly series covers the full history
    /// - Recent activity is drawn from `period` only
    pub fn build_dashboard(
        &self,
        ledger: &Ledger,
        period: PeriodKey,
        recent_limit: usize,
        data_state: DataState,
    ) -> DashboardView {
        let transactions = &ledger.transactions;

        let in_period: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| period.contains(tx.date))
            .cloned()
            .collect();

        DashboardView {
            period,
            totals: self.balance_service.period_totals(transactions, period),
            expense_by_category: self.report_service.category_breakdown(
                transactions,
                TransactionKind::Expense,
                Some(period),
            ),
            income_by_category: self.report_service.category_breakdown(
                transactions,
                TransactionKind::Income,
                Some(period),
            ),
            monthly_series: self.report_service.monthly_series(transactions),
            recent: self.activity_service.select_recent(&in_period, recent_limit),
            data_state,
        }
    }

    /// The transactions list page.
    ///
    /// With a month selected the totals carry the earlier balance in; without
    /// one they cover all history. The kind filter narrows only the rows.
    pub fn build_transactions_view(
        &self,
        ledger: &Ledger,
        filter: TransactionFilter,
        data_state: DataState,
    ) -> TransactionsView {
        let transactions = &ledger.transactions;

        let totals = match filter.period {
            Some(period) => self.balance_service.period_totals(transactions, period),
            None => self.balance_service.all_time_totals(transactions),
        };

        let rows = self
            .activity_service
            .filter(transactions, &filter)
            .into_iter()
            .cloned()
            .collect();

        TransactionsView {
            filter,
            transactions: rows,
            totals,
            data_state,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
