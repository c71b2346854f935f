use rust_decimal::Decimal;
use tracing::debug;

use crate::models::period::PeriodKey;
use crate::models::report::PeriodTotals;
use crate::models::transaction::{Transaction, TransactionKind};

/// Reconciles the account balance as of a selected month.
///
/// Pure business logic over an in-memory snapshot. No I/O.
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Split the balance at `period` into what was carried in from earlier
    /// months and the net movement inside the month.
    ///
    /// A transaction dated on the first day of the month counts as current.
    /// Transactions after the month contribute to nothing.
    pub fn period_totals(&self, transactions: &[Transaction], period: PeriodKey) -> PeriodTotals {
        let mut previous_balance = Decimal::ZERO;
        let mut current_income = Decimal::ZERO;
        let mut current_expense = Decimal::ZERO;

        for tx in transactions {
            if period.is_before_start(tx.date) {
                previous_balance += tx.signed_amount();
            } else if period.contains(tx.date) {
                match tx.kind {
                    TransactionKind::Income => current_income += tx.amount,
                    TransactionKind::Expense => current_expense += tx.amount,
                }
            }
        }

        debug!(
            %period,
            count = transactions.len(),
            "computed period totals"
        );

        Self::assemble(previous_balance, current_income, current_expense)
    }

    /// Totals with no month selected: nothing is carried in and every
    /// transaction counts as current.
    pub fn all_time_totals(&self, transactions: &[Transaction]) -> PeriodTotals {
        let (income, expense) = Self::sum_by_kind(transactions);
        Self::assemble(Decimal::ZERO, income, expense)
    }

    /// Signed sum of every transaction dated strictly before `period` starts.
    pub fn balance_before(&self, transactions: &[Transaction], period: PeriodKey) -> Decimal {
        transactions
            .iter()
            .filter(|tx| period.is_before_start(tx.date))
            .map(Transaction::signed_amount)
            .sum()
    }

    fn sum_by_kind(transactions: &[Transaction]) -> (Decimal, Decimal) {
        transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), tx| match tx.kind {
                TransactionKind::Income => (inc + tx.amount, exp),
                TransactionKind::Expense => (inc, exp + tx.amount),
            })
    }

    fn assemble(previous_balance: Decimal, income: Decimal, expense: Decimal) -> PeriodTotals {
        let current_balance = income - expense;
        PeriodTotals {
            previous_balance,
            current_income: income,
            current_expense: expense,
            current_balance,
            total_balance: previous_balance + current_balance,
        }
    }
}

impl Default for BalanceService {
    fn default() -> Self {
        Self::new()
    }
}
