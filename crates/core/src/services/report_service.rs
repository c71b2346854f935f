use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::period::PeriodKey;
use crate::models::report::{CategoryBreakdown, MonthlyPoint};
use crate::models::transaction::{Transaction, TransactionKind};

/// Generates chart-ready aggregates: per-category totals and the
/// monthly income/expense/balance trend.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Sum amounts per category for one kind, optionally scoped to a month.
    ///
    /// Categories with no matching transaction are absent, never zero.
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        kind: TransactionKind,
        period: Option<PeriodKey>,
    ) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::new();

        for tx in transactions {
            if tx.kind != kind {
                continue;
            }
            if let Some(p) = period {
                if !p.contains(tx.date) {
                    continue;
                }
            }
            *breakdown.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
        }

        debug!(%kind, categories = breakdown.len(), "computed category breakdown");
        breakdown
    }

    /// Breakdown as pairs, largest amount first. Equal amounts are ordered by label.
    pub fn sorted_breakdown(
        &self,
        transactions: &[Transaction],
        kind: TransactionKind,
        period: Option<PeriodKey>,
    ) -> Vec<(String, Decimal)> {
        let mut pairs: Vec<(String, Decimal)> = self
            .category_breakdown(transactions, kind, period)
            .into_iter()
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }

    /// Build the monthly trend over the full history.
    ///
    /// 1. Group by month and sum income and expense independently
    /// 2. Walk months in chronological order keeping a running total
    /// 3. Each point's balance is the running total after its own net
    ///
    /// Only months with at least one transaction appear.
    pub fn monthly_series(&self, transactions: &[Transaction]) -> Vec<MonthlyPoint> {
        let mut by_month: BTreeMap<PeriodKey, (Decimal, Decimal)> = BTreeMap::new();

        for tx in transactions {
            let entry = by_month
                .entry(tx.period())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match tx.kind {
                TransactionKind::Income => entry.0 += tx.amount,
                TransactionKind::Expense => entry.1 += tx.amount,
            }
        }

        let mut running = Decimal::ZERO;
        let series: Vec<MonthlyPoint> = by_month
            .into_iter()
            .map(|(period, (income, expense))| {
                running += income - expense;
                MonthlyPoint {
                    period,
                    income,
                    expense,
                    balance: running,
                }
            })
            .collect();

        debug!(months = series.len(), "computed monthly series");
        series
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
