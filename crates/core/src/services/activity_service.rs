use crate::models::transaction::Transaction;
use crate::models::view::TransactionFilter;

/// Selects and orders transactions for list displays.
pub struct ActivityService;

impl ActivityService {
    pub fn new() -> Self {
        Self
    }

    /// The `n` most recently dated transactions, newest first.
    ///
    /// Same-date entries keep their input order. The input is left untouched.
    pub fn select_recent(&self, transactions: &[Transaction], n: usize) -> Vec<Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date)); // stable
        sorted.into_iter().take(n).cloned().collect()
    }

    /// Rows matching `filter`, newest first. Same-date entries keep input order.
    pub fn filter<'a>(
        &self,
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        let mut rows: Vec<&Transaction> = transactions.iter().filter(|tx| filter.matches(tx)).collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

impl Default for ActivityService {
    fn default() -> Self {
        Self::new()
    }
}
