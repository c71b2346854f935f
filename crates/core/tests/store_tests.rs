// ═══════════════════════════════════════════════════════════════════
// Store Tests: InMemoryStore behaviour, PostgrestStore URL building
// and row decoding
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::settings::StoreConfig;
use finance_tracker_core::models::transaction::{
    Transaction, TransactionInput, TransactionKind, MAX_AMOUNT,
};
use finance_tracker_core::services::ledger_service::LedgerService;
use finance_tracker_core::store::memory::InMemoryStore;
use finance_tracker_core::store::postgrest::{parse_rows, PostgrestStore};
use finance_tracker_core::store::traits::TransactionStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn input(kind: TransactionKind, amount: &str, date: NaiveDate) -> TransactionInput {
    let category = match kind {
        TransactionKind::Income => "Salary",
        TransactionKind::Expense => "Housing",
    };
    TransactionInput::new(kind, dec(amount), category, date)
}

// ═══════════════════════════════════════════════════════════════════
// InMemoryStore
// ═══════════════════════════════════════════════════════════════════

mod in_memory {
    use super::*;

    #[tokio::test]
    async fn create_assigns_owner_and_id() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let t = store
            .create(owner, &input(TransactionKind::Income, "100", d(2025, 1, 1)))
            .await
            .unwrap();

        assert_eq!(t.owner_id, owner);
        assert_eq!(t.amount, dec("100"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_and_date_ordered() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create(alice, &input(TransactionKind::Income, "1", d(2025, 3, 1))).await.unwrap();
        store.create(bob, &input(TransactionKind::Income, "2", d(2025, 2, 1))).await.unwrap();
        store.create(alice, &input(TransactionKind::Expense, "3", d(2025, 1, 1))).await.unwrap();

        let rows = store.list_for_owner(alice).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|t| t.owner_id == alice));
        assert_eq!(rows[0].date, d(2025, 1, 1));
        assert_eq!(rows[1].date, d(2025, 3, 1));
    }

    #[tokio::test]
    async fn list_for_unknown_owner_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.list_for_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_negative_amount() {
        let store = InMemoryStore::new();
        let err = store
            .create(Uuid::new_v4(), &input(TransactionKind::Income, "-1", d(2025, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidAmount(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let original = store
            .create(
                owner,
                &input(TransactionKind::Income, "100", d(2025, 1, 1)).with_description("bonus"),
            )
            .await
            .unwrap();

        let updated = store
            .update(owner, original.id, &input(TransactionKind::Expense, "40", d(2025, 2, 2)))
            .await
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.kind, TransactionKind::Expense);
        assert_eq!(updated.amount, dec("40"));
        assert_eq!(updated.category, "Housing");
        assert_eq!(updated.description, None);
        assert_eq!(updated.date, d(2025, 2, 2));

        let rows = store.list_for_owner(owner).await.unwrap();
        assert_eq!(rows, vec![updated]);
    }

    #[tokio::test]
    async fn update_of_other_owners_record_is_not_found() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let t = store
            .create(alice, &input(TransactionKind::Income, "100", d(2025, 1, 1)))
            .await
            .unwrap();

        let err = store
            .update(Uuid::new_v4(), t.id, &input(TransactionKind::Income, "1", d(2025, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::TransactionNotFound(_)));

        let rows = store.list_for_owner(alice).await.unwrap();
        assert_eq!(rows[0].amount, dec("100"));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let t = store
            .create(owner, &input(TransactionKind::Income, "100", d(2025, 1, 1)))
            .await
            .unwrap();

        store.delete(owner, t.id).await.unwrap();

        assert!(store.list_for_owner(owner).await.unwrap().is_empty());
        let again = store.delete(owner, t.id).await.unwrap_err();
        assert!(matches!(again, CoreError::TransactionNotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_other_owners_record_is_not_found() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let t = store
            .create(owner, &input(TransactionKind::Income, "100", d(2025, 1, 1)))
            .await
            .unwrap();

        assert!(store.delete(Uuid::new_v4(), t.id).await.is_err());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn with_transactions_seeds_rows() {
        let owner = Uuid::new_v4();
        let seeded = vec![
            Transaction::new(owner, input(TransactionKind::Income, "5", d(2025, 5, 5))),
            Transaction::new(owner, input(TransactionKind::Expense, "2", d(2025, 4, 4))),
        ];
        let store = InMemoryStore::with_transactions(seeded);

        let rows = store.list_for_owner(owner).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d(2025, 4, 4));
        assert_eq!(store.name(), "InMemory");
    }
}

// ═══════════════════════════════════════════════════════════════════
// PostgrestStore
// ═══════════════════════════════════════════════════════════════════

mod postgrest {
    use super::*;

    fn store() -> PostgrestStore {
        PostgrestStore::new(StoreConfig::new("https://demo.example.co/", "anon-key")).unwrap()
    }

    #[test]
    fn name() {
        assert_eq!(store().name(), "PostgREST");
    }

    #[test]
    fn table_url_trims_trailing_slash() {
        assert_eq!(store().table_url(), "https://demo.example.co/rest/v1/transactions");
    }

    #[test]
    fn list_url_filters_by_owner_and_orders_by_date() {
        let owner = Uuid::from_u128(7);
        assert_eq!(
            store().list_url(owner),
            format!(
                "https://demo.example.co/rest/v1/transactions?select=*&user_id=eq.{owner}&order=date.asc"
            )
        );
    }

    #[test]
    fn record_url_scopes_id_and_owner() {
        let owner = Uuid::from_u128(7);
        let id = Uuid::from_u128(9);
        let url = store().record_url(owner, id);
        assert!(url.ends_with(&format!("?id=eq.{id}&user_id=eq.{owner}")));
    }

    #[test]
    fn custom_table_is_used() {
        let mut cfg = StoreConfig::new("https://demo.example.co", "anon-key");
        cfg.table = "ledger_rows".into();
        let store = PostgrestStore::new(cfg).unwrap();
        assert_eq!(store.table_url(), "https://demo.example.co/rest/v1/ledger_rows");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = PostgrestStore::new(StoreConfig::new("demo.example.co", "anon-key")).err().unwrap();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    fn row(id: u128, kind: &str, amount: &str, date: &str) -> String {
        format!(
            r#"{{"id":"{}","user_id":"{}","type":"{kind}","amount":{amount},"category":"Salary","description":null,"date":"{date}","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}}"#,
            Uuid::from_u128(id),
            Uuid::from_u128(1),
        )
    }

    #[test]
    fn parse_rows_decodes_array() {
        let body = format!(
            "[{},{}]",
            row(10, "income", "1000", "2025-01-05"),
            row(11, "expense", "300.25", "2025-01-10")
        );
        let rows = parse_rows(&body, &LedgerService::new()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, dec("300.25"));
        assert_eq!(rows[1].kind, TransactionKind::Expense);
    }

    #[test]
    fn parse_rows_empty_array() {
        assert!(parse_rows("[]", &LedgerService::new()).unwrap().is_empty());
    }

    #[test]
    fn parse_rows_rejects_whole_batch_on_bad_date() {
        let body = format!(
            "[{},{}]",
            row(10, "income", "1000", "2025-01-05"),
            row(11, "expense", "300", "2025-1-10")
        );
        let err = parse_rows(&body, &LedgerService::new()).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn parse_rows_rejects_negative_amount() {
        let body = format!("[{}]", row(10, "income", "-5", "2025-01-05"));
        let err = parse_rows(&body, &LedgerService::new()).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn parse_rows_rejects_amounts_beyond_max() {
        let huge = "50000000000000000000000000000";
        let body = format!(
            "[{},{}]",
            row(10, "income", huge, "2025-01-05"),
            row(11, "income", huge, "2025-01-06")
        );
        let err = parse_rows(&body, &LedgerService::new()).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn parse_rows_accepts_max_amount() {
        let body = format!("[{}]", row(10, "expense", "1000000000000000", "2025-01-05"));
        let rows = parse_rows(&body, &LedgerService::new()).unwrap();
        assert_eq!(rows[0].amount, MAX_AMOUNT);
    }

    #[test]
    fn parse_rows_rejects_non_numeric_amount() {
        let body = format!("[{}]", row(10, "income", "\"lots\"", "2025-01-05"));
        assert!(parse_rows(&body, &LedgerService::new()).is_err());
    }

    #[test]
    fn parse_rows_rejects_error_object() {
        let body = r#"{"code":"42501","message":"permission denied"}"#;
        assert!(parse_rows(body, &LedgerService::new()).is_err());
    }
}
