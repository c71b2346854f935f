// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_date() {
        let err = CoreError::InvalidDate("2025-1-05".into());
        assert_eq!(
            err.to_string(),
            "Invalid date '2025-1-05': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn invalid_date_empty() {
        let err = CoreError::InvalidDate(String::new());
        assert_eq!(err.to_string(), "Invalid date '': expected YYYY-MM-DD");
    }

    #[test]
    fn invalid_period() {
        let err = CoreError::InvalidPeriod("2025-13".into());
        assert_eq!(err.to_string(), "Invalid period '2025-13': expected YYYY-MM");
    }

    #[test]
    fn invalid_amount() {
        let err = CoreError::InvalidAmount("-10".into());
        assert_eq!(
            err.to_string(),
            "Invalid amount '-10': must be between 0 and 1000000000000000"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("category must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Transaction validation failed: category must not be empty"
        );
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Transaction not found: abc-123");
    }

    #[test]
    fn store() {
        let err = CoreError::Store {
            store: "PostgREST".into(),
            message: "HTTP 401: JWT expired".into(),
        };
        assert_eq!(
            err.to_string(),
            "Store error (PostgREST): HTTP 401: JWT expired"
        );
    }

    #[test]
    fn store_empty_name() {
        let err = CoreError::Store {
            store: String::new(),
            message: "unknown".into(),
        };
        assert_eq!(err.to_string(), "Store error (): unknown");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("key must be a string".into());
        assert_eq!(err.to_string(), "Serialization error: key must be a string");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn configuration() {
        let err = CoreError::Configuration("recent_limit must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: recent_limit must be at least 1"
        );
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        let variants: Vec<CoreError> = vec![
            CoreError::InvalidDate("test".into()),
            CoreError::InvalidPeriod("test".into()),
            CoreError::InvalidAmount("test".into()),
            CoreError::ValidationError("test".into()),
            CoreError::TransactionNotFound("test".into()),
            CoreError::Store {
                store: "s".into(),
                message: "m".into(),
            },
            CoreError::Network("test".into()),
            CoreError::Serialization("test".into()),
            CoreError::Deserialization("test".into()),
            CoreError::Configuration("test".into()),
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let result: Result<String, _> = serde_json::from_str("{{invalid json");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_on_bad_row_date() {
        use finance_tracker_core::models::transaction::TransactionInput;

        let json = r#"{"type":"income","amount":10,"category":"Salary","date":"2025/01/05"}"#;
        let result: Result<TransactionInput, _> = serde_json::from_str(json);
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("2025/01/05")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::InvalidPeriod("test".into()));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn very_long_error_message() {
        let long_msg = "x".repeat(10_000);
        let err = CoreError::Network(long_msg.clone());
        assert_eq!(err.to_string(), format!("Network error: {}", long_msg));
    }

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::Store {
            store: "Magazyn".into(),
            message: "błąd połączenia".into(),
        };
        assert_eq!(err.to_string(), "Store error (Magazyn): błąd połączenia");
    }
}
