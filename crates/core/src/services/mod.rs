pub mod activity_service;
pub mod balance_service;
pub mod dashboard_service;
pub mod ledger_service;
pub mod report_service;
