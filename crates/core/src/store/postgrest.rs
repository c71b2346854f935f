use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::settings::StoreConfig;
use crate::models::transaction::{Transaction, TransactionInput};
use crate::services::ledger_service::LedgerService;

const STORE_NAME: &str = "PostgREST";

/// Client for a hosted PostgREST-style table (e.g. a Supabase project).
///
/// - **Endpoint**: `{base_url}/rest/v1/{table}`
/// - **Auth**: `apikey` header plus a bearer token (the user's session
///   token when known, otherwise the API key)
/// - **Filtering**: `user_id=eq.{owner}` on every request; row-level security
///   on the server is expected to enforce the same rule
///
/// Updates replace every editable column. There is no version check, so
/// concurrent edits from two sessions resolve as last-write-wins.
pub struct PostgrestStore {
    client: Client,
    config: StoreConfig,
    ledger_service: LedgerService,
}

impl PostgrestStore {
    pub fn new(config: StoreConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            ledger_service: LedgerService::new(),
        })
    }

    /// `{base_url}/rest/v1/{table}`
    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim().trim_end_matches('/'),
            self.config.table.trim()
        )
    }

    /// Every row of one owner, oldest first.
    pub fn list_url(&self, owner_id: Uuid) -> String {
        format!(
            "{}?select=*&user_id=eq.{owner_id}&order=date.asc",
            self.table_url()
        )
    }

    /// A single row, scoped to its owner.
    pub fn record_url(&self, owner_id: Uuid, transaction_id: Uuid) -> String {
        format!(
            "{}?id=eq.{transaction_id}&user_id=eq.{owner_id}",
            self.table_url()
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);
        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .header("Accept", "application/json")
    }

    /// Read a response body as rows, turning non-2xx statuses into store errors.
    async fn read_rows(&self, resp: Response) -> Result<Vec<Transaction>, CoreError> {
        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body, &self.ledger_service)
    }
}

/// Body sent on create and full update.
#[derive(Serialize)]
pub(crate) struct RowPayload<'a> {
    pub(crate) user_id: Uuid,
    #[serde(flatten)]
    pub(crate) input: &'a TransactionInput,
}

pub(crate) fn decode_response(
    status: StatusCode,
    body: &str,
    ledger_service: &LedgerService,
) -> Result<Vec<Transaction>, CoreError> {
    if !status.is_success() {
        return Err(CoreError::Store {
            store: STORE_NAME.into(),
            message: format!("HTTP {status}: {body}"),
        });
    }
    parse_rows(body, ledger_service)
}

/// Decode a JSON array of rows and validate each one.
///
/// Rows with malformed dates fail decoding; rows with out-of-range amounts or
/// blank categories fail validation. Either way the whole batch is rejected
/// so no partial set ever reaches the aggregation layer.
pub fn parse_rows(body: &str, ledger_service: &LedgerService) -> Result<Vec<Transaction>, CoreError> {
    let rows: Vec<Transaction> = serde_json::from_str(body).map_err(|e| {
        CoreError::Deserialization(format!("Failed to decode {STORE_NAME} rows: {e}"))
    })?;
    for row in &rows {
        ledger_service.validate_record(row)?;
    }
    Ok(rows)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for PostgrestStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let url = self.list_url(owner_id);
        let resp = self.request(Method::GET, &url).send().await?;
        let rows = self.read_rows(resp).await?;
        debug!(count = rows.len(), "fetched transactions");
        Ok(rows)
    }

    async fn create(
        &self,
        owner_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError> {
        self.ledger_service.validate_input(input)?;
        let payload = RowPayload { user_id: owner_id, input };
        let url = self.table_url();
        let resp = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;

        self.read_rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Store {
                store: STORE_NAME.into(),
                message: "insert returned no row".into(),
            })
    }

    async fn update(
        &self,
        owner_id: Uuid,
        transaction_id: Uuid,
        input: &TransactionInput,
    ) -> Result<Transaction, CoreError> {
        self.ledger_service.validate_input(input)?;
        let payload = RowPayload { user_id: owner_id, input };
        let url = self.record_url(owner_id, transaction_id);
        let resp = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;

        self.read_rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))
    }

    async fn delete(&self, owner_id: Uuid, transaction_id: Uuid) -> Result<(), CoreError> {
        let url = self.record_url(owner_id, transaction_id);
        let resp = self
            .request(Method::DELETE, &url)
            .header("Prefer", "return=representation")
            .send()
            .await?;

        if self.read_rows(resp).await?.is_empty() {
            return Err(CoreError::TransactionNotFound(transaction_id.to_string()));
        }
        Ok(())
    }
}
