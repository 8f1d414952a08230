use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::LegislationRecord;

/// Errors that can occur when talking to the hosted record store
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Columns requested from the legislation table; presentational extras the
/// matcher ignores still come along for the UI.
const SELECT_COLUMNS: &str =
    "id,municipality,state,municipalityType,bannedBreeds,legislationType,ordinanceText,latitude,longitude,population";

/// An immutable snapshot of the full legislation record set
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    pub records: Arc<Vec<LegislationRecord>>,
    pub fetched_at: DateTime<Utc>,
}

/// Client for the hosted backend's REST interface.
///
/// Fetches the complete legislation record set and caches it in-process.
/// The matcher never paginates or re-fetches: it gets the full candidate
/// universe from the latest snapshot, and checks are deferred by the caller
/// while no snapshot exists.
pub struct RecordStore {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
    snapshot: RwLock<Option<RecordSnapshot>>,
    ttl: Duration,
}

impl RecordStore {
    pub fn new(
        base_url: String,
        api_key: String,
        table: String,
        request_timeout: Duration,
        ttl: Duration,
    ) -> Result<Self, RecordStoreError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
            snapshot: RwLock::new(None),
            ttl,
        })
    }

    /// Fetch the full record set from the backend and replace the cached
    /// snapshot.
    ///
    /// Individually malformed rows are skipped with a warning rather than
    /// failing the whole refresh.
    pub async fn refresh(&self) -> Result<usize, RecordStoreError> {
        let url = format!(
            "{}/rest/v1/{}?select={}",
            self.base_url.trim_end_matches('/'),
            self.table,
            urlencoding::encode(SELECT_COLUMNS)
        );

        tracing::debug!("Refreshing legislation records from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordStoreError::ApiError(format!(
                "Failed to fetch records: {}",
                response.status()
            )));
        }

        let rows: Vec<Value> = response.json().await?;
        let total = rows.len();

        let records: Vec<LegislationRecord> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed legislation row: {}", e);
                    None
                }
            })
            .collect();

        let count = records.len();
        tracing::info!("Loaded {} legislation records ({} rows)", count, total);

        let mut guard = self.snapshot.write().await;
        *guard = Some(RecordSnapshot {
            records: Arc::new(records),
            fetched_at: Utc::now(),
        });

        Ok(count)
    }

    /// The current snapshot, or `None` while records are still loading or
    /// the cache has gone stale. "Have data" / "don't have data yet" is the
    /// only signal callers get.
    pub async fn snapshot(&self) -> Option<RecordSnapshot> {
        let guard = self.snapshot.read().await;
        guard.as_ref().filter(|s| !self.is_stale(s)).cloned()
    }

    /// Snapshot readiness and age, for the status endpoint
    pub async fn status(&self) -> (bool, usize, Option<DateTime<Utc>>) {
        let guard = self.snapshot.read().await;
        match guard.as_ref() {
            Some(s) if !self.is_stale(s) => (true, s.records.len(), Some(s.fetched_at)),
            Some(s) => (false, s.records.len(), Some(s.fetched_at)),
            None => (false, 0, None),
        }
    }

    fn is_stale(&self, snapshot: &RecordSnapshot) -> bool {
        let age = Utc::now().signed_duration_since(snapshot.fetched_at);
        age.to_std().map(|a| a > self.ttl).unwrap_or(true)
    }
}
