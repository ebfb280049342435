use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::db::traits::{InventoryBackend, ItemStore, MovementStore, ScanStore};
use crate::error::{ElioError, Result};
use crate::models::{InventoryItem, InventoryMovement, ScanRecord};

const SCANS_TABLE: &str = "inventory_scans";
const ITEMS_TABLE: &str = "inventory_items";
const MOVEMENTS_TABLE: &str = "inventory_movements";

/// Hosted Postgres accessed through Supabase's PostgREST endpoint.
#[derive(Clone, Debug)]
pub struct SupabaseBackend {
    client: Client,
    rest_url: String,
}

impl SupabaseBackend {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let key = config
            .auth_token
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ElioError::Storage("Supabase key is required".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| ElioError::Storage(format!("Invalid Supabase key: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| ElioError::Storage(format!("Invalid Supabase key: {e}")))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ElioError::Storage(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
        })
    }

    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/{table}", self.rest_url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        check_status(table, response).await?;
        Ok(())
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>> {
        let response = self
            .client
            .get(format!("{}/{table}", self.rest_url))
            .query(&[("select", "*".to_string()), (column, format!("eq.{value}"))])
            .send()
            .await?;

        let response = check_status(table, response).await?;
        response
            .json()
            .await
            .map_err(|e| ElioError::Storage(format!("Failed to decode {table} rows: {e}")))
    }

    async fn select_one<T: DeserializeOwned>(&self, table: &str, id: &str) -> Result<Option<T>> {
        Ok(self.select(table, "id", id).await?.into_iter().next())
    }
}

async fn check_status(table: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ElioError::Storage(format!(
        "Supabase request on {table} failed: {status} - {body}"
    )))
}

#[async_trait]
impl ScanStore for SupabaseBackend {
    async fn create_scan(&self, scan: &ScanRecord) -> Result<()> {
        self.insert(SCANS_TABLE, scan).await
    }
    async fn get_scan(&self, id: &str) -> Result<Option<ScanRecord>> {
        self.select_one(SCANS_TABLE, id).await
    }
}

#[async_trait]
impl ItemStore for SupabaseBackend {
    async fn create_item(&self, item: &InventoryItem) -> Result<()> {
        self.insert(ITEMS_TABLE, item).await
    }
    async fn get_item(&self, id: &str) -> Result<Option<InventoryItem>> {
        self.select_one(ITEMS_TABLE, id).await
    }
}

#[async_trait]
impl MovementStore for SupabaseBackend {
    async fn create_movement(&self, movement: &InventoryMovement) -> Result<()> {
        self.insert(MOVEMENTS_TABLE, movement).await
    }
    async fn list_movements_for_item(&self, item_id: &str) -> Result<Vec<InventoryMovement>> {
        self.select(MOVEMENTS_TABLE, "item_id", item_id).await
    }
}

#[async_trait]
impl InventoryBackend for SupabaseBackend {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/{SCANS_TABLE}", self.rest_url))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;

        check_status(SCANS_TABLE, response).await?;
        Ok(())
    }
}
