//! Inventory API client
//!
//! The inventory API owns materials, measurements, onboardings and work
//! orders. Ledgers need the full event history, so paginated lists are
//! walked to the last page.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::{Material, Measurement, Onboarding, PaginatedResponse, WorkOrder};

use crate::config::InventoryApiConfig;
use crate::error::{AppError, AppResult};

/// Upper bound on pages walked for one list, against upstreams that ignore `?page=`
const MAX_PAGES: u32 = 1_000;

/// Client for the remote inventory API
#[derive(Clone)]
pub struct InventoryApiClient {
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
    http_client: Client,
}

/// Everything needed to build ledgers, fetched in one go
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub materials: Vec<Material>,
    pub measurements: Vec<Measurement>,
    pub onboardings: Vec<Onboarding>,
    pub work_orders: Vec<WorkOrder>,
}

/// List endpoints answer either a bare array or a paginated envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Paginated(PaginatedResponse<T>),
    Plain(Vec<T>),
}

impl InventoryApiClient {
    /// Create a new inventory API client
    pub fn new(config: &InventoryApiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size.max(1),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let mut request = self.http_client.get(self.url(path)).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::InventoryApi(format!("Request to {} failed: {}", path, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::InventoryApi(format!(
                "{} returned {}: {}",
                path, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| {
                AppError::InventoryApi(format!("Failed to parse {} response: {}", path, e))
            })
    }

    /// Fetch every record of a list endpoint, following pagination
    async fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let query = [("page", page.to_string()), ("limit", self.page_size.to_string())];
            match self.get_json::<ListResponse<T>>(path, &query).await? {
                ListResponse::Plain(data) => {
                    records.extend(data);
                    break;
                }
                ListResponse::Paginated(response) => {
                    let done = response.data.is_empty() || page >= response.pagination.total_pages;
                    records.extend(response.data);
                    if done {
                        break;
                    }
                    if page >= MAX_PAGES {
                        tracing::warn!(path, pages = page, "Inventory list exceeds page limit");
                        break;
                    }
                    page += 1;
                }
            }
        }

        tracing::debug!(path, pages = page, records = records.len(), "Fetched inventory list");
        Ok(records)
    }

    pub async fn list_materials(&self) -> AppResult<Vec<Material>> {
        self.fetch_all("materials").await
    }

    pub async fn list_measurements(&self) -> AppResult<Vec<Measurement>> {
        self.fetch_all("measurements").await
    }

    pub async fn list_onboardings(&self) -> AppResult<Vec<Onboarding>> {
        self.fetch_all("onboardings").await
    }

    pub async fn list_work_orders(&self) -> AppResult<Vec<WorkOrder>> {
        self.fetch_all("work-orders").await
    }

    /// Fetch all four collections concurrently
    pub async fn snapshot(&self) -> AppResult<InventorySnapshot> {
        let (materials, measurements, onboardings, work_orders) = tokio::try_join!(
            self.list_materials(),
            self.list_measurements(),
            self.list_onboardings(),
            self.list_work_orders(),
        )?;

        Ok(InventorySnapshot {
            materials,
            measurements,
            onboardings,
            work_orders,
        })
    }
}
