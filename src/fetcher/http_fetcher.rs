use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::app::{FeedError, Result};
use crate::config::SourceConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FeedError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn top_ids_url(&self) -> String {
        format!("{}/topstories.json", self.base_url)
    }

    pub fn item_url(&self, id: u64) -> String {
        format!("{}/item/{}.json", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            FeedError::from(e)
        })?;

        if let Err(e) = response.error_for_status_ref() {
            tracing::warn!("Upstream returned {} for {}", response.status(), url);
            return Err(e.into());
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FeedError::source_unavailable(url, e))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_top_ids(&self) -> Result<Vec<u64>> {
        let ids: Vec<u64> = self.get_json(&self.top_ids_url()).await?;
        tracing::debug!("Fetched {} top story ids", ids.len());
        Ok(ids)
    }

    async fn fetch_item(&self, id: u64) -> Result<Option<Value>> {
        let value: Value = self.get_json(&self.item_url(id)).await?;
        Ok((!value.is_null()).then_some(value))
    }
}
