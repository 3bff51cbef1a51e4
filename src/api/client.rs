//! Population API HTTP Client
//!
//! `reqwest` implementation of [`PopulationApi`] for native builds.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{
    decode_population, decode_prefectures, endpoint, population_path, ApiError, ApiResult,
    PopulationApi, PREFECTURES_PATH,
};
use crate::config::ApiConfig;
use crate::model::{PopulationDataset, PrefCode, Prefecture};

/// HTTP client for the population API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and return the body of a successful response
    async fn get_text(&self, path: &str) -> ApiResult<String> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout { url: url.clone() }
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait(?Send)]
impl PopulationApi for HttpClient {
    async fn fetch_prefectures(&self) -> ApiResult<Vec<Prefecture>> {
        let body = self.get_text(PREFECTURES_PATH).await?;
        decode_prefectures(&body)
    }

    async fn fetch_population(&self, code: PrefCode) -> ApiResult<PopulationDataset> {
        let body = self.get_text(&population_path(code)).await?;
        decode_population(code, &body)
    }
}
