//! HTTP API Client
//!
//! Talks to the population API with `gloo-net`. Failures are written to the
//! browser console before being handed back; the page itself never shows
//! them.

use async_trait::async_trait;
use gloo_net::http::Request;

use pf_data::api::{
    decode_population, decode_prefectures, endpoint, population_path, ApiError, ApiResult,
    PopulationApi, DEFAULT_API_BASE, PREFECTURES_PATH,
};
use pf_data::{PopulationDataset, PrefCode, Prefecture};

/// Local storage key holding an API base override
const API_BASE_KEY: &str = "pf_data_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Browser client for the population API
#[derive(Debug, Clone)]
pub struct GlooClient {
    base_url: String,
}

impl GlooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client for the configured (or default) base URL
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn get_text(&self, path: &str) -> ApiResult<String> {
        let url = endpoint(&self.base_url, path);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

fn log_error(context: &str, error: &ApiError) {
    web_sys::console::error_1(&format!("[Error] {}: {}", context, error).into());
}

#[async_trait(?Send)]
impl PopulationApi for GlooClient {
    async fn fetch_prefectures(&self) -> ApiResult<Vec<Prefecture>> {
        let result = self
            .get_text(PREFECTURES_PATH)
            .await
            .and_then(|body| decode_prefectures(&body));
        if let Err(e) = &result {
            log_error("fetching prefectures", e);
        }
        result
    }

    async fn fetch_population(&self, code: PrefCode) -> ApiResult<PopulationDataset> {
        let result = self
            .get_text(&population_path(code))
            .await
            .and_then(|body| decode_population(code, &body));
        if let Err(e) = &result {
            log_error(&format!("fetching population data for {}", code), e);
        }
        result
    }
}
