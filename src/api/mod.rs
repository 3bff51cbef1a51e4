//! Population API access
//!
//! The backend exposes two endpoints:
//!
//! - `GET /api/prefectures` - List all prefectures
//! - `GET /api/population/{prefCode}` - Population composition per year
//!
//! [`PopulationApi`] is the seam between the application logic and the
//! transport. The native build ships a `reqwest` implementation
//! ([`HttpClient`]); the browser app provides its own on top of `gloo-net`.

pub mod dto;
pub mod error;

#[cfg(feature = "native")]
mod client;

pub use dto::{decode_population, decode_prefectures};
pub use error::{ApiError, ApiResult};

#[cfg(feature = "native")]
pub use client::HttpClient;

use async_trait::async_trait;

use crate::model::{PopulationDataset, PrefCode, Prefecture};

/// Default API base address
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Path of the prefecture directory endpoint
pub const PREFECTURES_PATH: &str = "/api/prefectures";

/// Path of the population endpoint for one prefecture
pub fn population_path(code: PrefCode) -> String {
    format!("/api/population/{}", code)
}

/// Join a base address and an endpoint path
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Source of prefecture and population data
///
/// Futures are not required to be `Send`: the browser client runs on the
/// JS event loop, and the native session drives its batch from one task.
#[async_trait(?Send)]
pub trait PopulationApi {
    /// Fetch the full prefecture directory
    async fn fetch_prefectures(&self) -> ApiResult<Vec<Prefecture>>;

    /// Fetch the population series of one prefecture
    async fn fetch_population(&self, code: PrefCode) -> ApiResult<PopulationDataset>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory API used by the loader, fetcher and session tests.

    use super::*;
    use crate::model::PopulationPoint;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Default)]
    pub struct MockApi {
        prefectures: Option<Vec<Prefecture>>,
        series: HashMap<PrefCode, Vec<PopulationPoint>>,
        delays: HashMap<PrefCode, Duration>,
        calls: RefCell<Vec<String>>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_prefectures(mut self, prefectures: Vec<Prefecture>) -> Self {
            self.prefectures = Some(prefectures);
            self
        }

        pub fn with_series(mut self, code: PrefCode, values: &[(&str, f64)]) -> Self {
            let points = values
                .iter()
                .map(|(label, value)| PopulationPoint::new(*label, *value))
                .collect();
            self.series.insert(code, points);
            self
        }

        pub fn with_delay(mut self, code: PrefCode, delay: Duration) -> Self {
            self.delays.insert(code, delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl PopulationApi for MockApi {
        async fn fetch_prefectures(&self) -> ApiResult<Vec<Prefecture>> {
            self.calls.borrow_mut().push(PREFECTURES_PATH.to_string());
            self.prefectures.clone().ok_or_else(|| ApiError::Status {
                status: 500,
                url: PREFECTURES_PATH.to_string(),
            })
        }

        async fn fetch_population(&self, code: PrefCode) -> ApiResult<PopulationDataset> {
            self.calls.borrow_mut().push(population_path(code));
            if let Some(delay) = self.delays.get(&code) {
                tokio::time::sleep(*delay).await;
            }
            self.series
                .get(&code)
                .map(|points| PopulationDataset::new(code, points.clone()))
                .ok_or(ApiError::MissingSeries { code })
        }
    }
}
