//! Population Series Fetcher
//!
//! Fetches one population series per selected prefecture, all requests in
//! flight at once, and keeps the ones that succeed in selection order.
//!
//! Batches are tagged with a [`Generation`] so that a batch started for an
//! older selection cannot overwrite the datasets of a newer one when it
//! happens to finish last.

use futures_util::future::join_all;

use crate::api::PopulationApi;
use crate::model::{PopulationDataset, PrefCode, Selection};

/// Fetch one dataset, logging and swallowing any failure
pub async fn fetch_dataset<A: PopulationApi + ?Sized>(
    api: &A,
    code: PrefCode,
) -> Option<PopulationDataset> {
    match api.fetch_population(code).await {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            tracing::error!(pref_code = code, error = %e, "Failed to fetch population data");
            None
        }
    }
}

/// Fetch datasets for every selected code concurrently
///
/// The result keeps selection order regardless of completion order and
/// omits failed codes. An empty selection issues no requests.
pub async fn fetch_datasets<A: PopulationApi + ?Sized>(
    api: &A,
    selection: &Selection,
) -> Vec<PopulationDataset> {
    if selection.is_empty() {
        return Vec::new();
    }

    let results = join_all(
        selection
            .codes()
            .iter()
            .map(|&code| fetch_dataset(api, code)),
    )
    .await;

    let datasets: Vec<_> = results.into_iter().flatten().collect();
    tracing::debug!(
        requested = selection.len(),
        succeeded = datasets.len(),
        "Population batch settled"
    );
    datasets
}

/// Identifies one fetch batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Hands out batch generations and tells whether a batch is still current
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchCounter {
    latest: u64,
}

impl BatchCounter {
    /// Start a new batch, superseding every earlier one
    pub fn begin(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Whether no batch has been started since `generation`
    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

/// The stored dataset collection
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    datasets: Vec<PopulationDataset>,
    batches: BatchCounter,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datasets(&self) -> &[PopulationDataset] {
        &self.datasets
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Register a new batch; results of older batches will be ignored
    pub fn begin_batch(&mut self) -> Generation {
        self.batches.begin()
    }

    /// Drop all datasets and invalidate any in-flight batch
    pub fn clear(&mut self) {
        self.batches.begin();
        self.datasets.clear();
    }

    /// Store the results of `generation` if it is still the latest batch
    ///
    /// Returns whether the datasets were replaced.
    pub fn commit(&mut self, generation: Generation, datasets: Vec<PopulationDataset>) -> bool {
        if !self.batches.is_current(generation) {
            tracing::debug!(?generation, "Discarding stale population batch");
            return false;
        }
        self.datasets = datasets;
        true
    }
}
