//! Application session
//!
//! Wires the directory loader, selection controller, series fetcher and
//! chart derivation into the chain the page runs:
//!
//! 1. `mount` loads the prefecture directory once
//! 2. `select` replaces the selection and refreshes the datasets
//! 3. `view` derives the chart from whatever is currently stored
//!
//! Each slot has exactly one writer: the directory is written by `mount`,
//! the selection by `select`, the datasets by the batch `select` started.

use crate::api::PopulationApi;
use crate::chart::{derive_chart, ChartConfig, ChartView};
use crate::directory::PrefectureDirectory;
use crate::fetcher::{fetch_datasets, SeriesStore};
use crate::model::{PopulationDataset, PrefCode, Selection};
use crate::selection::{SelectOption, SelectionController};

/// One user's page state
pub struct Session<A> {
    api: A,
    chart: ChartConfig,
    directory: PrefectureDirectory,
    controller: SelectionController,
    store: SeriesStore,
}

impl<A: PopulationApi> Session<A> {
    pub fn new(api: A, chart: ChartConfig) -> Self {
        Self {
            api,
            chart,
            directory: PrefectureDirectory::default(),
            controller: SelectionController::new(),
            store: SeriesStore::new(),
        }
    }

    /// Load the prefecture directory
    ///
    /// Returns whether the directory was replaced. On failure the select
    /// control simply has no options.
    pub async fn mount(&mut self) -> bool {
        self.directory.load(&self.api).await
    }

    /// Options for the multi-select control
    pub fn options(&self) -> Vec<SelectOption> {
        SelectionController::options(&self.directory)
    }

    /// Options matching a search query
    pub fn search(&self, query: &str) -> Vec<SelectOption> {
        SelectionController::search(&self.directory, query)
    }

    /// Handle a change of the select control
    ///
    /// An empty or cleared selection drops the datasets without touching
    /// the network. Otherwise every selected series is fetched and the
    /// successful ones replace the stored datasets.
    pub async fn select(&mut self, change: Option<Vec<PrefCode>>) {
        let selection = self.controller.on_change(change).clone();

        if selection.is_empty() {
            self.store.clear();
            return;
        }

        let generation = self.store.begin_batch();
        let datasets = fetch_datasets(&self.api, &selection).await;
        self.store.commit(generation, datasets);
    }

    /// Current chart contents
    pub fn view(&self) -> ChartView {
        derive_chart(&self.directory, self.store.datasets(), &self.chart)
    }

    pub fn directory(&self) -> &PrefectureDirectory {
        &self.directory
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    pub fn datasets(&self) -> &[PopulationDataset] {
        self.store.datasets()
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::chart::{NO_DATA_MESSAGE, UNKNOWN_PREFECTURE};
    use crate::model::Prefecture;

    fn api() -> MockApi {
        MockApi::new()
            .with_prefectures(vec![
                Prefecture::new(1, "Hokkaido"),
                Prefecture::new(13, "Tokyo"),
            ])
            .with_series(1, &[("1960", 100.0)])
            .with_series(13, &[("1960", 900.0)])
            .with_series(47, &[("1960", 883_122.0)])
    }

    #[tokio::test]
    async fn test_mount_exposes_options() {
        let mut session = Session::new(api(), ChartConfig::default());
        assert!(session.options().is_empty());

        assert!(session.mount().await);
        let options = session.options();
        assert_eq!(options.len(), 2);
        assert_eq!((options[0].value, options[0].label.as_str()), (1, "Hokkaido"));
        assert_eq!((options[1].value, options[1].label.as_str()), (13, "Tokyo"));
    }

    #[tokio::test]
    async fn test_failed_mount_leaves_no_options() {
        let mut session = Session::new(MockApi::new(), ChartConfig::default());
        assert!(!session.mount().await);
        assert!(session.options().is_empty());
    }

    #[tokio::test]
    async fn test_two_prefectures_end_to_end() {
        let mut session = Session::new(api(), ChartConfig::default());
        session.mount().await;
        session.select(Some(vec![1, 13])).await;

        assert_eq!(session.datasets().len(), 2);

        let view = session.view();
        let model = view.model().unwrap();
        assert_eq!(model.series[0].name, "Hokkaido");
        assert_eq!(model.series[0].data, vec![100.0]);
        assert_eq!(model.series[1].name, "Tokyo");
        assert_eq!(model.series[1].data, vec![900.0]);
    }

    #[tokio::test]
    async fn test_clearing_selection_skips_network() {
        let mut session = Session::new(api(), ChartConfig::default());
        session.mount().await;
        session.select(Some(vec![1])).await;
        let calls_before = session.api().calls().len();

        session.select(None).await;
        assert!(session.datasets().is_empty());
        assert_eq!(
            session.view(),
            ChartView::Placeholder {
                message: NO_DATA_MESSAGE.to_string()
            }
        );

        session.select(Some(Vec::new())).await;
        assert!(session.view().is_placeholder());
        assert_eq!(session.api().calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let mut session = Session::new(api(), ChartConfig::default());
        session.mount().await;
        session.select(Some(vec![13, 2, 1])).await;

        let codes: Vec<_> = session
            .datasets()
            .iter()
            .map(|d| d.prefecture_code)
            .collect();
        assert_eq!(codes, vec![13, 1]);
    }

    #[tokio::test]
    async fn test_code_missing_from_directory() {
        let mut session = Session::new(api(), ChartConfig::default());
        session.mount().await;
        session.select(Some(vec![47])).await;

        let view = session.view();
        assert_eq!(view.model().unwrap().series[0].name, UNKNOWN_PREFECTURE);
    }

    #[tokio::test]
    async fn test_new_selection_replaces_datasets() {
        let mut session = Session::new(api(), ChartConfig::default());
        session.mount().await;

        session.select(Some(vec![1, 13])).await;
        session.select(Some(vec![13])).await;

        assert_eq!(session.selection().codes(), &[13]);
        assert_eq!(session.datasets().len(), 1);
        assert_eq!(session.datasets()[0].prefecture_code, 13);
    }
}
