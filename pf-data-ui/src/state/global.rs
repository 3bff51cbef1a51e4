//! Global Application State
//!
//! Reactive state management using Leptos signals. Each signal has one
//! writer: the directory load writes `prefectures`, the select control
//! writes `selection`, and the latest fetch batch writes `datasets`.

use leptos::*;

use pf_data::{
    fetch_datasets, load_prefectures, PopulationDataset, PrefCode, Prefecture,
    PrefectureDirectory, Selection, SeriesStore,
};

use crate::api::GlooClient;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Prefecture directory from the API
    pub prefectures: RwSignal<Vec<Prefecture>>,
    /// Currently selected prefecture codes
    pub selection: RwSignal<Selection>,
    /// Population series of the selected prefectures
    pub datasets: RwSignal<Vec<PopulationDataset>>,
    /// A fetch batch is in flight
    pub loading: RwSignal<bool>,
    /// Decides which batch may write `datasets`
    store: StoredValue<SeriesStore>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        prefectures: create_rw_signal(Vec::new()),
        selection: create_rw_signal(Selection::empty()),
        datasets: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        store: store_value(SeriesStore::new()),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Snapshot of the directory (tracked)
    pub fn directory(&self) -> PrefectureDirectory {
        PrefectureDirectory::new(self.prefectures.get())
    }

    /// Fetch the prefecture list; a failure leaves it as it was
    pub fn load_directory(self) {
        spawn_local(async move {
            let client = GlooClient::from_storage();
            if let Some(prefectures) = load_prefectures(&client).await {
                self.prefectures.set(prefectures);
            }
        });
    }

    /// Replace the selection with the select control's new value
    pub fn select(&self, change: Option<Vec<PrefCode>>) {
        self.selection.set(Selection::new(change.unwrap_or_default()));
    }

    /// Refetch datasets for `selection`
    ///
    /// An empty selection clears immediately. Results of a batch that has
    /// been superseded by a newer selection are dropped.
    pub fn refresh_datasets(self, selection: Selection) {
        if selection.is_empty() {
            self.store.update_value(|store| store.clear());
            self.datasets.set(Vec::new());
            self.loading.set(false);
            return;
        }

        let Some(generation) = self.store.try_update_value(|store| store.begin_batch()) else {
            return;
        };

        self.loading.set(true);
        spawn_local(async move {
            let client = GlooClient::from_storage();
            let datasets = fetch_datasets(&client, &selection).await;

            let committed = self
                .store
                .try_update_value(|store| store.commit(generation, datasets))
                .unwrap_or(false);
            if committed {
                let stored = self
                    .store
                    .try_with_value(|store| store.datasets().to_vec())
                    .unwrap_or_default();
                self.datasets.set(stored);
                self.loading.set(false);
            }
        });
    }
}

/// Codes after picking `code` in the control
pub fn with_added(selection: &Selection, code: PrefCode) -> Vec<PrefCode> {
    let mut codes = selection.codes().to_vec();
    codes.push(code);
    codes
}

/// Codes after removing `code` from the control
pub fn without(selection: &Selection, code: PrefCode) -> Vec<PrefCode> {
    selection
        .codes()
        .iter()
        .copied()
        .filter(|&c| c != code)
        .collect()
}
