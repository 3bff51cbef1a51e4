//! # pf-data
//!
//! Prefecture population checker. Pick Japanese prefectures, fetch their
//! population series from the population API, and chart them side by side.
//!
//! ## Modules
//!
//! - [`model`]: Prefectures, population points, datasets, selections
//! - [`api`]: The [`PopulationApi`] seam, wire decoding, HTTP client
//! - [`directory`]: Prefecture directory loading
//! - [`selection`]: Select options, search, selection changes
//! - [`fetcher`]: Concurrent per-prefecture fetches and stale-batch guard
//! - [`chart`]: Chart derivation, layout, SVG and text renderers
//! - [`session`]: The load → select → fetch → render chain
//!
//! The `native` feature (on by default) adds the `reqwest` client,
//! configuration, logging setup and the `pf-data` binary. The browser app
//! builds the core with the feature off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pf_data::{ChartConfig, HttpClient, Session};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new("http://localhost:8080", Duration::from_secs(30))?;
//!     let mut session = Session::new(client, ChartConfig::default());
//!
//!     session.mount().await;
//!     session.select(Some(vec![1, 13])).await;
//!
//!     if let Some(model) = session.view().model() {
//!         print!("{}", pf_data::chart::render_table(model));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod directory;
pub mod fetcher;
pub mod model;
pub mod selection;
pub mod session;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use model::{PopulationDataset, PopulationPoint, PrefCode, Prefecture, Selection};

pub use api::{ApiError, ApiResult, PopulationApi, DEFAULT_API_BASE};

#[cfg(feature = "native")]
pub use api::HttpClient;

pub use chart::{derive_chart, ChartConfig, ChartModel, ChartSeries, ChartView};

pub use directory::{load_prefectures, PrefectureDirectory};

pub use fetcher::{fetch_dataset, fetch_datasets, BatchCounter, Generation, SeriesStore};

pub use selection::{resolve_selectors, SelectOption, SelectionController, SelectionError};

pub use session::Session;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, ConfigReport, LoggingConfig};
