//! UI Components
//!
//! Leptos components for the population checker page.

pub mod chart;
pub mod loading;
pub mod prefecture_select;

pub use chart::PopulationChart;
pub use prefecture_select::PrefectureSelect;
