//! Chart Derivation
//!
//! Turns the directory and the stored datasets into something a renderer
//! can draw. Derivation is pure: the chart owns no state of its own and is
//! recomputed whenever either input changes.
//!
//! The x axis never looks at the point labels. Point `i` of every series
//! sits at `base_year + i * year_step` (1960, 1965, ... by default).
//!
//! ## Renderers
//!
//! - [`layout`]: pixel mapping shared by every renderer
//! - [`svg`]: standalone SVG document (`native` only)
//! - [`table`]: plain-text table for terminals

pub mod layout;
#[cfg(feature = "native")]
pub mod svg;
pub mod table;

pub use layout::{ChartLayout, Margins};
#[cfg(feature = "native")]
pub use svg::{render_svg, RenderError};
pub use table::render_table;

use serde::{Deserialize, Serialize};

use crate::directory::PrefectureDirectory;
use crate::model::PopulationDataset;

/// Series label used when a dataset's prefecture is not in the directory
pub const UNKNOWN_PREFECTURE: &str = "不明";

/// Shown instead of a chart when there is nothing to plot
pub const NO_DATA_MESSAGE: &str = "データがありません";

/// Line colors, cycled per series
pub const SERIES_COLORS: [&str; 8] = [
    "#2caffe", // Blue
    "#544fc5", // Indigo
    "#00e272", // Green
    "#fe6a35", // Orange
    "#6b8abc", // Slate
    "#d568fb", // Purple
    "#2ee0ca", // Teal
    "#fa4b42", // Red
];

/// Color for the series at `index`
pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Chart presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_x_axis_title")]
    pub x_axis_title: String,

    #[serde(default = "default_y_axis_title")]
    pub y_axis_title: String,

    /// Year of the first point of every series
    #[serde(default = "default_base_year")]
    pub base_year: i32,

    /// Years between consecutive points
    #[serde(default = "default_year_step")]
    pub year_step: i32,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "人口推移".to_string()
}

fn default_x_axis_title() -> String {
    "西暦（年）".to_string()
}

fn default_y_axis_title() -> String {
    "人口数（人）".to_string()
}

fn default_base_year() -> i32 {
    1960
}

fn default_year_step() -> i32 {
    5
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_axis_title: default_x_axis_title(),
            y_axis_title: default_y_axis_title(),
            base_year: default_base_year(),
            year_step: default_year_step(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// One line of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// Everything needed to draw the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub point_start: i32,
    pub point_interval: i32,
    pub series: Vec<ChartSeries>,
}

impl ChartModel {
    /// Year plotted at point index `index`
    ///
    /// Saturates instead of overflowing on extreme year steps.
    pub fn year_at(&self, index: usize) -> i32 {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.point_start
            .saturating_add(self.point_interval.saturating_mul(index))
    }

    /// Length of the longest series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).max().unwrap_or(0)
    }

    /// Smallest and largest value across all series
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }
}

/// What the chart area shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    Placeholder { message: String },
    Chart(ChartModel),
}

impl ChartView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartView::Placeholder { .. })
    }

    pub fn model(&self) -> Option<&ChartModel> {
        match self {
            ChartView::Chart(model) => Some(model),
            ChartView::Placeholder { .. } => None,
        }
    }
}

/// Derive the chart from the directory and the stored datasets
pub fn derive_chart(
    directory: &PrefectureDirectory,
    datasets: &[PopulationDataset],
    config: &ChartConfig,
) -> ChartView {
    if datasets.is_empty() {
        return ChartView::Placeholder {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    let series = datasets
        .iter()
        .map(|dataset| ChartSeries {
            name: directory
                .name_of(dataset.prefecture_code)
                .unwrap_or(UNKNOWN_PREFECTURE)
                .to_string(),
            data: dataset.values(),
        })
        .collect();

    ChartView::Chart(ChartModel {
        title: config.title.clone(),
        x_axis_title: config.x_axis_title.clone(),
        y_axis_title: config.y_axis_title.clone(),
        point_start: config.base_year,
        point_interval: config.year_step,
        series,
    })
}

/// Format a population count with thousands separators
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PopulationPoint, Prefecture};

    fn directory() -> PrefectureDirectory {
        PrefectureDirectory::new(vec![
            Prefecture::new(1, "Hokkaido"),
            Prefecture::new(13, "Tokyo"),
        ])
    }

    fn dataset(code: i32, values: &[(&str, f64)]) -> PopulationDataset {
        PopulationDataset::new(
            code,
            values
                .iter()
                .map(|(label, value)| PopulationPoint::new(*label, *value))
                .collect(),
        )
    }

    #[test]
    fn test_placeholder_when_empty() {
        let view = derive_chart(&directory(), &[], &ChartConfig::default());
        assert_eq!(
            view,
            ChartView::Placeholder {
                message: "データがありません".to_string()
            }
        );
        assert!(view.model().is_none());
    }

    #[test]
    fn test_series_named_from_directory() {
        let datasets = vec![
            dataset(1, &[("1960", 100.0)]),
            dataset(13, &[("1960", 900.0)]),
        ];

        let view = derive_chart(&directory(), &datasets, &ChartConfig::default());
        let model = view.model().unwrap();

        assert_eq!(model.series.len(), 2);
        assert_eq!(model.series[0].name, "Hokkaido");
        assert_eq!(model.series[0].data, vec![100.0]);
        assert_eq!(model.series[1].name, "Tokyo");
        assert_eq!(model.series[1].data, vec![900.0]);
    }

    #[test]
    fn test_unknown_prefecture_label() {
        let datasets = vec![dataset(47, &[("1960", 883_122.0)])];
        let view = derive_chart(&directory(), &datasets, &ChartConfig::default());
        assert_eq!(view.model().unwrap().series[0].name, UNKNOWN_PREFECTURE);
    }

    #[test]
    fn test_x_axis_ignores_labels() {
        let datasets = vec![dataset(1, &[("2000", 1.0), ("banana", 2.0), ("", 3.0)])];
        let view = derive_chart(&directory(), &datasets, &ChartConfig::default());
        let model = view.model().unwrap();

        assert_eq!(model.year_at(0), 1960);
        assert_eq!(model.year_at(1), 1965);
        assert_eq!(model.year_at(2), 1970);
        assert_eq!(model.point_count(), 3);
    }

    #[test]
    fn test_year_at_saturates_on_huge_step() {
        let config = ChartConfig {
            year_step: i32::MAX,
            ..ChartConfig::default()
        };
        let datasets = vec![dataset(1, &[("1960", 1.0), ("1965", 2.0), ("1970", 3.0)])];
        let view = derive_chart(&directory(), &datasets, &config);
        let model = view.model().unwrap();

        assert_eq!(model.year_at(0), 1960);
        assert_eq!(model.year_at(1), i32::MAX);
        assert_eq!(model.year_at(2), i32::MAX);
        assert_eq!(model.year_at(usize::MAX), i32::MAX);
    }

    #[test]
    fn test_value_range() {
        let datasets = vec![
            dataset(1, &[("1960", 300.0), ("1965", 100.0)]),
            dataset(13, &[("1960", 900.0)]),
        ];
        let view = derive_chart(&directory(), &datasets, &ChartConfig::default());
        assert_eq!(view.model().unwrap().value_range(), Some((100.0, 900.0)));
    }

    #[test]
    fn test_view_serializes_with_kind() {
        let view = derive_chart(&directory(), &[], &ChartConfig::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "placeholder");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(13_515_271.0), "13,515,271");
        assert_eq!(format_count(-1234.4), "-1,234");
    }

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0), series_color(SERIES_COLORS.len()));
    }
}
