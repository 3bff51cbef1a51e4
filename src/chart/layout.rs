//! Chart layout
//!
//! Maps series indices and values to pixel coordinates. The canvas renderer
//! in the browser app and the SVG renderer both draw from this.

use super::{ChartModel, ChartSeries};

/// Space around the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 90.0,
            right: 20.0,
            top: 40.0,
            bottom: 60.0,
        }
    }
}

/// Pixel mapping for one chart at one size
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub y_min: f64,
    pub y_max: f64,
    point_count: usize,
}

impl ChartLayout {
    pub fn new(model: &ChartModel, width: f64, height: f64) -> Self {
        Self::with_margins(model, width, height, Margins::default())
    }

    pub fn with_margins(model: &ChartModel, width: f64, height: f64, margins: Margins) -> Self {
        let (raw_min, raw_max) = model.value_range().unwrap_or((0.0, 1.0));

        // 10% headroom, never dipping below zero for non-negative data
        let range = raw_max - raw_min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        let mut y_min = raw_min - padding;
        let mut y_max = raw_max + padding;
        if raw_min >= 0.0 {
            y_min = y_min.max(0.0);
        }
        if y_min == y_max {
            y_min -= 1.0;
            y_max += 1.0;
        }

        Self {
            width,
            height,
            margins,
            y_min,
            y_max,
            point_count: model.point_count(),
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Bottom edge of the plot area
    pub fn baseline(&self) -> f64 {
        self.margins.top + self.plot_height()
    }

    /// X pixel of point `index`
    pub fn x(&self, index: usize) -> f64 {
        if self.point_count <= 1 {
            return self.margins.left + self.plot_width() / 2.0;
        }
        self.margins.left + (index as f64 / (self.point_count - 1) as f64) * self.plot_width()
    }

    /// Y pixel of `value` (canvas y grows downward)
    pub fn y(&self, value: f64) -> f64 {
        self.margins.top + ((self.y_max - value) / (self.y_max - self.y_min)) * self.plot_height()
    }

    /// Pixel coordinates of every point of `series`
    pub fn polyline(&self, series: &ChartSeries) -> Vec<(f64, f64)> {
        series
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.x(i), self.y(v)))
            .collect()
    }

    /// `divisions + 1` evenly spaced (value, y pixel) pairs, top to bottom
    pub fn y_ticks(&self, divisions: usize) -> Vec<(f64, f64)> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| {
                let fraction = i as f64 / divisions as f64;
                let value = self.y_max - fraction * (self.y_max - self.y_min);
                (value, self.margins.top + fraction * self.plot_height())
            })
            .collect()
    }

    /// (year, x pixel) pairs, thinned to at most `max_labels`
    pub fn x_ticks(&self, model: &ChartModel, max_labels: usize) -> Vec<(i32, f64)> {
        if self.point_count == 0 {
            return Vec::new();
        }
        let stride = self.point_count.div_ceil(max_labels.max(1)).max(1);
        (0..self.point_count)
            .step_by(stride)
            .map(|i| (model.year_at(i), self.x(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(series: Vec<Vec<f64>>) -> ChartModel {
        ChartModel {
            title: String::new(),
            x_axis_title: String::new(),
            y_axis_title: String::new(),
            point_start: 1960,
            point_interval: 5,
            series: series
                .into_iter()
                .enumerate()
                .map(|(i, data)| ChartSeries {
                    name: format!("s{}", i),
                    data,
                })
                .collect(),
        }
    }

    #[test]
    fn test_y_range_padding() {
        let layout = ChartLayout::new(&model(vec![vec![100.0], vec![900.0]]), 800.0, 400.0);
        assert_eq!(layout.y_min, 20.0);
        assert_eq!(layout.y_max, 980.0);
    }

    #[test]
    fn test_y_range_clamped_at_zero() {
        let layout = ChartLayout::new(&model(vec![vec![10.0, 1000.0]]), 800.0, 400.0);
        assert_eq!(layout.y_min, 0.0);
    }

    #[test]
    fn test_flat_series_gets_range() {
        let layout = ChartLayout::new(&model(vec![vec![100.0, 100.0]]), 800.0, 400.0);
        assert_eq!(layout.y_min, 99.0);
        assert_eq!(layout.y_max, 101.0);
    }

    #[test]
    fn test_x_spans_plot_area() {
        let layout = ChartLayout::new(&model(vec![vec![1.0, 2.0, 3.0]]), 800.0, 400.0);
        let margins = Margins::default();

        assert_eq!(layout.x(0), margins.left);
        assert_eq!(layout.x(2), 800.0 - margins.right);
    }

    #[test]
    fn test_single_point_centered() {
        let layout = ChartLayout::new(&model(vec![vec![5.0]]), 800.0, 400.0);
        let margins = Margins::default();
        assert_eq!(layout.x(0), margins.left + layout.plot_width() / 2.0);
    }

    #[test]
    fn test_y_maps_extremes_to_edges() {
        let layout = ChartLayout::new(&model(vec![vec![100.0, 900.0]]), 800.0, 400.0);
        assert_eq!(layout.y(layout.y_max), layout.margins.top);
        assert_eq!(layout.y(layout.y_min), layout.baseline());
    }

    #[test]
    fn test_ticks() {
        let m = model(vec![(0..18).map(|v| v as f64).collect()]);
        let layout = ChartLayout::new(&m, 800.0, 400.0);

        let y_ticks = layout.y_ticks(5);
        assert_eq!(y_ticks.len(), 6);
        assert_eq!(y_ticks[0].1, layout.margins.top);

        let x_ticks = layout.x_ticks(&m, 6);
        let years: Vec<_> = x_ticks.iter().map(|(year, _)| *year).collect();
        assert_eq!(years, vec![1960, 1975, 1990, 2005, 2020, 2035]);
    }
}
