//! Plain-text renderer
//!
//! One row per plotted year, one column per series.

use std::fmt::Write;

use super::{format_count, ChartModel};

/// Render `model` as a text table
pub fn render_table(model: &ChartModel) -> String {
    let mut out = String::new();

    // Header
    let _ = write!(out, "{:<8}", "Year");
    for series in &model.series {
        let _ = write!(out, " | {:>14}", series.name);
    }
    out.push('\n');

    // Separator
    let _ = writeln!(out, "{}", "-".repeat(8 + model.series.len() * 17));

    // Data rows
    for i in 0..model.point_count() {
        let _ = write!(out, "{:<8}", model.year_at(i));
        for series in &model.series {
            let value = series
                .data
                .get(i)
                .map(|v| format_count(*v))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(out, " | {:>14}", value);
        }
        out.push('\n');
    }

    out
}
