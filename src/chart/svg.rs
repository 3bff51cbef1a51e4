//! SVG renderer
//!
//! Draws a [`ChartModel`] into an SVG document with `plotters`: caption,
//! mesh with year and population labels, one line with point markers per
//! series, and a series legend.

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use super::{format_count, series_color, ChartLayout, ChartModel};

/// Chart could not be drawn
#[derive(Debug, Error)]
#[error("Failed to render chart: {0}")]
pub struct RenderError(String);

/// Render `model` as an SVG document of the given size
pub fn render_svg(model: &ChartModel, width: u32, height: u32) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw(model, &root).map_err(|e| RenderError(e.to_string()))?;
        root.present().map_err(|e| RenderError(e.to_string()))?;
    }
    Ok(svg)
}

fn draw<DB: DrawingBackend>(
    model: &ChartModel,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let layout = ChartLayout::new(model, width as f64, height as f64);
    let (x_min, x_max) = year_range(model);

    let mut chart = ChartBuilder::on(root)
        .caption(&model.title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, layout.y_min..layout.y_max)?;

    chart
        .configure_mesh()
        .x_desc(model.x_axis_title.as_str())
        .y_desc(model.y_axis_title.as_str())
        .x_labels(model.point_count().clamp(2, 10))
        .y_labels(6)
        .x_label_formatter(&|year| format!("{:.0}", year))
        .y_label_formatter(&|value| format_count(*value))
        .draw()?;

    for (idx, series) in model.series.iter().enumerate() {
        let color = hex_color(series_color(idx));
        let points: Vec<(f64, f64)> = series
            .data
            .iter()
            .enumerate()
            .map(|(i, &value)| (model.year_at(i) as f64, value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Plotted year span; a single point gets one year of room either side
fn year_range(model: &ChartModel) -> (f64, f64) {
    let first = model.year_at(0) as f64;
    let last = model.year_at(model.point_count().saturating_sub(1)) as f64;
    if last > first {
        (first, last)
    } else {
        (first - 1.0, first + 1.0)
    }
}

/// `#rrggbb` palette entry to a plotters color
fn hex_color(hex: &str) -> RGBColor {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .unwrap_or(0)
    };
    RGBColor(channel(1..3), channel(3..5), channel(5..7))
}
