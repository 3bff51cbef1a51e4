//! Chart Component
//!
//! Population line chart drawn on an HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use pf_data::chart::{format_count, series_color, ChartLayout, ChartModel};
use pf_data::{derive_chart, ChartConfig, ChartView};

use crate::components::loading::InlineLoading;
use crate::state::global::GlobalState;

/// Population chart, or a placeholder when nothing is loaded
#[component]
pub fn PopulationChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let config = ChartConfig::default();

    let chart = create_memo(move |_| {
        state
            .datasets
            .with(|datasets| derive_chart(&state.directory(), datasets, &config))
    });

    // Redraw when the chart changes or the canvas mounts
    create_effect(move |_| {
        if let (ChartView::Chart(model), Some(canvas)) = (chart.get(), canvas_ref.get()) {
            draw_chart(&canvas, &model);
        }
    });

    view! {
        <div class="relative">
            {move || state.loading.get().then(|| view! { <InlineLoading /> })}
            {move || match chart.get() {
                ChartView::Placeholder { message } => view! {
                    <p class="graph-data__title">{message}</p>
                }.into_view(),
                ChartView::Chart(model) => view! {
                    <canvas
                        node_ref=canvas_ref
                        width="800"
                        height="400"
                        class="w-full rounded-lg"
                    />
                    <ChartLegend model=model />
                }.into_view(),
            }}
        </div>
    }
}

/// Chart legend showing series colors
#[component]
fn ChartLegend(model: ChartModel) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {model.series
                .into_iter()
                .enumerate()
                .map(|(idx, series)| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", series_color(idx))
                            />
                            <span class="text-sm">{series.name}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, model: &ChartModel) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let layout = ChartLayout::new(model, width, height);

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Title
    ctx.set_fill_style(&"#333333".into());
    ctx.set_font("18px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&model.title, width / 2.0, 24.0);

    // Horizontal grid lines + y labels
    ctx.set_stroke_style(&"#e6e6e6".into());
    ctx.set_line_width(1.0);
    ctx.set_font("11px sans-serif");
    ctx.set_text_align("right");
    for (value, y) in layout.y_ticks(5) {
        ctx.begin_path();
        ctx.move_to(layout.margins.left, y);
        ctx.line_to(width - layout.margins.right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#666666".into());
        let _ = ctx.fill_text(&format_count(value), layout.margins.left - 6.0, y + 4.0);
    }

    // X-axis labels
    ctx.set_text_align("center");
    for (year, x) in layout.x_ticks(model, 10) {
        let _ = ctx.fill_text(&year.to_string(), x, layout.baseline() + 16.0);
    }

    // Axis titles
    ctx.set_font("12px sans-serif");
    let _ = ctx.fill_text(
        &model.x_axis_title,
        layout.margins.left + layout.plot_width() / 2.0,
        layout.baseline() + 36.0,
    );
    ctx.save();
    let _ = ctx.translate(14.0, layout.margins.top + layout.plot_height() / 2.0);
    let _ = ctx.rotate(-std::f64::consts::FRAC_PI_2);
    let _ = ctx.fill_text(&model.y_axis_title, 0.0, 0.0);
    ctx.restore();

    // Draw each data series
    for (idx, series) in model.series.iter().enumerate() {
        let points = layout.polyline(series);
        if points.is_empty() {
            continue;
        }

        let color = series_color(idx);
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(*x, *y);
            } else {
                ctx.line_to(*x, *y);
            }
        }
        ctx.stroke();

        // Draw points
        ctx.set_fill_style(&color.into());
        for (x, y) in points {
            ctx.begin_path();
            let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }
}
