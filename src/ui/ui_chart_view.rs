use std::sync::Arc;

use eframe::egui::{self, Stroke, Ui};
use egui_plot::{
    AxisHints, Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Corner, GridMark, HPlacement, Legend,
    Line, Plot, PlotPoints,
};
use itertools::Itertools;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PLOT_CONFIG;
use crate::models::{CandleBar, ChartModel};
use crate::ui::config::UI_TEXT;
use crate::utils::maths_utils;

/// Precomputed drawing data for one chart model.
///
/// Rebuilt whenever the session installs a new model (keyed by revision) and
/// dropped with the view — exactly one live cache per chart container, never
/// an accumulation across rebuilds.
struct ChartCache {
    revision: u64,
    axis: Arc<Vec<String>>,
    candles: Vec<(usize, CandleBar)>,
    /// Per MA line: (name, palette slot, contiguous runs of [x, y] points).
    /// Runs are split at gaps so missing history stays visually missing.
    ma_segments: Vec<(String, usize, Vec<Vec<[f64; 2]>>)>,
    volumes: Vec<(usize, f64)>,
}

/// Binds chart models to the egui_plot surface: the price pane and the
/// volume pane, stacked, driven by the model's one zoom window.
#[derive(Default)]
pub struct ChartView {
    cache: Option<ChartCache>,
}

impl ChartView {
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    /// Render both panes.
    ///
    /// The zoom window is the single source of x-bounds for the two plots,
    /// and pane interactions write back into it, so price and volume can
    /// never show different index ranges. An empty model renders the empty
    /// state and touches no plot at all.
    pub fn show(&mut self, ui: &mut Ui, model: &mut ChartModel, revision: u64, height: f32) {
        if model.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading(UI_TEXT.empty_chart);
            });
            return;
        }

        self.ensure_cache(model, revision);
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        let len = model.len();
        let (first, past) = model.zoom.index_bounds(len);
        let x_min = first as f64 - 0.5;
        let x_max = past.saturating_sub(1) as f64 + 0.5;

        let price_height = height * (1.0 - PLOT_CONFIG.volume_pane_ratio);
        let volume_height = height * PLOT_CONFIG.volume_pane_ratio;

        #[cfg(debug_assertions)]
        let zoom_before = model.zoom;

        let price_response =
            show_price_pane(ui, cache, first, past, x_min, x_max, price_height);
        let volume_response =
            show_volume_pane(ui, cache, first, past, x_min, x_max, volume_height);

        // One window, two panes: any interaction lands in the shared zoom
        // and both panes read it back next frame.
        apply_pane_interaction(ui, &price_response, model);
        apply_pane_interaction(ui, &volume_response, model);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_zoom && model.zoom != zoom_before {
            log::info!(
                "Zoom window now {:.1}%..{:.1}%",
                model.zoom.start_pct(),
                model.zoom.end_pct()
            );
        }
    }

    fn ensure_cache(&mut self, model: &ChartModel, revision: u64) {
        if self.cache.as_ref().is_some_and(|c| c.revision == revision) {
            return;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_cache {
            log::info!("Rebuilding chart cache (revision {})", revision);
        }

        // Replacing the option drops the old cache; nothing outlives its
        // model revision.
        self.cache = Some(build_cache(model, revision));
    }
}

fn build_cache(model: &ChartModel, revision: u64) -> ChartCache {
    let candles = model
        .candles
        .iter()
        .enumerate()
        .filter_map(|(i, candle)| candle.map(|c| (i, c)))
        .collect();

    let ma_segments = model
        .ma_lines
        .iter()
        .enumerate()
        .map(|(slot, line)| (line.name.clone(), slot, contiguous_runs(&line.values)))
        .collect();

    let volumes = model
        .volumes
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    ChartCache {
        revision,
        axis: Arc::new(model.axis.clone()),
        candles,
        ma_segments,
        volumes,
    }
}

/// Split an index-aligned optional series into runs of present values, so
/// each run renders as its own polyline and the gaps stay gaps.
fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    for (has_value, run) in &values
        .iter()
        .enumerate()
        .chunk_by(|(_, value)| value.is_some())
    {
        if !has_value {
            continue;
        }
        runs.push(
            run.filter_map(|(i, value)| value.map(|v| [i as f64, v]))
                .collect(),
        );
    }
    runs
}

fn show_price_pane(
    ui: &mut Ui,
    cache: &ChartCache,
    first: usize,
    past: usize,
    x_min: f64,
    x_max: f64,
    height: f32,
) -> egui::Response {
    let (y_min, y_max) = price_extent(cache, first, past);
    let axis = Arc::clone(&cache.axis);

    let response = Plot::new("price_pane")
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        .custom_x_axes(vec![date_axis(axis, true)])
        .custom_y_axes(vec![price_axis()])
        .label_formatter(|_, _| String::new())
        .x_grid_spacer(index_grid_spacer)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_min..=x_max);
            plot_ui.set_plot_bounds_y(y_min..=y_max);

            // Candles below, averages on top.
            let boxes: Vec<BoxElem> = cache
                .candles
                .iter()
                .map(|(i, candle)| candle_box(*i, candle))
                .collect();
            plot_ui.box_plot(BoxPlot::new(UI_TEXT.kline_series, boxes));

            for (name, slot, runs) in &cache.ma_segments {
                let color = PLOT_CONFIG.ma_line_palette[slot % PLOT_CONFIG.ma_line_palette.len()];
                for run in runs {
                    plot_ui.line(
                        Line::new(name.clone(), PlotPoints::new(run.clone()))
                            .color(color)
                            .width(PLOT_CONFIG.ma_line_width),
                    );
                }
            }
        });
    response.response
}

fn show_volume_pane(
    ui: &mut Ui,
    cache: &ChartCache,
    first: usize,
    past: usize,
    x_min: f64,
    x_max: f64,
    height: f32,
) -> egui::Response {
    let y_max = volume_extent(cache, first, past);
    let axis = Arc::clone(&cache.axis);

    let response = Plot::new("volume_pane")
        .height(height)
        .custom_x_axes(vec![date_axis(axis, false)])
        .custom_y_axes(vec![volume_axis()])
        .label_formatter(|_, _| String::new())
        .x_grid_spacer(index_grid_spacer)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_min..=x_max);
            plot_ui.set_plot_bounds_y(0.0..=y_max);

            let bars: Vec<Bar> = cache
                .volumes
                .iter()
                .map(|(i, volume)| {
                    Bar::new(*i as f64, *volume)
                        .width(PLOT_CONFIG.volume_bar_width)
                        .fill(PLOT_CONFIG.volume_bar_color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(UI_TEXT.volume_series, bars));
        });
    response.response
}

/// Route scroll-zoom and drag-pan on a pane into the shared zoom window.
fn apply_pane_interaction(ui: &Ui, response: &egui::Response, model: &mut ChartModel) {
    if model.is_empty() {
        return;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let factor = if scroll > 0.0 {
                1.0 - PLOT_CONFIG.scroll_zoom_step
            } else {
                1.0 + PLOT_CONFIG.scroll_zoom_step
            };
            let anchor = pointer_anchor_pct(response, model);
            model.zoom.zoom_by(factor, anchor);
        }
    }

    if response.dragged() {
        let drag_x = response.drag_delta().x;
        if drag_x != 0.0 {
            let width = response.rect.width().max(1.0);
            let delta_pct = -(drag_x as f64) / width as f64 * model.zoom.span_pct();
            model.zoom.pan_by(delta_pct);
        }
    }
}

/// The pointer's horizontal position mapped into the zoom window, so a
/// scroll zoom contracts around what the user is pointing at.
fn pointer_anchor_pct(response: &egui::Response, model: &ChartModel) -> f64 {
    let zoom = &model.zoom;
    let Some(pos) = response.hover_pos() else {
        return zoom.start_pct() + zoom.span_pct() / 2.0;
    };
    let rect = response.rect;
    let frac = ((pos.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0) as f64;
    zoom.start_pct() + frac * zoom.span_pct()
}

fn candle_box(index: usize, candle: &CandleBar) -> BoxElem {
    let (body_low, body_high) = candle.body_range();
    let median = (body_low + body_high) / 2.0;
    let color = if candle.is_bullish() {
        PLOT_CONFIG.bull_candle_color
    } else {
        PLOT_CONFIG.bear_candle_color
    };

    BoxElem::new(
        index as f64,
        BoxSpread::new(candle.low, body_low, median, body_high, candle.high),
    )
    .box_width(PLOT_CONFIG.candle_body_width)
    .whisker_width(PLOT_CONFIG.candle_whisker_width)
    .fill(color)
    .stroke(Stroke::new(1.0, color))
}

/// Lowest/highest visible price across candles and MA lines, padded.
fn price_extent(cache: &ChartCache, first: usize, past: usize) -> (f64, f64) {
    let mut values = Vec::new();
    for (i, candle) in &cache.candles {
        if (first..past).contains(i) {
            values.push(candle.low);
            values.push(candle.high);
        }
    }
    for (_, _, runs) in &cache.ma_segments {
        for run in runs {
            for point in run {
                if (first..past).contains(&(point[0] as usize)) {
                    values.push(point[1]);
                }
            }
        }
    }

    if values.is_empty() {
        return (0.0, 1.0);
    }
    let (min, max) = maths_utils::get_min_max(&values);
    let span = max - min;
    let margin = if span > 0.0 {
        span * PLOT_CONFIG.y_margin_frac
    } else {
        1.0
    };
    (min - margin, max + margin)
}

fn volume_extent(cache: &ChartCache, first: usize, past: usize) -> f64 {
    let visible: Vec<f64> = cache
        .volumes
        .iter()
        .filter(|(i, _)| (first..past).contains(i))
        .map(|(_, v)| *v)
        .collect();
    if visible.is_empty() {
        1.0
    } else {
        maths_utils::get_max(&visible) * (1.0 + PLOT_CONFIG.y_margin_frac)
    }
}

/// Integer-only grid marks; fractional positions mean nothing on a
/// categorical axis.
fn index_grid_spacer(input: egui_plot::GridInput) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    let range = (max - min).max(1.0);
    let step = (range / 8.0).ceil().max(1.0);
    let mut marks = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max {
        marks.push(GridMark {
            value,
            step_size: step,
        });
        value += step;
    }
    marks
}

fn date_axis(axis: Arc<Vec<String>>, show_labels: bool) -> AxisHints<'static> {
    AxisHints::new_x().formatter(move |grid_mark, _range| {
        if !show_labels {
            return String::new();
        }
        let index = grid_mark.value.round() as i64;
        if index < 0 {
            return String::new();
        }
        axis.get(index as usize).cloned().unwrap_or_default()
    })
}

fn price_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .placement(HPlacement::Left)
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
}

fn volume_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .placement(HPlacement::Left)
        .formatter(|grid_mark, _range| format_volume(grid_mark.value))
}

fn format_volume(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, MaLineSource};
    use crate::domain::PricePoint;
    use crate::models::{MaSource, Series};

    const TEST_CONFIG: AnalysisConfig = AnalysisConfig {
        ma_windows: &[2],
        ma_source: MaLineSource::Computed,
    };

    fn model_of(closes: &[f64]) -> ChartModel {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::test_point(&format!("2023-02-{:02}", i + 1), close))
            .collect();
        let series = Series::new("000001.SZ", points);
        ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG)
    }

    #[test]
    fn cache_of_an_empty_model_is_empty_and_does_not_panic() {
        let cache = build_cache(&ChartModel::empty(), 1);
        assert!(cache.candles.is_empty());
        assert!(cache.volumes.is_empty());
        assert!(cache.ma_segments.is_empty());
        assert_eq!(price_extent(&cache, 0, 0), (0.0, 1.0));
        assert_eq!(volume_extent(&cache, 0, 0), 1.0);
    }

    #[test]
    fn gaps_split_ma_lines_into_separate_runs() {
        let values = vec![None, Some(1.0), Some(2.0), None, Some(4.0)];
        let runs = contiguous_runs(&values);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(runs[1], vec![[4.0, 4.0]]);
    }

    #[test]
    fn candles_with_missing_components_are_left_out_of_the_cache() {
        let mut model = model_of(&[10.0, 11.0, 12.0]);
        model.candles[1] = None;
        let cache = build_cache(&model, 1);
        let indices: Vec<usize> = cache.candles.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn price_extent_only_scans_the_visible_window() {
        let model = model_of(&[10.0, 11.0, 100.0]);
        let cache = build_cache(&model, 1);
        // Indices 0..2 exclude the 100.0 candle (high 101.0).
        let (_, y_max) = price_extent(&cache, 0, 2);
        assert!(y_max < 50.0);
        let (_, y_max_all) = price_extent(&cache, 0, 3);
        assert!(y_max_all > 100.0);
    }

    #[test]
    fn volume_axis_labels_are_compact() {
        assert_eq!(format_volume(1_250_000.0), "1.3M");
        assert_eq!(format_volume(12_500.0), "12.5K");
        assert_eq!(format_volume(950.0), "950");
    }
}
