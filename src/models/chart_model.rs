use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::domain::IndicatorPoint;
use crate::models::{Series, moving_average};

/// One candlestick, in candlestick order: open/close first, then the
/// low/high whisker extent. Not the raw column order of the source rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleBar {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl CandleBar {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Low and high of the candle body.
    pub fn body_range(&self) -> (f64, f64) {
        if self.is_bullish() {
            (self.open, self.close)
        } else {
            (self.close, self.open)
        }
    }
}

/// One moving-average overlay, index-aligned with the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MaLine {
    pub name: String,
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

/// Source feeding the moving-average overlays for one build.
#[derive(Debug, Clone, Copy)]
pub enum MaSource<'a> {
    /// Run the engine over the close column.
    Computed,
    /// Align backend-precomputed values by trade date.
    Fetched(&'a [IndicatorPoint]),
}

/// The visible sub-range of the time axis, as percentage bounds over the
/// full index range (not over dates). One instance drives both panes, which
/// is what keeps their displayed windows identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomWindow {
    start_pct: f64,
    end_pct: f64,
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self::full()
    }
}

impl ZoomWindow {
    /// Smallest selectable span, in percent of the index range.
    pub const MIN_SPAN_PCT: f64 = 1.0;

    pub fn full() -> Self {
        Self {
            start_pct: 0.0,
            end_pct: 100.0,
        }
    }

    /// Build a window from possibly out-of-order, out-of-bounds input.
    pub fn new(start_pct: f64, end_pct: f64) -> Self {
        let mut window = Self::full();
        window.set(start_pct, end_pct);
        window
    }

    /// Clamp into [0, 100], restore ordering, enforce the minimum span.
    pub fn set(&mut self, start_pct: f64, end_pct: f64) {
        let (low, high) = if start_pct <= end_pct {
            (start_pct, end_pct)
        } else {
            (end_pct, start_pct)
        };
        let mut start = low.clamp(0.0, 100.0);
        let mut end = high.clamp(0.0, 100.0);
        if end - start < Self::MIN_SPAN_PCT {
            end = (start + Self::MIN_SPAN_PCT).min(100.0);
            start = (end - Self::MIN_SPAN_PCT).max(0.0);
        }
        self.start_pct = start;
        self.end_pct = end;
    }

    pub fn start_pct(&self) -> f64 {
        self.start_pct
    }

    pub fn end_pct(&self) -> f64 {
        self.end_pct
    }

    pub fn span_pct(&self) -> f64 {
        self.end_pct - self.start_pct
    }

    /// Shift the window, keeping its span.
    pub fn pan_by(&mut self, delta_pct: f64) {
        let span = self.span_pct();
        let start = (self.start_pct + delta_pct).clamp(0.0, 100.0 - span);
        self.start_pct = start;
        self.end_pct = start + span;
    }

    /// Scale the span around an anchor percentage. `factor < 1` zooms in.
    pub fn zoom_by(&mut self, factor: f64, anchor_pct: f64) {
        let anchor = anchor_pct.clamp(self.start_pct, self.end_pct);
        let start = anchor - (anchor - self.start_pct) * factor;
        let end = anchor + (self.end_pct - anchor) * factor;
        self.set(start, end);
    }

    /// Visible index range, end-exclusive, for an axis of `len` entries.
    pub fn index_bounds(&self, len: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        let last = (len - 1) as f64;
        let first = ((self.start_pct / 100.0) * last).floor() as usize;
        let past = (((self.end_pct / 100.0) * last).ceil() as usize + 1).min(len);
        (first.min(len - 1), past)
    }
}

/// Renderer-agnostic description of the dual-pane chart.
///
/// The axis is categorical: one slot per trading day, labelled with the raw
/// `tradeDate` string. Treating it as a continuous date scale would draw
/// weekend/holiday gaps, so position is index, not time. Every collection
/// here is index-aligned with `axis` — index `k` means the same trading day
/// in the price pane and the volume pane. That alignment is the load-bearing
/// invariant of the layout.
///
/// Rebuilt from scratch on every data refresh; nothing patches one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartModel {
    pub axis: Vec<String>,
    /// `None` where any of the four components was missing.
    pub candles: Vec<Option<CandleBar>>,
    pub ma_lines: Vec<MaLine>,
    /// Volume pane values, on their own vertical scale.
    pub volumes: Vec<Option<f64>>,
    pub zoom: ZoomWindow,
}

impl ChartModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Assemble the chart description for one series.
    ///
    /// An empty series produces an empty model; the renderer shows its empty
    /// state for that rather than failing.
    pub fn build(series: &Series, ma_source: MaSource<'_>, config: &AnalysisConfig) -> Self {
        if series.is_empty() {
            return Self::empty();
        }

        let points = series.points();
        let axis: Vec<String> = points.iter().map(|p| p.trade_date.clone()).collect();

        let candles = points
            .iter()
            .map(|p| match (p.open, p.close, p.low, p.high) {
                (Some(open), Some(close), Some(low), Some(high)) => Some(CandleBar {
                    open,
                    close,
                    low,
                    high,
                }),
                _ => None,
            })
            .collect();

        let volumes = points.iter().map(|p| p.vol).collect();

        let ma_lines = config
            .ma_windows
            .iter()
            .map(|&window| MaLine {
                name: format!("MA{window}"),
                window,
                values: match ma_source {
                    MaSource::Computed => moving_average(window, series),
                    MaSource::Fetched(indicators) => align_fetched(window, &axis, indicators),
                },
            })
            .collect();

        Self {
            axis,
            candles,
            ma_lines,
            volumes,
            zoom: ZoomWindow::full(),
        }
    }
}

/// Look up one window's backend values for every axis date; dates the
/// indicator set does not cover become gaps.
fn align_fetched(window: usize, axis: &[String], indicators: &[IndicatorPoint]) -> Vec<Option<f64>> {
    let by_date: HashMap<&str, &IndicatorPoint> = indicators
        .iter()
        .map(|p| (p.trade_date.as_str(), p))
        .collect();
    axis.iter()
        .map(|date| {
            by_date
                .get(date.as_str())
                .and_then(|p| p.ma_values.get(&(window as u32)).copied())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaLineSource;
    use crate::domain::PricePoint;

    const TEST_CONFIG: AnalysisConfig = AnalysisConfig {
        ma_windows: &[5, 10, 20],
        ma_source: MaLineSource::Computed,
    };

    fn sample_series(closes: &[f64]) -> Series {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::test_point(&format!("2023-01-{:02}", i + 1), close))
            .collect();
        Series::new("000001.SZ", points)
    }

    #[test]
    fn every_collection_is_axis_aligned() {
        let series = sample_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let model = ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG);

        assert_eq!(model.axis.len(), series.len());
        assert_eq!(model.candles.len(), model.axis.len());
        assert_eq!(model.volumes.len(), model.axis.len());
        for line in &model.ma_lines {
            assert_eq!(line.values.len(), model.axis.len());
        }
    }

    #[test]
    fn axis_holds_trade_dates_in_series_order() {
        let series = sample_series(&[10.0, 11.0]);
        let model = ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG);
        assert_eq!(model.axis, vec!["2023-01-01", "2023-01-02"]);
    }

    #[test]
    fn candles_use_candlestick_component_order() {
        let series = sample_series(&[10.0]);
        let model = ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG);
        let candle = model.candles[0].unwrap();
        assert_eq!(candle.open, 9.5);
        assert_eq!(candle.close, 10.0);
        assert_eq!(candle.low, 9.0);
        assert_eq!(candle.high, 11.0);
        assert!(candle.is_bullish());
    }

    #[test]
    fn missing_component_leaves_a_gap_but_keeps_the_slot() {
        let mut points = vec![
            PricePoint::test_point("2023-01-01", 10.0),
            PricePoint::test_point("2023-01-02", 11.0),
        ];
        points[1].low = None;
        let series = Series::new("000001.SZ", points);
        let model = ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG);

        assert_eq!(model.axis.len(), 2);
        assert!(model.candles[0].is_some());
        assert!(model.candles[1].is_none());
    }

    #[test]
    fn configured_windows_become_named_lines() {
        let series = sample_series(&[10.0, 11.0, 12.0]);
        let model = ChartModel::build(&series, MaSource::Computed, &TEST_CONFIG);
        let names: Vec<&str> = model.ma_lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["MA5", "MA10", "MA20"]);
    }

    #[test]
    fn empty_series_builds_an_empty_model() {
        let model = ChartModel::build(&Series::empty("000001.SZ"), MaSource::Computed, &TEST_CONFIG);
        assert!(model.is_empty());
        assert!(model.candles.is_empty());
        assert!(model.ma_lines.is_empty() || model.ma_lines.iter().all(|l| l.values.is_empty()));
        assert!(model.volumes.is_empty());
        assert_eq!(model.zoom, ZoomWindow::full());
    }

    #[test]
    fn fetched_source_aligns_by_trade_date() {
        let series = sample_series(&[10.0, 11.0, 12.0]);
        let config = AnalysisConfig {
            ma_windows: &[5],
            ma_source: MaLineSource::Backend,
        };
        let indicators = vec![
            IndicatorPoint {
                trade_date: "2023-01-01".to_string(),
                ma_values: [(5, 10.5)].into_iter().collect(),
            },
            // 2023-01-02 is deliberately absent.
            IndicatorPoint {
                trade_date: "2023-01-03".to_string(),
                ma_values: [(5, 11.5), (10, 11.0)].into_iter().collect(),
            },
        ];
        let model = ChartModel::build(&series, MaSource::Fetched(&indicators), &config);

        assert_eq!(model.ma_lines.len(), 1);
        assert_eq!(
            model.ma_lines[0].values,
            vec![Some(10.5), None, Some(11.5)]
        );
    }

    mod zoom {
        use super::*;

        #[test]
        fn defaults_to_the_full_range() {
            let zoom = ZoomWindow::default();
            assert_eq!(zoom.start_pct(), 0.0);
            assert_eq!(zoom.end_pct(), 100.0);
        }

        #[test]
        fn set_restores_order_and_clamps() {
            let mut zoom = ZoomWindow::full();
            zoom.set(120.0, -10.0);
            assert_eq!(zoom.start_pct(), 0.0);
            assert_eq!(zoom.end_pct(), 100.0);
        }

        #[test]
        fn set_enforces_the_minimum_span() {
            let mut zoom = ZoomWindow::full();
            zoom.set(50.0, 50.2);
            assert!(zoom.span_pct() >= ZoomWindow::MIN_SPAN_PCT);
        }

        #[test]
        fn pan_keeps_span_and_stops_at_the_edges() {
            let mut zoom = ZoomWindow::new(40.0, 60.0);
            zoom.pan_by(100.0);
            assert_eq!(zoom.start_pct(), 80.0);
            assert_eq!(zoom.end_pct(), 100.0);
            assert_eq!(zoom.span_pct(), 20.0);

            zoom.pan_by(-200.0);
            assert_eq!(zoom.start_pct(), 0.0);
            assert_eq!(zoom.end_pct(), 20.0);
        }

        #[test]
        fn zoom_in_shrinks_around_the_anchor() {
            let mut zoom = ZoomWindow::full();
            zoom.zoom_by(0.5, 50.0);
            assert_eq!(zoom.start_pct(), 25.0);
            assert_eq!(zoom.end_pct(), 75.0);
        }

        #[test]
        fn index_bounds_cover_the_axis() {
            let zoom = ZoomWindow::full();
            assert_eq!(zoom.index_bounds(0), (0, 0));
            assert_eq!(zoom.index_bounds(1), (0, 1));
            assert_eq!(zoom.index_bounds(250), (0, 250));
        }

        #[test]
        fn index_bounds_of_a_sub_window() {
            let zoom = ZoomWindow::new(50.0, 100.0);
            let (first, past) = zoom.index_bounds(101);
            assert_eq!(first, 50);
            assert_eq!(past, 101);
        }
    }
}
