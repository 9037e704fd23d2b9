//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Fill/border for rising candles (close >= open).
    pub bull_candle_color: Color32,
    /// Fill/border for falling candles.
    pub bear_candle_color: Color32,
    pub volume_bar_color: Color32,
    /// Line colors cycled across the configured MA windows.
    pub ma_line_palette: &'static [Color32],
    pub ma_line_width: f32,
    /// Candle body width in axis units (index spacing is 1.0).
    pub candle_body_width: f64,
    pub candle_whisker_width: f64,
    pub volume_bar_width: f64,
    /// Fraction of the chart height given to the volume pane.
    pub volume_pane_ratio: f32,
    /// Zoom factor applied per scroll step (fraction of the visible span).
    pub scroll_zoom_step: f64,
    /// Headroom above/below the visible price extent, as a fraction of it.
    pub y_margin_frac: f64,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    // Up is red, down is green, matching the CN market convention the
    // backend's data follows.
    bull_candle_color: Color32::from_rgb(0xef, 0x23, 0x2a),
    bear_candle_color: Color32::from_rgb(0x14, 0xb1, 0x43),
    volume_bar_color: Color32::from_rgb(115, 140, 190),
    ma_line_palette: &[
        Color32::from_rgb(84, 112, 198),  // Blue
        Color32::from_rgb(250, 200, 88),  // Amber
        Color32::from_rgb(145, 204, 117), // Green
        Color32::from_rgb(238, 102, 102), // Coral
    ],
    ma_line_width: 1.5,
    candle_body_width: 0.6,
    candle_whisker_width: 0.3,
    volume_bar_width: 0.6,
    volume_pane_ratio: 0.25,
    scroll_zoom_step: 0.1,
    y_margin_frac: 0.05,
};
