//! Chart computation configuration

/// Where the moving-average overlays come from.
///
/// Exactly one source feeds a chart build. Either the engine derives the
/// averages from the close column, or the backend's precomputed values are
/// fetched and aligned by trade date; the two are never mixed in one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaLineSource {
    /// Compute locally from the loaded series.
    Computed,
    /// Use the indicator endpoint's `maValues`.
    Backend,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    /// Window lengths for the moving-average overlays, in trading days.
    /// Any number of windows; each one becomes a named line on the price pane.
    pub ma_windows: &'static [usize],
    pub ma_source: MaLineSource,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    ma_windows: &[5, 10, 20],
    ma_source: MaLineSource::Computed,
};
