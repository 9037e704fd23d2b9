// The chart preparation pipeline: series, derived averages, chart geometry
pub mod chart_model;
pub mod moving_average;
pub mod series;
pub mod table;

// Re-export commonly used types
pub use chart_model::{CandleBar, ChartModel, MaLine, MaSource, ZoomWindow};
pub use moving_average::moving_average;
pub use series::Series;
pub use table::DisplayRow;
