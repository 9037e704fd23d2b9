//! Configuration module for the kline dashboard.

pub mod analysis;
pub mod api;

mod debug; // Private; the public re-export below forces `crate::config::DEBUG_FLAGS`
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, MaLineSource};
pub use api::API;
pub use plot::PLOT_CONFIG;
