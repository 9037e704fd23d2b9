// Backend access: the series-loader boundary
pub mod client;
pub mod loader;

// Re-export commonly used types
pub use client::{LoadError, MarketClient};
pub use loader::{DetailPayload, RefreshSummary, SeriesProvider, load_detail, refresh_sweep};
