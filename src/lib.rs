// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{LoadError, MarketClient};
pub use domain::{DateRange, Instrument, PricePoint};
pub use models::{ChartModel, Series, moving_average};
pub use ui::{DetailRequest, KlineDeckApp};

use std::sync::Arc;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL serving the /api/stock endpoints
    #[arg(long, default_value = config::API.default_base_url)]
    pub base_url: String,

    /// Open the detail view for this instrument at startup
    #[arg(long)]
    pub ts_code: Option<String>,

    /// Start of the date range (YYYY-MM-DD); defaults to one year back
    #[arg(long)]
    pub start_date: Option<String>,

    /// End of the date range (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end_date: Option<String>,
}

impl Cli {
    /// The CLI flags translated into a startup navigation request.
    pub fn detail_request(&self) -> DetailRequest {
        DetailRequest {
            ts_code: self.ts_code.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext<'_>,
    client: Arc<MarketClient>,
    runtime: tokio::runtime::Handle,
    instruments: Vec<Instrument>,
    list_notice: Option<String>,
    initial: DetailRequest,
) -> Box<dyn eframe::App> {
    let app = KlineDeckApp::new(cc, client, runtime, instruments, list_notice, initial);
    Box::new(app)
}
