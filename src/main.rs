#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::NativeOptions;
use tokio::runtime::Runtime;

use kline_deck::ui::UI_TEXT;
use kline_deck::{Cli, MarketClient, run_app};

fn main() -> anyhow::Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime + Client
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let client = Arc::new(MarketClient::with_base_url(&args.base_url));

    // D. Initial instrument list (blocking). A failed fetch still opens the
    // app; the list view shows the failure and offers a reload.
    let (instruments, list_notice) = match rt.block_on(client.fetch_instruments(false)) {
        Ok(instruments) => {
            log::info!("Loaded {} instruments from {}", instruments.len(), args.base_url);
            (instruments, None)
        }
        Err(e) => {
            log::error!("Initial instrument list fetch failed: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    // E. Run Native App. The runtime stays alive in this scope for the
    // whole GUI lifetime; the app only holds a handle.
    let handle = rt.handle().clone();
    let initial = args.detail_request();
    let options = NativeOptions::default();

    eframe::run_native(
        UI_TEXT.app_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, client, handle, instruments, list_notice, initial))),
    )
    .map_err(|e| anyhow::anyhow!("GUI event loop failed: {e}"))
}
