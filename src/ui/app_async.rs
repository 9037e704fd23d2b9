use std::sync::Arc;

use eframe::egui;
use poll_promise::Promise;

use crate::config::{ANALYSIS, MaLineSource};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{DetailPayload, LoadError, load_detail, refresh_sweep};
use crate::domain::DateRange;
use crate::models::{ChartModel, MaSource, table};
use crate::ui::app::KlineDeckApp;

/// What a finished detail load hands back to the GUI thread.
pub(super) struct DetailLoadResult {
    pub(super) request_id: u64,
    pub(super) ts_code: String,
    pub(super) result: Result<DetailPayload, LoadError>,
}

impl KlineDeckApp {
    /// Kick off (or restart) the current session's load.
    ///
    /// Each call takes a fresh request id; whatever resolves under an older
    /// id is dropped at poll time, so rapid range changes converge on the
    /// last request rather than the last response to arrive.
    pub(super) fn start_detail_load(&mut self) {
        let Some(session) = self.detail.as_mut() else {
            return;
        };

        let range = match DateRange::parse(&session.start_input, &session.end_input) {
            Ok(range) => range,
            Err(e) => {
                session.notice = Some(LoadError::from(e).to_string());
                return;
            }
        };
        session.range = range;
        session.loading = true;
        session.notice = None;

        let request_id = session.sequencer.next();
        let ts_code = session.ts_code.clone();
        let client = Arc::clone(&self.client);
        let handle = self.runtime.clone();
        let with_indicators = ANALYSIS.ma_source == MaLineSource::Backend;

        let promise = Promise::spawn_thread("detail_load", move || {
            let result =
                handle.block_on(load_detail(client.as_ref(), &ts_code, &range, with_indicators));
            DetailLoadResult {
                request_id,
                ts_code,
                result,
            }
        });
        self.detail_promise = Some(promise);
    }

    pub(super) fn poll_detail_load(&mut self, ctx: &egui::Context) {
        if let Some(promise) = self.detail_promise.take() {
            match promise.try_take() {
                Ok(outcome) => self.apply_detail_result(outcome),
                Err(promise) => {
                    self.detail_promise = Some(promise);
                    ctx.request_repaint();
                }
            }
        }
    }

    fn apply_detail_result(&mut self, outcome: DetailLoadResult) {
        let Some(session) = self.detail.as_mut() else {
            return;
        };

        // A newer request was issued since this one started, or the result
        // belongs to a previous selection: drop it. The view must end up
        // reflecting the last requested load.
        if !session.sequencer.is_current(outcome.request_id) || session.ts_code != outcome.ts_code
        {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!(
                    "Discarding stale load #{} for {}",
                    outcome.request_id,
                    outcome.ts_code
                );
            }
            return;
        }

        match outcome.result {
            Ok(payload) => {
                let ma_source = match (ANALYSIS.ma_source, payload.indicators.as_deref()) {
                    (MaLineSource::Backend, Some(indicators)) => MaSource::Fetched(indicators),
                    _ => MaSource::Computed,
                };
                let chart = ChartModel::build(&payload.series, ma_source, &ANALYSIS);
                let rows = table::project(&payload.series);
                let title = match payload.series.display_name() {
                    Some(name) => format!("{} ({})", name, session.ts_code),
                    None => session.ts_code.clone(),
                };
                session.install(title, chart, rows);
            }
            Err(LoadError::DataUnavailable) => session.install_empty(),
            Err(err) => {
                log::error!("Detail load failed for {}: {}", session.ts_code, err);
                session.fail(&err);
            }
        }
    }

    pub(super) fn start_list_refresh(&mut self, force: bool) {
        if self.list_promise.is_some() {
            return;
        }
        let client = Arc::clone(&self.client);
        let handle = self.runtime.clone();
        self.list_promise = Some(Promise::spawn_thread("instrument_list", move || {
            handle.block_on(client.fetch_instruments(force))
        }));
    }

    pub(super) fn poll_list_load(&mut self, ctx: &egui::Context) {
        if let Some(promise) = self.list_promise.take() {
            match promise.try_take() {
                Ok(Ok(instruments)) => {
                    self.list_notice = None;
                    self.instruments = instruments;
                }
                Ok(Err(err)) => {
                    // The previously loaded list stays on screen.
                    log::error!("Instrument list refresh failed: {}", err);
                    self.list_notice = Some(err.to_string());
                }
                Err(promise) => {
                    self.list_promise = Some(promise);
                    ctx.request_repaint();
                }
            }
        }
    }

    /// Fire the per-instrument backend refresh for every listed instrument.
    /// Validates the range first; individual failures only mark their
    /// instrument in the summary.
    pub(super) fn start_refresh_sweep(&mut self) {
        if self.sweep_promise.is_some() || self.instruments.is_empty() {
            return;
        }
        let range = match DateRange::parse(&self.range_start_input, &self.range_end_input) {
            Ok(range) => range,
            Err(e) => {
                self.list_notice = Some(LoadError::from(e).to_string());
                return;
            }
        };
        let client = Arc::clone(&self.client);
        let handle = self.runtime.clone();
        let instruments = self.instruments.clone();
        self.sweep_promise = Some(Promise::spawn_thread("refresh_sweep", move || {
            handle.block_on(refresh_sweep(client.as_ref(), &instruments, &range))
        }));
    }

    pub(super) fn poll_refresh_sweep(&mut self, ctx: &egui::Context) {
        if let Some(promise) = self.sweep_promise.take() {
            match promise.try_take() {
                Ok(summary) => {
                    self.list_notice = Some(if summary.failed.is_empty() {
                        format!("Refresh requested for {} instruments", summary.requested)
                    } else {
                        format!(
                            "Refresh finished: {} ok, {} failed ({})",
                            summary.succeeded(),
                            summary.failed.len(),
                            summary.failed.join(", ")
                        )
                    });
                }
                Err(promise) => {
                    self.sweep_promise = Some(promise);
                    ctx.request_repaint();
                }
            }
        }
    }
}
