use std::sync::Arc;

use eframe::egui;
use poll_promise::Promise;

use crate::data::{LoadError, MarketClient, RefreshSummary};
use crate::domain::{DateRange, Instrument};
use crate::ui::app_async::DetailLoadResult;
use crate::ui::config::UI_TEXT;
use crate::ui::session::DetailSession;
use crate::ui::ui_chart_view::ChartView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Which page the window is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

/// A detail view requested from outside the list (CLI flags). Mirrors the
/// query parameters the detail page is addressed by.
#[derive(Debug, Clone, Default)]
pub struct DetailRequest {
    pub ts_code: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DetailRequest {
    pub fn is_empty(&self) -> bool {
        self.ts_code.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

pub struct KlineDeckApp {
    pub(super) client: Arc<MarketClient>,
    pub(super) runtime: tokio::runtime::Handle,

    pub(super) view: View,

    // List view state
    pub(super) instruments: Vec<Instrument>,
    pub(super) list_notice: Option<String>,
    pub(super) range_start_input: String,
    pub(super) range_end_input: String,

    // Detail view state. The session owns the chart model; the view owns
    // exactly one rendering cache, dropped together with the session.
    pub(super) detail: Option<DetailSession>,
    pub(super) chart_view: ChartView,

    // In-flight work
    pub(super) list_promise: Option<Promise<Result<Vec<Instrument>, LoadError>>>,
    pub(super) detail_promise: Option<Promise<DetailLoadResult>>,
    pub(super) sweep_promise: Option<Promise<RefreshSummary>>,
}

impl KlineDeckApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        client: Arc<MarketClient>,
        runtime: tokio::runtime::Handle,
        instruments: Vec<Instrument>,
        list_notice: Option<String>,
        initial: DetailRequest,
    ) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let default_range = DateRange::trailing_year(chrono::Local::now().date_naive());
        let mut app = Self {
            client,
            runtime,
            view: View::List,
            instruments,
            list_notice,
            range_start_input: default_range.start_str(),
            range_end_input: default_range.end_str(),
            detail: None,
            chart_view: ChartView::default(),
            list_promise: None,
            detail_promise: None,
            sweep_promise: None,
        };

        if !initial.is_empty() {
            app.open_initial_detail(initial);
        }
        app
    }

    /// Resolve a startup detail request. A missing or blank code is a hard
    /// error: the app stays on the list view and says why.
    fn open_initial_detail(&mut self, request: DetailRequest) {
        if let Some(start) = request.start_date {
            self.range_start_input = start;
        }
        if let Some(end) = request.end_date {
            self.range_end_input = end;
        }

        match request.ts_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                let code = code.to_string();
                self.open_detail(&code);
            }
            _ => {
                let err = LoadError::MalformedInput(UI_TEXT.missing_code.to_string());
                self.view = View::List;
                self.list_notice = Some(err.to_string());
            }
        }
    }

    /// Navigate to the detail view for an instrument, validating first.
    /// Invalid input never reaches the loader; the list view keeps focus and
    /// shows the rejection.
    pub(super) fn open_detail(&mut self, ts_code: &str) {
        let ts_code = ts_code.trim();
        if ts_code.is_empty() {
            self.view = View::List;
            self.list_notice =
                Some(LoadError::MalformedInput(UI_TEXT.missing_code.to_string()).to_string());
            return;
        }

        let range = match DateRange::parse(&self.range_start_input, &self.range_end_input) {
            Ok(range) => range,
            Err(e) => {
                self.list_notice = Some(LoadError::from(e).to_string());
                return;
            }
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Opening detail view for {} over {}", ts_code, range);
        }

        self.detail = Some(DetailSession::new(ts_code, range));
        self.view = View::Detail;
        self.start_detail_load();
    }

    /// Leave the detail view, dropping the session and its one rendering
    /// cache together. A load still in flight is discarded with them.
    pub(super) fn close_detail(&mut self) {
        self.detail = None;
        self.detail_promise = None;
        self.chart_view.clear_cache();
        self.view = View::List;
    }
}

impl eframe::App for KlineDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_list_load(ctx);
        self.poll_detail_load(ctx);
        self.poll_refresh_sweep(ctx);

        match self.view {
            View::List => self.render_list_view(ctx),
            View::Detail => self.render_detail_view(ctx),
        }
    }
}
