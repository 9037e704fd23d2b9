use eframe::egui::Color32;

use crate::models::table::PLACEHOLDER;

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub notice: Color32,
    pub bull_text: Color32,
    pub bear_text: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(235, 235, 235),
        central_panel: Color32::from_rgb(20, 22, 28),
        side_panel: Color32::from_rgb(28, 30, 38),
        notice: Color32::from_rgb(255, 180, 90),
        bull_text: Color32::from_rgb(239, 35, 42),
        bear_text: Color32::from_rgb(20, 177, 67),
    },
};

/// Every user-facing string in one place.
pub struct UiText {
    pub app_title: &'static str,
    pub list_heading: &'static str,
    pub list_empty: &'static str,
    pub detail_back: &'static str,
    pub refresh_list: &'static str,
    pub refresh_data: &'static str,
    pub start_date_label: &'static str,
    pub end_date_label: &'static str,
    pub apply_range: &'static str,
    pub view_detail: &'static str,
    pub missing_code: &'static str,
    pub empty_chart: &'static str,
    pub no_data_notice: &'static str,
    pub loading: &'static str,
    pub kline_series: &'static str,
    pub volume_series: &'static str,
    pub zoom_label: &'static str,
    pub zoom_start: &'static str,
    pub zoom_end: &'static str,
    pub zoom_reset: &'static str,

    // Instrument list columns
    pub col_code: &'static str,
    pub col_name: &'static str,
    pub col_industry: &'static str,
    pub col_area: &'static str,
    pub col_action: &'static str,

    // Detail table columns
    pub col_date: &'static str,
    pub col_open: &'static str,
    pub col_high: &'static str,
    pub col_low: &'static str,
    pub col_close: &'static str,
    pub col_pct: &'static str,
    pub col_vol: &'static str,
    pub col_amount: &'static str,

    pub placeholder: &'static str,
}

pub static UI_TEXT: UiText = UiText {
    app_title: "Kline Deck",
    list_heading: "Instruments",
    list_empty: "No instruments loaded",
    detail_back: "< Back",
    refresh_list: "Reload list",
    refresh_data: "Refresh data",
    start_date_label: "Start",
    end_date_label: "End",
    apply_range: "Apply",
    view_detail: "View",
    missing_code: "instrument code is required",
    empty_chart: "No data for the selected range",
    no_data_notice: "No data for the selected range",
    loading: "Loading...",
    kline_series: "K-Line",
    volume_series: "Volume",
    zoom_label: "Zoom",
    zoom_start: "start %",
    zoom_end: "end %",
    zoom_reset: "Reset",

    col_code: "Code",
    col_name: "Name",
    col_industry: "Industry",
    col_area: "Area",
    col_action: "",

    col_date: "Date",
    col_open: "Open",
    col_high: "High",
    col_low: "Low",
    col_close: "Close",
    col_pct: "Chg %",
    col_vol: "Volume",
    col_amount: "Turnover",

    placeholder: PLACEHOLDER,
};
