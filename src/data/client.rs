use std::fmt;
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::config::API;
use crate::domain::{DateRange, DateRangeError, IndicatorPoint, Instrument, PricePoint};
use crate::models::Series;

/// Failure taxonomy for the loader and input-validation boundaries.
///
/// Nothing downstream of the loader raises: the engine and the chart builder
/// turn bad values into gaps. These variants are the only failure shapes the
/// app ever has to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Network or HTTP-level failure; the operation is abandoned whole.
    Transport(String),
    /// The backend answered but has no rows for the requested range.
    DataUnavailable,
    /// The backend answered with a body that does not decode.
    MalformedResponse(String),
    /// Rejected before any fetch was issued (blank code, reversed range).
    MalformedInput(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Transport(msg) => write!(f, "Transport failure: {}", msg),
            LoadError::DataUnavailable => {
                write!(f, "No data available for the requested range")
            }
            LoadError::MalformedResponse(msg) => {
                write!(f, "Malformed backend response: {}", msg)
            }
            LoadError::MalformedInput(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<DateRangeError> for LoadError {
    fn from(err: DateRangeError) -> Self {
        LoadError::MalformedInput(err.to_string())
    }
}

/// REST client for the dashboard backend.
pub struct MarketClient {
    http: HttpClient,
    base_url: String,
}

impl MarketClient {
    pub fn new() -> Self {
        Self::with_base_url(API.default_base_url)
    }

    /// Point the client at a non-default backend (CLI override, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    /// `GET /api/stock/basic?refresh={bool}` — the instrument list.
    pub async fn fetch_instruments(&self, refresh: bool) -> Result<Vec<Instrument>, LoadError> {
        let url = format!("{}/api/stock/basic?refresh={}", self.base_url, refresh);
        let body = self.get_text(&url).await?;
        parse_instruments(&body)
    }

    /// `GET /api/stock/data/{tsCode}` — the raw daily series for a range.
    pub async fn fetch_series(
        &self,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<Series, LoadError> {
        let url = format!(
            "{}/api/stock/data/{}?startDate={}&endDate={}",
            self.base_url,
            ts_code,
            range.start_str(),
            range.end_str()
        );
        let body = self.get_text(&url).await?;
        parse_series(ts_code, &body)
    }

    /// `GET /api/stock/indicators/{tsCode}` — backend-computed overlays.
    pub async fn fetch_indicators(
        &self,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<Vec<IndicatorPoint>, LoadError> {
        let url = format!(
            "{}/api/stock/indicators/{}?startDate={}&endDate={}",
            self.base_url,
            ts_code,
            range.start_str(),
            range.end_str()
        );
        let body = self.get_text(&url).await?;
        parse_indicators(&body)
    }

    /// `GET /api/stock/daily/{tsCode}?refresh=true` — ask the backend to
    /// re-pull one instrument. The body is irrelevant to the caller; only
    /// transport/HTTP failures matter.
    pub async fn refresh_daily(&self, ts_code: &str, range: &DateRange) -> Result<(), LoadError> {
        let url = format!(
            "{}/api/stock/daily/{}?refresh=true&startDate={}&endDate={}",
            self.base_url,
            ts_code,
            range.start_str(),
            range.end_str()
        );
        self.get_text(&url).await.map(|_| ())
    }

    async fn get_text(&self, url: &str) -> Result<String, LoadError> {
        #[cfg(debug_assertions)]
        if crate::config::DEBUG_FLAGS.print_fetch {
            log::info!("GET {}", url);
        }

        let response = self
            .http
            .get(url)
            .timeout(Duration::from_millis(API.timeout_ms))
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(LoadError::DataUnavailable),
            status if status.is_success() => response
                .text()
                .await
                .map_err(|e| LoadError::Transport(e.to_string())),
            status => Err(LoadError::Transport(format!("HTTP {} from {}", status, url))),
        }
    }
}

impl Default for MarketClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_instruments(body: &str) -> Result<Vec<Instrument>, LoadError> {
    serde_json::from_str(body).map_err(|e| LoadError::MalformedResponse(e.to_string()))
}

/// Decode one instrument's rows. Zero rows is `DataUnavailable` — a
/// different condition from a body that does not decode at all.
pub(crate) fn parse_series(ts_code: &str, body: &str) -> Result<Series, LoadError> {
    let points: Vec<PricePoint> =
        serde_json::from_str(body).map_err(|e| LoadError::MalformedResponse(e.to_string()))?;
    if points.is_empty() {
        return Err(LoadError::DataUnavailable);
    }
    Ok(Series::new(ts_code, points))
}

pub(crate) fn parse_indicators(body: &str) -> Result<Vec<IndicatorPoint>, LoadError> {
    serde_json::from_str(body).map_err(|e| LoadError::MalformedResponse(e.to_string()))
}
