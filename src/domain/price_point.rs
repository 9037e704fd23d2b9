use serde::{Deserialize, Serialize};

/// One trading day's record for one instrument, as delivered by the backend.
///
/// Numeric fields are optional: the backend may omit or null any of them
/// (`pctChg` is routinely absent on the first day of a range) and a missing
/// value surfaces as a gap downstream, never as a zero and never as a crash.
/// OHLC ordering (`low <= min(open, close)` etc.) is assumed of upstream
/// data but deliberately not enforced here; rendering proceeds with whatever
/// arrived.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PricePoint {
    /// Calendar date, `YYYY-MM-DD`. Strictly increasing within a series.
    pub trade_date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    /// Traded volume.
    pub vol: Option<f64>,
    /// Turnover.
    pub amount: Option<f64>,
    /// Percent change vs the prior day.
    pub pct_chg: Option<f64>,
    /// Instrument display name (the backend repeats it on every row).
    pub name: Option<String>,
}

#[cfg(test)]
impl PricePoint {
    /// A fully populated row for tests; `close` drives the derived series.
    pub(crate) fn test_point(trade_date: &str, close: f64) -> Self {
        Self {
            trade_date: trade_date.to_string(),
            open: Some(close - 0.5),
            high: Some(close + 1.0),
            low: Some(close - 1.0),
            close: Some(close),
            vol: Some(1_000.0),
            amount: Some(10_000.0),
            pct_chg: Some(0.5),
            name: Some("Test Instrument".to_string()),
        }
    }
}
