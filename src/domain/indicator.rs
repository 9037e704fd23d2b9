use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One day of backend-computed indicator values, aligned to a series by
/// `trade_date`.
///
/// Only the moving-average map is consumed here; the other indicator
/// families the endpoint carries (MACD, RSI, ...) are skipped at decode
/// time rather than modelled and ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorPoint {
    pub trade_date: String,
    /// Window length in days -> average close for that window.
    pub ma_values: HashMap<u32, f64>,
}
