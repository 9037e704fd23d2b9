use serde::{Deserialize, Serialize};

/// One row of the tradable-instrument list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub ts_code: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}
