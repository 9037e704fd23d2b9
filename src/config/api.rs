//! Backend API configuration constants.

/// Configuration for the dashboard's REST backend client.
pub struct BackendApiConfig {
    /// Base URL serving the `/api/stock` endpoints.
    pub default_base_url: &'static str,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

pub const API: BackendApiConfig = BackendApiConfig {
    default_base_url: "http://127.0.0.1:8080",
    timeout_ms: 10_000,
};
