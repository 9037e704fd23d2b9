//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so debug
//! builds stay readable.

pub struct DebugFlags {
    /// Emit a line per backend request.
    pub print_fetch: bool,
    /// Emit zoom window changes as they are applied to the panes.
    pub print_zoom: bool,
    /// Emit chart cache rebuild events.
    pub print_chart_cache: bool,
    /// Emit UI interaction logs (view switches, manual refreshes, discards).
    pub print_ui_interactions: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch: true,
    print_zoom: false,
    print_chart_cache: false,
    print_ui_interactions: true,
};
