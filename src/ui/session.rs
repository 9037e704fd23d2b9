use crate::data::LoadError;
use crate::domain::DateRange;
use crate::models::{ChartModel, DisplayRow};
use crate::ui::config::UI_TEXT;

/// Monotonic request ids for one view's loads.
///
/// Every load takes an id from `next`; a result is applied only if its id is
/// still the newest one issued. Resolution order stops mattering: the last
/// requested load is the one the view ends up showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSequencer {
    issued: u64,
}

impl LoadSequencer {
    pub fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, id: u64) -> bool {
        id == self.issued
    }
}

/// Everything one detail view owns: selection, range, chart, table, errors.
/// Passed around explicitly; there is no ambient "current chart" state
/// anywhere else.
pub struct DetailSession {
    pub ts_code: String,
    /// "{name} ({code})" once a load has resolved; the bare code before.
    pub title: String,
    pub range: DateRange,
    /// Editable range fields; applied to `range` only after validation.
    pub start_input: String,
    pub end_input: String,
    pub chart: Option<ChartModel>,
    pub rows: Vec<DisplayRow>,
    /// Bumped on every chart rebuild so the renderer re-binds its cache.
    pub chart_revision: u64,
    pub sequencer: LoadSequencer,
    pub loading: bool,
    /// The single user-visible notification for this view.
    pub notice: Option<String>,
}

impl DetailSession {
    pub fn new(ts_code: impl Into<String>, range: DateRange) -> Self {
        let ts_code = ts_code.into();
        Self {
            title: ts_code.clone(),
            ts_code,
            range,
            start_input: range.start_str(),
            end_input: range.end_str(),
            chart: None,
            rows: Vec::new(),
            chart_revision: 0,
            sequencer: LoadSequencer::default(),
            loading: false,
            notice: None,
        }
    }

    /// Install a freshly built chart + rows, replacing the prior ones.
    pub fn install(&mut self, title: String, chart: ChartModel, rows: Vec<DisplayRow>) {
        self.title = title;
        self.chart = Some(chart);
        self.rows = rows;
        self.chart_revision += 1;
        self.loading = false;
        self.notice = None;
    }

    /// `DataUnavailable`: an explicit empty chart, not an error screen.
    pub fn install_empty(&mut self) {
        self.chart = Some(ChartModel::empty());
        self.rows = Vec::new();
        self.chart_revision += 1;
        self.loading = false;
        self.notice = Some(UI_TEXT.no_data_notice.to_string());
    }

    /// Keep whatever was on screen; just surface the failure.
    pub fn fail(&mut self, error: &LoadError) {
        self.loading = false;
        self.notice = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::parse("2023-01-01", "2023-12-31").unwrap()
    }

    #[test]
    fn only_the_latest_issued_id_is_current() {
        let mut seq = LoadSequencer::default();
        let first = seq.next();
        let second = seq.next();
        assert!(seq.is_current(second));
        assert!(!seq.is_current(first));
    }

    #[test]
    fn slow_first_load_loses_to_a_fast_second_load() {
        // Load A for instrument A, then load B; B resolves first, A later.
        let mut seq = LoadSequencer::default();
        let a = seq.next();
        let b = seq.next();

        // B arrives: current, applied.
        assert!(seq.is_current(b));
        // A arrives afterwards: stale, dropped.
        assert!(!seq.is_current(a));
    }

    #[test]
    fn failure_leaves_the_prior_chart_in_place() {
        let mut session = DetailSession::new("000001.SZ", range());
        session.install("Ping An (000001.SZ)".to_string(), ChartModel::empty(), vec![]);
        let revision = session.chart_revision;

        session.fail(&LoadError::Transport("connection reset".to_string()));

        assert!(session.chart.is_some());
        assert_eq!(session.chart_revision, revision);
        assert!(session.notice.is_some());
        assert!(!session.loading);
    }

    #[test]
    fn empty_result_installs_an_empty_chart_with_a_notice() {
        let mut session = DetailSession::new("000001.SZ", range());
        session.install_empty();
        assert!(session.chart.as_ref().is_some_and(ChartModel::is_empty));
        assert!(session.rows.is_empty());
        assert_eq!(session.notice.as_deref(), Some(UI_TEXT.no_data_notice));
    }
}
