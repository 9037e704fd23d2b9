use async_trait::async_trait;

use crate::data::client::{LoadError, MarketClient};
use crate::domain::{DateRange, IndicatorPoint, Instrument};
use crate::models::Series;

/// The fetch seam the detail view loads through. `MarketClient` is the real
/// implementation; tests substitute canned providers.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn series(&self, ts_code: &str, range: &DateRange) -> Result<Series, LoadError>;

    async fn indicators(
        &self,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<Vec<IndicatorPoint>, LoadError>;
}

#[async_trait]
impl SeriesProvider for MarketClient {
    async fn series(&self, ts_code: &str, range: &DateRange) -> Result<Series, LoadError> {
        self.fetch_series(ts_code, range).await
    }

    async fn indicators(
        &self,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<Vec<IndicatorPoint>, LoadError> {
        self.fetch_indicators(ts_code, range).await
    }
}

/// Everything one detail render needs, fetched and joined.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPayload {
    pub series: Series,
    /// Present only when the MA source is the backend.
    pub indicators: Option<Vec<IndicatorPoint>>,
}

/// Fetch a detail view's data.
///
/// With `with_indicators`, the two requests run concurrently and the result
/// is all-or-nothing: the chart builder never sees a partial join. A blank
/// instrument code is rejected before anything goes on the wire.
pub async fn load_detail(
    provider: &dyn SeriesProvider,
    ts_code: &str,
    range: &DateRange,
    with_indicators: bool,
) -> Result<DetailPayload, LoadError> {
    let ts_code = ts_code.trim();
    if ts_code.is_empty() {
        return Err(LoadError::MalformedInput(
            "instrument code is required".to_string(),
        ));
    }

    if with_indicators {
        let (series, indicators) = futures::try_join!(
            provider.series(ts_code, range),
            provider.indicators(ts_code, range)
        )?;
        Ok(DetailPayload {
            series,
            indicators: Some(indicators),
        })
    } else {
        let series = provider.series(ts_code, range).await?;
        Ok(DetailPayload {
            series,
            indicators: None,
        })
    }
}

/// Outcome of a refresh sweep over the instrument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub requested: usize,
    pub failed: Vec<String>,
}

impl RefreshSummary {
    pub fn succeeded(&self) -> usize {
        self.requested - self.failed.len()
    }
}

/// Ask the backend to re-pull every listed instrument for the range.
///
/// One instrument at a time; a failure marks that instrument and the sweep
/// continues with the rest.
pub async fn refresh_sweep(
    client: &MarketClient,
    instruments: &[Instrument],
    range: &DateRange,
) -> RefreshSummary {
    let mut summary = RefreshSummary {
        requested: instruments.len(),
        failed: Vec::new(),
    };
    for instrument in instruments {
        if let Err(e) = client.refresh_daily(&instrument.ts_code, range).await {
            log::warn!("Refresh failed for {}: {}", instrument.ts_code, e);
            summary.failed.push(instrument.ts_code.clone());
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        series_result: Result<Series, LoadError>,
        indicators_result: Result<Vec<IndicatorPoint>, LoadError>,
        series_calls: AtomicUsize,
        indicator_calls: AtomicUsize,
    }

    impl StubProvider {
        fn ok(series: Series) -> Self {
            Self {
                series_result: Ok(series),
                indicators_result: Ok(Vec::new()),
                series_calls: AtomicUsize::new(0),
                indicator_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SeriesProvider for StubProvider {
        async fn series(&self, _ts_code: &str, _range: &DateRange) -> Result<Series, LoadError> {
            self.series_calls.fetch_add(1, Ordering::SeqCst);
            self.series_result.clone()
        }

        async fn indicators(
            &self,
            _ts_code: &str,
            _range: &DateRange,
        ) -> Result<Vec<IndicatorPoint>, LoadError> {
            self.indicator_calls.fetch_add(1, Ordering::SeqCst);
            self.indicators_result.clone()
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2023-01-01", "2023-06-30").unwrap()
    }

    fn sample_series() -> Series {
        Series::new(
            "000001.SZ",
            vec![
                PricePoint::test_point("2023-01-03", 10.0),
                PricePoint::test_point("2023-01-04", 10.5),
            ],
        )
    }

    #[tokio::test]
    async fn blank_code_is_rejected_before_any_fetch() {
        let provider = StubProvider::ok(sample_series());
        let err = load_detail(&provider, "   ", &range(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput(_)));
        assert_eq!(provider.series_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.indicator_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn series_only_load_skips_the_indicator_endpoint() {
        let provider = StubProvider::ok(sample_series());
        let payload = load_detail(&provider, "000001.SZ", &range(), false)
            .await
            .unwrap();
        assert_eq!(payload.series.len(), 2);
        assert!(payload.indicators.is_none());
        assert_eq!(provider.indicator_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn joined_load_waits_for_both_results() {
        let mut provider = StubProvider::ok(sample_series());
        provider.indicators_result = Ok(vec![IndicatorPoint {
            trade_date: "2023-01-03".to_string(),
            ma_values: [(5, 10.2)].into_iter().collect(),
        }]);
        let payload = load_detail(&provider, "000001.SZ", &range(), true)
            .await
            .unwrap();
        assert_eq!(payload.indicators.as_ref().map(Vec::len), Some(1));
        assert_eq!(provider.series_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.indicator_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn a_failed_half_fails_the_whole_join() {
        let mut provider = StubProvider::ok(sample_series());
        provider.indicators_result = Err(LoadError::Transport("connection reset".to_string()));
        let err = load_detail(&provider, "000001.SZ", &range(), true)
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::Transport("connection reset".to_string()));
    }

    #[tokio::test]
    async fn empty_result_surfaces_as_data_unavailable() {
        let mut provider = StubProvider::ok(sample_series());
        provider.series_result = Err(LoadError::DataUnavailable);
        let err = load_detail(&provider, "000001.SZ", &range(), false)
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::DataUnavailable);
    }
}
