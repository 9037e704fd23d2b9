use crate::models::Series;
use crate::utils::maths_utils;

/// Trailing mean of the close column.
///
/// The output is index-aligned with the input: `None` marks the first
/// `window - 1` positions and any window that spans a missing close, so
/// insufficient history renders as a gap rather than a zero or an
/// interpolated value. Accumulation stays at full precision; rounding to
/// 2 decimals happens once, at this output boundary.
///
/// Pure function of its inputs — same series and window always produce the
/// same output, and the series is never touched.
pub fn moving_average(window: usize, series: &Series) -> Vec<Option<f64>> {
    debug_assert!(window >= 1, "window must be a positive number of days");
    let closes: Vec<Option<f64>> = series.closes().collect();
    if window == 0 {
        return vec![None; closes.len()];
    }

    (0..closes.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let mut sum = 0.0;
            for close in closes[i + 1 - window..=i].iter().copied() {
                let Some(close) = close else { return None };
                sum += close;
            }
            Some(maths_utils::round2(sum / window as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;

    fn series_of(closes: &[f64]) -> Series {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::test_point(&format!("2023-01-{:02}", i + 1), close))
            .collect();
        Series::new("000001.SZ", points)
    }

    #[test]
    fn output_length_matches_input_for_any_window() {
        let series = series_of(&[10.0, 11.0, 12.0]);
        for window in 1..=5 {
            assert_eq!(moving_average(window, &series).len(), series.len());
        }
    }

    #[test]
    fn six_days_window_five() {
        let series = series_of(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        assert_eq!(
            moving_average(5, &series),
            vec![None, None, None, None, Some(12.0), Some(13.0)]
        );
    }

    #[test]
    fn window_one_is_the_rounded_close_column() {
        let series = series_of(&[10.123, 11.678]);
        assert_eq!(moving_average(1, &series), vec![Some(10.12), Some(11.68)]);
    }

    #[test]
    fn series_shorter_than_window_is_all_gaps() {
        let series = series_of(&[10.0, 11.0]);
        assert_eq!(moving_average(5, &series), vec![None, None]);
    }

    #[test]
    fn empty_series_yields_empty_output() {
        assert!(moving_average(5, &Series::empty("000001.SZ")).is_empty());
    }

    #[test]
    fn missing_close_gaps_every_window_it_touches() {
        let mut points = vec![
            PricePoint::test_point("2023-01-01", 1.0),
            PricePoint::test_point("2023-01-02", 2.0),
            PricePoint::test_point("2023-01-03", 3.0),
            PricePoint::test_point("2023-01-04", 4.0),
        ];
        points[1].close = None;
        let series = Series::new("000001.SZ", points);
        // Windows ending at index 1 and 2 span the hole; index 3 clears it.
        assert_eq!(
            moving_average(2, &series),
            vec![None, None, None, Some(3.5)]
        );
    }

    #[test]
    fn rounding_happens_only_at_the_output() {
        // 0.1 + 0.2 + 0.4 = 0.7000000000000001 in f64; the mean rounds to
        // 0.23 only if the sum was not rounded along the way.
        let series = series_of(&[0.1, 0.2, 0.4]);
        assert_eq!(moving_average(3, &series), vec![None, None, Some(0.23)]);
    }

    #[test]
    fn is_pure_and_leaves_input_unchanged() {
        let series = series_of(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let before = series.clone();
        let first = moving_average(3, &series);
        let second = moving_average(3, &series);
        assert_eq!(first, second);
        assert_eq!(series, before);
    }
}
