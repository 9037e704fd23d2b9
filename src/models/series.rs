use crate::domain::PricePoint;

/// An ordered run of daily records for one instrument over a requested
/// window.
///
/// Sorted ascending by trade date on construction — the backend usually
/// delivers it that way; sorting here turns "usually" into a guarantee —
/// and immutable afterwards. Everything downstream (averages, chart, table)
/// indexes into this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    ts_code: String,
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new(ts_code: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| a.trade_date.cmp(&b.trade_date));
        Self {
            ts_code: ts_code.into(),
            points,
        }
    }

    pub fn empty(ts_code: impl Into<String>) -> Self {
        Self {
            ts_code: ts_code.into(),
            points: Vec::new(),
        }
    }

    pub fn ts_code(&self) -> &str {
        &self.ts_code
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Instrument display name, taken from the first row that carries one.
    pub fn display_name(&self) -> Option<&str> {
        self.points.iter().find_map(|p| p.name.as_deref())
    }

    pub fn closes(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_sorts_by_trade_date() {
        let series = Series::new(
            "000001.SZ",
            vec![
                PricePoint::test_point("2023-01-05", 11.0),
                PricePoint::test_point("2023-01-03", 10.0),
                PricePoint::test_point("2023-01-04", 12.0),
            ],
        );
        let dates: Vec<&str> = series
            .points()
            .iter()
            .map(|p| p.trade_date.as_str())
            .collect();
        assert_eq!(dates, vec!["2023-01-03", "2023-01-04", "2023-01-05"]);
    }

    #[test]
    fn display_name_skips_rows_without_one() {
        let mut anonymous = PricePoint::test_point("2023-01-03", 10.0);
        anonymous.name = None;
        let series = Series::new(
            "000001.SZ",
            vec![anonymous, PricePoint::test_point("2023-01-04", 10.5)],
        );
        assert_eq!(series.display_name(), Some("Test Instrument"));
    }

    #[test]
    fn empty_series_has_no_name() {
        assert_eq!(Series::empty("000001.SZ").display_name(), None);
    }
}
