use crate::domain::PricePoint;
use crate::models::Series;

/// Glyph shown where the backend delivered no value.
pub const PLACEHOLDER: &str = "-";

/// One table row, every cell already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub trade_date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub pct_chg: String,
    pub vol: String,
    pub amount: String,
}

/// Project a series into display rows, 1:1 and order-preserving.
///
/// `pct_chg` is shown exactly as delivered; nothing here recomputes it.
pub fn project(series: &Series) -> Vec<DisplayRow> {
    series.points().iter().map(row_for).collect()
}

fn row_for(point: &PricePoint) -> DisplayRow {
    DisplayRow {
        trade_date: point.trade_date.clone(),
        open: format_cell(point.open),
        high: format_cell(point.high),
        low: format_cell(point.low),
        close: format_cell(point.close),
        pct_chg: format_cell(point.pct_chg),
        vol: format_cell(point.vol),
        amount: format_cell(point.amount),
    }
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_point_in_series_order() {
        let series = Series::new(
            "000001.SZ",
            vec![
                PricePoint::test_point("2023-01-03", 10.0),
                PricePoint::test_point("2023-01-04", 10.5),
                PricePoint::test_point("2023-01-05", 10.2),
            ],
        );
        let rows = project(&series);
        assert_eq!(rows.len(), 3);
        let dates: Vec<&str> = rows.iter().map(|r| r.trade_date.as_str()).collect();
        assert_eq!(dates, vec!["2023-01-03", "2023-01-04", "2023-01-05"]);
    }

    #[test]
    fn absent_values_render_the_placeholder_glyph() {
        let mut point = PricePoint::test_point("2023-01-03", 10.0);
        point.pct_chg = None;
        point.amount = None;
        let rows = project(&Series::new("000001.SZ", vec![point]));
        assert_eq!(rows[0].pct_chg, PLACEHOLDER);
        assert_eq!(rows[0].amount, PLACEHOLDER);
        assert_eq!(rows[0].close, "10");
    }

    #[test]
    fn pct_chg_is_copied_not_recomputed() {
        let mut point = PricePoint::test_point("2023-01-03", 10.0);
        // Deliberately inconsistent with the prices; it must pass through.
        point.pct_chg = Some(-99.9);
        let rows = project(&Series::new("000001.SZ", vec![point]));
        assert_eq!(rows[0].pct_chg, "-99.9");
    }

    #[test]
    fn empty_series_projects_no_rows() {
        assert!(project(&Series::empty("000001.SZ")).is_empty());
    }
}
