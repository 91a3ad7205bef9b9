use crate::columns::{DatedColumns, LabeledColumns};
use crate::error::{CalcError, Result};
use crate::types::{InflationReport, MonthlyInflationRow, PriceIndexRow, RegionRow};
use crate::util::round2;
use tracing::{debug, info};

/// `(new / old - 1) * 100`, rounded to two decimals.
///
/// Zero or non-finite inputs are reported instead of leaking `inf`/`NaN`
/// into the figures shown to the user.
pub fn percent_change(new_value: f64, old_value: f64) -> Result<f64> {
    if !new_value.is_finite() || !old_value.is_finite() {
        return Err(CalcError::missing(format!(
            "non-numeric index ({} vs {})",
            new_value, old_value
        )));
    }
    if old_value == 0.0 {
        return Err(CalcError::missing("base index is zero"));
    }
    let pct = round2((new_value / old_value - 1.0) * 100.0);
    if !pct.is_finite() {
        return Err(CalcError::missing("index ratio overflowed"));
    }
    Ok(pct)
}

/// Find the `(Region, Categoria)` row of a table.
pub fn find_row<'r, R: RegionRow>(
    rows: &'r [R],
    table: &'static str,
    region: &str,
    category: &str,
) -> Result<&'r R> {
    rows.iter()
        .find(|r| r.region() == region && r.categoria() == category)
        .ok_or_else(|| CalcError::NoRegionData {
            table,
            region: region.to_string(),
            category: category.to_string(),
        })
}

fn change_between(dated: &DatedColumns<'_>, new_key: &str, old_key: &str) -> Result<f64> {
    let new_value = dated
        .value(new_key)
        .ok_or_else(|| CalcError::missing(format!("no value for {}", new_key)))?;
    let old_value = dated
        .value(old_key)
        .ok_or_else(|| CalcError::missing(format!("no value for {}", old_key)))?;
    debug!(new_key, old_key, new_value, old_value, "comparing index columns");
    percent_change(new_value, old_value)
}

/// Monthly, year-over-year and year-to-date change for one price index row.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub last_key: String,
    pub year: i32,
    pub monthly: f64,
    pub year_over_year: f64,
    pub year_to_date: f64,
}

pub fn headline(row: &PriceIndexRow) -> Result<Headline> {
    let dated = DatedColumns::new(&row.columns);
    let last = dated
        .last_key()
        .ok_or_else(|| CalcError::missing(format!("no dated columns for {}", row.region)))?;
    let previous = dated
        .previous_key()
        .ok_or_else(|| CalcError::missing("need at least two months for a monthly change"))?;
    let prior_year = dated
        .same_month_prior_year_key()
        .ok_or_else(|| CalcError::missing("need thirteen months for a year-over-year change"))?;
    let (year, _) = DatedColumns::year_month(last)
        .ok_or_else(|| CalcError::missing(format!("{} is not a calendar month", last)))?;
    let first_of_year = dated
        .first_key_of_year(year)
        .ok_or_else(|| CalcError::missing(format!("no column for {}", year)))?;

    Ok(Headline {
        last_key: last.to_string(),
        year,
        monthly: change_between(&dated, last, previous)?,
        year_over_year: change_between(&dated, last, prior_year)?,
        year_to_date: change_between(&dated, last, first_of_year)?,
    })
}

/// Everything the results panel shows for a region and category.
///
/// The monthly-inflation table is optional input: when it has a row for the
/// region its latest published rate is reported next to the computed one.
pub fn headline_figures(
    prices: &[PriceIndexRow],
    monthly: &[MonthlyInflationRow],
    region: &str,
    category: &str,
) -> Result<InflationReport> {
    let row = find_row(prices, "price index", region, category)?;
    let h = headline(row)?;

    let published_monthly = find_row(monthly, "monthly inflation", region, category)
        .ok()
        .and_then(|r| LabeledColumns::new(&r.columns).latest().cloned())
        .map(|e| {
            debug!(year = e.year, month = e.month_index + 1, "latest published rate");
            round2(e.value * 100.0)
        })
        .filter(|v| v.is_finite());

    info!(
        region,
        category,
        month = %h.last_key,
        monthly = h.monthly,
        yoy = h.year_over_year,
        ytd = h.year_to_date,
        "inflation computed"
    );

    Ok(InflationReport {
        region: region.to_string(),
        category: category.to_string(),
        month_label: DatedColumns::label_for(&h.last_key),
        year: h.year,
        monthly: h.monthly,
        year_over_year: h.year_over_year,
        year_to_date: h.year_to_date,
        published_monthly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GENERAL_LEVEL;
    use serde_json::json;

    fn price_row(region: &str, cols: serde_json::Value) -> PriceIndexRow {
        let mut obj = cols.as_object().unwrap().clone();
        obj.insert("Region".into(), json!(region));
        obj.insert("Categoria".into(), json!(GENERAL_LEVEL));
        serde_json::from_value(serde_json::Value::Object(obj)).unwrap()
    }

    fn fourteen_months() -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        let mut level = 100.0;
        for (y, m) in (1..=12).map(|m| (2024, m)).chain([(2025, 1), (2025, 2)]) {
            obj.insert(format!("{}_{:02}", y, m), json!(level));
            level += 10.0;
        }
        serde_json::Value::Object(obj)
    }

    #[test]
    fn percent_change_rounds() {
        assert_eq!(percent_change(110.0, 100.0).unwrap(), 10.0);
        assert_eq!(percent_change(100.0, 110.0).unwrap(), -9.09);
        assert_eq!(percent_change(160.0, 150.0).unwrap(), 6.67);
        assert_eq!(percent_change(100.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn percent_change_rejects_bad_inputs() {
        assert!(matches!(percent_change(5.0, 0.0), Err(CalcError::MissingIndex { .. })));
        assert!(matches!(percent_change(f64::NAN, 1.0), Err(CalcError::MissingIndex { .. })));
        assert!(matches!(percent_change(1.0, f64::INFINITY), Err(CalcError::MissingIndex { .. })));
    }

    #[test]
    fn percent_change_rejects_overflow_after_rounding() {
        assert!(matches!(percent_change(1e306, 1.0), Err(CalcError::MissingIndex { .. })));
        assert!(matches!(percent_change(f64::MAX, 1e-10), Err(CalcError::MissingIndex { .. })));
    }

    #[test]
    fn headline_uses_the_right_columns() {
        let row = price_row("GBA", fourteen_months());
        let h = headline(&row).unwrap();
        // 2025_02 = 230, 2025_01 = 220, 2024_02 = 110
        assert_eq!(h.last_key, "2025_02");
        assert_eq!(h.year, 2025);
        assert_eq!(h.monthly, percent_change(230.0, 220.0).unwrap());
        assert_eq!(h.year_over_year, percent_change(230.0, 110.0).unwrap());
        assert_eq!(h.year_to_date, percent_change(230.0, 220.0).unwrap());
    }

    #[test]
    fn year_over_year_needs_thirteen_columns() {
        let row = price_row("GBA", json!({"2024_12": 150.0, "2025_01": 160.0}));
        assert!(matches!(headline(&row), Err(CalcError::MissingIndex { .. })));
    }

    #[test]
    fn three_month_table_yields_no_figures() {
        let prices = vec![price_row(
            "Centro",
            json!({"2024_01": 100.0, "2024_12": 150.0, "2025_01": 160.0}),
        )];
        let err = headline_figures(&prices, &[], "Centro", GENERAL_LEVEL).unwrap_err();
        assert!(matches!(err, CalcError::MissingIndex { .. }));
    }

    #[test]
    fn missing_row_is_no_region_data() {
        let rows = vec![price_row("GBA", fourteen_months())];
        let err = headline_figures(&rows, &[], "Cuyo", GENERAL_LEVEL).unwrap_err();
        assert!(matches!(err, CalcError::NoRegionData { .. }));
    }

    #[test]
    fn report_carries_published_rate() {
        let prices = vec![price_row("GBA", fourteen_months())];
        let monthly: Vec<MonthlyInflationRow> = vec![serde_json::from_value(json!({
            "Region": "GBA", "Categoria": GENERAL_LEVEL,
            "Enero '25": 0.0221, "Febrero '25": 0.0243
        }))
        .unwrap()];
        let report = headline_figures(&prices, &monthly, "GBA", GENERAL_LEVEL).unwrap();
        assert_eq!(report.month_label, "Febrero '25");
        assert_eq!(report.published_monthly, Some(2.43));

        let report = headline_figures(&prices, &[], "GBA", GENERAL_LEVEL).unwrap();
        assert_eq!(report.published_monthly, None);
    }
}
