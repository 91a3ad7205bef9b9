use crate::columns::LabeledColumns;
use crate::error::{CalcError, Result};
use crate::types::{MonthlyInflationRow, TrendSeries};
use crate::util::round2;

pub const DEFAULT_TREND_MONTHS: usize = 13;

/// Latest `n` monthly rates of a row as chart-ready percentages, oldest first.
///
/// A row with no usable month is an error rather than an empty chart.
pub fn build_trend(row: &MonthlyInflationRow, n: usize) -> Result<TrendSeries> {
    if n == 0 {
        return Err(CalcError::invalid("trend needs at least one month"));
    }
    let labeled = LabeledColumns::new(&row.columns);
    if labeled.is_empty() {
        return Err(CalcError::NoRegionData {
            table: "monthly inflation",
            region: row.region.clone(),
            category: row.categoria.clone(),
        });
    }
    let recent = labeled.last_n(n);
    let values = recent
        .iter()
        .map(|e| {
            let pct = round2(e.value * 100.0);
            if pct.is_finite() {
                Ok(pct)
            } else {
                Err(CalcError::missing(format!("rate for {} is out of range", e.label)))
            }
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(TrendSeries {
        labels: recent.iter().map(|e| e.label.clone()).collect(),
        values,
    })
}
