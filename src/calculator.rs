// One user action end to end: fetch the tables, resolve the region, compute.
use crate::error::Result;
use crate::inflation::{find_row, headline_figures};
use crate::loader::{Table, TableSource};
use crate::rates::{compare_rates, RateFilter};
use crate::region::{cities_for, resolve_region, CitySelection};
use crate::trend::build_trend;
use crate::types::{
    GeoLookupRow, InflationReport, MonthlyInflationRow, PriceIndexRow, RateRow, TrendSeries,
};
use tracing::info;

/// Headline figures and trend for a province/city choice.
///
/// Tables are fetched fresh each time; nothing is cached between calls.
pub fn calculate<S: TableSource>(
    source: &S,
    province: &str,
    city: &CitySelection,
    category: &str,
    trend_months: usize,
) -> Result<(InflationReport, TrendSeries)> {
    let geo: Vec<GeoLookupRow> = source.fetch_table(Table::GeoLookup)?;
    let prices: Vec<PriceIndexRow> = source.fetch_table(Table::PriceIndex)?;
    let monthly: Vec<MonthlyInflationRow> = source.fetch_table(Table::MonthlyInflation)?;

    let region = resolve_region(province, city, &geo)?;
    let report = headline_figures(&prices, &monthly, &region, category)?;
    let trend_row = find_row(&monthly, Table::MonthlyInflation.as_str(), &region, category)?;
    let trend = build_trend(trend_row, trend_months)?;
    info!(province, region = %region, points = trend.values.len(), "calculation finished");
    Ok((report, trend))
}

pub fn cities<S: TableSource>(source: &S, province: &str) -> Result<Vec<String>> {
    let geo: Vec<GeoLookupRow> = source.fetch_table(Table::GeoLookup)?;
    Ok(cities_for(province, &geo))
}

pub fn rate_table<S: TableSource>(source: &S, filter: RateFilter) -> Result<Vec<RateRow>> {
    let rows: Vec<RateRow> = source.fetch_table(Table::Rates)?;
    Ok(compare_rates(&rows, filter))
}
