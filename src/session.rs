// The results panel. Calculations are stamped with a request id when they
// start; only the newest one may replace what is displayed.
use crate::error::{CalcError, Result};
use crate::purchasing::{self, Comparison};
use crate::types::{InflationReport, TrendSeries};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Displayed {
    pub request: RequestId,
    pub report: InflationReport,
    pub trend: TrendSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Published {
    Shown,
    Stale,
}

#[derive(Debug, Default)]
pub struct ResultArea {
    issued: u64,
    displayed: Option<Displayed>,
}

impl ResultArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        RequestId(self.issued)
    }

    /// Hand in the outcome of a calculation.
    ///
    /// A result from an older request is dropped. A failure is returned to
    /// the caller and the panel keeps its previous contents.
    pub fn publish(
        &mut self,
        request: RequestId,
        outcome: Result<(InflationReport, TrendSeries)>,
    ) -> Result<Published> {
        if request.0 != self.issued {
            warn!(request = request.0, latest = self.issued, "dropping stale result");
            return Ok(Published::Stale);
        }
        let (report, trend) = outcome?;
        info!(request = request.0, region = %report.region, "result displayed");
        self.displayed = Some(Displayed {
            request,
            report,
            trend,
        });
        Ok(Published::Shown)
    }

    pub fn displayed(&self) -> Option<&Displayed> {
        self.displayed.as_ref()
    }

    /// Compare salaries against the year-over-year figure currently shown.
    pub fn compare_salary(&self, previous: f64, current: f64) -> Result<Comparison> {
        let shown = self
            .displayed
            .as_ref()
            .ok_or_else(|| CalcError::invalid("calculate inflation for a region first"))?;
        let growth = purchasing::salary_growth(previous, current)?;
        info!(request = shown.request.0, region = %shown.report.region, "salary compared");
        Ok(purchasing::compare(growth, shown.report.year_over_year / 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchasing::Outcome;

    fn report(region: &str, yoy: f64) -> (InflationReport, TrendSeries) {
        (
            InflationReport {
                region: region.to_string(),
                category: "Nivel_general".to_string(),
                month_label: "Enero '25".to_string(),
                year: 2025,
                monthly: 2.2,
                year_over_year: yoy,
                year_to_date: 2.2,
                published_monthly: None,
            },
            TrendSeries {
                labels: vec!["Enero '25".to_string()],
                values: vec![2.2],
            },
        )
    }

    #[test]
    fn newest_request_wins() {
        let mut area = ResultArea::new();
        let first = area.begin();
        let second = area.begin();
        assert_eq!(area.publish(second, Ok(report("GBA", 84.5))).unwrap(), Published::Shown);
        assert_eq!(area.publish(first, Ok(report("Cuyo", 80.0))).unwrap(), Published::Stale);
        assert_eq!(area.displayed().unwrap().report.region, "GBA");
    }

    #[test]
    fn failures_keep_previous_result() {
        let mut area = ResultArea::new();
        let ok = area.begin();
        area.publish(ok, Ok(report("GBA", 84.5))).unwrap();
        let failing = area.begin();
        let err = area
            .publish(failing, Err(CalcError::RegionNotFound { what: "x".into() }))
            .unwrap_err();
        assert!(matches!(err, CalcError::RegionNotFound { .. }));
        assert_eq!(area.displayed().unwrap().request, ok);
    }

    #[test]
    fn salary_needs_a_result() {
        let area = ResultArea::new();
        assert!(matches!(area.compare_salary(100.0, 130.0), Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn salary_against_displayed_inflation() {
        let mut area = ResultArea::new();
        let id = area.begin();
        area.publish(id, Ok(report("GBA", 20.0))).unwrap();
        let c = area.compare_salary(1000.0, 1300.0).unwrap();
        assert_eq!(c.outcome, Outcome::Gained);
    }
}
