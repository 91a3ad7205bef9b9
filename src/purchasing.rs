use crate::error::{CalcError, Result};
use serde::Serialize;

/// Growth ratios closer than this count as a tie.
pub const MATCH_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Gained,
    Matched,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub outcome: Outcome,
    pub salary_growth: f64,
    pub inflation: f64,
    /// `(1+s)/(1+i) - 1`: how much more (or less) the salary buys.
    pub purchasing_power_delta: f64,
}

/// `current / previous - 1` for two positive salaries.
pub fn salary_growth(previous: f64, current: f64) -> Result<f64> {
    for (name, v) in [("previous", previous), ("current", current)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(CalcError::invalid(format!(
                "{} salary must be a positive amount, got {}",
                name, v
            )));
        }
    }
    Ok(current / previous - 1.0)
}

pub fn compare(salary_growth: f64, inflation: f64) -> Comparison {
    let outcome = if (salary_growth - inflation).abs() < MATCH_TOLERANCE {
        Outcome::Matched
    } else if salary_growth > inflation {
        Outcome::Gained
    } else {
        Outcome::Lost
    };
    Comparison {
        outcome,
        salary_growth,
        inflation,
        purchasing_power_delta: (1.0 + salary_growth) / (1.0 + inflation) - 1.0,
    }
}

/// One-line verdict for the console.
pub fn describe(c: &Comparison) -> String {
    let s = c.salary_growth * 100.0;
    let i = c.inflation * 100.0;
    let d = c.purchasing_power_delta.abs() * 100.0;
    match c.outcome {
        Outcome::Gained => format!(
            "Salary up {:.2}% vs inflation {:.2}%: you can buy {:.2}% more than a year ago.",
            s, i, d
        ),
        Outcome::Matched => format!(
            "Salary up {:.2}% vs inflation {:.2}%: you can buy the same as a year ago.",
            s, i
        ),
        Outcome::Lost => format!(
            "Salary up {:.2}% vs inflation {:.2}%: you can buy {:.2}% less than a year ago.",
            s, i, d
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn classifies_outcomes() {
        let gained = compare(0.30, 0.20);
        assert_eq!(gained.outcome, Outcome::Gained);
        assert!(close(gained.purchasing_power_delta, 0.0833));

        let matched = compare(0.20, 0.20);
        assert_eq!(matched.outcome, Outcome::Matched);
        assert_eq!(matched.purchasing_power_delta, 0.0);

        let lost = compare(0.10, 0.20);
        assert_eq!(lost.outcome, Outcome::Lost);
        assert!(close(lost.purchasing_power_delta, -0.0833));
    }

    #[test]
    fn derived_ratios_within_tolerance_match() {
        // 1.2 / 1.0 - 1 is not exactly 0.2
        let s = salary_growth(1.0, 1.2).unwrap();
        assert_eq!(compare(s, 0.2).outcome, Outcome::Matched);
    }

    #[test]
    fn salaries_must_be_positive() {
        assert!(matches!(salary_growth(0.0, 100.0), Err(CalcError::InvalidInput { .. })));
        assert!(matches!(salary_growth(100.0, -1.0), Err(CalcError::InvalidInput { .. })));
        assert!(matches!(salary_growth(f64::NAN, 100.0), Err(CalcError::InvalidInput { .. })));
        assert!(close(salary_growth(1000.0, 1300.0).unwrap(), 0.30));
    }

    #[test]
    fn describes_loss_as_positive_percentage() {
        let text = describe(&compare(0.10, 0.20));
        assert!(text.contains("8.33% less"), "{}", text);
    }
}
