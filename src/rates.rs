use crate::error::{CalcError, Result};
use crate::types::{RateCardRow, RateRow};
use crate::util::format_pct;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFilter {
    All,
    FixedTerm,
    Wallets,
    OtherAssets,
}

impl RateFilter {
    /// Accepts the category ids used by the rate buttons.
    pub fn from_id(id: &str) -> Result<Self> {
        match id.trim().to_lowercase().as_str() {
            "" | "todos" => Ok(RateFilter::All),
            "plazos_fijos" => Ok(RateFilter::FixedTerm),
            "billeteras" => Ok(RateFilter::Wallets),
            "otros_activos" => Ok(RateFilter::OtherAssets),
            other => Err(CalcError::invalid(format!("unknown rate category {}", other))),
        }
    }

    fn category(self) -> Option<&'static str> {
        match self {
            RateFilter::All => None,
            RateFilter::FixedTerm => Some("Banco"),
            RateFilter::Wallets => Some("Billetera"),
            RateFilter::OtherAssets => Some("Otros Activos"),
        }
    }

    fn keeps(self, row: &RateRow) -> bool {
        self.category().map_or(true, |c| row.category == c)
    }
}

/// Rows of the selected category, best monthly rate first.
pub fn compare_rates(rows: &[RateRow], filter: RateFilter) -> Vec<RateRow> {
    let mut kept: Vec<RateRow> = rows.iter().filter(|r| filter.keeps(r)).cloned().collect();
    kept.sort_by(|a, b| b.tem.partial_cmp(&a.tem).unwrap_or(Ordering::Equal));
    kept
}

/// Logo asset for an instrument: `"Banco Nación"` → `"BANCO_NACION.png"`.
pub fn logo_file_name(commercial_name: &str) -> String {
    let base: String = WHITESPACE
        .replace_all(commercial_name.trim(), "_")
        .chars()
        .map(|c| match c {
            'Á' | 'á' => 'A',
            'É' | 'é' => 'E',
            'Í' | 'í' => 'I',
            'Ó' | 'ó' => 'O',
            'Ú' | 'ú' => 'U',
            other => other,
        })
        .collect();
    format!("{}.png", base.to_uppercase())
}

pub fn to_cards(rows: &[RateRow]) -> Vec<RateCardRow> {
    rows.iter()
        .map(|r| RateCardRow {
            name: r.commercial_name.clone(),
            tna: format!("{}%", format_pct(r.tna)),
            tem: format!("{}%", format_pct(r.tem)),
            tags: r.tags.join(", "),
            logo: logo_file_name(&r.commercial_name),
        })
        .collect()
}
