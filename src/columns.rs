// Column selection over the wide monthly tables.
//
// `Base.json` keys its index levels `YYYY_MM`; `Inf_Mensual.json` keys its
// rates with Spanish labels such as `Enero '25`. Both grow a column per month.
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

pub const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

static DATED_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}_\d{2}$").unwrap());
static MONTH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-zÁÉÍÓÚáéíóúñÑ]+)\s+'(\d{2})$").unwrap());

/// `"Enero '25"` style label for a calendar month (1-based).
pub fn month_label(year: i32, month: u32) -> Option<String> {
    let name = MONTHS_ES.get(month.checked_sub(1)? as usize)?;
    Some(format!("{} '{:02}", name, year.rem_euclid(100)))
}

fn month_index(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS_ES
        .iter()
        .position(|m| m.to_lowercase() == name)
        .map(|i| i as u32)
}

/// `YYYY_MM` columns of one price index row, oldest first.
///
/// The token is zero-padded and fixed-width, so plain string order is
/// chronological order. Columns whose cell is not a number are left out.
#[derive(Debug, Clone)]
pub struct DatedColumns<'a> {
    keys: Vec<&'a str>,
    columns: &'a BTreeMap<String, Value>,
}

impl<'a> DatedColumns<'a> {
    pub fn new(columns: &'a BTreeMap<String, Value>) -> Self {
        let mut keys: Vec<&str> = columns
            .iter()
            .filter(|(k, v)| DATED_KEY.is_match(k) && v.as_f64().is_some())
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        Self { keys, columns }
    }

    #[cfg(test)]
    pub fn keys(&self) -> &[&'a str] {
        &self.keys
    }

    pub fn last_key(&self) -> Option<&'a str> {
        self.from_end(1)
    }

    pub fn previous_key(&self) -> Option<&'a str> {
        self.from_end(2)
    }

    /// Thirteenth key from the end: twelve months before the latest one,
    /// assuming no gaps in the published series.
    pub fn same_month_prior_year_key(&self) -> Option<&'a str> {
        self.from_end(13)
    }

    /// Earliest key present for `year`, which is not necessarily January.
    pub fn first_key_of_year(&self, year: i32) -> Option<&'a str> {
        let prefix = format!("{:04}_", year);
        self.keys.iter().copied().find(|k| k.starts_with(&prefix))
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.columns.get(key).and_then(Value::as_f64)
    }

    /// Year and month of a key, if it is a real calendar month.
    pub fn year_month(key: &str) -> Option<(i32, u32)> {
        let (y, m) = key.split_once('_')?;
        let date = NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)?;
        Some((date.year(), date.month()))
    }

    /// Label for a key in the `Inf_Mensual` vocabulary, falling back to the
    /// raw key when the month is out of range.
    pub fn label_for(key: &str) -> String {
        Self::year_month(key)
            .and_then(|(y, m)| month_label(y, m))
            .unwrap_or_else(|| key.to_string())
    }

    fn from_end(&self, n: usize) -> Option<&'a str> {
        self.keys.len().checked_sub(n).map(|i| self.keys[i])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEntry {
    pub label: String,
    pub value: f64,
    pub year: i32,
    /// 0 for January.
    pub month_index: u32,
    pub sort_key: i32,
}

/// Labeled monthly columns of one `Inf_Mensual` row, oldest first.
///
/// Labels have to be parsed: alphabetically "Diciembre '24" would come
/// before "Enero '24".
#[derive(Debug, Clone)]
pub struct LabeledColumns {
    entries: Vec<MonthlyEntry>,
}

impl LabeledColumns {
    pub fn new(columns: &BTreeMap<String, Value>) -> Self {
        let mut entries: Vec<MonthlyEntry> = columns
            .iter()
            .filter_map(|(k, v)| {
                let value = v.as_f64()?;
                let (year, month_index) = parse_label(k)?;
                Some(MonthlyEntry {
                    label: k.clone(),
                    value,
                    year,
                    month_index,
                    sort_key: year * 100 + month_index as i32 + 1,
                })
            })
            .collect();
        entries.sort_by_key(|e| e.sort_key);
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[MonthlyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&MonthlyEntry> {
        self.entries.last()
    }

    /// The most recent `n` entries, oldest first. Shorter rows yield
    /// everything they have.
    pub fn last_n(&self, n: usize) -> &[MonthlyEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

/// `"Enero '25"` → `(2025, 0)`.
pub fn parse_label(label: &str) -> Option<(i32, u32)> {
    let caps = MONTH_LABEL.captures(label)?;
    let month = month_index(&caps[1])?;
    let yy: i32 = caps[2].parse().ok()?;
    Some((2000 + yy, month))
}
