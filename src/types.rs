use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tabled::Tabled;

pub const GENERAL_LEVEL: &str = "Nivel_general";

#[derive(Debug, Clone, Deserialize)]
pub struct GeoLookupRow {
    #[serde(rename = "Provincia")]
    pub provincia: String,
    #[serde(rename = "Ciudad")]
    pub ciudad: String,
    #[serde(rename = "Region")]
    pub region: String,
}

/// One `(Region, Categoria)` row of `Base.json`. Index levels sit in
/// `YYYY_MM` columns next to bookkeeping keys such as `Ordenamiento`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceIndexRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Categoria")]
    pub categoria: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

/// One `(Region, Categoria)` row of `Inf_Mensual.json`, keyed by labels like
/// `"Enero '25"` holding fractional monthly rates.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyInflationRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Categoria")]
    pub categoria: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

/// Both wide tables are looked up the same way.
pub trait RegionRow {
    fn region(&self) -> &str;
    fn categoria(&self) -> &str;
}

impl RegionRow for PriceIndexRow {
    fn region(&self) -> &str {
        &self.region
    }
    fn categoria(&self) -> &str {
        &self.categoria
    }
}

impl RegionRow for MonthlyInflationRow {
    fn region(&self) -> &str {
        &self.region
    }
    fn categoria(&self) -> &str {
        &self.categoria
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateRow {
    #[serde(rename = "Commercial_Name")]
    pub commercial_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "TNA")]
    pub tna: f64,
    #[serde(rename = "TEM")]
    pub tem: f64,
    #[serde(rename = "Tags", default, deserialize_with = "tags_from_any")]
    pub tags: Vec<String>,
}

// Older exports store a single tag string instead of a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsField {
    Many(Vec<String>),
    One(String),
}

fn tags_from_any<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TagsField>::deserialize(d)? {
        Some(TagsField::Many(v)) => v,
        Some(TagsField::One(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Headline figures for one region, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflationReport {
    pub region: String,
    pub category: String,
    /// Month the monthly figure refers to, e.g. `"Enero '25"`.
    pub month_label: String,
    pub year: i32,
    pub monthly: f64,
    pub year_over_year: f64,
    pub year_to_date: f64,
    /// Latest rate published in `Inf_Mensual.json`, in percent.
    pub published_monthly: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HeadlineRow {
    #[serde(rename = "Figure")]
    #[tabled(rename = "Figure")]
    pub figure: String,
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "Percent")]
    #[tabled(rename = "Percent")]
    pub percent: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendPointRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Inflation")]
    #[tabled(rename = "Inflation")]
    pub inflation: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RateCardRow {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "TNA")]
    #[tabled(rename = "TNA")]
    pub tna: String,
    #[serde(rename = "TEM")]
    #[tabled(rename = "TEM")]
    pub tem: String,
    #[serde(rename = "Tags")]
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Logo")]
    #[tabled(rename = "Logo")]
    pub logo: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_row_keeps_wide_columns() {
        let row: PriceIndexRow = serde_json::from_value(json!({
            "Ordenamiento": 1,
            "Region": "GBA",
            "Categoria": "Nivel_general",
            "Cat_Level": 1,
            "2024_12": 7694.0,
            "2025_01": 7864.1
        }))
        .unwrap();
        assert_eq!(row.region, "GBA");
        assert_eq!(row.columns.get("2025_01"), Some(&json!(7864.1)));
        assert!(row.columns.contains_key("Ordenamiento"));
    }

    #[test]
    fn rate_tags_accept_string_or_list() {
        let one: RateRow = serde_json::from_value(json!({
            "Commercial_Name": "Banco Nación", "Category": "Banco",
            "TNA": 29.0, "TEM": 2.41, "Tags": "Hasta $1M"
        }))
        .unwrap();
        assert_eq!(one.tags, vec!["Hasta $1M".to_string()]);

        let many: RateRow = serde_json::from_value(json!({
            "Commercial_Name": "Ualá", "Category": "Billetera",
            "TNA": 32.0, "TEM": 2.66, "Tags": ["Sin límite", "Diaria"]
        }))
        .unwrap();
        assert_eq!(many.tags.len(), 2);

        let none: RateRow = serde_json::from_value(json!({
            "Commercial_Name": "FCI", "Category": "Otros Activos", "TNA": 30.0, "TEM": 2.5
        }))
        .unwrap();
        assert!(none.tags.is_empty());
    }
}
