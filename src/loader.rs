use crate::error::{CalcError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, error};

/// The four published tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    PriceIndex,
    GeoLookup,
    MonthlyInflation,
    Rates,
}

impl Table {
    pub fn file_name(self) -> &'static str {
        match self {
            Table::PriceIndex => "Base.json",
            Table::GeoLookup => "Prov_Ciudades.json",
            Table::MonthlyInflation => "Inf_Mensual.json",
            Table::Rates => "Rates.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Table::PriceIndex => "price index",
            Table::GeoLookup => "geo lookup",
            Table::MonthlyInflation => "monthly inflation",
            Table::Rates => "rates",
        }
    }
}

/// Where the tables come from. Every call is a fresh, one-shot read.
pub trait TableSource {
    fn fetch_table<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>>;
}

/// Tables stored as JSON arrays in one directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TableSource for DirSource {
    fn fetch_table<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>> {
        let path = self.root.join(table.file_name());
        let unavailable = |reason: String| {
            error!(table = table.as_str(), path = %path.display(), %reason, "table unavailable");
            CalcError::DataUnavailable {
                table: table.as_str(),
                reason,
            }
        };
        let file = File::open(&path).map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;
        let rows: Vec<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;
        debug!(table = table.as_str(), rows = rows.len(), "table loaded");
        Ok(rows)
    }
}
