use crate::error::{CalcError, Result};
use crate::trend::DEFAULT_TREND_MONTHS;
use crate::types::GENERAL_LEVEL;
use std::path::PathBuf;

/// Runtime settings, read from `INFLACION_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub category: String,
    pub trend_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("out"),
            category: GENERAL_LEVEL.to_string(),
            trend_months: DEFAULT_TREND_MONTHS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();
        if let Some(dir) = get("INFLACION_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("INFLACION_OUT_DIR") {
            config.out_dir = PathBuf::from(dir);
        }
        if let Some(category) = get("INFLACION_CATEGORY") {
            config.category = category.trim().to_string();
        }
        if let Some(months) = get("INFLACION_TREND_MONTHS") {
            config.trend_months = match months.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(CalcError::invalid(format!(
                        "INFLACION_TREND_MONTHS must be a positive integer, got {}",
                        months
                    )))
                }
            };
        }
        Ok(config)
    }
}
