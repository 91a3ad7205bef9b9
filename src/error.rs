/// Everything that can abort a single calculation.
///
/// None of these are fatal to the process: the console loop reports the
/// message and keeps whatever was displayed before.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("no region data found for {what}")]
    RegionNotFound { what: String },

    #[error("no {table} row for region {region} / {category}")]
    NoRegionData {
        table: &'static str,
        region: String,
        category: String,
    },

    #[error("missing index: {details}")]
    MissingIndex { details: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("could not load {table}: {reason}")]
    DataUnavailable { table: &'static str, reason: String },
}

impl CalcError {
    pub fn missing(details: impl Into<String>) -> Self {
        CalcError::MissingIndex {
            details: details.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
