use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FarmError {
    #[error("invalid population range: min {min} must be at least 1 and below max {max}")]
    InvalidPopulationRange { min: usize, max: usize },
    #[error("progress grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("named share {0} is outside [0, 1]")]
    InvalidNamedShare(f64),
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
    #[error("locale '{locale}' has no message '{key}'")]
    MissingMessage { locale: String, key: String },
    #[error("locale bundle defines no locales")]
    NoLocales,
}
