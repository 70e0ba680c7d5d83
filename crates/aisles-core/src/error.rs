use thiserror::Error;

use crate::catalog::StoreId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to parse store catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("store catalog validation failed: {0}")]
    Validation(String),
}

/// Errors raised when turning user-supplied text into directory values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown cuisine '{0}'; expected All, Japanese, Chinese, Indian, Korean, Thai or Vietnamese")]
    UnknownCuisine(String),

    #[error("unknown sort key '{0}'; expected name, rating or type")]
    UnknownSortKey(String),

    #[error("unknown view mode '{0}'; expected grid or map")]
    UnknownViewMode(String),

    #[error("no store with id {0}")]
    UnknownStore(StoreId),
}
