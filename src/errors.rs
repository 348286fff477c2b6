use thiserror::Error;

/// Failures raised while writing values to a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err.to_string())
    }
}

/// Error type that captures rejected ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: `{0}`")]
    InvalidAmount(String),
    #[error("Unknown category: `{0}`")]
    UnknownCategory(String),
    #[error("Month `{0}` is not part of the monthly series")]
    MonthNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LedgerError {
    /// Returns `true` for failures caused by user-entered values.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount(_) | LedgerError::UnknownCategory(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}
