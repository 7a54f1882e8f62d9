use thiserror::Error;

/// Unified error type for the ledger.
///
/// Missing ids on repository mutations are not errors; only store faults,
/// configuration problems and rejected form input surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the failure
        message: String,
    },

    /// Backing database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A collection could not be encoded for the store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A price or rate field did not contain a usable number
    #[error("Invalid amount: {input:?}")]
    InvalidAmount {
        /// The rejected text
        input: String,
    },

    /// A weight was non-numeric, zero or negative
    #[error("Invalid weight: {input:?}")]
    InvalidWeight {
        /// The rejected text
        input: String,
    },

    /// A required text field was empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// The material cannot be used for this kind of transaction
    #[error("Material '{name}' is not available for {kind}")]
    MaterialUnavailable {
        /// Material name
        name: String,
        /// Transaction kind that was attempted
        kind: String,
    },

    /// A transaction was submitted without items
    #[error("Transaction has no items")]
    EmptyTransaction,

    /// Navigation to a view name that does not exist
    #[error("Unknown view: {name}")]
    UnknownView {
        /// The requested name
        name: String,
    },

    /// The insights service could not be reached or answered badly
    #[error("Insights error: {message}")]
    Insights {
        /// Description of the failure
        message: String,
    },
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Insights {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
