use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to access the ledger store: {0}")]
    Io(#[from] std::io::Error),

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("No client with id '{0}'")]
    ClientNotFound(String),

    #[error("No {kind} with id '{id}' for this client")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("The {0} amounts exceed the supported numeric range")]
    AmountOutOfRange(&'static str),

    #[error("The username '{0}' is already taken")]
    DuplicateUsername(String),
}
