use thiserror::Error;

/// Errors raised by vault operations.
///
/// A missing record is not an error: `update` answers `None` and `delete`
/// answers `false`. Only invalid input and structural failures end up here.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
