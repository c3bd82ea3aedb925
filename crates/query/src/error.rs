use database::DbError;
use thiserror::Error;

/// Everything a query can fail with once its parameters are valid. The web layer decides what each kind
/// looks like on the wire.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Country not found: {0}")]
    NotFound(String),

    #[error("Stored data is malformed: {0}")]
    DataIntegrity(String),

    #[error("Storage is unavailable: {0}")]
    StorageUnavailable(#[from] DbError),
}
