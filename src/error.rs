use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("emission failed: {0}")]
    Emit(String),
    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for GateError {
    fn from(e: rocksdb::Error) -> Self {
        GateError::Storage(e.to_string())
    }
}
