use crate::domain::user_benefit::BenefitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenefitsError {
    #[error("Benefit not found: {0}")]
    BenefitNotFound(String),
    #[error("User with ID {0} not found")]
    UserNotFound(String),
    #[error("Benefit not requested yet")]
    NotRequested,
    #[error("Benefit is already {0}")]
    AlreadyInStatus(BenefitStatus),
    #[error("Benefit must be in {expected} status to {action}")]
    InvalidTransition {
        action: &'static str,
        expected: &'static str,
    },
    #[error("Benefit does not support simulation")]
    SimulationUnsupported,
    #[error("Invalid formula format: {0}")]
    InvalidFormula(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, BenefitsError>;
