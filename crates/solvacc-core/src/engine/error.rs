use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SasaError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{kind} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Chain '{0}' not found in structure")]
    ChainNotFound(char),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Failed to allocate scratch memory in {operation}: {source}")]
    Allocation {
        operation: &'static str,
        source: TryReserveError,
    },
}

impl SasaError {
    pub(crate) fn index(kind: &'static str, index: usize, len: usize) -> Self {
        SasaError::IndexOutOfRange { kind, index, len }
    }
}
