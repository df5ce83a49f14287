//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// The catalog source could not be read at all
    Ingest(String),
    /// Caller passed an invalid mode or limit
    ContractViolation(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Ingest(msg) => write!(f, "Catalog ingest error: {}", msg),
            DomainError::ContractViolation(msg) => write!(f, "Invalid request: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
