//! Error taxonomy for domain operations.
//!
//! Three failure classes exist:
//!
//! - **Validation**: input rejected before any write was attempted.
//! - **NotFound**: a referenced record was missing when a *mutation* was
//!   attempted. Absence on a plain read is not an error; reads return
//!   `Ok(None)` instead.
//! - **Storage**: the storage backend failed after the write was attempted.
//!   No distinction is made between transient and permanent failures; every
//!   failure is terminal for that user action and must be retried manually.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("storage operation failed: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomainError::validation("name cannot be empty");
        assert_eq!(err.to_string(), "validation failed: name cannot be empty");

        let err = DomainError::not_found("batch", "batch-123");
        assert_eq!(err.to_string(), "batch not found: batch-123");
    }
}
