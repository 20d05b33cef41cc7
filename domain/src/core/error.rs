//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are caller contract violations: they are raised immediately and are
/// never retried.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No editors in the panel")]
    EmptyRegistry,

    #[error("No current editor set for this conversation")]
    EditorNotSet,

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid editor: {0}")]
    InvalidEditor(String),
}

impl DomainError {
    /// Check if this error indicates a violated precondition
    ///
    /// All domain errors currently are; the distinction matters to callers
    /// that also handle transient gateway failures.
    pub fn is_precondition(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_display() {
        let error = DomainError::EmptyRegistry;
        assert_eq!(error.to_string(), "No editors in the panel");
    }

    #[test]
    fn test_editor_not_set_is_precondition() {
        assert!(DomainError::EditorNotSet.is_precondition());
    }
}
