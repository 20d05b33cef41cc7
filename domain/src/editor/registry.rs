//! Ordered editor panel registry

use crate::core::error::DomainError;
use crate::editor::entities::Editor;
use serde::{Deserialize, Serialize};

/// The ordered, immutable panel of editors for one session (Value Object)
///
/// Upstream perspective data arrives in several shapes; it is normalized into
/// this one canonical form at session start. The order is fixed for the
/// lifetime of the session and drives the ordering of every downstream
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorRegistry {
    editors: Vec<Editor>,
}

impl EditorRegistry {
    /// Build a registry from upstream perspective data.
    ///
    /// Fails if the panel is empty — a session without editors is a caller
    /// contract violation, caught before any conversation starts.
    pub fn new(editors: Vec<Editor>) -> Result<Self, DomainError> {
        if editors.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }
        Ok(Self { editors })
    }

    /// A single-editor registry, used for isolated per-editor conversations.
    pub fn single(editor: Editor) -> Self {
        Self {
            editors: vec![editor],
        }
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Editor> {
        self.editors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Editor> {
        self.editors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DomainError;

    fn panel() -> Vec<Editor> {
        vec![
            Editor::new("Alice", "Climate Scientist", "University", "Research"),
            Editor::new("Bob", "Policy Analyst", "Think Tank", "Policy"),
        ]
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = EditorRegistry::new(panel()).unwrap();
        let names: Vec<_> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_empty_registry_rejected() {
        let err = EditorRegistry::new(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::EmptyRegistry));
    }

    #[test]
    fn test_single() {
        let registry = EditorRegistry::single(panel().remove(0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().name, "Alice");
    }
}
