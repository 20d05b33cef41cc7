//! Per-conversation state

use crate::conversation::message::Message;
use crate::core::error::DomainError;
use crate::editor::{Editor, EditorRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The mutable state of one interview conversation (Entity)
///
/// Holds the ordered message log, the reference map gathered while answering,
/// and the cursor into the editor panel. Mutation is append-only: messages
/// and references are added, never edited or removed.
///
/// In serial mode one instance is shared across the whole panel; in parallel
/// mode each editor gets an isolated instance over a single-editor registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    references: BTreeMap<String, String>,
    registry: EditorRegistry,
    current_index: usize,
    complete: bool,
}

impl ConversationState {
    /// Start a conversation positioned on the first editor of the panel.
    pub fn new(registry: EditorRegistry) -> Self {
        Self {
            messages: Vec::new(),
            references: BTreeMap::new(),
            registry,
            current_index: 0,
            complete: false,
        }
    }

    /// Start with reference material carried over from an upstream stage.
    pub fn with_references(registry: EditorRegistry, references: BTreeMap<String, String>) -> Self {
        Self {
            references,
            ..Self::new(registry)
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn references(&self) -> &BTreeMap<String, String> {
        &self.references
    }

    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    /// The editor currently holding the floor.
    ///
    /// `None` once the panel is exhausted; ask/answer operations treat that
    /// as a violated precondition.
    pub fn current_editor(&self) -> Option<&Editor> {
        if self.complete {
            return None;
        }
        self.registry.get(self.current_index)
    }

    /// Like [`current_editor`](Self::current_editor) but as a contract check.
    pub fn require_editor(&self) -> Result<&Editor, DomainError> {
        self.current_editor().ok_or(DomainError::EditorNotSet)
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Record a retrieved source under an explicit identifier.
    ///
    /// Keys are unique within one conversation; re-retrieving the same source
    /// refreshes its content.
    pub fn add_reference(&mut self, source_id: impl Into<String>, content: impl Into<String>) {
        self.references.insert(source_id.into(), content.into());
    }

    /// Record a retrieved source that arrived without an identifier.
    ///
    /// Plain-text hits get a synthetic `source_{n}` key.
    pub fn add_anonymous_reference(&mut self, content: impl Into<String>) {
        let key = format!("source_{}", self.references.len());
        self.references.insert(key, content.into());
    }

    /// Move the cursor to the next editor in panel order.
    ///
    /// Returns the new editor, or `None` when the panel is exhausted, in
    /// which case the conversation is marked complete.
    pub fn advance_editor(&mut self) -> Option<&Editor> {
        self.current_index += 1;
        if self.current_index >= self.registry.len() {
            self.complete = true;
            return None;
        }
        self.registry.get(self.current_index)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Consume the state into its accumulated transcript and references.
    pub fn into_transcript(self) -> (Vec<Message>, BTreeMap<String, String>) {
        (self.messages, self.references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_editor_state() -> ConversationState {
        let registry = EditorRegistry::new(vec![
            Editor::new("Alice", "Scientist", "University", "Research"),
            Editor::new("Bob", "Analyst", "Think Tank", "Policy"),
        ])
        .unwrap();
        ConversationState::new(registry)
    }

    #[test]
    fn test_starts_on_first_editor() {
        let state = two_editor_state();
        assert_eq!(state.current_editor().unwrap().name, "Alice");
        assert!(!state.is_complete());
    }

    #[test]
    fn test_advance_walks_panel_then_completes() {
        let mut state = two_editor_state();
        assert_eq!(state.advance_editor().unwrap().name, "Bob");
        assert!(!state.is_complete());
        assert!(state.advance_editor().is_none());
        assert!(state.is_complete());
        assert!(state.current_editor().is_none());
    }

    #[test]
    fn test_require_editor_after_completion() {
        let mut state = two_editor_state();
        state.advance_editor();
        state.advance_editor();
        assert!(matches!(
            state.require_editor(),
            Err(DomainError::EditorNotSet)
        ));
    }

    #[test]
    fn test_anonymous_reference_keys() {
        let mut state = two_editor_state();
        state.add_anonymous_reference("first hit");
        state.add_anonymous_reference("second hit");
        assert_eq!(state.references().get("source_0").unwrap(), "first hit");
        assert_eq!(state.references().get("source_1").unwrap(), "second hit");
    }

    #[test]
    fn test_reference_refresh_keeps_key_unique() {
        let mut state = two_editor_state();
        state.add_reference("https://example.org/a", "old");
        state.add_reference("https://example.org/a", "new");
        assert_eq!(state.references().len(), 1);
        assert_eq!(
            state.references().get("https://example.org/a").unwrap(),
            "new"
        );
    }
}
