//! Message turn unit

use serde::{Deserialize, Serialize};

/// Author label for the shared expert persona.
pub const EXPERT_NAME: &str = "expert";

/// Author label for synthetic separator messages.
pub const SYSTEM_NAME: &str = "system";

/// Legacy closing phrase editors use to signal they are done.
///
/// Older transcripts carry no structured end flag; the phrase match keeps
/// them routable.
pub const CLOSING_PHRASE: &str = "Thank you so much for your help!";

/// How a turn is presented to whichever model reads the transcript next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Incoming turn — someone else speaking to the reader
    User,
    /// Outgoing turn — the reader's own prior output
    Assistant,
}

/// Structured end-of-conversation intent attached to an editor turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndIntent {
    pub wants_to_end: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// One turn in a conversation (Entity)
///
/// Immutable once created; conversations only ever append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Sanitized speaker label: an editor's label, [`EXPERT_NAME`], or
    /// [`SYSTEM_NAME`].
    pub author: String,
    pub content: String,
    /// Present only when the generating model produced structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_intent: Option<EndIntent>,
}

impl Message {
    /// A question turn authored by an editor.
    pub fn editor(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            author: author.into(),
            content: content.into(),
            end_intent: None,
        }
    }

    /// An editor turn carrying a structured end-of-conversation flag.
    pub fn editor_with_intent(
        author: impl Into<String>,
        content: impl Into<String>,
        intent: EndIntent,
    ) -> Self {
        Self {
            end_intent: Some(intent),
            ..Self::editor(author, content)
        }
    }

    /// An answer turn authored by the shared expert.
    pub fn expert(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            author: EXPERT_NAME.to_string(),
            content: content.into(),
            end_intent: None,
        }
    }

    /// The synthetic boundary marker inserted before an editor's segment.
    pub fn separator(editor_name: &str) -> Self {
        Self {
            role: Role::Assistant,
            author: SYSTEM_NAME.to_string(),
            content: format!("\n--- Interview with {} ---\n", editor_name),
            end_intent: None,
        }
    }

    pub fn is_expert(&self) -> bool {
        self.author == EXPERT_NAME
    }

    /// Whether this message is the segment boundary for the named editor.
    pub fn is_separator_for(&self, editor_name: &str) -> bool {
        self.author == SYSTEM_NAME && self.content.contains(editor_name)
    }

    /// Whether this turn asks to end the conversation.
    ///
    /// The structured flag wins when present; the closing-phrase match is
    /// only a fallback for turns generated without structured output.
    pub fn signals_end(&self) -> bool {
        match &self.end_intent {
            Some(intent) => intent.wants_to_end,
            None => self.content.ends_with(CLOSING_PHRASE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_format() {
        let sep = Message::separator("Alice");
        assert_eq!(sep.author, SYSTEM_NAME);
        assert_eq!(sep.content, "\n--- Interview with Alice ---\n");
        assert!(sep.is_separator_for("Alice"));
        assert!(!sep.is_separator_for("Bob"));
    }

    #[test]
    fn test_structured_flag_ends() {
        let msg = Message::editor_with_intent(
            "Alice",
            "That covers everything I needed.",
            EndIntent {
                wants_to_end: true,
                reason: Some("topic exhausted".to_string()),
            },
        );
        assert!(msg.signals_end());
    }

    #[test]
    fn test_structured_flag_overrides_phrase() {
        // A false flag wins even when the text happens to carry the phrase
        let msg = Message::editor_with_intent(
            "Alice",
            format!("One more thing. {CLOSING_PHRASE}"),
            EndIntent {
                wants_to_end: false,
                reason: None,
            },
        );
        assert!(!msg.signals_end());
    }

    #[test]
    fn test_phrase_fallback() {
        let msg = Message::editor("Alice", format!("That's all. {CLOSING_PHRASE}"));
        assert!(msg.signals_end());

        let msg = Message::editor("Alice", "What about storage costs?");
        assert!(!msg.signals_end());
    }

    #[test]
    fn test_expert_author() {
        let msg = Message::expert("Grid storage is the main bottleneck.");
        assert!(msg.is_expert());
        assert_eq!(msg.role, Role::Assistant);
    }
}
