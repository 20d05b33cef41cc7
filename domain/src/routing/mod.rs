//! Interview routing
//!
//! Called after every expert answer to decide whether the current editor
//! keeps the floor, the panel advances, or the session ends.

use crate::conversation::state::ConversationState;
use serde::{Deserialize, Serialize};

/// Where the interview goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDecision {
    /// The current editor asks another question
    AskQuestion,
    /// The current editor is done; hand the floor to the next one
    NextEditor,
    /// The panel is exhausted; the session is over
    End,
}

impl RouteDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::AskQuestion => "ask_question",
            RouteDecision::NextEditor => "next_editor",
            RouteDecision::End => "end",
        }
    }
}

impl std::fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decide the next transition for the current editor's conversation.
///
/// The current segment starts at the most recent separator naming the
/// current editor; in an isolated per-editor log there is no separator and
/// the segment is the whole log. Within that segment:
///
/// 1. `max_turns` expert answers cap the conversation.
/// 2. Failing that, the editor's latest turn may signal it is done —
///    structured end flag first, legacy closing phrase as fallback.
/// 3. Otherwise the editor keeps asking.
///
/// An empty log means the session is just starting, which also routes to
/// asking.
pub fn route_after_answer(state: &ConversationState, max_turns: usize) -> RouteDecision {
    let messages = state.messages();
    if messages.is_empty() {
        return RouteDecision::AskQuestion;
    }

    let Some(editor) = state.current_editor() else {
        return RouteDecision::End;
    };
    let label = editor.author_label();

    let segment_start = messages
        .iter()
        .rposition(|m| m.is_separator_for(&editor.name))
        .unwrap_or(0);
    let segment = &messages[segment_start..];

    let responses = segment.iter().filter(|m| m.is_expert()).count();
    if responses >= max_turns {
        return RouteDecision::NextEditor;
    }

    if let Some(last_editor_turn) = segment.iter().rev().find(|m| m.author == label) {
        if last_editor_turn.signals_end() {
            return RouteDecision::NextEditor;
        }
    }

    RouteDecision::AskQuestion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::{EndIntent, Message, CLOSING_PHRASE};
    use crate::editor::{Editor, EditorRegistry};

    fn alice() -> Editor {
        Editor::new("Alice", "Scientist", "University", "Research")
    }

    fn bob() -> Editor {
        Editor::new("Bob", "Analyst", "Think Tank", "Policy")
    }

    fn state_for(editors: Vec<Editor>) -> ConversationState {
        ConversationState::new(EditorRegistry::new(editors).unwrap())
    }

    fn push_turn(state: &mut ConversationState, question: &str, answer: &str) {
        let label = state.current_editor().unwrap().author_label();
        state.push_message(Message::editor(label, question));
        state.push_message(Message::expert(answer));
    }

    #[test]
    fn test_empty_log_asks() {
        let state = state_for(vec![alice()]);
        assert_eq!(route_after_answer(&state, 3), RouteDecision::AskQuestion);
    }

    #[test]
    fn test_continues_below_turn_cap() {
        let mut state = state_for(vec![alice()]);
        state.push_message(Message::expert("So you said you were writing an article?"));
        push_turn(&mut state, "What changed recently?", "Quite a lot.");
        // Seed + one exchange = two expert messages, still under a cap of 3
        assert_eq!(route_after_answer(&state, 3), RouteDecision::AskQuestion);
    }

    #[test]
    fn test_turn_cap_advances() {
        let mut state = state_for(vec![alice()]);
        push_turn(&mut state, "First question?", "First answer.");
        push_turn(&mut state, "Second question?", "Second answer.");
        assert_eq!(route_after_answer(&state, 2), RouteDecision::NextEditor);
    }

    #[test]
    fn test_structured_end_intent_advances() {
        let mut state = state_for(vec![alice()]);
        state.push_message(Message::editor_with_intent(
            "Alice",
            "I have what I need.",
            EndIntent {
                wants_to_end: true,
                reason: Some("coverage complete".to_string()),
            },
        ));
        state.push_message(Message::expert("Glad to help."));
        assert_eq!(route_after_answer(&state, 3), RouteDecision::NextEditor);
    }

    #[test]
    fn test_closing_phrase_fallback_advances() {
        let mut state = state_for(vec![alice()]);
        push_turn(
            &mut state,
            &format!("Understood. {CLOSING_PHRASE}"),
            "You're welcome.",
        );
        assert_eq!(route_after_answer(&state, 3), RouteDecision::NextEditor);
    }

    #[test]
    fn test_false_flag_keeps_asking_despite_phrase() {
        let mut state = state_for(vec![alice()]);
        state.push_message(Message::editor_with_intent(
            "Alice",
            format!("Almost done. {CLOSING_PHRASE}"),
            EndIntent {
                wants_to_end: false,
                reason: None,
            },
        ));
        state.push_message(Message::expert("Take your time."));
        assert_eq!(route_after_answer(&state, 3), RouteDecision::AskQuestion);
    }

    #[test]
    fn test_segment_isolated_by_separator() {
        // Alice's two answers must not count against Bob's fresh segment
        let mut state = state_for(vec![alice(), bob()]);
        push_turn(&mut state, "Alice q1?", "a1");
        push_turn(&mut state, "Alice q2?", "a2");
        state.advance_editor();
        state.push_message(Message::separator("Bob"));
        state.push_message(Message::expert("So you said you were writing an article?"));
        push_turn(&mut state, "Bob q1?", "b1");

        // Two expert messages in Bob's segment (seed + one answer), cap 3
        assert_eq!(route_after_answer(&state, 3), RouteDecision::AskQuestion);
    }

    #[test]
    fn test_most_recent_separator_wins() {
        // Bob's name also appears in an early system message; the segment
        // must start at the latest separator naming him
        let mut state = state_for(vec![alice(), bob()]);
        state.push_message(Message::separator("Bob"));
        push_turn(&mut state, "stray", "stray answer");
        state.advance_editor();
        state.push_message(Message::separator("Bob"));
        push_turn(&mut state, "Bob q1?", "b1");

        assert_eq!(route_after_answer(&state, 2), RouteDecision::AskQuestion);
    }

    #[test]
    fn test_exhausted_panel_ends() {
        let mut state = state_for(vec![alice()]);
        push_turn(&mut state, "q", "a");
        state.advance_editor();
        assert_eq!(route_after_answer(&state, 3), RouteDecision::End);
    }
}
