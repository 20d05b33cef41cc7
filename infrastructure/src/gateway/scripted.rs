//! Scripted LLM gateway.
//!
//! A deterministic [`LlmGateway`] implementation that replays pre-written
//! question scripts per editor and cycles through canned expert answers.
//! Used by the demo binary and anywhere a reproducible session is wanted
//! without a live provider.

use async_trait::async_trait;
use roundtable_application::{Completion, CompletionRequest, GatewayError, LlmGateway};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Line an editor closes with once its script runs dry.
const SCRIPT_CLOSING: &str =
    "This has been very helpful, I have what I need. Thank you so much for your help!";

/// Deterministic gateway replaying scripted turns.
pub struct ScriptedLlmGateway {
    /// Remaining scripted questions per editor name
    scripts: Mutex<HashMap<String, VecDeque<String>>>,
    /// Canned expert answers, cycled in order
    answers: Vec<String>,
    answer_cursor: AtomicUsize,
}

impl Default for ScriptedLlmGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedLlmGateway {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            answers: vec![
                "That's a broad area; the short version is that the field has moved quickly in the last few years.".to_string(),
                "There are a few schools of thought on this, and the evidence favors the pragmatic one.".to_string(),
                "Good question - the honest answer is that it depends on scale and funding.".to_string(),
            ],
            answer_cursor: AtomicUsize::new(0),
        }
    }

    /// Queue a list of questions for the named editor.
    ///
    /// Once the queue empties, that editor signals it is done.
    pub fn with_script(
        self,
        editor_name: impl Into<String>,
        questions: Vec<String>,
    ) -> Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.insert(editor_name.into(), questions.into());
        }
        self
    }

    /// Replace the canned expert answers.
    pub fn with_answers(mut self, answers: Vec<String>) -> Self {
        if !answers.is_empty() {
            self.answers = answers;
        }
        self
    }

    fn next_question(&self, editor_name: &str) -> Completion {
        let Ok(mut scripts) = self.scripts.lock() else {
            return Completion::with_end_intent(
                SCRIPT_CLOSING,
                true,
                Some("script table unavailable".to_string()),
            );
        };
        match scripts.get_mut(editor_name).and_then(|q| q.pop_front()) {
            Some(question) => Completion::text(question),
            None => Completion::with_end_intent(
                SCRIPT_CLOSING,
                true,
                Some("scripted questions exhausted".to_string()),
            ),
        }
    }

    fn next_answer(&self, references: Option<&str>) -> Completion {
        let index = self.answer_cursor.fetch_add(1, Ordering::Relaxed) % self.answers.len();
        let mut text = self.answers[index].clone();
        if let Some(digest) = references {
            let sources = digest.matches("Source: ").count();
            text.push_str(&format!(" (drawing on {} gathered sources)", sources));
        }
        Completion::text(text)
    }
}

/// Pull the editor name out of a persona block (`Name: ...` first line).
fn persona_name(persona: &str) -> Option<&str> {
    persona
        .lines()
        .find_map(|line| line.strip_prefix("Name: "))
}

#[async_trait]
impl LlmGateway for ScriptedLlmGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, GatewayError> {
        match request.persona {
            Some(persona) => {
                let name = persona_name(persona).ok_or_else(|| {
                    GatewayError::MalformedResponse(
                        "persona block without a Name line".to_string(),
                    )
                })?;
                Ok(self.next_question(name))
            }
            None => Ok(self.next_answer(request.references)),
        }
    }
}
