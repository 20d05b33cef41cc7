//! Per-conversation interview engine.
//!
//! Drives one [`ConversationState`] through the ask → retrieve → answer →
//! route loop. The serial conductor runs it once over a shared multi-editor
//! state; the parallel conductor runs one instance per isolated single-editor
//! state.

use crate::config::InterviewParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::ports::progress::InterviewProgress;
use crate::ports::search_gateway::SearchGateway;
use crate::retry::RetryPolicy;
use crate::use_cases::conduct_interviews::ConductError;
use roundtable_domain::{
    route_after_answer, swap_roles, ConversationState, Message, RouteDecision, Topic, EXPERT_NAME,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Shared driver for a single conversation loop.
pub(crate) struct InterviewEngine<G, S> {
    gateway: Arc<G>,
    search: Arc<S>,
    params: InterviewParams,
    retry: RetryPolicy,
    logger: Arc<dyn ConversationLogger>,
}

impl<G, S> InterviewEngine<G, S>
where
    G: LlmGateway,
    S: SearchGateway,
{
    pub(crate) fn new(
        gateway: Arc<G>,
        search: Arc<S>,
        params: InterviewParams,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        let retry = RetryPolicy::new(params.max_attempts);
        Self {
            gateway,
            search,
            params,
            retry,
            logger,
        }
    }

    /// Run the conversation to completion from its current position.
    pub(crate) async fn run(
        &self,
        state: &mut ConversationState,
        topic: &Topic,
        progress: &dyn InterviewProgress,
    ) -> Result<(), ConductError> {
        let first = state.require_editor()?.clone();
        progress.on_interview_start(&first);
        self.logger.log(ConversationEvent::new(
            "interview_started",
            json!({ "editor": first.name }),
        ));
        state.push_message(Message::expert(topic.opening_line()));

        loop {
            self.ask(state, progress).await?;
            self.search_context(state).await?;
            self.answer(state, progress).await?;

            let decision = route_after_answer(state, self.params.max_turns);
            if let Some(editor) = state.current_editor() {
                progress.on_route(editor, decision);
                self.logger.log(ConversationEvent::new(
                    "route_decision",
                    json!({ "editor": editor.name, "decision": decision.as_str() }),
                ));
            }

            match decision {
                RouteDecision::AskQuestion => continue,
                RouteDecision::NextEditor => {
                    if self.advance(state, topic, progress) == RouteDecision::End {
                        break;
                    }
                }
                RouteDecision::End => break,
            }
        }
        Ok(())
    }

    /// Generate the current editor's next question.
    async fn ask(
        &self,
        state: &mut ConversationState,
        progress: &dyn InterviewProgress,
    ) -> Result<(), ConductError> {
        let editor = state.require_editor()?.clone();
        let label = editor.author_label();
        let persona = editor.persona();
        let swapped = swap_roles(state.messages(), &label);

        let completion = self
            .retry
            .run("generate_question", || {
                self.gateway.complete(CompletionRequest {
                    messages: &swapped,
                    persona: Some(&persona),
                    references: None,
                })
            })
            .await?;

        let message = match completion.end_intent {
            Some(intent) => Message::editor_with_intent(label, completion.text, intent),
            None => Message::editor(label, completion.text),
        };

        debug!(editor = %editor.name, "question generated");
        self.logger.log(ConversationEvent::new(
            "question_generated",
            json!({
                "editor": editor.name,
                "text": message.content.clone(),
                "wants_to_end": message.end_intent.as_ref().map(|i| i.wants_to_end),
            }),
        ));
        progress.on_question(&editor, &message);
        state.push_message(message);
        Ok(())
    }

    /// Retrieve supporting material for the question on the floor.
    async fn search_context(&self, state: &mut ConversationState) -> Result<(), ConductError> {
        let editor = state.require_editor()?.clone();
        let label = editor.author_label();

        // The most recent question from the current editor drives the query
        let Some(question) = state
            .messages()
            .iter()
            .rev()
            .find(|m| m.author == label)
            .map(|m| m.content.clone())
        else {
            return Ok(());
        };

        let hits = self
            .retry
            .run("search_context", || self.search.search(&question))
            .await?;

        if hits.is_empty() {
            return Ok(());
        }

        debug!(editor = %editor.name, hits = hits.len(), "context retrieved");
        self.logger.log(ConversationEvent::new(
            "context_retrieved",
            json!({ "editor": editor.name, "hits": hits.len() }),
        ));

        for hit in hits {
            match hit.source {
                Some(source) => state.add_reference(source, hit.content),
                None => state.add_anonymous_reference(hit.content),
            }
        }
        Ok(())
    }

    /// Generate the expert's answer, informed by gathered references.
    async fn answer(
        &self,
        state: &mut ConversationState,
        progress: &dyn InterviewProgress,
    ) -> Result<(), ConductError> {
        let editor = state.require_editor()?.clone();
        let swapped = swap_roles(state.messages(), EXPERT_NAME);
        let digest = reference_digest(state.references());

        let completion = self
            .retry
            .run("generate_answer", || {
                self.gateway.complete(CompletionRequest {
                    messages: &swapped,
                    persona: None,
                    references: digest.as_deref(),
                })
            })
            .await?;

        let message = Message::expert(completion.text);

        debug!(editor = %editor.name, "answer generated");
        self.logger.log(ConversationEvent::new(
            "answer_generated",
            json!({ "editor": editor.name, "text": message.content.clone() }),
        ));
        progress.on_answer(&editor, &message);
        state.push_message(message);
        Ok(())
    }

    /// Hand the floor to the next editor, or end the session.
    fn advance(
        &self,
        state: &mut ConversationState,
        topic: &Topic,
        progress: &dyn InterviewProgress,
    ) -> RouteDecision {
        let Some(next) = state.advance_editor().cloned() else {
            self.logger
                .log(ConversationEvent::new("session_complete", json!({})));
            return RouteDecision::End;
        };

        state.push_message(Message::separator(&next.name));
        state.push_message(Message::expert(topic.opening_line()));
        progress.on_interview_start(&next);
        self.logger.log(ConversationEvent::new(
            "interview_started",
            json!({ "editor": next.name }),
        ));
        RouteDecision::AskQuestion
    }
}

/// Format the reference map the way the answer model consumes it.
fn reference_digest(references: &BTreeMap<String, String>) -> Option<String> {
    if references.is_empty() {
        return None;
    }
    let digest = references
        .iter()
        .map(|(source, content)| format!("Source: {}\nContent: {}", source, content))
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(digest)
}
