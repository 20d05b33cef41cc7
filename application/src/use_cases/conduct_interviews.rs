//! Conduct Interviews use case
//!
//! Orchestrates the full interview session: every editor on the panel
//! questions the shared expert, serially over one shared conversation or
//! concurrently over isolated per-editor conversations, and the results are
//! merged into one panel-ordered transcript.

use crate::config::InterviewParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{InterviewProgress, NoProgress};
use crate::ports::search_gateway::{SearchError, SearchGateway};
use crate::use_cases::engine::InterviewEngine;
use roundtable_domain::{
    aggregate, AggregatedResult, ConversationState, DomainError, EditorRegistry, InterviewFailure,
    InterviewRecord, Topic,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur while conducting a session
#[derive(Error, Debug)]
pub enum ConductError {
    #[error("Contract violation: {0}")]
    Precondition(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("All {0} interviews failed")]
    AllInterviewsFailed(usize),
}

/// Input for the ConductInterviews use case
#[derive(Debug, Clone)]
pub struct ConductInterviewsInput {
    /// The validated research topic
    pub topic: Topic,
    /// The ordered editor panel
    pub registry: EditorRegistry,
    /// Reference material carried over from an upstream stage
    pub prior_references: BTreeMap<String, String>,
}

impl ConductInterviewsInput {
    pub fn new(topic: Topic, registry: EditorRegistry) -> Self {
        Self {
            topic,
            registry,
            prior_references: BTreeMap::new(),
        }
    }

    pub fn with_prior_references(mut self, references: BTreeMap<String, String>) -> Self {
        self.prior_references = references;
        self
    }
}

/// Use case for running an interview session
///
/// Mode selection comes from [`InterviewParams::parallel_interviews`]:
/// serial walks one shared conversation across the panel; parallel runs one
/// isolated conversation per editor under a counting permit pool and merges
/// afterwards.
///
/// Failure policy in parallel mode: an editor whose conversation exhausts
/// its retries is recorded on the result and omitted from the merge; the
/// session itself only fails when every editor does.
pub struct ConductInterviewsUseCase<G: LlmGateway + 'static, S: SearchGateway + 'static> {
    gateway: Arc<G>,
    search: Arc<S>,
    params: InterviewParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G, S> ConductInterviewsUseCase<G, S>
where
    G: LlmGateway + Send + Sync + 'static,
    S: SearchGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, search: Arc<S>, params: InterviewParams) -> Self {
        Self {
            gateway,
            search,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: ConductInterviewsInput,
    ) -> Result<AggregatedResult, ConductError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ConductInterviewsInput,
        progress: &dyn InterviewProgress,
    ) -> Result<AggregatedResult, ConductError> {
        info!(
            "Starting interview session on '{}' with {} editors",
            input.topic,
            input.registry.len()
        );

        if self.params.parallel_interviews {
            self.conduct_parallel(input, progress).await
        } else {
            self.conduct_serial(input, progress).await
        }
    }

    fn engine(&self) -> InterviewEngine<G, S> {
        InterviewEngine::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.search),
            self.params.clone(),
            Arc::clone(&self.conversation_logger),
        )
    }

    /// Serial mode: one shared conversation walks the panel front to back.
    ///
    /// A failure here aborts the whole session — later editors would
    /// otherwise build on a transcript that was cut short.
    async fn conduct_serial(
        &self,
        input: ConductInterviewsInput,
        progress: &dyn InterviewProgress,
    ) -> Result<AggregatedResult, ConductError> {
        debug!("Serial mode");
        let engine = self.engine();
        let mut state = ConversationState::with_references(
            input.registry.clone(),
            input.prior_references.clone(),
        );

        engine.run(&mut state, &input.topic, progress).await?;

        let (messages, references) = state.into_transcript();
        Ok(AggregatedResult {
            messages,
            references,
            failures: Vec::new(),
        })
    }

    /// Parallel mode: isolated per-editor conversations behind a counting
    /// permit pool, merged back into panel order after all of them settle.
    async fn conduct_parallel(
        &self,
        input: ConductInterviewsInput,
        progress: &dyn InterviewProgress,
    ) -> Result<AggregatedResult, ConductError> {
        debug!(
            ceiling = self.params.max_parallel_interviews,
            "Parallel mode"
        );
        let semaphore = Arc::new(Semaphore::new(self.params.max_parallel_interviews));
        let mut join_set = JoinSet::new();

        for editor in input.registry.iter() {
            progress.on_interview_start(editor);

            let engine = self.engine();
            let editor = editor.clone();
            let topic = input.topic.clone();
            let base_references = input.prior_references.clone();
            let semaphore = Arc::clone(&semaphore);

            join_set.spawn(async move {
                // The permit is held for the whole conversation: the pool
                // bounds executing interviews, not spawned tasks.
                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (editor, Err("permit pool closed".to_string()));
                    }
                };

                let mut state = ConversationState::with_references(
                    EditorRegistry::single(editor.clone()),
                    base_references.clone(),
                );
                let outcome = engine.run(&mut state, &topic, &NoProgress).await;
                drop(permit);

                match outcome {
                    Ok(()) => {
                        let (messages, references) = state.into_transcript();
                        // Only this conversation's own contributions merge;
                        // carried-over upstream entries would collide with
                        // every sibling's copy.
                        let fresh: BTreeMap<String, String> = references
                            .into_iter()
                            .filter(|(key, content)| base_references.get(key) != Some(content))
                            .collect();
                        (
                            editor.clone(),
                            Ok(InterviewRecord::new(editor, messages, fresh)),
                        )
                    }
                    Err(e) => (editor, Err(e.to_string())),
                }
            });
        }

        let mut records = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((editor, Ok(record))) => {
                    info!("Interview with {} completed", editor.name);
                    progress.on_interview_complete(&editor, true);
                    records.push(record);
                }
                Ok((editor, Err(error))) => {
                    warn!("Interview with {} failed: {}", editor.name, error);
                    progress.on_interview_complete(&editor, false);
                    failures.push(InterviewFailure { editor, error });
                }
                Err(e) => {
                    warn!("Interview task join error: {}", e);
                }
            }
        }

        // A panicked task reports neither way; account for its editor so
        // every panel member shows up exactly once in the result.
        for editor in input.registry.iter() {
            let seen = records.iter().any(|r| r.editor.name == editor.name)
                || failures.iter().any(|f| f.editor.name == editor.name);
            if !seen {
                failures.push(InterviewFailure {
                    editor: editor.clone(),
                    error: "interview task aborted before completion".to_string(),
                });
            }
        }

        if records.is_empty() {
            return Err(ConductError::AllInterviewsFailed(failures.len()));
        }

        self.conversation_logger.log(ConversationEvent::new(
            "session_aggregated",
            json!({
                "completed": records.len(),
                "failed": failures.len(),
            }),
        ));

        Ok(aggregate(
            &input.registry,
            input.prior_references,
            records,
            failures,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{Completion, CompletionRequest};
    use crate::ports::search_gateway::{NoSearch, SearchHit};
    use async_trait::async_trait;
    use roundtable_domain::{Editor, EXPERT_NAME, SYSTEM_NAME};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockGateway {
        /// Extra latency per editor on question turns, to skew completion order
        delays_ms: HashMap<String, u64>,
        /// Editors whose question turns always fail transiently
        fail_editors: HashSet<String>,
        /// Editors signal structured end intent on their very first question
        end_on_first_question: bool,
        calls: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl MockGateway {
        fn failing_for(names: &[&str]) -> Self {
            Self {
                fail_editors: names.iter().map(|n| n.to_string()).collect(),
                ..Self::default()
            }
        }

        fn max_active(&self) -> usize {
            self.max_active.load(Ordering::SeqCst)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn persona_name(persona: &str) -> String {
        persona
            .lines()
            .find_map(|line| line.strip_prefix("Name: "))
            .unwrap_or("unknown")
            .to_string()
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            request: CompletionRequest<'_>,
        ) -> Result<Completion, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);

            // Yield so sibling tasks can overlap inside the gated region
            tokio::time::sleep(Duration::from_millis(1)).await;

            let result = match request.persona {
                Some(persona) => {
                    let name = persona_name(persona);
                    if let Some(delay) = self.delays_ms.get(&name) {
                        tokio::time::sleep(Duration::from_millis(*delay)).await;
                    }
                    if self.fail_editors.contains(&name) {
                        Err(GatewayError::RequestFailed(format!(
                            "provider unavailable for {name}"
                        )))
                    } else if self.end_on_first_question {
                        Ok(Completion::with_end_intent(
                            "I have everything I need, thank you!",
                            true,
                            Some("coverage complete".to_string()),
                        ))
                    } else {
                        Ok(Completion::text(format!("Question from {name}?")))
                    }
                }
                None => Ok(Completion::text("An expert answer.")),
            };

            self.active.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    struct MockSearch {
        hits: Vec<SearchHit>,
    }

    #[async_trait]
    impl SearchGateway for MockSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
            Ok(self.hits.clone())
        }
    }

    fn editor(name: &str) -> Editor {
        Editor::new(name, "Analyst", "Institute", format!("{name}'s focus area"))
    }

    fn registry(names: &[&str]) -> EditorRegistry {
        EditorRegistry::new(names.iter().map(|n| editor(n)).collect()).unwrap()
    }

    fn input(names: &[&str]) -> ConductInterviewsInput {
        ConductInterviewsInput::new(Topic::new("Grid Storage").unwrap(), registry(names))
    }

    fn expert_count(messages: &[roundtable_domain::Message]) -> usize {
        messages.iter().filter(|m| m.author == EXPERT_NAME).count()
    }

    // ==================== Serial Mode ====================

    #[tokio::test]
    async fn test_serial_turn_cap_walks_whole_panel() {
        let params = InterviewParams::default().with_max_turns(2);
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(MockGateway::default()),
            Arc::new(NoSearch),
            params,
        );

        let result = use_case.execute(input(&["Alice", "Bob"])).await.unwrap();

        // One question each: the seed plus one answer hits the cap of 2
        let alice_questions = result
            .messages
            .iter()
            .filter(|m| m.author == "Alice")
            .count();
        let bob_questions = result.messages.iter().filter(|m| m.author == "Bob").count();
        assert_eq!(alice_questions, 1);
        assert_eq!(bob_questions, 1);

        // Bob's segment is introduced by exactly one separator
        let separators: Vec<_> = result
            .messages
            .iter()
            .filter(|m| m.author == SYSTEM_NAME)
            .collect();
        assert_eq!(separators.len(), 1);
        assert!(separators[0].content.contains("Bob"));

        // Each segment holds exactly two expert turns
        let sep_pos = result
            .messages
            .iter()
            .position(|m| m.author == SYSTEM_NAME)
            .unwrap();
        assert_eq!(expert_count(&result.messages[..sep_pos]), 2);
        assert_eq!(expert_count(&result.messages[sep_pos..]), 2);

        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn test_end_intent_ends_after_single_response() {
        let gateway = MockGateway {
            end_on_first_question: true,
            ..MockGateway::default()
        };
        let params = InterviewParams::default().with_max_turns(5);
        let use_case =
            ConductInterviewsUseCase::new(Arc::new(gateway), Arc::new(NoSearch), params);

        let result = use_case.execute(input(&["Alice"])).await.unwrap();

        let questions = result
            .messages
            .iter()
            .filter(|m| m.author == "Alice")
            .count();
        assert_eq!(questions, 1);
        // Seed plus exactly one generated answer, far short of the turn cap
        assert_eq!(expert_count(&result.messages), 2);
    }

    #[tokio::test]
    async fn test_serial_failure_aborts_session() {
        let gateway = MockGateway::failing_for(&["Alice"]);
        let params = InterviewParams::default().with_max_attempts(2);
        let use_case =
            ConductInterviewsUseCase::new(Arc::new(gateway), Arc::new(NoSearch), params);

        let result = use_case.execute(input(&["Alice", "Bob"])).await;
        assert!(matches!(result, Err(ConductError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_retries_exhaust_at_attempt_cap() {
        let gateway = Arc::new(MockGateway::failing_for(&["Alice"]));
        let params = InterviewParams::default().with_max_attempts(3);
        let use_case =
            ConductInterviewsUseCase::new(Arc::clone(&gateway), Arc::new(NoSearch), params);

        let result = use_case.execute(input(&["Alice"])).await;
        assert!(result.is_err());
        assert_eq!(gateway.calls(), 3);
    }

    // ==================== Parallel Mode ====================

    fn parallel_params() -> InterviewParams {
        InterviewParams::default()
            .with_parallel_interviews(true)
            .with_max_turns(2)
    }

    #[tokio::test]
    async fn test_parallel_output_follows_panel_order() {
        // Later panel members answer faster, so completion order inverts
        let names = ["Alice", "Bob", "Charlie", "Dora"];
        let delays_ms = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), (names.len() - i) as u64 * 20))
            .collect();
        let gateway = MockGateway {
            delays_ms,
            ..MockGateway::default()
        };
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(gateway),
            Arc::new(NoSearch),
            parallel_params().with_max_parallel_interviews(4),
        );

        let result = use_case.execute(input(&names)).await.unwrap();

        let separator_order: Vec<String> = result
            .messages
            .iter()
            .filter(|m| m.author == SYSTEM_NAME)
            .map(|m| {
                names
                    .iter()
                    .find(|n| m.content.contains(**n))
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(separator_order, names);
    }

    #[tokio::test]
    async fn test_parallel_respects_concurrency_ceiling() {
        let names = ["E1", "E2", "E3", "E4", "E5", "E6"];
        let delays_ms = names.iter().map(|n| (n.to_string(), 10)).collect();
        let gateway = Arc::new(MockGateway {
            delays_ms,
            ..MockGateway::default()
        });
        let use_case = ConductInterviewsUseCase::new(
            Arc::clone(&gateway),
            Arc::new(NoSearch),
            parallel_params().with_max_parallel_interviews(2),
        );

        use_case.execute(input(&names)).await.unwrap();

        assert!(
            gateway.max_active() <= 2,
            "observed {} concurrent gateway calls",
            gateway.max_active()
        );
    }

    #[tokio::test]
    async fn test_parallel_partial_failure_omits_editor() {
        let gateway = MockGateway::failing_for(&["Bob"]);
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(gateway),
            Arc::new(NoSearch),
            parallel_params().with_max_attempts(2),
        );

        let result = use_case
            .execute(input(&["Alice", "Bob", "Charlie"]))
            .await
            .unwrap();

        assert!(result.is_partial());
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].editor.name, "Bob");
        assert!(!result.messages.iter().any(|m| m.author == "Bob"));
        assert!(result.messages.iter().any(|m| m.author == "Alice"));
        assert!(result.messages.iter().any(|m| m.author == "Charlie"));
    }

    #[tokio::test]
    async fn test_parallel_all_failed_errors() {
        let gateway = MockGateway::failing_for(&["Alice", "Bob"]);
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(gateway),
            Arc::new(NoSearch),
            parallel_params().with_max_attempts(2),
        );

        let result = use_case.execute(input(&["Alice", "Bob"])).await;
        assert!(matches!(result, Err(ConductError::AllInterviewsFailed(2))));
    }

    #[tokio::test]
    async fn test_parallel_shared_source_keeps_both_copies() {
        let search = MockSearch {
            hits: vec![SearchHit::with_source(
                "https://example.org/storage",
                "grid storage overview",
            )],
        };
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(MockGateway::default()),
            Arc::new(search),
            parallel_params(),
        );

        let result = use_case.execute(input(&["Alice", "Bob"])).await.unwrap();

        assert!(result.references.contains_key("https://example.org/storage"));
        assert!(result
            .references
            .contains_key("Bob_https://example.org/storage"));
    }

    #[tokio::test]
    async fn test_prior_references_survive_merge_once() {
        let prior: BTreeMap<String, String> =
            [("upstream".to_string(), "carried over".to_string())].into();
        let use_case = ConductInterviewsUseCase::new(
            Arc::new(MockGateway::default()),
            Arc::new(NoSearch),
            parallel_params(),
        );

        let result = use_case
            .execute(input(&["Alice", "Bob"]).with_prior_references(prior))
            .await
            .unwrap();

        assert_eq!(result.references.get("upstream").unwrap(), "carried over");
        // The carried-over entry is not duplicated under editor prefixes
        assert!(!result.references.contains_key("Alice_upstream"));
        assert!(!result.references.contains_key("Bob_upstream"));
    }
}
