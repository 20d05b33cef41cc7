//! Session result types - immutable outputs of an interview session.
//!
//! - [`InterviewRecord`] - One editor's completed conversation
//! - [`InterviewFailure`] - One editor's unrecoverable failure
//! - [`AggregatedResult`] - The merged transcript handed downstream

use crate::conversation::message::Message;
use crate::editor::Editor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One editor's completed conversation, before merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    /// The editor this conversation belongs to
    pub editor: Editor,
    /// The conversation's message log, in turn order
    pub messages: Vec<Message>,
    /// Sources gathered while answering this editor's questions
    pub references: BTreeMap<String, String>,
}

impl InterviewRecord {
    pub fn new(
        editor: Editor,
        messages: Vec<Message>,
        references: BTreeMap<String, String>,
    ) -> Self {
        Self {
            editor,
            messages,
            references,
        }
    }
}

/// An editor whose conversation could not be completed.
///
/// Recorded against that editor only; the rest of the panel still merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewFailure {
    pub editor: Editor,
    /// Human-readable cause, typically an exhausted-retry gateway error
    pub error: String,
}

/// The merged output of one session, consumed by the document pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Combined message log, one segment per editor in panel order
    pub messages: Vec<Message>,
    /// Combined reference map; colliding keys renamed, never overwritten
    pub references: BTreeMap<String, String>,
    /// Editors whose conversations failed and were omitted from the merge
    pub failures: Vec<InterviewFailure>,
}

impl AggregatedResult {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
