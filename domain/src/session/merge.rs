//! Panel-order merge of independently completed conversations.

use crate::conversation::message::Message;
use crate::editor::EditorRegistry;
use crate::session::entities::{AggregatedResult, InterviewFailure, InterviewRecord};
use std::collections::BTreeMap;

/// Merge per-editor conversations into one ordered result.
///
/// Records may arrive in any completion order; output segments always follow
/// the panel order of `registry`. Each segment is introduced by a separator
/// naming its editor. Reference keys that collide with an already-inserted
/// key are renamed with the editor's name as prefix, so no content is ever
/// lost to an overwrite.
///
/// Failed editors contribute no segment; their failure records ride along on
/// the result so downstream stages can see what is missing.
pub fn aggregate(
    registry: &EditorRegistry,
    base_references: BTreeMap<String, String>,
    records: Vec<InterviewRecord>,
    failures: Vec<InterviewFailure>,
) -> AggregatedResult {
    let mut messages = Vec::new();
    let mut references = base_references;

    for editor in registry.iter() {
        let Some(record) = records.iter().find(|r| r.editor.name == editor.name) else {
            continue;
        };

        messages.push(Message::separator(&editor.name));
        messages.extend(record.messages.iter().cloned());

        for (key, content) in &record.references {
            let final_key = if references.contains_key(key) {
                format!("{}_{}", editor.name, key)
            } else {
                key.clone()
            };
            references.insert(final_key, content.clone());
        }
    }

    AggregatedResult {
        messages,
        references,
        failures,
    }
}
