//! Built-in demo panel and scripted collaborators.
//!
//! Used when no config file defines an editor panel, so the binary runs a
//! complete reproducible session out of the box.

use roundtable_domain::{Editor, EditorRegistry, Topic};
use roundtable_infrastructure::{ScriptedLlmGateway, StaticSearchIndex};

/// Three stock perspectives covering science, policy, and economics.
pub fn demo_panel() -> EditorRegistry {
    let editors = vec![
        Editor::new(
            "Alice",
            "Climate Scientist",
            "University of Science",
            "Focuses on the measurable environmental impact and the state of the research",
        ),
        Editor::new(
            "Bob",
            "Policy Analyst",
            "Civic Think Tank",
            "Focuses on regulation, incentives, and how governments shaped the field",
        ),
        Editor::new(
            "Carol",
            "Economics Correspondent",
            "Business Weekly",
            "Focuses on costs, markets, and who pays for the transition",
        ),
    ];
    EditorRegistry::new(editors).unwrap_or_else(|_| {
        EditorRegistry::single(Editor::new("Alice", "Editor", "Newsroom", "General coverage"))
    })
}

/// Scripted questions per demo editor, angled by their role.
pub fn scripted_gateway(registry: &EditorRegistry, topic: &Topic) -> ScriptedLlmGateway {
    let mut gateway = ScriptedLlmGateway::new();
    for editor in registry.iter() {
        gateway = gateway.with_script(
            editor.name.clone(),
            vec![
                format!(
                    "As a {}, I'd like to start broad: what should readers know first about {}?",
                    editor.role, topic
                ),
                format!(
                    "Could you go deeper on the {} angle - what do people usually get wrong?",
                    editor.role.to_lowercase()
                ),
                "What would you point me to if I wanted to verify that?".to_string(),
            ],
        );
    }
    gateway
}

/// A small document set for the expert to draw on.
pub fn search_index() -> StaticSearchIndex {
    StaticSearchIndex::new()
        .with_document(
            "https://example.org/renewables-overview",
            "Renewable energy capacity grew faster than any other generation source over the last decade",
        )
        .with_document(
            "https://example.org/policy-history",
            "Feed-in tariffs and subsidy programs drove early solar and wind adoption in Europe",
        )
        .with_document(
            "https://example.org/cost-curves",
            "Solar module costs fell roughly ninety percent, reshaping energy market economics",
        )
}
