//! Editor domain entities

use crate::util::sanitize_name;
use serde::{Deserialize, Serialize};

/// A simulated editor persona with a specific viewpoint (Entity)
///
/// Editors are created once per session from upstream perspective data and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    pub name: String,
    pub role: String,
    pub affiliation: String,
    pub description: String,
}

impl Editor {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        affiliation: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            affiliation: affiliation.into(),
            description: description.into(),
        }
    }

    /// The formatted persona block handed to the question model as context.
    pub fn persona(&self) -> String {
        format!(
            "Name: {}\nRole: {}\nAffiliation: {}\nDescription: {}\n",
            self.name, self.role, self.affiliation, self.description
        )
    }

    /// API-safe author label used on this editor's messages.
    pub fn author_label(&self) -> String {
        sanitize_name(&self.name)
    }
}

impl std::fmt::Display for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_format() {
        let editor = Editor::new(
            "Alice",
            "Climate Scientist",
            "University of Science",
            "Expert in climate change research",
        );
        assert_eq!(
            editor.persona(),
            "Name: Alice\nRole: Climate Scientist\nAffiliation: University of Science\nDescription: Expert in climate change research\n"
        );
    }

    #[test]
    fn test_author_label_sanitized() {
        let editor = Editor::new("Dr. Jane Smith", "Analyst", "Think Tank", "Policy");
        assert_eq!(editor.author_label(), "Dr__Jane_Smith");
    }
}
