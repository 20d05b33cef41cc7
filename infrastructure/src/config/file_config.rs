//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application/domain
//! types at the edge.
//!
//! Example configuration:
//!
//! ```toml
//! [interview]
//! max_turns = 3
//! parallel = true
//! max_parallel = 3
//! max_attempts = 5
//!
//! [[editors]]
//! name = "Alice"
//! role = "Climate Scientist"
//! affiliation = "University of Science"
//! description = "Expert in climate change research"
//! ```

use roundtable_application::InterviewParams;
use roundtable_domain::{DomainError, Editor, EditorRegistry};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Interview loop settings
    pub interview: FileInterviewConfig,
    /// Editor panel definition; empty means the caller supplies its own
    pub editors: Vec<FileEditorConfig>,
}

impl FileConfig {
    /// Convert the `[interview]` section into application parameters.
    pub fn interview_params(&self) -> InterviewParams {
        InterviewParams::default()
            .with_max_turns(self.interview.max_turns)
            .with_parallel_interviews(self.interview.parallel)
            .with_max_parallel_interviews(self.interview.max_parallel)
            .with_max_attempts(self.interview.max_attempts)
    }

    /// Build the editor panel from the `[[editors]]` tables.
    ///
    /// Returns `None` when the file defines no editors, so the caller can
    /// fall back to its own panel.
    pub fn editor_registry(&self) -> Option<Result<EditorRegistry, DomainError>> {
        if self.editors.is_empty() {
            return None;
        }
        let editors = self.editors.iter().map(|e| e.to_editor()).collect();
        Some(EditorRegistry::new(editors))
    }
}

/// Interview settings from TOML (`[interview]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInterviewConfig {
    /// Expert answers per editor before the floor moves on
    pub max_turns: usize,
    /// Run per-editor conversations concurrently
    pub parallel: bool,
    /// Concurrency ceiling for parallel mode
    pub max_parallel: usize,
    /// Retry attempts for each inference/search call
    pub max_attempts: usize,
}

impl Default for FileInterviewConfig {
    fn default() -> Self {
        let params = InterviewParams::default();
        Self {
            max_turns: params.max_turns,
            parallel: params.parallel_interviews,
            max_parallel: params.max_parallel_interviews,
            max_attempts: params.max_attempts,
        }
    }
}

/// One editor persona from TOML (`[[editors]]` table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEditorConfig {
    pub name: String,
    pub role: String,
    pub affiliation: String,
    pub description: String,
}

impl FileEditorConfig {
    pub fn to_editor(&self) -> Editor {
        Editor::new(
            self.name.clone(),
            self.role.clone(),
            self.affiliation.clone(),
            self.description.clone(),
        )
    }
}
