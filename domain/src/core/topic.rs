//! Topic value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The research topic an interview session gathers material for (Value Object)
///
/// Upstream stages validate the topic semantically; here only structural
/// presence is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    title: String,
}

impl Topic {
    /// Create a new topic
    ///
    /// Returns an error if the title is empty or only whitespace.
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::InvalidTopic(
                "title cannot be empty".to_string(),
            ));
        }
        Ok(Self { title })
    }

    /// Get the topic title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The expert's scripted opening line that seeds every conversation.
    pub fn opening_line(&self) -> String {
        format!("So you said you were writing an article on {}?", self.title)
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
