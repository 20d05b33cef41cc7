//! Interview parameters — session loop control.
//!
//! [`InterviewParams`] groups the static parameters that control the
//! interview loop in
//! [`ConductInterviewsUseCase`](crate::use_cases::conduct_interviews::ConductInterviewsUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Interview loop control parameters.
///
/// Controls the per-editor turn cap, serial/parallel mode, the concurrency
/// ceiling for parallel mode, and the retry attempt cap for external calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewParams {
    /// Expert answers allowed per editor before the floor moves on.
    pub max_turns: usize,
    /// Run one conversation per editor concurrently instead of a single
    /// shared conversation walked serially.
    pub parallel_interviews: bool,
    /// How many conversations may execute at once in parallel mode.
    pub max_parallel_interviews: usize,
    /// Attempt cap for each inference/search call.
    pub max_attempts: usize,
}

impl Default for InterviewParams {
    fn default() -> Self {
        Self {
            max_turns: 3,
            parallel_interviews: false,
            max_parallel_interviews: 3,
            max_attempts: 5,
        }
    }
}

impl InterviewParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max.max(1);
        self
    }

    pub fn with_parallel_interviews(mut self, parallel: bool) -> Self {
        self.parallel_interviews = parallel;
        self
    }

    pub fn with_max_parallel_interviews(mut self, max: usize) -> Self {
        self.max_parallel_interviews = max.max(1);
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max.max(1);
        self
    }
}
