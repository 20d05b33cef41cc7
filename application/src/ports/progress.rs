//! Progress notification port
//!
//! Defines the interface for reporting interview transitions as they happen.
//! Implementations live in the outer layers and can display progress in
//! various ways (console, log file, etc.); the engine itself never prints.

use roundtable_domain::{Editor, Message, RouteDecision};

/// Callback for progress updates during an interview session
pub trait InterviewProgress: Send + Sync {
    /// Called when an editor takes the floor
    fn on_interview_start(&self, editor: &Editor);

    /// Called after the editor's question turn is generated
    fn on_question(&self, editor: &Editor, message: &Message);

    /// Called after the expert's answer turn is generated
    fn on_answer(&self, editor: &Editor, message: &Message);

    /// Called with each routing decision taken after an answer
    fn on_route(&self, _editor: &Editor, _decision: RouteDecision) {}

    /// Called when an editor's conversation finishes (or fails for good)
    fn on_interview_complete(&self, editor: &Editor, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl InterviewProgress for NoProgress {
    fn on_interview_start(&self, _editor: &Editor) {}
    fn on_question(&self, _editor: &Editor, _message: &Message) {}
    fn on_answer(&self, _editor: &Editor, _message: &Message) {}
    fn on_interview_complete(&self, _editor: &Editor, _success: bool) {}
}
