//! Session results and the panel-order merge.

pub mod entities;
pub mod merge;

pub use entities::{AggregatedResult, InterviewFailure, InterviewRecord};
pub use merge::aggregate;
