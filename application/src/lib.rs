//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use config::InterviewParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{Completion, CompletionRequest, GatewayError, LlmGateway},
    progress::{InterviewProgress, NoProgress},
    search_gateway::{NoSearch, SearchError, SearchGateway, SearchHit},
};
pub use retry::{RetryPolicy, Transient};
pub use use_cases::conduct_interviews::{
    ConductError, ConductInterviewsInput, ConductInterviewsUseCase,
};
