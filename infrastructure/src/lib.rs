//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod search;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileEditorConfig, FileInterviewConfig};
pub use gateway::ScriptedLlmGateway;
pub use logging::JsonlConversationLogger;
pub use search::StaticSearchIndex;
