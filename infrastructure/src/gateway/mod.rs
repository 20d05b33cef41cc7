//! Inference gateway adapters.
//!
//! Only the deterministic scripted adapter lives here; real provider
//! adapters plug in through the same port.

pub mod scripted;

pub use scripted::ScriptedLlmGateway;
