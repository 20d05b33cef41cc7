//! LLM Gateway port
//!
//! Defines the interface for generating conversation turns through an
//! inference provider. Implementations (adapters) live in the infrastructure
//! layer.

use crate::retry::Transient;
use async_trait::async_trait;
use roundtable_domain::{EndIntent, Message};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Transient for GatewayError {
    /// Provider hiccups are worth re-executing; a malformed response or an
    /// unclassified error is not.
    fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_)
                | GatewayError::RequestFailed(_)
                | GatewayError::Timeout
                | GatewayError::TransportClosed
        )
    }
}

/// One turn-generation request.
///
/// `messages` is the transcript already normalized to the upcoming speaker's
/// point of view. Exactly one of the context fields is set: `persona` for an
/// editor question turn, `references` (a formatted source digest) for an
/// expert answer turn.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub messages: &'a [Message],
    pub persona: Option<&'a str>,
    pub references: Option<&'a str>,
}

/// The generated turn.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Present when the provider produced structured output alongside the
    /// text; absent on plain-text fallback.
    pub end_intent: Option<EndIntent>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_intent: None,
        }
    }

    pub fn with_end_intent(text: impl Into<String>, wants_to_end: bool, reason: Option<String>) -> Self {
        Self {
            text: text.into(),
            end_intent: Some(EndIntent {
                wants_to_end,
                reason,
            }),
        }
    }
}

/// Gateway for turn generation
///
/// This port defines how the application layer reaches the inference
/// provider. Calls may fail transiently; the use case wraps them in a retry
/// policy.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate the next turn for whichever speaker the request represents.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, GatewayError>;
}
