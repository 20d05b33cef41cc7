//! Search Gateway port
//!
//! Retrieval of supporting material for expert answers. Providers return
//! hits in several shapes — with a source identifier or as bare text — so
//! the hit type normalizes both at this boundary.

use crate::retry::Transient;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl Transient for SearchError {
    fn is_transient(&self) -> bool {
        matches!(self, SearchError::RequestFailed(_) | SearchError::Timeout)
    }
}

/// One retrieved document.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Source identifier (typically a URL); `None` for bare-text results,
    /// which get a synthetic key when stored
    pub source: Option<String>,
    pub content: String,
}

impl SearchHit {
    pub fn with_source(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            content: content.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            source: None,
            content: content.into(),
        }
    }
}

/// Gateway for context retrieval
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// No-op search for sessions that answer from conversation context alone.
pub struct NoSearch;

#[async_trait]
impl SearchGateway for NoSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        Ok(Vec::new())
    }
}
