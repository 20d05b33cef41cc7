//! In-memory keyword search index.
//!
//! A [`SearchGateway`] over a fixed document set, matched by word overlap.
//! Stands in for a live retrieval service in demos and reproducible runs.

use async_trait::async_trait;
use roundtable_application::{SearchError, SearchGateway, SearchHit};
use std::collections::HashSet;

/// Words too common to signal relevance.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "what", "how", "are", "was", "you", "your",
    "about", "have", "from",
];

#[derive(Debug, Clone)]
struct IndexEntry {
    source_id: String,
    content: String,
}

/// Fixed-content search index matched on keyword overlap.
pub struct StaticSearchIndex {
    entries: Vec<IndexEntry>,
    max_results: usize,
}

impl StaticSearchIndex {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_results: 3,
        }
    }

    /// Add a document under a source identifier.
    pub fn with_document(
        mut self,
        source_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.entries.push(IndexEntry {
            source_id: source_id.into(),
            content: content.into(),
        });
        self
    }

    /// Cap how many hits a single query returns.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max.max(1);
        self
    }

    fn keywords(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .map(|w| w.to_lowercase())
            .filter(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str()))
            .collect()
    }
}

impl Default for StaticSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchGateway for StaticSearchIndex {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let query_words = Self::keywords(query);
        if query_words.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| {
                let overlap = Self::keywords(&entry.content)
                    .intersection(&query_words)
                    .count();
                (overlap, entry)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, entry)| SearchHit::with_source(entry.source_id.clone(), entry.content.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> StaticSearchIndex {
        StaticSearchIndex::new()
            .with_document(
                "https://example.org/storage",
                "Battery storage capacity doubled as grid demand grew",
            )
            .with_document(
                "https://example.org/policy",
                "Subsidy policy reshaped the renewable market",
            )
    }

    #[tokio::test]
    async fn test_overlapping_words_match() {
        let hits = index()
            .search("How has battery storage changed?")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].source.as_deref(),
            Some("https://example.org/storage")
        );
    }

    #[tokio::test]
    async fn test_unrelated_query_returns_nothing() {
        let hits = index().search("medieval castle architecture").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_best_overlap_ranks_first() {
        let hits = index()
            .search("storage capacity and the subsidy policy market")
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].source.as_deref(), Some("https://example.org/policy"));
    }
}
