use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::tokenizer::Analyzer;

/// One unit of evidence that `term` appeared on the page at `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordOccurrence {
    pub term: String,
    pub url: String,
    pub count: u32,
}

impl WordOccurrence {
    pub fn once(term: impl Into<String>, url: impl Into<String>) -> Self {
        Self { term: term.into(), url: url.into(), count: 1 }
    }
}

/// URLs dispatched for crawling, kept in dispatch order.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self { Self::default() }

    /// Returns false if the URL was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.order.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool { self.seen.contains(url) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// term -> (url -> cumulative count). Counts only grow.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<String, u32>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Adds an occurrence. Empty terms and zero counts leave the index untouched.
    pub fn record(&mut self, occurrence: &WordOccurrence) {
        if occurrence.term.is_empty() || occurrence.count == 0 {
            return;
        }
        let per_url = self.postings.entry(occurrence.term.clone()).or_default();
        let slot = per_url.entry(occurrence.url.clone()).or_insert(0);
        *slot = slot.saturating_add(occurrence.count);
    }

    pub fn count(&self, term: &str, url: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|per_url| per_url.get(url))
            .copied()
            .unwrap_or(0)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn query(&self, term: &str) -> SearchOutcome {
        match self.postings.get(term) {
            Some(per_url) if !per_url.is_empty() => SearchOutcome::Found(TermReport::from_counts(per_url)),
            _ => SearchOutcome::NotFound,
        }
    }
}

/// Per-URL counts for a term, highest count first, ties broken by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermReport {
    pub per_url: Vec<(String, u32)>,
    pub total_occurrences: u64,
    pub url_count: usize,
}

impl TermReport {
    fn from_counts(per_url: &HashMap<String, u32>) -> Self {
        let mut rows: Vec<(String, u32)> = per_url.iter().map(|(u, c)| (u.clone(), *c)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let total_occurrences = rows.iter().map(|(_, c)| u64::from(*c)).sum();
        Self { url_count: rows.len(), total_occurrences, per_url: rows }
    }

    pub fn count_for(&self, url: &str) -> Option<u32> {
        self.per_url.iter().find(|(u, _)| u == url).map(|(_, c)| *c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(TermReport),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool { matches!(self, SearchOutcome::Found(_)) }

    pub fn report(&self) -> Option<&TermReport> {
        match self {
            SearchOutcome::Found(r) => Some(r),
            SearchOutcome::NotFound => None,
        }
    }
}

/// What `SearchWord` hands back to the menu: the term as typed plus the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub term: String,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results for '{}':", self.term)?;
        match &self.outcome {
            SearchOutcome::NotFound => writeln!(f, "Word '{}' not found", self.term),
            SearchOutcome::Found(report) if report.total_occurrences == 0 => {
                writeln!(f, "Word '{}' has no recorded occurrences", self.term)
            }
            SearchOutcome::Found(report) => {
                for (url, count) in &report.per_url {
                    writeln!(f, "{url}: {count}")?;
                }
                writeln!(f, "Total occurrences: {}", report.total_occurrences)?;
                writeln!(f, "Total URLs: {}", report.url_count)
            }
        }
    }
}

/// The read-only index left behind once the aggregator has seen `Done`.
#[derive(Debug, Default, Clone)]
pub struct CrawlIndex {
    index: InvertedIndex,
    visited: VisitedSet,
    analyzer: Analyzer,
}

impl CrawlIndex {
    pub fn new(index: InvertedIndex, visited: VisitedSet, analyzer: Analyzer) -> Self {
        Self { index, visited, analyzer }
    }

    /// Exact lookup of an already-canonical term.
    pub fn query(&self, term: &str) -> SearchOutcome { self.index.query(term) }

    /// Trims and analyzes `raw` the same way page text was analyzed, then looks it up.
    pub fn search_word(&self, raw: &str) -> SearchReport {
        search_with(&self.index, &self.analyzer, raw)
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn visited(&self) -> &VisitedSet { &self.visited }
}

pub(crate) fn search_with(index: &InvertedIndex, analyzer: &Analyzer, raw: &str) -> SearchReport {
    let term = raw.trim();
    let outcome = match analyzer.analyze(term) {
        Some(canonical) => index.query(&canonical),
        None => SearchOutcome::NotFound,
    };
    SearchReport { term: term.to_string(), outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_insert_is_idempotent() {
        let mut v = VisitedSet::new();
        assert!(v.insert("https://a/"));
        assert!(!v.insert("https://a/"));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn zero_total_formats_distinctly() {
        let report = SearchReport {
            term: "ghost".into(),
            outcome: SearchOutcome::Found(TermReport { per_url: vec![], total_occurrences: 0, url_count: 0 }),
        };
        let text = report.to_string();
        assert!(text.contains("no recorded occurrences"));
        assert!(!text.contains("not found"));
    }
}
