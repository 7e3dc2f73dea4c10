use std::collections::HashSet;

use index_core::{Analyzer, IndexHandle, WordOccurrence};

use crate::extract::extract;
use crate::fetch::Fetch;
use crate::resolve::UrlScope;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub dispatched: usize,
    pub fetched: usize,
    pub failed: usize,
    pub occurrences: u64,
    pub skipped_disallowed: usize,
    pub budget_exhausted: bool,
}

/// Depth-first crawler confined to a [`UrlScope`].
///
/// Recursion is replaced by an explicit stack: children are pushed in
/// reverse so they are visited in link order. A URL is marked visited
/// locally and reported to the aggregator before it is fetched; a URL that
/// is already visited is never dispatched again.
///
/// `max_depth` limits the length of the link path along which a page was
/// *first* reached. A page first found through a long path keeps that
/// depth even if a shorter path to it turns up later, so its children may
/// be cut off although they are within the limit by the shorter path.
pub struct Traversal<F> {
    fetcher: F,
    scope: UrlScope,
    analyzer: Analyzer,
    sink: IndexHandle,
    max_pages: usize,
    max_depth: Option<usize>,
}

impl<F: Fetch> Traversal<F> {
    pub fn new(fetcher: F, scope: UrlScope, analyzer: Analyzer, sink: IndexHandle) -> Self {
        Self { fetcher, scope, analyzer, sink, max_pages: usize::MAX, max_depth: None }
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub async fn run(&self, start: &str) -> CrawlStats {
        let mut stats = CrawlStats::default();
        if !self.scope.is_allowed(start) {
            tracing::warn!(url = start, "start url is outside the allowed prefix, nothing to crawl");
            stats.skipped_disallowed += 1;
            return stats;
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut stack: Vec<(String, usize)> = vec![(start.to_string(), 0)];

        while let Some((url, depth)) = stack.pop() {
            if visited.contains(&url) {
                continue;
            }
            if stats.dispatched >= self.max_pages {
                tracing::info!(max_pages = self.max_pages, pending = stack.len() + 1, "page budget exhausted");
                stats.budget_exhausted = true;
                break;
            }
            visited.insert(url.clone());
            stats.dispatched += 1;
            if self.sink.emit_visited(&url).await.is_err() {
                break;
            }

            let body = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "error fetching page");
                    stats.failed += 1;
                    continue;
                }
            };
            stats.fetched += 1;

            let page = extract(&body);
            let (links, rejected) = self.scope.admit(&page.links);
            stats.skipped_disallowed += rejected;

            let mut words = 0u64;
            for term in self.analyzer.tokens(&page.text) {
                if self.sink.emit_occurrence(WordOccurrence::once(term, url.as_str())).await.is_err() {
                    return stats;
                }
                words += 1;
            }
            stats.occurrences += words;
            tracing::info!(%url, depth, words, links = links.len(), rejected, "crawled page");

            if self.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for link in links.into_iter().rev() {
                if !visited.contains(&link) {
                    stack.push((link, depth + 1));
                }
            }
        }

        stats
    }
}
