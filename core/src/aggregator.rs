//! Single-writer owner of the inverted index and the visited set.
//!
//! Nothing else holds a reference to the index while a crawl runs. Writers
//! and readers talk to the [`Aggregator`] through one bounded channel, so
//! occurrences, visits and queries are applied in the order they were sent.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::index::{search_with, CrawlIndex, InvertedIndex, SearchReport, VisitedSet, WordOccurrence};
use crate::tokenizer::Analyzer;

#[derive(Debug)]
pub enum IndexEvent {
    Occurrence(WordOccurrence),
    Visited(String),
    Query { term: String, reply: oneshot::Sender<SearchReport> },
    Done,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("aggregator has stopped accepting events")]
pub struct AggregatorClosed;

/// Build a connected handle/aggregator pair. `capacity` must be at least 1.
pub fn channel(capacity: usize, analyzer: Analyzer) -> (IndexHandle, Aggregator) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let aggregator = Aggregator {
        rx,
        index: InvertedIndex::new(),
        visited: VisitedSet::new(),
        analyzer,
    };
    (IndexHandle { tx }, aggregator)
}

pub struct Aggregator {
    rx: mpsc::Receiver<IndexEvent>,
    index: InvertedIndex,
    visited: VisitedSet,
    analyzer: Analyzer,
}

impl Aggregator {
    /// Consume events until `Done` (or until every handle is dropped) and
    /// hand back the frozen index.
    pub async fn run(mut self) -> CrawlIndex {
        let mut occurrences: u64 = 0;
        while let Some(event) = self.rx.recv().await {
            match event {
                IndexEvent::Occurrence(occ) => {
                    if occ.term.is_empty() {
                        continue;
                    }
                    self.index.record(&occ);
                    occurrences += 1;
                }
                IndexEvent::Visited(url) => {
                    if self.visited.insert(&url) {
                        tracing::debug!(%url, "visited");
                    }
                }
                IndexEvent::Query { term, reply } => {
                    let report = search_with(&self.index, &self.analyzer, &term);
                    // the asker may have given up; nothing to do then
                    let _ = reply.send(report);
                }
                IndexEvent::Done => break,
            }
        }
        self.rx.close();
        while let Ok(late) = self.rx.try_recv() {
            tracing::warn!(event = ?late, "event received after crawl completion, dropped");
        }
        tracing::info!(
            terms = self.index.num_terms(),
            visited = self.visited.len(),
            occurrences,
            "index aggregation complete"
        );
        CrawlIndex::new(self.index, self.visited, self.analyzer)
    }
}

/// Cloneable sending side used by the traversal engine and the menu.
#[derive(Clone)]
pub struct IndexHandle {
    tx: mpsc::Sender<IndexEvent>,
}

impl IndexHandle {
    pub async fn emit_occurrence(&self, occurrence: WordOccurrence) -> Result<(), AggregatorClosed> {
        self.send(IndexEvent::Occurrence(occurrence)).await
    }

    pub async fn emit_visited(&self, url: &str) -> Result<(), AggregatorClosed> {
        self.send(IndexEvent::Visited(url.to_string())).await
    }

    /// Signal the end of the crawl. Sending it twice is harmless: the
    /// second one finds the channel closed.
    pub async fn done(&self) -> Result<(), AggregatorClosed> {
        self.send(IndexEvent::Done).await
    }

    /// `SearchWord` while the crawl is still running, serialized with writes.
    pub async fn search_word(&self, term: &str) -> Result<SearchReport, AggregatorClosed> {
        let (reply, answer) = oneshot::channel();
        self.send(IndexEvent::Query { term: term.to_string(), reply }).await?;
        answer.await.map_err(|_| AggregatorClosed)
    }

    pub fn is_closed(&self) -> bool { self.tx.is_closed() }

    async fn send(&self, event: IndexEvent) -> Result<(), AggregatorClosed> {
        self.tx.send(event).await.map_err(|rejected| {
            tracing::warn!(event = ?rejected.0, "aggregator closed, event dropped");
            AggregatorClosed
        })
    }
}
