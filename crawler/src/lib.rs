pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod menu;
pub mod resolve;
pub mod traverse;

use index_core::{Analyzer, CrawlIndex, IndexHandle, SearchReport};
use tokio::task::JoinHandle;

use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::fetch::Fetch;
use crate::traverse::{CrawlStats, Traversal};

/// A crawl running in the background alongside its aggregator.
pub struct CrawlSession {
    handle: IndexHandle,
    crawl: JoinHandle<CrawlStats>,
    aggregator: Option<JoinHandle<CrawlIndex>>,
    frozen: Option<CrawlIndex>,
}

/// Validate `config`, spawn the aggregator and the traversal, and return
/// immediately. `Done` is sent exactly once, after the traversal returns.
pub fn spawn<F>(config: &CrawlConfig, fetcher: F) -> Result<CrawlSession, ConfigError>
where
    F: Fetch + Send + Sync + 'static,
{
    config.validate()?;
    let analyzer = Analyzer::new(config.stem);
    let (handle, aggregator) = index_core::channel(config.channel_capacity, analyzer);
    let aggregator = tokio::spawn(aggregator.run());

    let traversal = Traversal::new(fetcher, config.scope(), analyzer, handle.clone())
        .max_pages(config.max_pages)
        .max_depth(config.max_depth);
    let stem = analyzer.stems();
    let start = config.start_url.clone();
    let sink = handle.clone();
    let crawl = tokio::spawn(async move {
        tracing::info!(%start, stem, "crawl started");
        let stats = traversal.run(&start).await;
        let _ = sink.done().await;
        tracing::info!(
            dispatched = stats.dispatched,
            fetched = stats.fetched,
            failed = stats.failed,
            occurrences = stats.occurrences,
            "crawl finished"
        );
        stats
    });

    Ok(CrawlSession { handle, crawl, aggregator: Some(aggregator), frozen: None })
}

/// Crawl to completion and return the frozen index.
pub async fn start<F>(config: &CrawlConfig, fetcher: F) -> anyhow::Result<(CrawlStats, CrawlIndex)>
where
    F: Fetch + Send + Sync + 'static,
{
    let session = spawn(config, fetcher)?;
    session.finish().await
}

impl CrawlSession {
    pub fn is_finished(&self) -> bool {
        self.frozen.is_some() || self.aggregator.as_ref().is_some_and(|a| a.is_finished())
    }

    /// `SearchWord`: answered by the live aggregator while the crawl runs,
    /// by the frozen index afterwards.
    pub async fn search_word(&mut self, term: &str) -> anyhow::Result<SearchReport> {
        if !self.is_finished() && !self.handle.is_closed() {
            if let Ok(report) = self.handle.search_word(term).await {
                return Ok(report);
            }
        }
        Ok(self.frozen().await?.search_word(term))
    }

    pub async fn finish(mut self) -> anyhow::Result<(CrawlStats, CrawlIndex)> {
        let stats = (&mut self.crawl).await?;
        self.frozen().await?;
        let index = self.frozen.take().unwrap_or_default();
        Ok((stats, index))
    }

    async fn frozen(&mut self) -> anyhow::Result<&CrawlIndex> {
        if self.frozen.is_none() {
            let index = match self.aggregator.take() {
                Some(task) => task.await?,
                None => CrawlIndex::default(),
            };
            self.frozen = Some(index);
        }
        Ok(self.frozen.get_or_insert_with(CrawlIndex::default))
    }
}
