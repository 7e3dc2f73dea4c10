pub mod aggregator;
pub mod index;
pub mod tokenizer;

pub use aggregator::{channel, Aggregator, AggregatorClosed, IndexEvent, IndexHandle};
pub use index::{CrawlIndex, InvertedIndex, SearchOutcome, SearchReport, TermReport, VisitedSet, WordOccurrence};
pub use tokenizer::{normalize, Analyzer};
