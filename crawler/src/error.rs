use thiserror::Error;

/// Why a single page could not be fetched. Always recovered by the
/// traversal: the page's subtree is skipped and the crawl moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("reading body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} is not a valid absolute url: {value}")]
    BadUrl { field: &'static str, value: String },

    #[error("start url {start} lies outside the allowed prefix {prefix}")]
    StartNotAllowed { start: String, prefix: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}
