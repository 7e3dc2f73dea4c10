use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::resolve::UrlScope;

pub const ALLOWED_PREFIX: &str = "https://usf-cs272-s25.github.io/top10/";
pub const BASE_URL: &str = "https://usf-cs272-s25.github.io";
pub const DEFAULT_USER_AGENT: &str = "crawler-rs/0.1 (+https://usf-cs272-s25.github.io)";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    /// Only URLs starting with this string are fetched.
    pub allowed_prefix: String,
    /// Relative links are joined onto this.
    pub base_url: String,
    /// Hard cap on dispatched pages.
    pub max_pages: usize,
    /// Depth of the path a page was first reached by; `None` means unlimited.
    pub max_depth: Option<usize>,
    pub timeout: Duration,
    pub user_agent: String,
    pub channel_capacity: usize,
    pub stem: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: ALLOWED_PREFIX.to_string(),
            allowed_prefix: ALLOWED_PREFIX.to_string(),
            base_url: BASE_URL.to_string(),
            max_pages: 10_000,
            max_depth: None,
            timeout: Duration::from_secs(12),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            channel_capacity: 1,
            stem: false,
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("start url", &self.start_url), ("base url", &self.base_url)] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::BadUrl { field, value: value.clone() });
            }
        }
        if !self.scope().is_allowed(&self.start_url) {
            return Err(ConfigError::StartNotAllowed {
                start: self.start_url.clone(),
                prefix: self.allowed_prefix.clone(),
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Zero("max pages"));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Zero("channel capacity"));
        }
        Ok(())
    }

    pub fn scope(&self) -> UrlScope {
        UrlScope::new(&self.base_url, &self.allowed_prefix)
    }
}
