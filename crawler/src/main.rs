use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crawler::config::{CrawlConfig, ALLOWED_PREFIX, BASE_URL, DEFAULT_USER_AGENT};
use crawler::fetch::HttpFetcher;
use crawler::menu::{self, OutputFormat};
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl a site under a fixed prefix and search the words it contains")]
struct Cli {
    /// URL the crawl starts from (defaults to the allowed prefix)
    #[arg(long)]
    start: Option<String>,
    /// Only URLs starting with this prefix are crawled
    #[arg(long, default_value = ALLOWED_PREFIX)]
    allowed_prefix: String,
    /// Base that relative links are joined onto
    #[arg(long, default_value = BASE_URL)]
    base_url: String,
    /// Maximum number of pages to dispatch
    #[arg(long, default_value_t = 10_000)]
    max_pages: usize,
    /// Maximum link depth from the start page
    #[arg(long)]
    max_depth: Option<usize>,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Capacity of the event channel between crawler and index
    #[arg(long, default_value_t = 1)]
    channel_capacity: usize,
    /// Apply English stemming to indexed words and search terms
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Print search reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Search these words once the crawl finishes and exit instead of showing the menu
    #[arg(long = "search")]
    search: Vec<String>,
}

impl Cli {
    fn config(&self) -> CrawlConfig {
        CrawlConfig {
            start_url: self.start.clone().unwrap_or_else(|| self.allowed_prefix.clone()),
            allowed_prefix: self.allowed_prefix.clone(),
            base_url: self.base_url.clone(),
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            channel_capacity: self.channel_capacity,
            stem: self.stem,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Cli::parse();
    let config = args.config();
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    let mut session = crawler::spawn(&config, fetcher)?;

    if !args.search.is_empty() {
        let (stats, index) = session.finish().await?;
        tracing::info!(pages = stats.fetched, terms = index.index().num_terms(), "index ready");
        let mut stdout = std::io::stdout().lock();
        for term in &args.search {
            write!(stdout, "{}", menu::render(&index.search_word(term), format)?)?;
        }
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    menu::run(&mut session, stdin, &mut stdout, format).await
}
