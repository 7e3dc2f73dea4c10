use std::io::Write;

use anyhow::Result;
use index_core::SearchReport;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::CrawlSession;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &SearchReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string(report)?),
    })
}

/// Interactive read-eval loop over `SearchWord`. Returns on "2" or end of input.
pub async fn run<R, W>(session: &mut CrawlSession, input: R, out: &mut W, format: OutputFormat) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "\nWelcome to the Web Crawler!")?;
    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Search for a word")?;
        writeln!(out, "2. Exit")?;
        write!(out, "\nEnter your choice (1-2): ")?;
        out.flush()?;

        let Some(choice) = lines.next_line().await? else {
            writeln!(out)?;
            return Ok(());
        };
        match choice.trim() {
            "1" => {
                write!(out, "Enter search term: ")?;
                out.flush()?;
                let Some(term) = lines.next_line().await? else {
                    writeln!(out)?;
                    return Ok(());
                };
                let report = session.search_word(term.trim()).await?;
                write!(out, "\n{}", render(&report, format)?)?;
            }
            "2" => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}
