use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::SourceError;
use crate::fetch::PageSource;
use crate::parser;
use crate::sources::SourceEntry;
use crate::table::{TableArtifact, TableSink};

/// What happened to one source entry.
#[derive(Debug)]
pub enum Outcome {
    Written {
        country_code: String,
        rows: usize,
        path: PathBuf,
    },
    Skipped {
        country_code: String,
        reason: SourceError,
    },
}

/// Outcomes of a run, in registry order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    pub fn print(&self) {
        println!(
            "Done: {} sources ({} written, {} skipped).",
            self.outcomes.len(),
            self.written(),
            self.skipped()
        );
        for outcome in &self.outcomes {
            match outcome {
                Outcome::Written {
                    country_code,
                    rows,
                    path,
                } => println!("  {:<4} {:>5} rows  {}", country_code, rows, path.display()),
                Outcome::Skipped {
                    country_code,
                    reason,
                } => println!("  {:<4} skipped  {}", country_code, reason),
            }
        }
    }
}

/// Fetch, parse and write every source, one after another.
///
/// A failure for one entry is logged and recorded; the run always goes on to
/// the next entry. Nothing is retried.
pub async fn run<P, W>(sources: &[SourceEntry], pages: &P, sink: &W) -> RunSummary
where
    P: PageSource,
    W: TableSink,
{
    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut summary = RunSummary::default();
    for entry in sources {
        pb.set_message(entry.country_code.clone());
        let outcome = match process_one(entry, pages, sink).await {
            Ok((rows, path)) => {
                info!("{}: wrote {} rows to {}", entry.country_code, rows, path.display());
                Outcome::Written {
                    country_code: entry.country_code.clone(),
                    rows,
                    path,
                }
            }
            Err(e) => {
                warn!("{}: skipped: {}", entry.country_code, e);
                Outcome::Skipped {
                    country_code: entry.country_code.clone(),
                    reason: e,
                }
            }
        };
        summary.outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Run finished: {} written, {} skipped",
        summary.written(),
        summary.skipped()
    );
    summary
}

async fn process_one<P, W>(
    entry: &SourceEntry,
    pages: &P,
    sink: &W,
) -> Result<(usize, PathBuf), SourceError>
where
    P: PageSource,
    W: TableSink,
{
    info!("Getting data for {} from {}", entry.country_code, entry.page);
    let markup = pages.fetch_page(&entry.page).await?;

    let rows = parser::extract(&markup);
    if rows.is_empty() {
        warn!("{}: no data block found in {}", entry.country_code, entry.page);
    }

    let count = rows.len();
    let path = sink.write_table(&entry.country_code, &TableArtifact::new(rows))?;
    Ok((count, path))
}
