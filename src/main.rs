mod config;
mod error;
mod fetch;
mod parser;
mod pipeline;
mod sources;
mod table;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use config::Settings;
use parser::MarkupFormat;

#[derive(Parser)]
#[command(
    name = "covid_tabular",
    version,
    about = "Copy COVID-19 medical cases charts from wiki pages into tab.json tables"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every registered page and write one table per country (default)
    Run,
    /// Extract rows from a local markup file and print them as JSON
    Parse {
        /// File containing raw page markup
        file: PathBuf,
        /// Chart convention to read
        #[arg(short, long, value_enum, default_value_t = MarkupFormat::DataBlock)]
        format: MarkupFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let sources = sources::load(&cli.settings.sources)?;
            if sources.is_empty() {
                println!("No sources in {}.", cli.settings.sources.display());
                return Ok(());
            }
            let client = fetch::WikiClient::new(&cli.settings)?;
            let writer = table::TableWriter::new(&cli.settings.out_dir);

            println!("Copying {} charts into {}...", sources.len(), cli.settings.out_dir.display());
            let summary = pipeline::run(&sources, &client, &writer).await;
            summary.print();
        }
        Commands::Parse { file, format } => {
            let markup = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let json = match format {
                MarkupFormat::DataBlock => {
                    table::TableArtifact::new(parser::extract(&markup)).to_json()?
                }
                MarkupFormat::RowTemplate => {
                    let rows = parser::template::extract_template_rows(&markup);
                    serde_json::to_string_pretty(&rows)? + "\n"
                }
            };
            print!("{}", json);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
