use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docent_core::Config;
use docent_core::bootstrap::{
    build_engine, create_provider, health_check, load_or_build_index, rebuild_index,
};
use docent_core::context::{clean, format_passage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "docent", version, about = "Answer questions from your own documents")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "DOCENT_CONFIG", default_value = "config/default.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest the configured documents and write a fresh index snapshot
    Ingest,
    /// Answer a single question
    Ask { question: String },
    /// Show the passages retrieved for a query
    Search {
        query: String,
        #[arg(long)]
        top_k: Option<usize>,
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f32>,
    },
    /// Answer questions read line by line from stdin
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let provider = Arc::new(create_provider(&config));
    health_check(&provider).await;

    if matches!(cli.command, Command::Ingest) {
        let index = rebuild_index(&config, provider).await?;
        println!(
            "indexed {} chunks into {}",
            index.len(),
            config.index.path.display()
        );
        return Ok(());
    }

    let index = load_or_build_index(&config, Arc::clone(&provider)).await?;
    let engine = build_engine(&config, provider, index);

    match cli.command {
        Command::Ingest => {}
        Command::Ask { question } => {
            let answer = engine.answer(&question).await?;
            println!("{answer}");
        }
        Command::Search {
            query,
            top_k,
            threshold,
        } => {
            let hits = engine
                .search(
                    &query,
                    top_k.unwrap_or(config.retrieval.top_k),
                    threshold.unwrap_or(config.retrieval.similarity_threshold),
                )
                .await?;
            if hits.is_empty() {
                println!("no passages matched");
            }
            for hit in hits {
                println!(
                    "[{:.4}] {} p.{}",
                    hit.score,
                    hit.chunk.source_file().unwrap_or("?"),
                    hit.chunk.page_number().unwrap_or("?")
                );
                println!("{}\n", clean(&format_passage(&hit.chunk, hit.score)));
            }
        }
        Command::Chat => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut stdout = tokio::io::stdout();
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
                let question = line.trim();
                if matches!(question, "exit" | "quit") {
                    break;
                }
                if !question.is_empty() {
                    match engine.answer(question).await {
                        Ok(answer) => stdout.write_all(format!("{answer}\n").as_bytes()).await?,
                        Err(e) => tracing::error!("query failed: {e:#}"),
                    }
                }
                stdout.write_all(b"> ").await?;
                stdout.flush().await?;
            }
        }
    }

    Ok(())
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
