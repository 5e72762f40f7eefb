//! Command-line entry point for the medical Q&A pipeline.
//!
//! `medrag setup [data_dir]` forces a full rebuild of the persisted
//! collection; `medrag` with no arguments opens (or builds) the index and
//! starts an interactive question loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use medrag::openai::{OpenAIChatProvider, OpenAIEmbeddingProvider};
use medrag::{
    EmbeddingIndex, JsonFileVectorStore, RagConfig, RagPipeline, RecursiveChunker, Retriever,
};

const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Parser)]
#[command(name = "medrag", about = "Medical question answering over a local document corpus")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the vector collection from a directory of .txt documents.
    Setup {
        /// Directory containing the document corpus.
        #[arg(default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = RagConfig::from_env()?;

    // Missing credential is a startup failure, never a mid-session one.
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .context("OPENAI_API_KEY is not set; add it to the environment or a .env file")?;

    let embedding = Arc::new(OpenAIEmbeddingProvider::new(&api_key, &config.embedding_model)?);
    let store = Arc::new(JsonFileVectorStore::new(&config.store_path));
    let index = Arc::new(EmbeddingIndex::new(embedding, store, &config.collection));
    let chunker = Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap));
    let retriever = Retriever::new(index, chunker);

    match cli.command {
        Some(Command::Setup { data_dir }) => {
            let chunk_count = retriever.rebuild(&data_dir).await?;
            println!("Indexed {chunk_count} chunks from {}", data_dir.display());
            Ok(())
        }
        None => {
            retriever.initialize(DEFAULT_DATA_DIR).await.context(
                "failed to prepare the index; add documents to ./data or run `medrag setup`",
            )?;

            let generation = Arc::new(OpenAIChatProvider::new(&api_key, &config.llm_model)?);
            let pipeline = RagPipeline::new(retriever, generation, config.top_k);
            run_interactive(pipeline).await
        }
    }
}

/// Read questions from the terminal until an exit keyword or end-of-input.
///
/// Collaborator failures are reported per turn; the session keeps going.
async fn run_interactive(pipeline: RagPipeline) -> anyhow::Result<()> {
    println!("Medical QnA — ask a question, or 'quit' to leave.");

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("\nYour question: ") {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
                    println!("Goodbye!");
                    break;
                }
                let _ = editor.add_history_entry(question);

                match pipeline.answer(question).await {
                    Ok(result) => {
                        println!("\nAnswer: {}", result.answer);
                        if !result.sources.is_empty() {
                            println!("Sources: {}", result.sources.join(", "));
                        }
                    }
                    Err(e) => println!("\nError: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
