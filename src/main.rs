//! Command-line entrypoint: summarize one PDF and print the result.
use anyhow::{Context, Result, bail};
use clap::Parser;
use pdfsummary::{
    config::{self, Config},
    extraction::PdfTextExtractor,
    logging,
    processing::SummaryPipeline,
    summarization::OpenAiSummarizationClient,
};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(
    name = "pdfsummary",
    version,
    about = "Summarize a PDF (such as a CV) with an OpenAI-compatible model"
)]
struct Cli {
    /// Path to the PDF file.
    pdf_path: PathBuf,
    /// Maximum summary length in words.
    #[arg(
        short = 'l',
        long = "max-length",
        alias = "max_length",
        default_value_t = 200,
        value_parser = parse_positive
    )]
    max_length: usize,
    /// Also write the summary to this file (UTF-8).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Chunk size in characters.
    #[arg(short = 'c', long, default_value_t = 4000, value_parser = parse_positive)]
    chunk_size: usize,
    /// OpenAI API key; overrides OPENAI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be greater than zero".into()),
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(err.to_string()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let dotenv = config::load_dotenv();
    logging::init_tracing();
    if let Err(error) = dotenv {
        tracing::warn!(error = %error, "Failed to load .env file");
    }

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.pdf_path.exists() {
        bail!("File not found: {}", cli.pdf_path.display());
    }

    let config = Config::from_env(cli.api_key).context("Configuration error")?;
    tracing::debug!(?config, "Loaded configuration");
    let client = OpenAiSummarizationClient::new(&config)?;
    let pipeline = SummaryPipeline::new(Box::new(PdfTextExtractor::new()), Box::new(client));

    let summary = pipeline
        .summarize_document(&cli.pdf_path, cli.max_length, cli.chunk_size)
        .await?;
    if summary.failed_sections() > 0 {
        tracing::warn!(
            failed = summary.failed_sections(),
            chunks = summary.chunk_count,
            "Some parts could not be summarized"
        );
    }

    println!("\n--- CV SUMMARY ---\n");
    println!("{}", summary.text);

    if let Some(output) = cli.output {
        fs::write(&output, &summary.text)
            .with_context(|| format!("Failed to write summary to {}", output.display()))?;
        tracing::info!(path = %output.display(), "Summary saved");
    }

    Ok(())
}
