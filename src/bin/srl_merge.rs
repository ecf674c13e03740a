//! Merge predicted semantic roles into a NAF document

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use naf_srl::{NafDocument, ProcessorInfo, merge, source};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(author, version, about = "Add predicted semantic roles to the srl layer of a NAF document")]
struct Cli {
    /// NAF document, plain or gzipped
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Prediction lines: predicate, head, span start, span end, ..., label
    #[arg(value_name = "PREDICTIONS")]
    predictions: PathBuf,

    /// Processor name recorded in the header
    #[arg(long, default_value = "SoNaR-News-trained-SRL")]
    name: String,

    /// Processor version recorded in the header
    #[arg(long, default_value = "1.1")]
    version_tag: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let info = ProcessorInfo {
        name: cli.name,
        version: cli.version_tag,
        ..ProcessorInfo::default()
    };

    let text = source::read_path(&cli.document)
        .with_context(|| format!("failed to read {}", cli.document.display()))?;
    let predictions = source::read_path(&cli.predictions)
        .with_context(|| format!("failed to read {}", cli.predictions.display()))?;

    let mut document = NafDocument::parse(&text)
        .with_context(|| format!("failed to parse {}", cli.document.display()))?;
    let summary = merge::annotate(&mut document, &predictions, &info)
        .with_context(|| format!("failed to merge {}", cli.predictions.display()))?;
    tracing::info!(
        predicates = summary.predicates,
        roles = summary.roles,
        "merged predictions"
    );

    document.write_to(io::stdout().lock())?;
    Ok(())
}
