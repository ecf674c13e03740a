//! Print one feature line per predicate and argument of a NAF document

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use naf_srl::{Lexicon, extractor, source};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(author, version, about = "Extract semantic role labelling features from a NAF document")]
struct Cli {
    /// NAF document, plain or gzipped; stdin when omitted
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// Morpho-feature prefix marking verbs
    #[arg(long, default_value = "WW")]
    verb_tag: String,

    /// Copula lemma
    #[arg(long, default_value = "zijn")]
    copula: String,

    /// Lemma of the passive auxiliary
    #[arg(long, default_value = "worden")]
    passive_auxiliary: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let lexicon = Lexicon {
        verb_tag: cli.verb_tag,
        copula: cli.copula,
        passive_auxiliary: cli.passive_auxiliary,
        ..Lexicon::default()
    };

    let name = cli
        .document
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let text = source::read_input(cli.document.as_deref())
        .with_context(|| format!("failed to read {name}"))?;
    let records = extractor::extract_from_str(&text, &lexicon)
        .with_context(|| format!("failed to extract features from {name}"))?;

    extractor::write_records(&records, io::stdout().lock())?;
    Ok(())
}
