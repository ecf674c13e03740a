//! End-to-end feature extraction
//!
//! The pipeline for one document:
//! 1. Index tokens and dependency edges
//! 2. Identify predicate candidates and resolve auxiliaries
//! 3. Collect arguments and their spans
//! 4. Categorize terms from the constituency trees
//! 5. Assemble one feature record per predicate and argument

use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::arguments::ArgumentStructure;
use crate::config::Lexicon;
use crate::constituency::ConstituencyIndex;
use crate::features::{FeatureAssembler, FeatureRecord};
use crate::index::DocumentIndex;
use crate::naf::{NafDocument, NafError};
use crate::predicates::PredicateSet;
use crate::source;
use crate::tree::Document;

/// Error extracting features from a document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read document: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Naf(#[from] NafError),
}

/// Everything computed about one document
pub struct Analysis<'a> {
    pub index: DocumentIndex<'a>,
    pub predicates: PredicateSet,
    pub arguments: ArgumentStructure,
    pub categories: ConstituencyIndex,
}

impl<'a> Analysis<'a> {
    pub fn new(document: &'a Document, lexicon: &Lexicon) -> Self {
        let index = DocumentIndex::build(document);
        let predicates = PredicateSet::resolve(&index, lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&document.trees, lexicon);
        Self {
            index,
            predicates,
            arguments,
            categories,
        }
    }

    pub fn records(&self) -> Vec<FeatureRecord> {
        FeatureAssembler {
            index: &self.index,
            predicates: &self.predicates,
            arguments: &self.arguments,
            categories: &self.categories,
        }
        .assemble()
    }
}

/// Feature records of a parsed document
pub fn extract_features(document: &Document, lexicon: &Lexicon) -> Vec<FeatureRecord> {
    let records = Analysis::new(document, lexicon).records();
    tracing::debug!(records = records.len(), "extracted feature records");
    records
}

/// Feature records of a NAF document given as text
pub fn extract_from_str(text: &str, lexicon: &Lexicon) -> Result<Vec<FeatureRecord>, ExtractError> {
    let document = NafDocument::parse(text)?.to_document(lexicon)?;
    Ok(extract_features(&document, lexicon))
}

/// Feature records of a NAF file, plain or gzipped
pub fn extract_from_path(
    path: impl AsRef<Path>,
    lexicon: &Lexicon,
) -> Result<Vec<FeatureRecord>, ExtractError> {
    extract_from_str(&source::read_path(path)?, lexicon)
}

/// Write records one per line
pub fn write_records<W: Write>(records: &[FeatureRecord], mut out: W) -> io::Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    out.flush()
}
