//! naf-srl: semantic role labelling support for Alpino NAF documents
//!
//! Turns dependency and constituency parses into one feature vector per
//! predicate and argument for an external classifier, and merges the
//! classifier's predictions back into the document's srl layer.

// Document model and input
pub mod ids; // Kind-tagged term, predicate and role identifiers
pub mod label; // Grammar for relation labels, ids and prediction lines
pub mod naf; // Typed reads and edits of NAF layers
pub mod source; // File and stdin input, gzip detection
pub mod tree; // Tokens, dependency edges, constituency trees
pub mod xml; // Lossless XML element tree

// Analysis (algorithm-first approach)
pub mod arguments; // Argument heads and spans
pub mod config; // Lexicon and processor metadata
pub mod constituency; // Term, head and deep categories
pub mod features; // Feature records
pub mod index; // Token and relation lookup tables
pub mod patterns; // Category and dependency patterns
pub mod predicates; // Predicate candidates, auxiliaries, voice

// End-to-end pipelines
pub mod extractor;
pub mod merge;

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use config::{Lexicon, ProcessorInfo};
pub use extractor::{Analysis, ExtractError, extract_features, extract_from_path, extract_from_str};
pub use features::FeatureRecord;
pub use ids::{IdKind, NafId};
pub use merge::{MergeError, MergeSummary, Prediction, merge_predictions};
pub use naf::{NafDocument, NafError};
pub use tree::{Document, Relation, Token};
