//! Lexical constants and processor metadata
//!
//! The heuristics are tuned for Dutch Alpino output; the constants are
//! gathered here so the command-line tools can override them.

use chrono::{SecondsFormat, Utc};

/// Placeholder written for any feature without a value
pub const PLACEHOLDER: &str = "#";

/// Word lists and tags the analysis keys on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Morpho-feature prefix marking a verb
    pub verb_tag: String,
    /// Copula lemma; decides auxiliary direction and marks passive voice
    pub copula: String,
    /// Lemma of the passive auxiliary
    pub passive_auxiliary: String,
    /// Category of a main clause node in the constituency tree
    pub clause_category: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            verb_tag: "WW".to_string(),
            copula: "zijn".to_string(),
            passive_auxiliary: "worden".to_string(),
            clause_category: "smain".to_string(),
        }
    }
}

impl Lexicon {
    /// An auxiliary with this lemma makes its main verb passive
    pub fn is_passive_auxiliary(&self, lemma: &str) -> bool {
        lemma == self.passive_auxiliary || lemma == self.copula
    }
}

/// Linguistic processor record written into the NAF header by the merger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorInfo {
    pub layer: String,
    pub name: String,
    pub version: String,
}

impl Default for ProcessorInfo {
    fn default() -> Self {
        Self {
            layer: "srl".to_string(),
            name: "SoNaR-News-trained-SRL".to_string(),
            version: "1.1".to_string(),
        }
    }
}

impl ProcessorInfo {
    /// Current time in the NAF header format, e.g. `2014-09-27T10:00:00Z`
    pub fn timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
