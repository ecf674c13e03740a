//! Label parser
//!
//! Parses the small string languages embedded in NAF attributes and in
//! classifier output using a pest grammar: dependency relation labels,
//! kind-tagged identifiers and comma-separated prediction lines.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::ids::{IdKind, NafId};
use crate::tree::Relation;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LabelParser;

/// Error type for label parsing failures
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Label error: {0}")]
    Syntax(#[from] pest::error::Error<Rule>),

    #[error("Label error: {id} is not a {expected:?} identifier")]
    UnexpectedKind { id: String, expected: IdKind },

    #[error("Label error: ordinal out of range in {0}")]
    Ordinal(String),
}

/// Parse an identifier such as `t_12`, `pr3` or `r7`
pub fn parse_id(input: &str) -> Result<NafId, LabelError> {
    let mut pairs = LabelParser::parse(Rule::naf_id, input)?;
    let Some(id_pair) = pairs.next().and_then(|p| p.into_inner().next()) else {
        return Err(LabelError::Ordinal(input.to_string()));
    };

    let kind = match id_pair.as_rule() {
        Rule::term_id => IdKind::Term,
        Rule::predicate_id => IdKind::Predicate,
        _ => IdKind::Role,
    };

    let digits = id_pair
        .into_inner()
        .next()
        .map(|d| d.as_str())
        .unwrap_or_default();
    let ordinal = atoi::atoi::<usize>(digits.as_bytes())
        .ok_or_else(|| LabelError::Ordinal(input.to_string()))?;

    Ok(NafId::new(kind, ordinal))
}

/// Parse a relation label: `from/to`, halves trimmed
pub fn parse_relation(input: &str) -> Result<Relation, LabelError> {
    let mut pairs = LabelParser::parse(Rule::relation, input)?;
    let mut halves = pairs
        .next()
        .into_iter()
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::half)
        .map(|p| p.as_str().trim());

    // The grammar guarantees at least two halves
    let from = halves.next().unwrap_or_default();
    let to = halves.next().unwrap_or_default();

    Ok(Relation::new(from, to))
}

/// Split a prediction line into its fields
pub fn parse_prediction_fields(input: &str) -> Result<Vec<&str>, LabelError> {
    let mut pairs = LabelParser::parse(Rule::prediction_line, input)?;
    Ok(pairs
        .next()
        .into_iter()
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::field)
        .map(|p| p.as_str())
        .collect())
}
