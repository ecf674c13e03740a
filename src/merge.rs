//! Merging predicted roles into the srl layer
//!
//! Each prediction line names a predicate term, an argument head, the first
//! and last term of the argument span and, in its last field, the predicted
//! role. Roles are attached to the existing predicate covering the predicate
//! term, or to a new predicate created for it. New ids continue after the
//! highest ids already in the document.

use thiserror::Error;

use crate::config::ProcessorInfo;
use crate::ids::{IdKind, NafId};
use crate::label::{LabelError, parse_prediction_fields};
use crate::naf::{NafDocument, NafError, Predicate, Role, Target};

/// Fields before the label: predicate, head, span start, span end
const MIN_FIELDS: usize = 5;

/// Error merging predictions
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("prediction line {line}: {source}")]
    Label { line: usize, source: LabelError },

    #[error("prediction line {line}: expected at least five fields, found {found}")]
    TooFewFields { line: usize, found: usize },

    #[error(transparent)]
    Naf(#[from] NafError),
}

/// One classifier prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub predicate: NafId,
    pub head: NafId,
    pub span_start: NafId,
    pub span_end: NafId,
    pub label: String,
}

impl Prediction {
    /// Parse a prediction line; `line` is only used for error messages
    pub fn parse(text: &str, line: usize) -> Result<Self, MergeError> {
        let label_error = |source| MergeError::Label { line, source };

        let fields: Vec<&str> = parse_prediction_fields(text)
            .map_err(label_error)?
            .into_iter()
            .map(str::trim)
            .collect();
        if fields.len() < MIN_FIELDS {
            return Err(MergeError::TooFewFields {
                line,
                found: fields.len(),
            });
        }

        let term = |field: &str| NafId::parse_as(field, IdKind::Term).map_err(label_error);
        Ok(Self {
            predicate: term(fields[0])?,
            head: term(fields[1])?,
            span_start: term(fields[2])?,
            span_end: term(fields[3])?,
            label: fields[fields.len() - 1].to_string(),
        })
    }

    /// Every term from span start to span end, the head flagged
    pub fn role_span(&self) -> Vec<Target> {
        let (first, last) = if self.span_start <= self.span_end {
            (self.span_start, self.span_end)
        } else {
            (self.span_end, self.span_start)
        };
        (first.ordinal()..=last.ordinal())
            .map(NafId::term)
            .map(|id| {
                if id == self.head {
                    Target::head(id)
                } else {
                    Target::new(id)
                }
            })
            .collect()
    }
}

/// What a merge added to the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub predicates: usize,
    pub roles: usize,
}

/// Adds predictions to one document, keeping id counters between lines
pub struct Merger<'d> {
    document: &'d mut NafDocument,
    /// Predicate id and span terms, in document order
    spans: Vec<(NafId, Vec<NafId>)>,
    last_predicate: usize,
    last_role: usize,
    summary: MergeSummary,
}

impl<'d> Merger<'d> {
    pub fn new(document: &'d mut NafDocument) -> Result<Self, MergeError> {
        let predicates = document.predicates()?;

        let last_predicate = predicates.iter().map(|p| p.id.ordinal()).max().unwrap_or(0);
        let last_role = predicates
            .iter()
            .flat_map(|p| &p.roles)
            .map(|r| r.id.ordinal())
            .max()
            .unwrap_or(0);
        let spans = predicates
            .into_iter()
            .map(|p| (p.id, p.span.into_iter().map(|t| t.id).collect()))
            .collect();

        tracing::debug!(last_predicate, last_role, "seeded srl id counters");

        Ok(Self {
            document,
            spans,
            last_predicate,
            last_role,
            summary: MergeSummary::default(),
        })
    }

    /// Predicate whose span covers `term`, created when there is none
    fn predicate_for(&mut self, term: NafId) -> NafId {
        if let Some((id, _)) = self.spans.iter().find(|(_, span)| span.contains(&term)) {
            return *id;
        }

        self.last_predicate += 1;
        let id = NafId::predicate(self.last_predicate);
        self.document.add_predicate(&Predicate {
            id,
            span: vec![Target::new(term)],
            roles: Vec::new(),
        });
        self.spans.push((id, vec![term]));
        self.summary.predicates += 1;
        id
    }

    /// Add one prediction as a new role; returns the role id
    pub fn add(&mut self, prediction: &Prediction) -> Result<NafId, MergeError> {
        let predicate = self.predicate_for(prediction.predicate);

        self.last_role += 1;
        let role = Role {
            id: NafId::role(self.last_role),
            sem_role: prediction.label.clone(),
            span: prediction.role_span(),
        };
        self.document.add_role(predicate, &role)?;
        self.summary.roles += 1;
        Ok(role.id)
    }

    pub fn summary(&self) -> MergeSummary {
        self.summary
    }
}

/// Merge prediction lines into a document; blank lines are skipped
pub fn merge_predictions(
    document: &mut NafDocument,
    predictions: &str,
) -> Result<MergeSummary, MergeError> {
    let mut merger = Merger::new(document)?;
    for (number, line) in predictions.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let prediction = Prediction::parse(line.trim_end(), number + 1)?;
        merger.add(&prediction)?;
    }

    let summary = merger.summary();
    tracing::debug!(
        predicates = summary.predicates,
        roles = summary.roles,
        "merged predictions"
    );
    Ok(summary)
}

/// Register the labeller in the header, then merge its predictions
pub fn annotate(
    document: &mut NafDocument,
    predictions: &str,
    info: &ProcessorInfo,
) -> Result<MergeSummary, MergeError> {
    document.add_linguistic_processor(info, &ProcessorInfo::timestamp());
    merge_predictions(document, predictions)
}
