//! Argument heads and spans
//!
//! The arguments of a predicate are its direct dependents. The surface span
//! of an argument is approximated from the dependency layer alone: the head,
//! its own dependents, and the tokens between the head and whatever governs
//! it, up to the first verb. The walk always runs left to right, so for a
//! governor on the right it starts at the head and for a governor on the left
//! it ends there; passive clauses come out less accurate as a result.

use std::collections::BTreeSet;
use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::ids::NafId;
use crate::index::DocumentIndex;
use crate::predicates::PredicateSet;

/// Tokens judged to belong to one argument, ascending and deduplicated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(Vec<NafId>);

impl Span {
    pub fn first(&self) -> NafId {
        self.0[0]
    }

    pub fn last(&self) -> NafId {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[NafId] {
        &self.0
    }
}

/// Compute the span of the argument headed by `head`
pub fn collect_span(index: &DocumentIndex<'_>, head: NafId) -> Span {
    let mut span = BTreeSet::new();
    span.insert(head.ordinal());

    for edge in index.outgoing(head) {
        span.insert(edge.to.ordinal());
    }

    for edge in index.incoming(head) {
        for position in walk_range(head.ordinal(), edge.from.ordinal()) {
            match index.token_at(position) {
                Some(token) if !token.is_verb() => {
                    span.insert(position);
                }
                _ => break,
            }
        }
    }

    Span(span.into_iter().map(NafId::term).collect())
}

/// Positions visited between an argument head and its governor
fn walk_range(head: usize, governor: usize) -> Range<usize> {
    if head < governor {
        head..governor
    } else if governor < head {
        governor + 1..head + 1
    } else {
        0..0
    }
}

/// Arguments, spans and relation labels of every predicate candidate
#[derive(Debug, Clone, Default)]
pub struct ArgumentStructure {
    /// Candidate -> argument heads, ascending
    arguments: FxHashMap<NafId, Vec<NafId>>,
    /// Argument head -> span
    spans: FxHashMap<NafId, Span>,
    /// Dependent -> `to` half of the last candidate edge into it
    head_relations: FxHashMap<NafId, String>,
}

impl ArgumentStructure {
    /// Collect arguments for all candidates, auxiliaries included, since
    /// patterns may be anchored on an auxiliary
    pub fn collect(index: &DocumentIndex<'_>, predicates: &PredicateSet) -> Self {
        let mut structure = Self::default();
        let mut heads: FxHashMap<NafId, BTreeSet<NafId>> = FxHashMap::default();

        for edge in index.edges() {
            if !predicates.is_candidate(edge.from) {
                continue;
            }
            heads.entry(edge.from).or_default().insert(edge.to);
            structure
                .head_relations
                .insert(edge.to, edge.relation.to.clone());
        }

        for (predicate, args) in heads {
            for &arg in &args {
                structure
                    .spans
                    .entry(arg)
                    .or_insert_with(|| collect_span(index, arg));
            }
            structure
                .arguments
                .insert(predicate, args.into_iter().collect());
        }

        structure
    }

    /// Argument heads of a predicate candidate, ascending
    pub fn arguments(&self, predicate: NafId) -> &[NafId] {
        self.arguments
            .get(&predicate)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    pub fn span(&self, head: NafId) -> Option<&Span> {
        self.spans.get(&head)
    }

    /// Number of tokens in the argument's span, 0 if it has none
    pub fn span_len(&self, head: NafId) -> usize {
        self.span(head).map_or(0, Span::len)
    }

    /// Relation label of the edge from a predicate candidate into `id`
    pub fn head_relation(&self, id: NafId) -> Option<&str> {
        self.head_relations.get(&id).map(String::as_str)
    }
}
