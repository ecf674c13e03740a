//! Token and relation index
//!
//! Lookup tables over the term and dependency layers of one document. Edges
//! carrying the placeholder relation are left out of every table, so no
//! later stage has to filter them again.

use rustc_hash::FxHashMap;

use crate::ids::{NafId, Position};
use crate::tree::{DependencyEdge, Document, Relation, Token};

/// Index over the tokens and dependency edges of a document
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex<'a> {
    /// Term id -> token
    tokens: FxHashMap<NafId, &'a Token>,
    /// (from, to) -> relation label
    relations: FxHashMap<(NafId, NafId), &'a Relation>,
    /// Edges leaving a term, in document order
    outgoing: FxHashMap<NafId, Vec<&'a DependencyEdge>>,
    /// Edges entering a term, in document order
    incoming: FxHashMap<NafId, Vec<&'a DependencyEdge>>,
    /// Linguistic edges in document order
    edges: Vec<&'a DependencyEdge>,
}

impl<'a> DocumentIndex<'a> {
    /// Build an index from a document
    pub fn build(document: &'a Document) -> Self {
        let mut index = Self::default();

        for token in &document.tokens {
            index.add_token(token);
        }

        let mut skipped = 0usize;
        for edge in &document.dependencies {
            if edge.relation.is_placeholder() {
                skipped += 1;
                continue;
            }
            index.add_edge(edge);
        }

        tracing::debug!(
            tokens = index.tokens.len(),
            edges = index.edges.len(),
            placeholder_edges = skipped,
            "indexed document"
        );

        index
    }

    fn add_token(&mut self, token: &'a Token) {
        if self.tokens.insert(token.id, token).is_some() {
            tracing::warn!(id = %token.id, "duplicate term id, keeping the last one");
        }
    }

    fn add_edge(&mut self, edge: &'a DependencyEdge) {
        self.relations.insert((edge.from, edge.to), &edge.relation);
        self.outgoing.entry(edge.from).or_default().push(edge);
        self.incoming.entry(edge.to).or_default().push(edge);
        self.edges.push(edge);
    }

    /// Get a token by id
    pub fn token(&self, id: NafId) -> Option<&'a Token> {
        self.tokens.get(&id).copied()
    }

    /// Get a token by position
    pub fn token_at(&self, position: Position) -> Option<&'a Token> {
        self.token(NafId::term(position))
    }

    /// All tokens, in no particular order
    pub fn tokens(&self) -> impl Iterator<Item = &'a Token> + '_ {
        self.tokens.values().copied()
    }

    /// Relation label of the edge `from -> to`, if there is a linguistic one
    pub fn relation(&self, from: NafId, to: NafId) -> Option<&'a Relation> {
        self.relations.get(&(from, to)).copied()
    }

    /// Edges whose origin is `id`
    pub fn outgoing(&self, id: NafId) -> &[&'a DependencyEdge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or_default()
    }

    /// Edges whose destination is `id`
    pub fn incoming(&self, id: NafId) -> &[&'a DependencyEdge] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or_default()
    }

    /// All linguistic edges in document order
    pub fn edges(&self) -> &[&'a DependencyEdge] {
        &self.edges
    }
}
