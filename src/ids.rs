//! Structured NAF identifiers
//!
//! NAF encodes both the layer and the ordinal of an element in its id string
//! (`t_12`, `pr3`, `r7`). Comparing those strings lexically puts `t_10` before
//! `t_9`, so every id is parsed once into a [`NafId`] that orders by kind and
//! then by numeric ordinal.

use std::fmt;

use crate::label::{LabelError, parse_id};

/// Layer an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdKind {
    /// Term layer token, `t_N`
    Term,
    /// SRL predicate, `prN`
    Predicate,
    /// SRL role, `rN`
    Role,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Term => "t_",
            IdKind::Predicate => "pr",
            IdKind::Role => "r",
        }
    }
}

/// A kind-tagged numeric identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NafId {
    kind: IdKind,
    ordinal: usize,
}

impl NafId {
    pub fn new(kind: IdKind, ordinal: usize) -> Self {
        Self { kind, ordinal }
    }

    pub fn term(ordinal: usize) -> Self {
        Self::new(IdKind::Term, ordinal)
    }

    pub fn predicate(ordinal: usize) -> Self {
        Self::new(IdKind::Predicate, ordinal)
    }

    pub fn role(ordinal: usize) -> Self {
        Self::new(IdKind::Role, ordinal)
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Parse an id string, requiring it to be of the given kind
    pub fn parse_as(s: &str, kind: IdKind) -> Result<Self, LabelError> {
        let id = parse_id(s)?;
        if id.kind != kind {
            return Err(LabelError::UnexpectedKind {
                id: s.to_string(),
                expected: kind,
            });
        }
        Ok(id)
    }
}

impl fmt::Display for NafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.ordinal)
    }
}

impl std::str::FromStr for NafId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s)
    }
}

/// Token position in a document; the ordinal of a term id
pub type Position = usize;
