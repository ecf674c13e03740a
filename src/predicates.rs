//! Predicate identification and auxiliary resolution
//!
//! Every verb-tagged token starts out as a predicate candidate. Where two
//! candidates are linked by a dependency edge, one of them is taken to be the
//! auxiliary of the other: it lends the main verb its voice and is dropped
//! from the final predicate set.
//!
//! The direction of each pair is a fixed lexical heuristic: when the
//! governing verb is the copula, the governing verb is kept as the main verb
//! and the governed one is its auxiliary; otherwise the governed verb is the
//! main verb and the governing verb its auxiliary. Only direct pairs are
//! considered, so verb clusters are not resolved transitively.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::Lexicon;
use crate::ids::NafId;
use crate::index::DocumentIndex;

/// Grammatical voice of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Active,
    Passive,
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voice::Active => write!(f, "active"),
            Voice::Passive => write!(f, "passive"),
        }
    }
}

/// Ids of verb-tagged tokens
pub fn identify_candidates(index: &DocumentIndex<'_>) -> FxHashSet<NafId> {
    index
        .tokens()
        .filter(|token| token.has_verb_tag())
        .map(|token| token.id)
        .collect()
}

/// Outcome of auxiliary resolution
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    /// Every candidate, auxiliaries included
    candidates: FxHashSet<NafId>,
    /// Main verb -> auxiliary
    auxiliaries: FxHashMap<NafId, NafId>,
    /// Voice of main verbs that have an auxiliary
    voices: FxHashMap<NafId, Voice>,
    /// Candidates that are nobody's auxiliary
    main_verbs: BTreeSet<NafId>,
}

impl PredicateSet {
    /// Identify candidates and resolve auxiliaries for one document
    pub fn resolve(index: &DocumentIndex<'_>, lexicon: &Lexicon) -> Self {
        let candidates = identify_candidates(index);

        let mut governors: Vec<NafId> = candidates.iter().copied().collect();
        governors.sort();

        let mut auxiliaries = FxHashMap::default();
        for governor in governors {
            let governed: BTreeSet<NafId> = index
                .outgoing(governor)
                .iter()
                .map(|edge| edge.to)
                .filter(|to| candidates.contains(to))
                .collect();

            let copula = index
                .token(governor)
                .is_some_and(|token| token.lemma == lexicon.copula);

            for verb in governed {
                if verb == governor {
                    continue;
                }
                if copula {
                    auxiliaries.insert(governor, verb);
                } else {
                    auxiliaries.insert(verb, governor);
                }
            }
        }

        let voices = auxiliaries
            .iter()
            .map(|(&main, &auxiliary)| {
                let passive = index
                    .token(auxiliary)
                    .is_some_and(|token| lexicon.is_passive_auxiliary(&token.lemma));
                let voice = if passive { Voice::Passive } else { Voice::Active };
                (main, voice)
            })
            .collect();

        let removed: FxHashSet<NafId> = auxiliaries.values().copied().collect();
        let main_verbs = candidates
            .iter()
            .copied()
            .filter(|id| !removed.contains(id))
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            auxiliaries = auxiliaries.len(),
            "resolved predicates"
        );

        Self {
            candidates,
            auxiliaries,
            voices,
            main_verbs,
        }
    }

    /// Whether `id` was verb-tagged, auxiliaries included
    pub fn is_candidate(&self, id: NafId) -> bool {
        self.candidates.contains(&id)
    }

    /// Candidates in position order, auxiliaries included
    pub fn candidates(&self) -> Vec<NafId> {
        let mut ids: Vec<NafId> = self.candidates.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Final predicates, in position order
    pub fn main_verbs(&self) -> impl Iterator<Item = NafId> + '_ {
        self.main_verbs.iter().copied()
    }

    pub fn is_main_verb(&self, id: NafId) -> bool {
        self.main_verbs.contains(&id)
    }

    /// Auxiliary recorded for a main verb
    pub fn auxiliary(&self, main: NafId) -> Option<NafId> {
        self.auxiliaries.get(&main).copied()
    }

    pub fn voice(&self, main: NafId) -> Voice {
        self.voices.get(&main).copied().unwrap_or_default()
    }
}
