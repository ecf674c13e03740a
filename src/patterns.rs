//! Category and dependency patterns
//!
//! A pattern describes the shape of the clause an argument sits in: one slot
//! for the governing verb and one per argument of that verb, ordered by
//! position and joined with `*`. The category pattern gives the constituent
//! category of each slot, the dependency pattern its relation label, with
//! `hd` for the verb.

use crate::arguments::ArgumentStructure;
use crate::config::PLACEHOLDER;
use crate::constituency::ConstituencyIndex;
use crate::ids::NafId;
use crate::index::DocumentIndex;
use crate::predicates::PredicateSet;

/// Dependency pattern symbol of the governing verb
pub const VERB_SLOT: &str = "hd";

/// Separator between pattern slots
pub const SLOT_SEPARATOR: &str = "*";

/// Patterns of one (predicate, argument) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPatterns {
    pub category: String,
    pub dependency: String,
}

/// The verb whose argument frame describes `argument`: the predicate's
/// auxiliary when the argument hangs off the auxiliary, else the predicate
pub fn governing_verb(
    index: &DocumentIndex<'_>,
    predicates: &PredicateSet,
    predicate: NafId,
    argument: NafId,
) -> NafId {
    match predicates.auxiliary(predicate) {
        Some(auxiliary) if index.relation(auxiliary, argument).is_some() => auxiliary,
        _ => predicate,
    }
}

/// Context the pattern generator reads from
pub struct PatternGenerator<'c, 'a> {
    pub index: &'c DocumentIndex<'a>,
    pub predicates: &'c PredicateSet,
    pub arguments: &'c ArgumentStructure,
    pub categories: &'c ConstituencyIndex,
}

impl PatternGenerator<'_, '_> {
    /// Build both patterns for one argument of a predicate
    pub fn generate(&self, predicate: NafId, argument: NafId) -> ArgumentPatterns {
        let verb = governing_verb(self.index, self.predicates, predicate, argument);

        let mut slots: Vec<NafId> = self.arguments.arguments(verb).to_vec();
        slots.push(verb);
        slots.sort();
        slots.dedup();

        let mut category = Vec::with_capacity(slots.len());
        let mut dependency = Vec::with_capacity(slots.len());

        for slot in slots {
            if slot == verb {
                category.push(self.categories.term_category(verb));
                dependency.push(Some(VERB_SLOT));
                continue;
            }

            if slot == argument || self.arguments.span_len(slot) > 1 {
                category.push(self.categories.category(slot));
            } else {
                category.push(self.categories.term_category(slot));
            }
            dependency.push(self.arguments.head_relation(slot));
        }

        ArgumentPatterns {
            category: join_slots(&category),
            dependency: join_slots(&dependency),
        }
    }
}

fn join_slots(slots: &[Option<&str>]) -> String {
    slots
        .iter()
        .map(|slot| slot.unwrap_or(PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(SLOT_SEPARATOR)
        .trim_matches('*')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lexicon;
    use crate::tree::{ConstituencyTree, Document, Relation, Token};

    fn token(position: usize, pos: &str, morphofeat: &str, lemma: &str) -> Token {
        Token::new(NafId::term(position), pos, morphofeat, lemma, "WW")
    }

    /// De kat werd gevoed door Jan
    ///
    /// top
    ///  └─ smain (n1, head)
    ///      ├─ np (n2): de, kat (head)
    ///      ├─ werd (head)
    ///      └─ ppart (n3)
    ///          ├─ gevoed (head)
    ///          └─ pp (n4): door (head), Jan
    fn passive_document() -> Document {
        let mut doc = Document::new();
        doc.add_token(token(1, "det", "LID(bep,stan,rest)", "de"));
        doc.add_token(token(2, "noun", "N(soort,ev,basis,zijd,stan)", "kat"));
        doc.add_token(token(3, "verb", "WW(pv,verl,ev)", "worden"));
        doc.add_token(token(4, "verb", "WW(vd,vrij,zonder)", "voeden"));
        doc.add_token(token(5, "prep", "VZ(init)", "door"));
        doc.add_token(token(6, "name", "SPEC(deeleigen)", "Jan"));
        doc.add_dependency(NafId::term(3), NafId::term(2), Relation::new("hd", "su"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "det"));
        doc.add_dependency(NafId::term(3), NafId::term(4), Relation::new("hd", "vc"));
        doc.add_dependency(NafId::term(4), NafId::term(5), Relation::new("hd", "mod"));
        doc.add_dependency(NafId::term(5), NafId::term(6), Relation::new("hd", "obj1"));

        let mut tree = ConstituencyTree::new();
        tree.add_non_terminal("n0", "top");
        tree.add_non_terminal("n1", "smain");
        tree.add_non_terminal("n2", "np");
        tree.add_non_terminal("n3", "ppart");
        tree.add_non_terminal("n4", "pp");
        for position in 1..=6 {
            tree.add_terminal(&format!("t{position}"), NafId::term(position));
        }
        tree.add_edge("n1", "n0", true);
        tree.add_edge("n2", "n1", false);
        tree.add_edge("t1", "n2", false);
        tree.add_edge("t2", "n2", true);
        tree.add_edge("t3", "n1", true);
        tree.add_edge("n3", "n1", false);
        tree.add_edge("t4", "n3", true);
        tree.add_edge("n4", "n3", false);
        tree.add_edge("t5", "n4", true);
        tree.add_edge("t6", "n4", false);
        doc.add_tree(tree);
        doc
    }

    #[test]
    fn test_patterns_for_main_verb() {
        let doc = passive_document();
        let lexicon = Lexicon::default();
        let index = DocumentIndex::build(&doc);
        let predicates = PredicateSet::resolve(&index, &lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&doc.trees, &lexicon);
        let generator = PatternGenerator {
            index: &index,
            predicates: &predicates,
            arguments: &arguments,
            categories: &categories,
        };

        // door is the only argument of gevoed; no auxiliary edge into it
        assert_eq!(
            governing_verb(&index, &predicates, NafId::term(4), NafId::term(5)),
            NafId::term(4)
        );
        let patterns = generator.generate(NafId::term(4), NafId::term(5));
        // gevoed: term category ppart; door: term category pp (ppart is not a head)
        assert_eq!(patterns.category, "ppart*pp");
        assert_eq!(patterns.dependency, "hd*mod");
    }

    #[test]
    fn test_patterns_anchor_on_auxiliary() {
        let mut doc = passive_document();
        // the subject also hangs off the main verb in this variant
        doc.add_dependency(NafId::term(4), NafId::term(2), Relation::new("hd", "obj1"));
        let lexicon = Lexicon::default();
        let index = DocumentIndex::build(&doc);
        let predicates = PredicateSet::resolve(&index, &lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&doc.trees, &lexicon);
        let generator = PatternGenerator {
            index: &index,
            predicates: &predicates,
            arguments: &arguments,
            categories: &categories,
        };

        assert_eq!(
            governing_verb(&index, &predicates, NafId::term(4), NafId::term(2)),
            NafId::term(3)
        );
        // slots: kat (2), werd (3), gevoed (4)
        let patterns = generator.generate(NafId::term(4), NafId::term(2));
        assert_eq!(patterns.dependency, "obj1*hd*vc");
        // kat: deep np; werd: term smain; gevoed: deep ppart
        assert_eq!(patterns.category, "np*smain*ppart");
    }

    /// Jan slaapt hier de tuin
    ///
    /// top
    ///  └─ smain (n1, head)
    ///      ├─ np (n2, head): Jan (head)
    ///      ├─ slaapt (head)
    ///      ├─ advp (n3): hier (head)
    ///      └─ np (n4, head): de, tuin (head)
    fn mixed_slot_document() -> Document {
        let mut doc = Document::new();
        doc.add_token(token(1, "name", "SPEC(deeleigen)", "Jan"));
        doc.add_token(token(2, "verb", "WW(pv,tgw,met-t)", "slapen"));
        doc.add_token(token(3, "adv", "BW()", "hier"));
        doc.add_token(token(4, "det", "LID(bep,stan,rest)", "de"));
        doc.add_token(token(5, "noun", "N(soort,ev,basis,zijd,stan)", "tuin"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "su"));
        doc.add_dependency(NafId::term(2), NafId::term(3), Relation::new("hd", "mod"));
        doc.add_dependency(NafId::term(2), NafId::term(5), Relation::new("hd", "ld"));
        doc.add_dependency(NafId::term(5), NafId::term(4), Relation::new("hd", "det"));

        let mut tree = ConstituencyTree::new();
        tree.add_non_terminal("n0", "top");
        tree.add_non_terminal("n1", "smain");
        tree.add_non_terminal("n2", "np");
        tree.add_non_terminal("n3", "advp");
        tree.add_non_terminal("n4", "np");
        for position in 1..=5 {
            tree.add_terminal(&format!("t{position}"), NafId::term(position));
        }
        tree.add_edge("n1", "n0", true);
        tree.add_edge("n2", "n1", true);
        tree.add_edge("t1", "n2", true);
        tree.add_edge("t2", "n1", true);
        tree.add_edge("n3", "n1", false);
        tree.add_edge("t3", "n3", true);
        tree.add_edge("n4", "n1", true);
        tree.add_edge("t4", "n4", false);
        tree.add_edge("t5", "n4", true);
        doc.add_tree(tree);
        doc
    }

    #[test]
    fn test_single_and_multi_token_slots() {
        let doc = mixed_slot_document();
        let lexicon = Lexicon::default();
        let index = DocumentIndex::build(&doc);
        let predicates = PredicateSet::resolve(&index, &lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&doc.trees, &lexicon);
        let generator = PatternGenerator {
            index: &index,
            predicates: &predicates,
            arguments: &arguments,
            categories: &categories,
        };

        // Jan and tuin have head category smain but term category np
        assert_eq!(categories.term_category(NafId::term(1)), Some("np"));
        assert_eq!(categories.category(NafId::term(1)), Some("smain"));
        assert_eq!(categories.term_category(NafId::term(5)), Some("np"));
        assert_eq!(categories.category(NafId::term(5)), Some("smain"));
        assert_eq!(arguments.span_len(NafId::term(1)), 1);
        assert_eq!(arguments.span_len(NafId::term(5)), 3);

        // Jan is a one-token slot: term category; tuin spans three tokens: head category
        let patterns = generator.generate(NafId::term(2), NafId::term(3));
        assert_eq!(patterns.category, "np*smain*advp*smain");
        assert_eq!(patterns.dependency, "su*hd*mod*ld");

        // the argument itself always takes the full precedence
        let patterns = generator.generate(NafId::term(2), NafId::term(1));
        assert_eq!(patterns.category, "smain*smain*advp*smain");
    }

    #[test]
    fn test_unresolved_categories_become_placeholders() {
        let mut doc = Document::new();
        doc.add_token(token(1, "noun", "N(eigen,ev)", "Jan"));
        doc.add_token(token(2, "verb", "WW(pv,tgw,met-t)", "slapen"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "su"));
        let lexicon = Lexicon::default();
        let index = DocumentIndex::build(&doc);
        let predicates = PredicateSet::resolve(&index, &lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&doc.trees, &lexicon);
        let generator = PatternGenerator {
            index: &index,
            predicates: &predicates,
            arguments: &arguments,
            categories: &categories,
        };

        let patterns = generator.generate(NafId::term(2), NafId::term(1));
        assert_eq!(patterns.category, "#*#");
        assert_eq!(patterns.dependency, "su*hd");
    }

    #[test]
    fn test_join_slots_trims_separators() {
        assert_eq!(join_slots(&[Some("np"), Some("smain")]), "np*smain");
        assert_eq!(join_slots(&[Some(""), Some("np")]), "np");
        assert_eq!(join_slots(&[]), "");
    }
}
