//! Feature vector assembly
//!
//! One [`FeatureRecord`] per (predicate, argument) pair. Records are written
//! as a single comma-joined line, so every lemma is sanitized to keep field
//! boundaries intact.

use std::fmt;

use crate::arguments::ArgumentStructure;
use crate::config::PLACEHOLDER;
use crate::constituency::ConstituencyIndex;
use crate::ids::{NafId, Position};
use crate::index::DocumentIndex;
use crate::patterns::{ArgumentPatterns, PatternGenerator, SLOT_SEPARATOR};
use crate::predicates::{PredicateSet, Voice};
use crate::tree::Token;

/// Which side of the predicate an argument is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Before,
    After,
}

impl RelativePosition {
    /// `after` when the predicate precedes the argument
    pub fn of(predicate: Position, argument: Position) -> Self {
        if predicate < argument {
            RelativePosition::After
        } else {
            RelativePosition::Before
        }
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativePosition::Before => write!(f, "before"),
            RelativePosition::After => write!(f, "after"),
        }
    }
}

/// Lemma and tag of a span endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub lemma: String,
    pub tag: String,
}

impl Endpoint {
    fn placeholder() -> Self {
        Self {
            lemma: PLACEHOLDER.to_string(),
            tag: PLACEHOLDER.to_string(),
        }
    }

    /// A bare comma blanks both fields
    fn of(token: &Token) -> Self {
        if token.lemma == "," {
            return Self::placeholder();
        }
        Self {
            lemma: sanitize_lemma(&token.lemma),
            tag: token.normalized_tag(),
        }
    }
}

/// Keep a lemma from adding fields: `,` becomes the placeholder, embedded
/// commas become periods
pub fn sanitize_lemma(lemma: &str) -> String {
    if lemma == "," {
        PLACEHOLDER.to_string()
    } else {
        lemma.replace(',', ".")
    }
}

/// Feature vector of one predicate-argument pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub predicate: NafId,
    pub argument: NafId,
    pub span_first: NafId,
    pub span_last: NafId,
    pub predicate_lemma: String,
    pub predicate_tag: String,
    pub voice: Voice,
    pub argument_category: Option<String>,
    pub argument_relation: Option<String>,
    pub position: RelativePosition,
    pub argument_lemma: String,
    pub argument_tag: String,
    pub span_start: Endpoint,
    pub span_end: Endpoint,
    pub patterns: ArgumentPatterns,
}

impl FeatureRecord {
    /// `relation*category`, category left out when unknown
    pub fn category_relation(&self) -> String {
        let relation = self.argument_relation.as_deref().unwrap_or(PLACEHOLDER);
        let category = self.argument_category.as_deref().unwrap_or_default();
        format!("{relation}{SLOT_SEPARATOR}{category}")
    }

    /// Fields in output order; the last one is the label slot
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.predicate.to_string(),
            self.argument.to_string(),
            self.span_first.to_string(),
            self.span_last.to_string(),
            self.predicate_lemma.clone(),
            self.predicate_tag.clone(),
            self.voice.to_string(),
            self.argument_category
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            self.argument_relation
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            self.position.to_string(),
            self.argument_lemma.clone(),
            self.argument_tag.clone(),
            self.span_start.lemma.clone(),
            self.span_start.tag.clone(),
            self.span_end.lemma.clone(),
            self.span_end.tag.clone(),
            self.patterns.category.clone(),
            self.patterns.dependency.clone(),
            self.category_relation(),
            PLACEHOLDER.to_string(),
        ]
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(","))
    }
}

/// Builds feature records from the analysis of one document
pub struct FeatureAssembler<'c, 'a> {
    pub index: &'c DocumentIndex<'a>,
    pub predicates: &'c PredicateSet,
    pub arguments: &'c ArgumentStructure,
    pub categories: &'c ConstituencyIndex,
}

impl FeatureAssembler<'_, '_> {
    /// Records for every main verb and argument, ordered by (predicate, argument)
    pub fn assemble(&self) -> Vec<FeatureRecord> {
        let patterns = PatternGenerator {
            index: self.index,
            predicates: self.predicates,
            arguments: self.arguments,
            categories: self.categories,
        };

        let mut records = Vec::new();
        for predicate in self.predicates.main_verbs() {
            let Some(predicate_token) = self.index.token(predicate) else {
                continue;
            };
            for &argument in self.arguments.arguments(predicate) {
                let Some(argument_token) = self.index.token(argument) else {
                    tracing::debug!(%predicate, %argument, "argument without a term, skipped");
                    continue;
                };
                let record = self.record(
                    predicate_token,
                    argument_token,
                    patterns.generate(predicate, argument),
                );
                records.push(record);
            }
        }

        records
    }

    fn record(
        &self,
        predicate: &Token,
        argument: &Token,
        patterns: ArgumentPatterns,
    ) -> FeatureRecord {
        let (span_first, span_last, span_len) = match self.arguments.span(argument.id) {
            Some(span) => (span.first(), span.last(), span.len()),
            None => (argument.id, argument.id, 1),
        };

        let endpoint = |id: NafId| {
            self.index
                .token(id)
                .map_or_else(Endpoint::placeholder, Endpoint::of)
        };
        let (span_start, span_end) = if span_len > 1 {
            (endpoint(span_first), endpoint(span_last))
        } else {
            (Endpoint::placeholder(), Endpoint::placeholder())
        };

        FeatureRecord {
            predicate: predicate.id,
            argument: argument.id,
            span_first,
            span_last,
            predicate_lemma: sanitize_lemma(&predicate.lemma),
            predicate_tag: predicate.normalized_tag(),
            voice: self.predicates.voice(predicate.id),
            argument_category: self.categories.category(argument.id).map(str::to_string),
            argument_relation: self.arguments.head_relation(argument.id).map(str::to_string),
            position: RelativePosition::of(predicate.position(), argument.position()),
            argument_lemma: sanitize_lemma(&argument.lemma),
            argument_tag: argument.normalized_tag(),
            span_start,
            span_end,
            patterns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lexicon;
    use crate::tree::{ConstituencyTree, Document, Relation};

    fn token(position: usize, pos: &str, morphofeat: &str, lemma: &str) -> Token {
        Token::new(NafId::term(position), pos, morphofeat, lemma, "WW")
    }

    fn assemble(doc: &Document) -> Vec<FeatureRecord> {
        let lexicon = Lexicon::default();
        let index = DocumentIndex::build(doc);
        let predicates = PredicateSet::resolve(&index, &lexicon);
        let arguments = ArgumentStructure::collect(&index, &predicates);
        let categories = ConstituencyIndex::build(&doc.trees, &lexicon);
        FeatureAssembler {
            index: &index,
            predicates: &predicates,
            arguments: &arguments,
            categories: &categories,
        }
        .assemble()
    }

    #[test]
    fn test_sanitize_lemma() {
        assert_eq!(sanitize_lemma(","), "#");
        assert_eq!(sanitize_lemma("1,5"), "1.5");
        assert_eq!(sanitize_lemma("kat"), "kat");
    }

    #[test]
    fn test_relative_position() {
        assert_eq!(
            RelativePosition::of(2, 10),
            RelativePosition::After
        );
        assert_eq!(
            RelativePosition::of(10, 9),
            RelativePosition::Before
        );
    }

    #[test]
    fn test_record_without_trees() {
        // Jan slaapt
        let mut doc = Document::new();
        doc.add_token(token(1, "name", "SPEC(deeleigen)", "Jan"));
        doc.add_token(token(2, "verb", "WW(pv,tgw,met-t)", "slapen"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "su"));

        let records = assemble(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_string(),
            "t_2,t_1,t_1,t_1,slapen,ww(pv),active,#,su,before,Jan,spec(deeleigen),#,#,#,#,#*#,su*hd,su*,#"
        );
        assert_eq!(records[0].fields().len(), 20);
    }

    #[test]
    fn test_multi_token_span_endpoints() {
        // 1,5 kilo kaas eet hij
        let mut doc = Document::new();
        doc.add_token(token(1, "num", "TW(hoofd,prenom,stan)", "1,5"));
        doc.add_token(token(2, "noun", "N(soort,ev,basis,zijd,stan)", "kilo"));
        doc.add_token(token(3, "noun", "N(soort,ev,basis,zijd,stan)", "kaas"));
        doc.add_token(token(4, "verb", "WW(pv,tgw,met-t)", "eten"));
        doc.add_dependency(NafId::term(4), NafId::term(3), Relation::new("hd", "obj1"));
        doc.add_dependency(NafId::term(3), NafId::term(2), Relation::new("hd", "mod"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "det"));

        let records = assemble(&doc);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.span_first, NafId::term(2));
        assert_eq!(record.span_last, NafId::term(3));
        assert_eq!(record.span_start.lemma, "kilo");
        assert_eq!(record.span_end.lemma, "kaas");
        assert_eq!(record.position, RelativePosition::Before);
    }

    #[test]
    fn test_comma_endpoint_is_blanked() {
        // Jan , de bakker , slaapt
        let mut doc = Document::new();
        doc.add_token(token(1, "name", "SPEC(deeleigen)", "Jan"));
        doc.add_token(token(2, "punct", "LET()", ","));
        doc.add_token(token(3, "noun", "N(soort,ev,basis,zijd,stan)", "bakker"));
        doc.add_token(token(4, "verb", "WW(pv,tgw,met-t)", "slapen"));
        doc.add_dependency(NafId::term(4), NafId::term(1), Relation::new("hd", "su"));
        doc.add_dependency(NafId::term(1), NafId::term(3), Relation::new("hd", "app"));
        doc.add_dependency(NafId::term(1), NafId::term(2), Relation::new("--", "--"));

        let records = assemble(&doc);
        let record = &records[0];
        assert_eq!(record.span_first, NafId::term(1));
        assert_eq!(record.span_last, NafId::term(3));
        assert_eq!(record.span_start.lemma, "Jan");
        assert_eq!(record.span_end.lemma, "bakker");

        let fields = record.fields();
        assert!(fields.iter().all(|f| !f.contains(',')));
    }

    #[test]
    fn test_comma_lemma_at_span_end() {
        let mut doc = Document::new();
        doc.add_token(token(1, "verb", "WW(pv,tgw,met-t)", "zeggen"));
        doc.add_token(token(2, "noun", "N(eigen,ev)", "Jan"));
        doc.add_token(token(3, "punct", "LET()", ","));
        doc.add_dependency(NafId::term(1), NafId::term(2), Relation::new("hd", "su"));
        doc.add_dependency(NafId::term(2), NafId::term(3), Relation::new("hd", "punct"));

        let records = assemble(&doc);
        let record = &records[0];
        assert_eq!(record.span_end, Endpoint::placeholder());
        assert_eq!(record.span_start.lemma, "Jan");
    }

    #[test]
    fn test_auxiliaries_get_no_records() {
        let mut doc = Document::new();
        doc.add_token(token(1, "noun", "N(soort,ev)", "kat"));
        doc.add_token(token(2, "verb", "WW(pv,verl,ev)", "worden"));
        doc.add_token(token(3, "verb", "WW(vd,vrij,zonder)", "voeden"));
        doc.add_dependency(NafId::term(2), NafId::term(1), Relation::new("hd", "su"));
        doc.add_dependency(NafId::term(2), NafId::term(3), Relation::new("hd", "vc"));
        doc.add_dependency(NafId::term(3), NafId::term(1), Relation::new("hd", "obj1"));

        let records = assemble(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].predicate, NafId::term(3));
        assert_eq!(records[0].voice, Voice::Passive);
    }

    #[test]
    fn test_record_with_tree() {
        // De kat werd gevoed door Jan
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

        let records = assemble(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_string(),
            "t_4,t_5,t_5,t_6,voeden,ww(vd),passive,pp,mod,after,door,vz(init),\
             door,vz(init),Jan,spec(deeleigen),ppart*pp,hd*mod,mod*pp,#"
        );
    }

    #[test]
    fn test_argument_category_prefers_head() {
        // Jan slaapt hier de tuin; Jan and tuin sit in np nodes heading smain
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

        let records = assemble(&doc);
        let lines: Vec<String> = records.iter().map(FeatureRecord::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "t_2,t_1,t_1,t_1,slapen,ww(pv),active,smain,su,before,Jan,spec(deeleigen),\
                 #,#,#,#,smain*smain*advp*smain,su*hd*mod*ld,su*smain,#",
                "t_2,t_3,t_3,t_3,slapen,ww(pv),active,advp,mod,after,hier,bw(),\
                 #,#,#,#,np*smain*advp*smain,su*hd*mod*ld,mod*advp,#",
                "t_2,t_5,t_3,t_5,slapen,ww(pv),active,smain,ld,after,tuin,n(soort),\
                 hier,bw(),tuin,n(soort),np*smain*advp*smain,su*hd*mod*ld,ld*smain,#",
            ]
        );
    }
}
