//! Document data structures
//!
//! The analysis works on a plain, owned view of one parsed document: the
//! term layer, the dependency layer and the constituency trees. The NAF
//! reader builds a [`Document`]; tests build one directly.

use crate::ids::{NafId, Position};

/// Part-of-speech value that marks a token as a span boundary
pub const VERB_POS: &str = "verb";

/// A term (word token) of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: NafId,
    pub pos: String,
    pub morphofeat: String,
    pub lemma: String,
    is_verb: bool,
    has_verb_tag: bool,
}

impl Token {
    /// Create a token, classifying it against the given verb tag marker
    pub fn new(id: NafId, pos: &str, morphofeat: &str, lemma: &str, verb_tag: &str) -> Self {
        Self {
            id,
            pos: pos.to_string(),
            morphofeat: morphofeat.to_string(),
            lemma: lemma.to_string(),
            is_verb: pos == VERB_POS,
            has_verb_tag: !verb_tag.is_empty() && morphofeat.starts_with(verb_tag),
        }
    }

    pub fn position(&self) -> Position {
        self.id.ordinal()
    }

    /// Part-of-speech is `verb`; such tokens bound argument spans
    pub fn is_verb(&self) -> bool {
        self.is_verb
    }

    /// Morpho-feature carries the verb tag; such tokens are predicate candidates
    pub fn has_verb_tag(&self) -> bool {
        self.has_verb_tag
    }

    /// Tag rewritten to the labeller's format: first morpho-feature field,
    /// closed with a bracket and lower-cased (`WW(pv,verl,ev)` -> `ww(pv)`)
    pub fn normalized_tag(&self) -> String {
        let first = self.morphofeat.split(',').next().unwrap_or_default();
        format!("{first})").replace("))", ")").to_lowercase()
    }
}

/// The two halves of a dependency function label, e.g. `hd/su`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

impl Relation {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// `-- / --` marks an edge without a linguistic relation
    pub fn is_placeholder(&self) -> bool {
        self.from == "--" && self.to == "--"
    }
}

/// A dependency edge between two terms
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    pub from: NafId,
    pub to: NafId,
    pub relation: Relation,
}

impl DependencyEdge {
    pub fn new(from: NafId, to: NafId, relation: Relation) -> Self {
        Self { from, to, relation }
    }
}

/// Terminal node: a leaf covering one term
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub id: String,
    pub term: NafId,
}

/// Non-terminal node carrying a category label
#[derive(Debug, Clone, PartialEq)]
pub struct NonTerminal {
    pub id: String,
    pub label: String,
}

/// Edge from a child node to its parent non-terminal
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEdge {
    pub from: String,
    pub to: String,
    pub head: bool,
}

/// One constituency tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstituencyTree {
    pub terminals: Vec<Terminal>,
    pub non_terminals: Vec<NonTerminal>,
    pub edges: Vec<TreeEdge>,
}

impl ConstituencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_terminal(&mut self, id: &str, term: NafId) {
        self.terminals.push(Terminal {
            id: id.to_string(),
            term,
        });
    }

    pub fn add_non_terminal(&mut self, id: &str, label: &str) {
        self.non_terminals.push(NonTerminal {
            id: id.to_string(),
            label: label.to_string(),
        });
    }

    /// Add an edge from `from` (child) to `to` (parent)
    pub fn add_edge(&mut self, from: &str, to: &str, head: bool) {
        self.edges.push(TreeEdge {
            from: from.to_string(),
            to: to.to_string(),
            head,
        });
    }
}

/// Everything the feature extraction reads from one document
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub dependencies: Vec<DependencyEdge>,
    pub trees: Vec<ConstituencyTree>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn add_dependency(&mut self, from: NafId, to: NafId, relation: Relation) {
        self.dependencies.push(DependencyEdge::new(from, to, relation));
    }

    pub fn add_tree(&mut self, tree: ConstituencyTree) {
        self.trees.push(tree);
    }
}
