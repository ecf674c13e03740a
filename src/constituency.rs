//! Constituency category index
//!
//! Each token gets up to three categories from the constituency trees:
//!
//! - **term**: category of the terminal's parent node
//! - **head**: category of the grandparent, when the parent is attached to it
//!   by a head edge
//! - **deep**: for tokens sitting directly under a constituent of a main
//!   clause (`smain`) that is itself attached somewhere, the category of that
//!   constituent; the first one found is kept
//!
//! Adjacency maps are built once per tree, so every lookup during the
//! category pass is a hash probe.

use lasso::{Rodeo, Spur};
use rustc_hash::FxHashMap;

use crate::config::Lexicon;
use crate::ids::NafId;
use crate::tree::ConstituencyTree;

/// Per-token categories drawn from all trees of a document
#[derive(Debug, Default)]
pub struct ConstituencyIndex {
    strings: Rodeo,
    term: FxHashMap<NafId, Spur>,
    head: FxHashMap<NafId, Spur>,
    deep: FxHashMap<NafId, Spur>,
}

/// Adjacency of one tree, keyed by interned node id
#[derive(Default)]
struct TreeAdjacency {
    terminals: FxHashMap<Spur, NafId>,
    categories: FxHashMap<Spur, Spur>,
    /// child -> (parent, head flag), document order
    parents: FxHashMap<Spur, Vec<(Spur, bool)>>,
    /// parent -> children, document order
    children: FxHashMap<Spur, Vec<Spur>>,
    /// (child, parent) in document order
    edges: Vec<(Spur, Spur)>,
}

impl ConstituencyIndex {
    /// Build the index from every tree of a document
    pub fn build<'t>(
        trees: impl IntoIterator<Item = &'t ConstituencyTree>,
        lexicon: &Lexicon,
    ) -> Self {
        let mut index = Self::default();
        let clause = index.strings.get_or_intern(&lexicon.clause_category);

        for tree in trees {
            let adjacency = index.adjacency(tree);
            index.categorize(&adjacency, clause);
        }

        tracing::debug!(
            term = index.term.len(),
            head = index.head.len(),
            deep = index.deep.len(),
            "indexed constituency categories"
        );

        index
    }

    fn adjacency(&mut self, tree: &ConstituencyTree) -> TreeAdjacency {
        let mut adjacency = TreeAdjacency::default();

        for terminal in &tree.terminals {
            let node = self.strings.get_or_intern(&terminal.id);
            adjacency.terminals.insert(node, terminal.term);
        }
        for nt in &tree.non_terminals {
            let node = self.strings.get_or_intern(&nt.id);
            let label = self.strings.get_or_intern(&nt.label);
            adjacency.categories.insert(node, label);
        }
        for edge in &tree.edges {
            let child = self.strings.get_or_intern(&edge.from);
            let parent = self.strings.get_or_intern(&edge.to);
            adjacency
                .parents
                .entry(child)
                .or_default()
                .push((parent, edge.head));
            adjacency.children.entry(parent).or_default().push(child);
            adjacency.edges.push((child, parent));
        }

        adjacency
    }

    fn categorize(&mut self, tree: &TreeAdjacency, clause: Spur) {
        for &(child, parent) in &tree.edges {
            if let Some(&token) = tree.terminals.get(&child) {
                let Some(&category) = tree.categories.get(&parent) else {
                    tracing::debug!(
                        node = self.strings.resolve(&parent),
                        "edge to unknown non-terminal, skipped"
                    );
                    continue;
                };
                self.term.insert(token, category);

                let head_category = tree
                    .parents
                    .get(&parent)
                    .into_iter()
                    .flatten()
                    .filter(|(_, head)| *head)
                    .filter_map(|(grandparent, _)| tree.categories.get(grandparent))
                    .last();
                if let Some(&category) = head_category {
                    self.head.insert(token, category);
                }
            } else if tree.categories.get(&parent) == Some(&clause)
                && tree.parents.contains_key(&parent)
            {
                let Some(&category) = tree.categories.get(&child) else {
                    continue;
                };
                for grandchild in tree.children.get(&child).into_iter().flatten() {
                    if let Some(&token) = tree.terminals.get(grandchild) {
                        self.deep.entry(token).or_insert(category);
                    }
                }
            }
        }
    }

    fn resolve(&self, spur: Option<&Spur>) -> Option<&str> {
        spur.map(|s| self.strings.resolve(s))
    }

    /// Category of the token's parent node
    pub fn term_category(&self, id: NafId) -> Option<&str> {
        self.resolve(self.term.get(&id))
    }

    /// Category of the node the token's parent heads
    pub fn head_category(&self, id: NafId) -> Option<&str> {
        self.resolve(self.head.get(&id))
    }

    /// Category found below a main clause
    pub fn deep_category(&self, id: NafId) -> Option<&str> {
        self.resolve(self.deep.get(&id))
    }

    /// Head category, falling back to deep and then term category
    pub fn category(&self, id: NafId) -> Option<&str> {
        self.head_category(id)
            .or_else(|| self.deep_category(id))
            .or_else(|| self.term_category(id))
    }
}
