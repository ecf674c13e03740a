//! NAF document access
//!
//! Typed reads of the term, dependency, constituency and SRL layers, and the
//! two edits the merger makes: registering a linguistic processor in the
//! header and adding SRL predicates and roles. Everything else in the
//! document is carried through untouched.

use std::io::Write;

use thiserror::Error;

use crate::config::{Lexicon, ProcessorInfo};
use crate::ids::{IdKind, NafId};
use crate::label::{LabelError, parse_relation};
use crate::tree::{ConstituencyTree, Document, Token};
use crate::xml::{Element, XmlDocument, XmlError, XmlNode};

/// Error type for NAF structure problems
#[derive(Debug, Error)]
pub enum NafError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("NAF error: root element is <{0}>, expected <NAF>")]
    Root(String),

    #[error("NAF error: <{element}> without {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("NAF error: bad identifier in <{element}>: {source}")]
    Id {
        element: &'static str,
        source: LabelError,
    },

    #[error("NAF error: bad relation label {label:?}: {source}")]
    Relation { label: String, source: LabelError },

    #[error("NAF error: no predicate {0} in the srl layer")]
    UnknownPredicate(NafId),
}

/// A span target of an SRL predicate or role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub id: NafId,
    pub head: bool,
}

impl Target {
    pub fn new(id: NafId) -> Self {
        Self { id, head: false }
    }

    pub fn head(id: NafId) -> Self {
        Self { id, head: true }
    }

    fn to_element(self) -> Element {
        let target = Element::new("target").with_attr("id", &self.id.to_string());
        if self.head {
            target.with_attr("head", "yes")
        } else {
            target
        }
    }
}

/// A semantic role of a predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: NafId,
    pub sem_role: String,
    pub span: Vec<Target>,
}

impl Role {
    fn to_element(&self) -> Element {
        Element::new("role")
            .with_attr("id", &self.id.to_string())
            .with_attr("semRole", &self.sem_role)
            .with_child(span_element(&self.span))
    }
}

/// An SRL predicate with its roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub id: NafId,
    pub span: Vec<Target>,
    pub roles: Vec<Role>,
}

impl Predicate {
    fn to_element(&self) -> Element {
        let mut element = Element::new("predicate")
            .with_attr("id", &self.id.to_string())
            .with_child(span_element(&self.span));
        for role in &self.roles {
            element.push(role.to_element());
        }
        element
    }
}

fn span_element(targets: &[Target]) -> Element {
    let mut span = Element::new("span");
    for target in targets {
        span.push(target.to_element());
    }
    span
}

/// A NAF document
#[derive(Debug, Clone, PartialEq)]
pub struct NafDocument {
    xml: XmlDocument,
}

impl NafDocument {
    /// Parse NAF text
    pub fn parse(text: &str) -> Result<Self, NafError> {
        Self::from_xml(XmlDocument::parse(text)?)
    }

    pub fn from_xml(xml: XmlDocument) -> Result<Self, NafError> {
        if xml.root.name != "NAF" {
            return Err(NafError::Root(xml.root.name));
        }
        Ok(Self { xml })
    }

    pub fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    fn layer<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Element> + 's {
        self.xml.root.element(name).into_iter()
    }

    /// Term layer as tokens, classified with the lexicon's verb tag
    pub fn tokens(&self, lexicon: &Lexicon) -> Result<Vec<Token>, NafError> {
        self.layer("terms")
            .flat_map(|terms| terms.elements("term"))
            .map(|term| -> Result<Token, NafError> {
                let id = parse_typed(required(term, "term", "id")?, IdKind::Term, "term")?;
                Ok(Token::new(
                    id,
                    term.attr("pos").unwrap_or_default(),
                    term.attr("morphofeat").unwrap_or_default(),
                    term.attr("lemma").unwrap_or_default(),
                    &lexicon.verb_tag,
                ))
            })
            .collect()
    }

    /// Read everything the feature extraction needs
    pub fn to_document(&self, lexicon: &Lexicon) -> Result<Document, NafError> {
        let mut document = Document::new();

        for token in self.tokens(lexicon)? {
            document.add_token(token);
        }

        for dep in self.layer("deps").flat_map(|deps| deps.elements("dep")) {
            let from = parse_typed(required(dep, "dep", "from")?, IdKind::Term, "dep")?;
            let to = parse_typed(required(dep, "dep", "to")?, IdKind::Term, "dep")?;
            let label = required(dep, "dep", "rfunc")?;
            let relation = parse_relation(label).map_err(|source| NafError::Relation {
                label: label.to_string(),
                source,
            })?;
            document.add_dependency(from, to, relation);
        }

        for tree in self
            .layer("constituency")
            .flat_map(|layer| layer.elements("tree"))
        {
            document.add_tree(read_tree(tree)?);
        }

        Ok(document)
    }

    /// Predicates of the srl layer
    pub fn predicates(&self) -> Result<Vec<Predicate>, NafError> {
        self.layer("srl")
            .flat_map(|srl| srl.elements("predicate"))
            .map(|predicate| -> Result<Predicate, NafError> {
                let id = parse_typed(
                    required(predicate, "predicate", "id")?,
                    IdKind::Predicate,
                    "predicate",
                )?;
                let span = read_targets(predicate)?;
                let roles = predicate
                    .elements("role")
                    .map(|role| -> Result<Role, NafError> {
                        Ok(Role {
                            id: parse_typed(required(role, "role", "id")?, IdKind::Role, "role")?,
                            sem_role: role.attr("semRole").unwrap_or_default().to_string(),
                            span: read_targets(role)?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Predicate { id, span, roles })
            })
            .collect()
    }

    /// Register a processor in the header, creating the header and the
    /// layer's processor list when missing
    pub fn add_linguistic_processor(&mut self, info: &ProcessorInfo, timestamp: &str) {
        let root = &mut self.xml.root;
        if root.element("nafHeader").is_none() {
            root.children
                .insert(0, XmlNode::Element(Element::new("nafHeader")));
        }
        let Some(header) = root.element_mut("nafHeader") else {
            return;
        };

        let exists = header
            .elements("linguisticProcessors")
            .any(|lps| lps.attr("layer") == Some(info.layer.as_str()));
        if !exists {
            header.push(Element::new("linguisticProcessors").with_attr("layer", &info.layer));
        }

        let lp = Element::new("lp")
            .with_attr("name", &info.name)
            .with_attr("version", &info.version)
            .with_attr("timestamp", timestamp);
        if let Some(lps) = header
            .elements_mut("linguisticProcessors")
            .find(|lps| lps.attr("layer") == Some(info.layer.as_str()))
        {
            lps.push(lp);
        }
    }

    /// Append a predicate to the srl layer, creating the layer when missing
    pub fn add_predicate(&mut self, predicate: &Predicate) {
        self.xml
            .root
            .element_or_insert("srl")
            .push(predicate.to_element());
    }

    /// Append a role to an existing predicate
    pub fn add_role(&mut self, predicate: NafId, role: &Role) -> Result<(), NafError> {
        let id = predicate.to_string();
        let element = self
            .xml
            .root
            .element_mut("srl")
            .and_then(|srl| {
                srl.elements_mut("predicate")
                    .find(|p| p.attr("id") == Some(id.as_str()))
            })
            .ok_or(NafError::UnknownPredicate(predicate))?;
        element.push(role.to_element());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<(), NafError> {
        Ok(self.xml.write_to(out)?)
    }

    pub fn to_xml_string(&self) -> Result<String, NafError> {
        Ok(self.xml.to_xml_string()?)
    }
}

fn required<'e>(
    element: &'e Element,
    name: &'static str,
    attribute: &'static str,
) -> Result<&'e str, NafError> {
    element.attr(attribute).ok_or(NafError::MissingAttribute {
        element: name,
        attribute,
    })
}

fn parse_typed(value: &str, kind: IdKind, element: &'static str) -> Result<NafId, NafError> {
    NafId::parse_as(value, kind).map_err(|source| NafError::Id { element, source })
}

fn read_targets(element: &Element) -> Result<Vec<Target>, NafError> {
    element
        .elements("span")
        .flat_map(|span| span.elements("target"))
        .map(|target| -> Result<Target, NafError> {
            Ok(Target {
                id: parse_typed(required(target, "target", "id")?, IdKind::Term, "target")?,
                head: target.attr("head").is_some(),
            })
        })
        .collect()
}

fn read_tree(element: &Element) -> Result<ConstituencyTree, NafError> {
    let mut tree = ConstituencyTree::new();

    for nt in element.elements("nt") {
        tree.add_non_terminal(
            required(nt, "nt", "id")?,
            nt.attr("label").unwrap_or_default(),
        );
    }

    for t in element.elements("t") {
        let id = required(t, "t", "id")?;
        // a terminal covers one term; with several targets the last one counts
        if let Some(target) = read_targets(t)?.last() {
            tree.add_terminal(id, target.id);
        }
    }

    for edge in element.elements("edge") {
        tree.add_edge(
            required(edge, "edge", "from")?,
            required(edge, "edge", "to")?,
            edge.attr("head").is_some(),
        );
    }

    Ok(tree)
}
