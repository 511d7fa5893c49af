//! RDF term variants: literals, blank nodes, subjects, objects
//!
//! ## Blank node labels
//!
//! Blank-node labels are opaque and process-local. `BlankNode::fresh()`
//! draws from a process-wide atomic counter, so labels never collide within
//! a running service. Labels carry no meaning across processes.

use crate::iri::Iri;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static BNODE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An RDF literal: lexical form with optional datatype and language tag.
///
/// A language-tagged literal carries no datatype IRI here; the implied
/// rdf:langString datatype is left to serializers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The lexical form
    pub lexical: String,
    /// Optional datatype IRI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    /// Optional language tag (e.g. "en")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// A plain literal with no datatype or language tag
    pub fn simple(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// A typed literal
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// A language-tagged literal
    pub fn tagged(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical)?;
        if let Some(lang) = &self.language {
            write!(f, "@{}", lang)?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{}>", dt)?;
        }
        Ok(())
    }
}

/// An opaque process-local blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlankNode(Arc<str>);

impl BlankNode {
    /// Create a blank node with an explicit label
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Create a blank node with a fresh process-unique label
    pub fn fresh() -> Self {
        let n = BNODE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(Arc::from(format!("b{n}").as_str()))
    }

    /// The label of this blank node
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// A quad subject: an IRI or a blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// Named subject
    Iri(Iri),
    /// Anonymous subject
    Blank(BlankNode),
}

impl Subject {
    /// Get the IRI if this subject is named
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Subject::Iri(iri) => Some(iri),
            Subject::Blank(_) => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(iri) => write!(f, "<{iri}>"),
            Subject::Blank(b) => write!(f, "{b}"),
        }
    }
}

impl From<Iri> for Subject {
    fn from(iri: Iri) -> Self {
        Subject::Iri(iri)
    }
}

impl From<BlankNode> for Subject {
    fn from(b: BlankNode) -> Self {
        Subject::Blank(b)
    }
}

/// Any RDF term: IRI, literal, or blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// An IRI
    Iri(Iri),
    /// A literal
    Literal(Literal),
    /// A blank node
    Blank(BlankNode),
}

impl Term {
    /// Get the IRI if this term is one
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get the literal if this term is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Get the lexical form if this term is a literal
    pub fn lexical(&self) -> Option<&str> {
        self.as_literal().map(|l| l.lexical.as_str())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Literal(lit) => write!(f, "{lit}"),
            Term::Blank(b) => write!(f, "{b}"),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::Blank(b)
    }
}

impl From<Subject> for Term {
    fn from(s: Subject) -> Self {
        match s {
            Subject::Iri(iri) => Term::Iri(iri),
            Subject::Blank(b) => Term::Blank(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_constructors() {
        let plain = Literal::simple("hello");
        assert!(plain.datatype.is_none() && plain.language.is_none());

        let typed = Literal::typed("2020-01-01T00:00:00Z", arbor_vocab::xsd::DATE_TIME);
        assert_eq!(
            typed.datatype.as_ref().map(|d| d.as_str()),
            Some(arbor_vocab::xsd::DATE_TIME)
        );

        let tagged = Literal::tagged("bonjour", "fr");
        assert_eq!(tagged.language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_fresh_blank_nodes_are_distinct() {
        let a = BlankNode::fresh();
        let b = BlankNode::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_term_accessors() {
        let iri = Term::Iri(Iri::new("http://example.com/x"));
        assert!(iri.as_iri().is_some());
        assert!(iri.as_literal().is_none());

        let lit = Term::Literal(Literal::simple("v"));
        assert_eq!(lit.lexical(), Some("v"));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            Term::Iri(Iri::new("http://example.com/x")).to_string(),
            "<http://example.com/x>"
        );
        assert_eq!(Term::Literal(Literal::tagged("hi", "en")).to_string(), "\"hi\"@en");
        assert_eq!(Term::Blank(BlankNode::new("b0")).to_string(), "_:b0");
    }
}
