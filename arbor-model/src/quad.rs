//! Quad - a single RDF statement in a named graph

use crate::iri::Iri;
use crate::term::{Subject, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quad: (graph name, subject, predicate, object).
///
/// The graph name is always an IRI; the engine never stores quads in the
/// default graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    /// Named graph this statement belongs to
    pub graph: Iri,
    /// Subject
    pub subject: Subject,
    /// Predicate
    pub predicate: Iri,
    /// Object
    pub object: Term,
}

impl Quad {
    /// Create a new quad
    pub fn new(
        graph: impl Into<Iri>,
        subject: impl Into<Subject>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            graph: graph.into(),
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Copy this quad into a different named graph.
    ///
    /// Used by the projection layer, which re-homes stored quads under
    /// synthetic projection graph names.
    pub fn with_graph(&self, graph: impl Into<Iri>) -> Self {
        Self {
            graph: graph.into(),
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }

    /// Check whether this quad matches another ignoring the graph name
    pub fn same_triple(&self, other: &Quad) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} <{}> .",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}
