//! Query representation: graph patterns with variables
//!
//! The resource projection issues a fixed set of conjunctive queries; this
//! module is the vocabulary those queries are written in. It is deliberately
//! small: named-graph-qualified basic graph patterns, optional (left-outer)
//! sub-patterns, and projection of chosen variables. Nothing else leaks to
//! callers.

use arbor_model::{BlankNode, Iri, Literal, Term};
use std::fmt;
use std::sync::Arc;

/// A query variable, identified by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    /// Create a variable with the given name (no leading `?`)
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The variable name, without the leading `?`
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// A term position in a pattern: a variable or a constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermPattern {
    /// Variable binding
    Var(Variable),
    /// Constant IRI
    Iri(Iri),
    /// Constant literal
    Literal(Literal),
    /// Constant blank node
    Blank(BlankNode),
}

impl TermPattern {
    /// Check if this pattern position is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, TermPattern::Var(_))
    }

    /// Get the variable if this position is one
    pub fn as_var(&self) -> Option<&Variable> {
        match self {
            TermPattern::Var(v) => Some(v),
            _ => None,
        }
    }

    /// View a constant position as a term; `None` for variables
    pub fn as_term(&self) -> Option<Term> {
        match self {
            TermPattern::Var(_) => None,
            TermPattern::Iri(iri) => Some(Term::Iri(iri.clone())),
            TermPattern::Literal(lit) => Some(Term::Literal(lit.clone())),
            TermPattern::Blank(b) => Some(Term::Blank(b.clone())),
        }
    }
}

impl From<Variable> for TermPattern {
    fn from(v: Variable) -> Self {
        TermPattern::Var(v)
    }
}

impl From<Iri> for TermPattern {
    fn from(iri: Iri) -> Self {
        TermPattern::Iri(iri)
    }
}

impl From<Literal> for TermPattern {
    fn from(lit: Literal) -> Self {
        TermPattern::Literal(lit)
    }
}

impl From<Term> for TermPattern {
    fn from(term: Term) -> Self {
        match term {
            Term::Iri(iri) => TermPattern::Iri(iri),
            Term::Literal(lit) => TermPattern::Literal(lit),
            Term::Blank(b) => TermPattern::Blank(b),
        }
    }
}

/// A triple pattern within one named graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject position
    pub subject: TermPattern,
    /// Predicate position
    pub predicate: TermPattern,
    /// Object position
    pub object: TermPattern,
}

impl TriplePattern {
    /// Create a triple pattern
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// A basic graph pattern qualified by a named graph.
///
/// The graph position may itself be a variable; the indirect-membership
/// derivation joins a server-managed block against a variable graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphPattern {
    /// The graph to match inside (IRI constant or variable)
    pub graph: TermPattern,
    /// Conjunctive triple patterns
    pub triples: Vec<TriplePattern>,
}

impl GraphPattern {
    /// Create a graph pattern with a fixed graph name
    pub fn named(graph: impl Into<Iri>, triples: Vec<TriplePattern>) -> Self {
        Self {
            graph: TermPattern::Iri(graph.into()),
            triples,
        }
    }

    /// Create a graph pattern whose graph name is a variable
    pub fn var_graph(graph: Variable, triples: Vec<TriplePattern>) -> Self {
        Self {
            graph: TermPattern::Var(graph),
            triples,
        }
    }
}

/// A select query: conjunction of graph patterns, optional left-outer
/// sub-patterns, and a projection.
///
/// An empty `select` projects every bound variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// Variables to project; empty means all
    pub select: Vec<Variable>,
    /// Required graph patterns, joined conjunctively
    pub patterns: Vec<GraphPattern>,
    /// Optional graph patterns (left outer join)
    pub optionals: Vec<GraphPattern>,
}

impl SelectQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add projected variables
    pub fn select(mut self, vars: impl IntoIterator<Item = Variable>) -> Self {
        self.select.extend(vars);
        self
    }

    /// Add a required graph pattern
    pub fn pattern(mut self, pattern: GraphPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Add an optional graph pattern
    pub fn optional(mut self, pattern: GraphPattern) -> Self {
        self.optionals.push(pattern);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_pattern_constants() {
        let iri = TermPattern::Iri(Iri::new("http://example.com/x"));
        assert!(!iri.is_var());
        assert!(iri.as_term().is_some());

        let var = TermPattern::Var(Variable::new("x"));
        assert!(var.is_var());
        assert!(var.as_term().is_none());
        assert_eq!(var.as_var().map(Variable::name), Some("x"));
    }

    #[test]
    fn test_query_builder() {
        let q = SelectQuery::new()
            .select([Variable::new("s")])
            .pattern(GraphPattern::named(
                Iri::new("http://example.com/g"),
                vec![TriplePattern::new(
                    Variable::new("s"),
                    Iri::new("http://example.com/p"),
                    Variable::new("o"),
                )],
            ));
        assert_eq!(q.select.len(), 1);
        assert_eq!(q.patterns.len(), 1);
        assert!(q.optionals.is_empty());
    }
}
