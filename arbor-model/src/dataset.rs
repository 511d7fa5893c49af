//! Dataset - a per-graph indexed quad multiset
//!
//! Quads are grouped by graph name; within a graph, insertion order is
//! preserved and duplicates are kept. Iteration over graphs is ordered by
//! graph IRI, so a dataset that has not changed yields the same sequence on
//! every pass.

use crate::iri::Iri;
use crate::quad::Quad;
use crate::term::{Subject, Term};
use std::collections::BTreeMap;

/// A multiset of quads indexed by named graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    graphs: BTreeMap<Iri, Vec<Quad>>,
    len: usize,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quads (counting duplicates)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the dataset holds no quads
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a quad
    pub fn add(&mut self, quad: Quad) {
        self.graphs.entry(quad.graph.clone()).or_default().push(quad);
        self.len += 1;
    }

    /// Add every quad from an iterator
    pub fn extend(&mut self, quads: impl IntoIterator<Item = Quad>) {
        for quad in quads {
            self.add(quad);
        }
    }

    /// Iterate over all quads, grouped by graph in graph-IRI order
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.graphs.values().flatten()
    }

    /// Iterate over the quads of one named graph
    pub fn graph(&self, graph: &Iri) -> impl Iterator<Item = &Quad> {
        self.graphs.get(graph).into_iter().flatten()
    }

    /// Iterate over the graph names present in this dataset
    pub fn graph_names(&self) -> impl Iterator<Item = &Iri> {
        self.graphs.keys()
    }

    /// Remove every quad of one named graph, returning how many were removed
    pub fn clear_graph(&mut self, graph: &Iri) -> usize {
        let removed = self.graphs.remove(graph).map(|v| v.len()).unwrap_or(0);
        self.len -= removed;
        removed
    }

    /// Remove one occurrence of a quad, returning whether one was present
    pub fn remove(&mut self, quad: &Quad) -> bool {
        if let Some(quads) = self.graphs.get_mut(&quad.graph) {
            if let Some(pos) = quads.iter().position(|q| q == quad) {
                quads.remove(pos);
                self.len -= 1;
                if quads.is_empty() {
                    self.graphs.remove(&quad.graph);
                }
                return true;
            }
        }
        false
    }

    /// Check whether at least one occurrence of a quad is present
    pub fn contains(&self, quad: &Quad) -> bool {
        self.graph(&quad.graph).any(|q| q == quad)
    }

    /// Iterate over quads matching an optional (graph, subject, predicate,
    /// object) pattern. `None` components match anything.
    pub fn matching<'a>(
        &'a self,
        graph: Option<&'a Iri>,
        subject: Option<&'a Subject>,
        predicate: Option<&'a Iri>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Quad> + 'a {
        let quads: Box<dyn Iterator<Item = &'a Quad> + 'a> = match graph {
            Some(g) => Box::new(self.graph(g)),
            None => Box::new(self.iter()),
        };
        quads.filter(move |q| {
            subject.map_or(true, |s| &q.subject == s)
                && predicate.map_or(true, |p| &q.predicate == p)
                && object.map_or(true, |o| &q.object == o)
        })
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        let mut ds = Dataset::new();
        ds.extend(iter);
        ds
    }
}

impl IntoIterator for Dataset {
    type Item = Quad;
    type IntoIter = std::vec::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.graphs
            .into_values()
            .flatten()
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Literal;

    fn quad(graph: &str, s: &str, p: &str, o: &str) -> Quad {
        Quad::new(Iri::new(graph), Iri::new(s), Iri::new(p), Iri::new(o))
    }

    #[test]
    fn test_add_and_len() {
        let mut ds = Dataset::new();
        assert!(ds.is_empty());
        ds.add(quad("g", "s", "p", "o"));
        ds.add(quad("g", "s", "p", "o"));
        // Multiset: duplicates are kept
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_graph_partitioning() {
        let mut ds = Dataset::new();
        ds.add(quad("g1", "s", "p", "o1"));
        ds.add(quad("g2", "s", "p", "o2"));
        assert_eq!(ds.graph(&Iri::new("g1")).count(), 1);
        assert_eq!(ds.graph(&Iri::new("g2")).count(), 1);
        assert_eq!(ds.graph(&Iri::new("g3")).count(), 0);
    }

    #[test]
    fn test_clear_graph() {
        let mut ds = Dataset::new();
        ds.add(quad("g1", "s", "p", "o1"));
        ds.add(quad("g1", "s", "p", "o2"));
        ds.add(quad("g2", "s", "p", "o3"));
        assert_eq!(ds.clear_graph(&Iri::new("g1")), 2);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.clear_graph(&Iri::new("g1")), 0);
    }

    #[test]
    fn test_remove_single_occurrence() {
        let mut ds = Dataset::new();
        let q = quad("g", "s", "p", "o");
        ds.add(q.clone());
        ds.add(q.clone());
        assert!(ds.remove(&q));
        assert_eq!(ds.len(), 1);
        assert!(ds.contains(&q));
    }

    #[test]
    fn test_matching() {
        let mut ds = Dataset::new();
        ds.add(quad("g", "s1", "p1", "o1"));
        ds.add(quad("g", "s1", "p2", "o2"));
        ds.add(quad("g", "s2", "p1", "o3"));
        ds.add(Quad::new(
            Iri::new("g"),
            Iri::new("s2"),
            Iri::new("p2"),
            Literal::simple("text"),
        ));

        let s1 = Subject::Iri(Iri::new("s1"));
        assert_eq!(ds.matching(None, Some(&s1), None, None).count(), 2);

        let p1 = Iri::new("p1");
        assert_eq!(ds.matching(Some(&Iri::new("g")), None, Some(&p1), None).count(), 2);

        let o = Term::Literal(Literal::simple("text"));
        assert_eq!(ds.matching(None, None, None, Some(&o)).count(), 1);

        assert_eq!(ds.matching(Some(&Iri::new("missing")), None, None, None).count(), 0);
    }
}
