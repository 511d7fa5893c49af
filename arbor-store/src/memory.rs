//! In-memory quad store
//!
//! Stores quads in a per-graph indexed `Dataset` behind an `RwLock`. A whole
//! `Update` batch runs under one write lock, which gives the atomicity the
//! `QuadStore` contract asks for. Query evaluation is a conjunctive
//! nested-loop join with substitution; dataset iteration is insertion-ordered
//! per graph and graph-IRI-ordered across graphs, so results are
//! deterministic for an unchanged store.

use crate::binding::Binding;
use crate::error::Result;
use crate::pattern::{GraphPattern, SelectQuery, TermPattern, TriplePattern};
use crate::store::QuadStore;
use crate::update::{Update, UpdateOp};
use arbor_model::{Dataset, Iri, Quad, Term};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// An in-memory quad store.
///
/// Cloning shares the underlying dataset.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuadStore {
    data: Arc<RwLock<Dataset>>,
}

impl MemoryQuadStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quads (counting duplicates)
    pub fn len(&self) -> usize {
        self.data.read().expect("RwLock poisoned").len()
    }

    /// Check whether the store holds no quads
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot every stored quad (test helper)
    pub fn snapshot(&self) -> Vec<Quad> {
        self.data
            .read()
            .expect("RwLock poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QuadStore for MemoryQuadStore {
    async fn insert(&self, quad: Quad) -> Result<()> {
        self.data.write().expect("RwLock poisoned").add(quad);
        Ok(())
    }

    async fn remove(&self, quad: &Quad) -> Result<()> {
        // Removing an absent quad succeeds
        self.data.write().expect("RwLock poisoned").remove(quad);
        Ok(())
    }

    async fn clear_graph(&self, graph: &Iri) -> Result<()> {
        self.data.write().expect("RwLock poisoned").clear_graph(graph);
        Ok(())
    }

    async fn apply(&self, update: Update) -> Result<()> {
        let mut data = self.data.write().expect("RwLock poisoned");
        for op in update.ops {
            match op {
                UpdateOp::ClearGraph(graph) => {
                    data.clear_graph(&graph);
                }
                UpdateOp::DeleteWhere {
                    graph,
                    subject,
                    predicate,
                } => {
                    let doomed: Vec<Quad> = data
                        .matching(Some(&graph), Some(&subject), predicate.as_ref(), None)
                        .cloned()
                        .collect();
                    for quad in &doomed {
                        data.remove(quad);
                    }
                }
                UpdateOp::InsertData(quads) => {
                    data.extend(quads);
                }
            }
        }
        Ok(())
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Binding>> {
        let data = self.data.read().expect("RwLock poisoned");
        Ok(eval_query(&data, query))
    }

    async fn ask(&self, pattern: &GraphPattern) -> Result<bool> {
        let data = self.data.read().expect("RwLock poisoned");
        let solutions = eval_graph_pattern(&data, pattern, vec![Binding::new()]);
        Ok(!solutions.is_empty())
    }
}

// ============================================================================
// Query evaluation
// ============================================================================

fn eval_query(data: &Dataset, query: &SelectQuery) -> Vec<Binding> {
    let mut solutions = vec![Binding::new()];
    for pattern in &query.patterns {
        solutions = eval_graph_pattern(data, pattern, solutions);
        if solutions.is_empty() {
            return solutions;
        }
    }
    for optional in &query.optionals {
        let mut next = Vec::with_capacity(solutions.len());
        for binding in solutions {
            let extended = eval_graph_pattern(data, optional, vec![binding.clone()]);
            if extended.is_empty() {
                next.push(binding);
            } else {
                next.extend(extended);
            }
        }
        solutions = next;
    }
    if query.select.is_empty() {
        solutions
    } else {
        solutions.iter().map(|b| b.project(&query.select)).collect()
    }
}

fn eval_graph_pattern(
    data: &Dataset,
    pattern: &GraphPattern,
    solutions: Vec<Binding>,
) -> Vec<Binding> {
    let mut out = solutions;
    for triple in &pattern.triples {
        let mut next = Vec::new();
        for binding in &out {
            extend(data, &pattern.graph, triple, binding, &mut next);
        }
        out = next;
        if out.is_empty() {
            break;
        }
    }
    out
}

/// Extend one solution with every quad matching a triple pattern.
fn extend(
    data: &Dataset,
    graph: &TermPattern,
    triple: &TriplePattern,
    binding: &Binding,
    out: &mut Vec<Binding>,
) {
    // Resolve the graph position under the current binding.
    let bound_graph = match graph {
        TermPattern::Var(v) => binding.get(v).cloned(),
        other => other.as_term(),
    };
    match bound_graph {
        Some(Term::Iri(g)) => {
            for quad in data.graph(&g) {
                if let Some(extended) = match_quad(graph, triple, binding, quad) {
                    out.push(extended);
                }
            }
        }
        // A graph name can only be an IRI
        Some(_) => {}
        None => {
            for quad in data.iter() {
                if let Some(extended) = match_quad(graph, triple, binding, quad) {
                    out.push(extended);
                }
            }
        }
    }
}

fn match_quad(
    graph: &TermPattern,
    triple: &TriplePattern,
    binding: &Binding,
    quad: &Quad,
) -> Option<Binding> {
    let mut extended = binding.clone();
    if !unify(graph, &Term::Iri(quad.graph.clone()), &mut extended) {
        return None;
    }
    if !unify(&triple.subject, &Term::from(quad.subject.clone()), &mut extended) {
        return None;
    }
    if !unify(&triple.predicate, &Term::Iri(quad.predicate.clone()), &mut extended) {
        return None;
    }
    if !unify(&triple.object, &quad.object, &mut extended) {
        return None;
    }
    Some(extended)
}

fn unify(pattern: &TermPattern, actual: &Term, binding: &mut Binding) -> bool {
    match pattern {
        TermPattern::Var(v) => match binding.get(v) {
            Some(bound) => bound == actual,
            None => {
                binding.set(v.clone(), actual.clone());
                true
            }
        },
        constant => constant.as_term().as_ref() == Some(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Variable;
    use arbor_model::Literal;

    fn iri(s: &str) -> Iri {
        Iri::new(s)
    }

    async fn seeded() -> MemoryQuadStore {
        let store = MemoryQuadStore::new();
        store
            .insert(Quad::new(iri("g1"), iri("s1"), iri("p1"), iri("o1")))
            .await
            .unwrap();
        store
            .insert(Quad::new(iri("g1"), iri("s1"), iri("p2"), iri("o2")))
            .await
            .unwrap();
        store
            .insert(Quad::new(iri("g2"), iri("s2"), iri("p1"), iri("o1")))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_select() {
        let store = seeded().await;
        let s = Variable::new("s");
        let o = Variable::new("o");
        let q = SelectQuery::new().pattern(GraphPattern::named(
            iri("g1"),
            vec![TriplePattern::new(s.clone(), iri("p1"), o.clone())],
        ));
        let solutions = store.select(&q).await.unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get(&s), Some(&Term::Iri(iri("s1"))));
        assert_eq!(solutions[0].get(&o), Some(&Term::Iri(iri("o1"))));
    }

    #[tokio::test]
    async fn test_join_within_graph() {
        let store = seeded().await;
        let s = Variable::new("s");
        let q = SelectQuery::new().pattern(GraphPattern::named(
            iri("g1"),
            vec![
                TriplePattern::new(s.clone(), iri("p1"), iri("o1")),
                TriplePattern::new(s.clone(), iri("p2"), iri("o2")),
            ],
        ));
        assert_eq!(store.select(&q).await.unwrap().len(), 1);

        // No subject carries p1=o2
        let q = SelectQuery::new().pattern(GraphPattern::named(
            iri("g1"),
            vec![TriplePattern::new(s, iri("p1"), iri("o2"))],
        ));
        assert!(store.select(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_variable_graph() {
        let store = seeded().await;
        let g = Variable::new("g");
        let s = Variable::new("s");
        let q = SelectQuery::new().pattern(GraphPattern::var_graph(
            g.clone(),
            vec![TriplePattern::new(s, iri("p1"), iri("o1"))],
        ));
        let solutions = store.select(&q).await.unwrap();
        assert_eq!(solutions.len(), 2);
        let graphs: Vec<_> = solutions.iter().filter_map(|b| b.get(&g)).collect();
        assert!(graphs.contains(&&Term::Iri(iri("g1"))));
        assert!(graphs.contains(&&Term::Iri(iri("g2"))));
    }

    #[tokio::test]
    async fn test_optional_keeps_unmatched_solution() {
        let store = seeded().await;
        let s = Variable::new("s");
        let x = Variable::new("x");
        let q = SelectQuery::new()
            .pattern(GraphPattern::named(
                iri("g1"),
                vec![TriplePattern::new(s.clone(), iri("p1"), iri("o1"))],
            ))
            .optional(GraphPattern::named(
                iri("g1"),
                vec![TriplePattern::new(s.clone(), iri("missing"), x.clone())],
            ));
        let solutions = store.select(&q).await.unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_bound(&s));
        assert!(!solutions[0].is_bound(&x));
    }

    #[tokio::test]
    async fn test_optional_extends_when_matched() {
        let store = seeded().await;
        let s = Variable::new("s");
        let x = Variable::new("x");
        let q = SelectQuery::new()
            .pattern(GraphPattern::named(
                iri("g1"),
                vec![TriplePattern::new(s.clone(), iri("p1"), iri("o1"))],
            ))
            .optional(GraphPattern::named(
                iri("g1"),
                vec![TriplePattern::new(s, iri("p2"), x.clone())],
            ));
        let solutions = store.select(&q).await.unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get(&x), Some(&Term::Iri(iri("o2"))));
    }

    #[tokio::test]
    async fn test_projection() {
        let store = seeded().await;
        let s = Variable::new("s");
        let o = Variable::new("o");
        let q = SelectQuery::new()
            .select([s.clone()])
            .pattern(GraphPattern::named(
                iri("g1"),
                vec![TriplePattern::new(s.clone(), iri("p1"), o.clone())],
            ));
        let solutions = store.select(&q).await.unwrap();
        assert!(solutions[0].is_bound(&s));
        assert!(!solutions[0].is_bound(&o));
    }

    #[tokio::test]
    async fn test_duplicates_are_preserved() {
        let store = MemoryQuadStore::new();
        let quad = Quad::new(iri("g"), iri("s"), iri("p"), Literal::simple("v"));
        store.insert(quad.clone()).await.unwrap();
        store.insert(quad).await.unwrap();
        let o = Variable::new("o");
        let q = SelectQuery::new().pattern(GraphPattern::named(
            iri("g"),
            vec![TriplePattern::new(iri("s"), iri("p"), o)],
        ));
        assert_eq!(store.select(&q).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ask() {
        let store = seeded().await;
        let s = Variable::new("s");
        let p = Variable::new("p");
        let o = Variable::new("o");
        let present = GraphPattern::named(
            iri("g1"),
            vec![TriplePattern::new(s.clone(), p.clone(), o.clone())],
        );
        let absent = GraphPattern::named(iri("g9"), vec![TriplePattern::new(s, p, o)]);
        assert!(store.ask(&present).await.unwrap());
        assert!(!store.ask(&absent).await.unwrap());
    }

    #[tokio::test]
    async fn test_apply_batch_semantics() {
        let store = seeded().await;
        let update = Update::new()
            .clear_graph(iri("g1"))
            .delete_subject(iri("g2"), iri("s2"))
            .insert(vec![Quad::new(iri("g3"), iri("s3"), iri("p3"), iri("o3"))]);
        store.apply(update).await.unwrap();
        assert_eq!(store.len(), 1);
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].graph, iri("g3"));
    }

    #[tokio::test]
    async fn test_delete_where_predicate_narrowing() {
        let store = seeded().await;
        let update =
            Update::new().delete_predicate(iri("g1"), iri("s1"), iri("p1"));
        store.apply(update).await.unwrap();
        assert_eq!(store.len(), 2);
        // p2 row survives
        let o = Variable::new("o");
        let q = SelectQuery::new().pattern(GraphPattern::named(
            iri("g1"),
            vec![TriplePattern::new(iri("s1"), iri("p2"), o)],
        ));
        assert_eq!(store.select(&q).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_absent_graph_succeeds() {
        let store = MemoryQuadStore::new();
        store.clear_graph(&iri("nope")).await.unwrap();
        store
            .remove(&Quad::new(iri("g"), iri("s"), iri("p"), iri("o")))
            .await
            .unwrap();
    }
}
