//! Update batches applied atomically by a backend
//!
//! A resource lifecycle operation (create, replace, delete, touch) compiles
//! into one `Update`; the backend MUST apply it so that a concurrent reader
//! of the affected identifier observes either the pre-state or the
//! post-state, never a mix.

use arbor_model::{Iri, Quad, Subject};

/// One primitive mutation within an update batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    /// Remove every quad of a named graph
    ClearGraph(Iri),
    /// Remove every quad of a named graph with the given subject, optionally
    /// narrowed to a single predicate
    DeleteWhere {
        /// Graph to delete from
        graph: Iri,
        /// Subject whose rows are removed
        subject: Subject,
        /// When set, only rows with this predicate are removed
        predicate: Option<Iri>,
    },
    /// Insert concrete quads
    InsertData(Vec<Quad>),
}

/// An ordered batch of mutations, applied atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    /// Operations, applied in order
    pub ops: Vec<UpdateOp>,
}

impl Update {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clear-graph operation
    pub fn clear_graph(mut self, graph: Iri) -> Self {
        self.ops.push(UpdateOp::ClearGraph(graph));
        self
    }

    /// Append a delete-where operation for every row of a subject
    pub fn delete_subject(mut self, graph: Iri, subject: impl Into<Subject>) -> Self {
        self.ops.push(UpdateOp::DeleteWhere {
            graph,
            subject: subject.into(),
            predicate: None,
        });
        self
    }

    /// Append a delete-where operation narrowed to one predicate
    pub fn delete_predicate(
        mut self,
        graph: Iri,
        subject: impl Into<Subject>,
        predicate: Iri,
    ) -> Self {
        self.ops.push(UpdateOp::DeleteWhere {
            graph,
            subject: subject.into(),
            predicate: Some(predicate),
        });
        self
    }

    /// Append an insert-data operation
    pub fn insert(mut self, quads: Vec<Quad>) -> Self {
        if !quads.is_empty() {
            self.ops.push(UpdateOp::InsertData(quads));
        }
        self
    }

    /// Check whether the batch holds no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_order_is_preserved() {
        let g = Iri::new("http://example.com/g");
        let s = Iri::new("http://example.com/s");
        let u = Update::new()
            .clear_graph(g.clone())
            .delete_subject(g.clone(), s.clone())
            .insert(vec![Quad::new(g.clone(), s, Iri::new("p"), Iri::new("o"))]);
        assert_eq!(u.ops.len(), 3);
        assert!(matches!(u.ops[0], UpdateOp::ClearGraph(_)));
        assert!(matches!(u.ops[2], UpdateOp::InsertData(_)));
    }

    #[test]
    fn test_empty_insert_is_dropped() {
        let u = Update::new().insert(vec![]);
        assert!(u.is_empty());
    }
}
