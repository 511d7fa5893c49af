//! The quad-store capability trait
//!
//! Backends implement `QuadStore`; everything above talks to
//! `Arc<dyn QuadStore>`. The trait is runtime-agnostic and uses
//! `async_trait` for async support.
//!
//! ## Implementations
//!
//! - `MemoryQuadStore`: per-graph indexed quad multiset, for tests and
//!   embedded deployments
//! - `SparqlQuadStore`: remote SPARQL 1.1 protocol endpoint

use crate::binding::Binding;
use crate::error::Result;
use crate::pattern::{GraphPattern, SelectQuery};
use crate::update::Update;
use arbor_model::{Iri, Quad};
use async_trait::async_trait;
use std::fmt::Debug;

/// Named-graph quad storage with pattern-matching queries.
///
/// ## Contract
///
/// - `select` evaluates a conjunctive query with optional sub-patterns and
///   returns one `Binding` per solution; iteration over an unchanged store
///   is deterministic.
/// - `apply` executes a whole batch atomically with respect to concurrent
///   readers of the touched graphs.
/// - Duplicate quads are preserved as stored (multiset semantics).
#[async_trait]
pub trait QuadStore: Debug + Send + Sync {
    /// Insert a single quad
    async fn insert(&self, quad: Quad) -> Result<()>;

    /// Remove one occurrence of a quad; removing an absent quad succeeds
    async fn remove(&self, quad: &Quad) -> Result<()>;

    /// Remove every quad of a named graph; clearing an absent graph succeeds
    async fn clear_graph(&self, graph: &Iri) -> Result<()>;

    /// Apply a batch of mutations atomically
    async fn apply(&self, update: Update) -> Result<()>;

    /// Evaluate a select query
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Binding>>;

    /// Check whether a graph pattern has at least one solution
    async fn ask(&self, pattern: &GraphPattern) -> Result<bool>;
}
