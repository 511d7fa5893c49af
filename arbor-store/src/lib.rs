//! # Arbor Store
//!
//! Quad storage for the Arbor resource engine.
//!
//! This crate provides:
//! - A small query representation: named-graph-qualified basic graph
//!   patterns with optional sub-patterns and variable projection
//! - Atomic `Update` batches (clear / delete-where / insert-data)
//! - The `QuadStore` capability trait
//! - `MemoryQuadStore`: an indexed in-memory backend for tests and
//!   embedded deployments
//! - `SparqlQuadStore`: a remote backend speaking the SPARQL 1.1 protocol
//!
//! Switching between backends is transparent to callers: everything above
//! this crate talks to `dyn QuadStore`.

pub mod binding;
pub mod error;
pub mod memory;
pub mod pattern;
pub mod sparql;
pub mod store;
pub mod update;

pub use binding::Binding;
pub use error::{Result, StoreError};
pub use memory::MemoryQuadStore;
pub use pattern::{GraphPattern, SelectQuery, TermPattern, TriplePattern, Variable};
pub use sparql::SparqlQuadStore;
pub use store::QuadStore;
pub use update::{Update, UpdateOp};
