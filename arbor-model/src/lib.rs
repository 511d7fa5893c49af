//! # Arbor Model
//!
//! RDF primitives for the Arbor resource engine.
//!
//! This crate provides:
//! - `Iri`: an absolute web-style identifier with lexical-form equality
//! - `Literal`, `BlankNode`, `Subject`, `Term`: the RDF term variants
//! - `Quad`: a (graph, subject, predicate, object) tuple
//! - `Dataset`: a per-graph indexed quad multiset with pattern iteration
//!
//! ## Design Principles
//!
//! 1. **Cheap clones**: IRIs and blank-node labels are `Arc<str>`-backed
//! 2. **Lexical equality**: two IRIs are equal iff their lexical forms are
//! 3. **No I/O**: pure data structures; storage lives in `arbor-store`

pub mod dataset;
pub mod iri;
pub mod quad;
pub mod term;

pub use dataset::Dataset;
pub use iri::Iri;
pub use quad::Quad;
pub use term::{BlankNode, Literal, Subject, Term};
