//! # Arbor Resource
//!
//! The LDP resource layer of the Arbor engine: a hierarchy of
//! web-addressable RDF resources with strict interaction-model semantics,
//! projected out of a named-graph quad store.
//!
//! This crate provides:
//! - `find_resource` / `Resource` / `ResourceView`: the projection that
//!   assembles a resource view (metadata, user triples, audit trail, ACL,
//!   containment, membership) from a `QuadStore`
//! - `ResourceService` and its store-backed implementation
//!   `QuadResourceService`: create, replace, delete, append-immutable,
//!   touch, identifier generation
//! - `Session`, audit-trail generation, and `Event` emission with an
//!   ActivityStream serializer
//!
//! ## Persisted state layout
//!
//! - `<id>` — user-managed triples for resource id
//! - `<id>?ext=audit` — append-only audit triples
//! - `<id>?ext=acl` — ACL triples
//! - `trellis:PreferServerManaged` — server-managed metadata for all
//!   resources, keyed by subject

pub mod audit;
pub mod error;
pub mod event;
pub mod projection;
pub mod service;
pub mod session;

pub use error::{Error, Result};
pub use event::{ActivityStreamSerializer, Event, EventSerializer};
pub use projection::{find_resource, Binary, ProjectionGraph, Resource, ResourceView};
pub use service::{QuadResourceService, ResourceService};
pub use session::Session;
