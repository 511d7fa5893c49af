//! IRI - absolute web-style identifier
//!
//! An `Iri` wraps an `Arc<str>` for cheap clones; resources, predicates and
//! graph names are all identified by IRIs and flow through many layers.
//!
//! ## Equality
//!
//! Two IRIs are equal iff their lexical forms are equal. No normalization
//! (case folding, percent-decoding) is performed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// An absolute web-style identifier.
///
/// Serializes as a plain JSON string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Iri(Arc<str>);

impl Iri {
    /// Create a new IRI from its lexical form
    pub fn new(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    /// The lexical form of this IRI
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the audit graph name for a resource identifier
    pub fn audit_graph(&self) -> Iri {
        Iri::new(format!("{}?ext=audit", self.0))
    }

    /// Derive the access-control graph name for a resource identifier
    pub fn acl_graph(&self) -> Iri {
        Iri::new(format!("{}?ext=acl", self.0))
    }
}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Iri::new(iri)
    }
}

impl From<String> for Iri {
    fn from(iri: String) -> Self {
        Iri::new(iri)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Iri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Iri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Iri::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_equality() {
        let a = Iri::new("http://example.com/a");
        let b = Iri::new("http://example.com/a");
        let c = Iri::new("http://example.com/A");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_extension_graphs() {
        let id = Iri::new("trellis:data/resource");
        assert_eq!(id.audit_graph().as_str(), "trellis:data/resource?ext=audit");
        assert_eq!(id.acl_graph().as_str(), "trellis:data/resource?ext=acl");
    }

    #[test]
    fn test_ordering_is_lexical() {
        let a = Iri::new("http://example.com/a");
        let b = Iri::new("http://example.com/b");
        assert!(a < b);
    }
}
