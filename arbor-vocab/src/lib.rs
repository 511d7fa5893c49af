//! RDF Vocabulary Constants for Arbor
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used throughout the Arbor resource engine.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `dc` - DC Terms vocabulary (http://purl.org/dc/terms/)
//! - `ldp` - W3C Linked Data Platform vocabulary (http://www.w3.org/ns/ldp#)
//! - `trellis` - Engine-internal vocabulary (graph names, sentinels, agents)
//! - `prov` - W3C PROV-O vocabulary
//! - `activitystreams` - W3C Activity Streams 2.0 vocabulary
//! - `acl` - W3C Web Access Control vocabulary
//! - `foaf`, `skos` - terms used by the conformance suite

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
}

/// DC Terms vocabulary constants
pub mod dc {
    /// dc:title IRI
    pub const TITLE: &str = "http://purl.org/dc/terms/title";

    /// dc:subject IRI
    pub const SUBJECT: &str = "http://purl.org/dc/terms/subject";

    /// dc:relation IRI
    pub const RELATION: &str = "http://purl.org/dc/terms/relation";

    /// dc:type IRI
    ///
    /// Distinct from rdf:type. The engine uses it to mark tombstones.
    pub const TYPE: &str = "http://purl.org/dc/terms/type";

    /// dc:modified IRI
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";

    /// dc:isPartOf IRI (child-to-parent containment edge)
    pub const IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";

    /// dc:hasPart IRI (resource-to-binary-descriptor edge)
    pub const HAS_PART: &str = "http://purl.org/dc/terms/hasPart";

    /// dc:format IRI (MIME type of a binary)
    pub const FORMAT: &str = "http://purl.org/dc/terms/format";

    /// dc:extent IRI (size of a binary)
    pub const EXTENT: &str = "http://purl.org/dc/terms/extent";
}

/// W3C Linked Data Platform vocabulary constants
pub mod ldp {
    /// ldp:Resource IRI
    pub const RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";

    /// ldp:RDFSource IRI
    pub const RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#RDFSource";

    /// ldp:NonRDFSource IRI
    pub const NON_RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#NonRDFSource";

    /// ldp:Container IRI
    pub const CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";

    /// ldp:BasicContainer IRI
    pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";

    /// ldp:DirectContainer IRI
    pub const DIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#DirectContainer";

    /// ldp:IndirectContainer IRI
    pub const INDIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#IndirectContainer";

    /// ldp:contains IRI (containment edge)
    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

    /// ldp:member IRI (server-managed link from a container to its membership resource)
    pub const MEMBER: &str = "http://www.w3.org/ns/ldp#member";

    /// ldp:membershipResource IRI
    pub const MEMBERSHIP_RESOURCE: &str = "http://www.w3.org/ns/ldp#membershipResource";

    /// ldp:hasMemberRelation IRI
    pub const HAS_MEMBER_RELATION: &str = "http://www.w3.org/ns/ldp#hasMemberRelation";

    /// ldp:isMemberOfRelation IRI
    pub const IS_MEMBER_OF_RELATION: &str = "http://www.w3.org/ns/ldp#isMemberOfRelation";

    /// ldp:insertedContentRelation IRI
    pub const INSERTED_CONTENT_RELATION: &str = "http://www.w3.org/ns/ldp#insertedContentRelation";

    /// ldp:MemberSubject IRI (default inserted-content relation)
    pub const MEMBER_SUBJECT: &str = "http://www.w3.org/ns/ldp#MemberSubject";

    /// ldp:inbox IRI
    pub const INBOX: &str = "http://www.w3.org/ns/ldp#inbox";

    /// ldp:PreferContainment IRI (projection graph name)
    pub const PREFER_CONTAINMENT: &str = "http://www.w3.org/ns/ldp#PreferContainment";

    /// ldp:PreferMembership IRI (projection graph name)
    pub const PREFER_MEMBERSHIP: &str = "http://www.w3.org/ns/ldp#PreferMembership";

    /// Check whether an interaction-model IRI denotes a container.
    ///
    /// Containers are classified by lexical form only: the IRI ends in
    /// `Container`. This covers ldp:Container, ldp:BasicContainer,
    /// ldp:DirectContainer and ldp:IndirectContainer.
    #[inline]
    pub fn is_container(iri: &str) -> bool {
        iri.ends_with("Container")
    }
}

/// Engine-internal vocabulary: graph names, sentinels, agents, prefixes
pub mod trellis {
    /// Namespace IRI
    pub const NS: &str = "http://www.trellisldp.org/ns/trellis#";

    /// Projection graph name for user-authored triples
    pub const PREFER_USER_MANAGED: &str = "http://www.trellisldp.org/ns/trellis#PreferUserManaged";

    /// Named graph (and projection graph name) for engine-maintained metadata
    pub const PREFER_SERVER_MANAGED: &str =
        "http://www.trellisldp.org/ns/trellis#PreferServerManaged";

    /// Projection graph name for the append-only audit trail
    pub const PREFER_AUDIT: &str = "http://www.trellisldp.org/ns/trellis#PreferAudit";

    /// Projection graph name for access-control triples
    pub const PREFER_ACCESS_CONTROL: &str =
        "http://www.trellisldp.org/ns/trellis#PreferAccessControl";

    /// Tombstone marker class (object of a dc:type triple)
    pub const DELETED_RESOURCE: &str = "http://www.trellisldp.org/ns/trellis#DeletedResource";

    /// Administrative agent IRI
    pub const ADMINISTRATOR_AGENT: &str =
        "http://www.trellisldp.org/ns/trellis#AdministratorAgent";

    /// Anonymous agent IRI
    pub const ANONYMOUS_AGENT: &str = "http://www.trellisldp.org/ns/trellis#AnonymousAgent";

    /// Prefix for resource identifiers minted by the engine
    pub const DATA_PREFIX: &str = "trellis:data/";

    /// Prefix for skolemized blank-node identifiers
    pub const BNODE_PREFIX: &str = "trellis:bnode/";
}

/// W3C PROV-O vocabulary constants
pub mod prov {
    /// prov:Activity IRI
    pub const ACTIVITY: &str = "http://www.w3.org/ns/prov#Activity";

    /// prov:wasGeneratedBy IRI
    pub const WAS_GENERATED_BY: &str = "http://www.w3.org/ns/prov#wasGeneratedBy";

    /// prov:wasAssociatedWith IRI
    pub const WAS_ASSOCIATED_WITH: &str = "http://www.w3.org/ns/prov#wasAssociatedWith";

    /// prov:atTime IRI
    pub const AT_TIME: &str = "http://www.w3.org/ns/prov#atTime";
}

/// W3C Activity Streams 2.0 vocabulary constants
pub mod activitystreams {
    /// Namespace IRI
    pub const NS: &str = "https://www.w3.org/ns/activitystreams#";

    /// as:Create IRI
    pub const CREATE: &str = "https://www.w3.org/ns/activitystreams#Create";

    /// as:Update IRI
    pub const UPDATE: &str = "https://www.w3.org/ns/activitystreams#Update";

    /// as:Delete IRI
    pub const DELETE: &str = "https://www.w3.org/ns/activitystreams#Delete";
}

/// W3C Web Access Control vocabulary constants
pub mod acl {
    /// acl:Authorization IRI
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";

    /// acl:mode IRI
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";

    /// acl:Read IRI
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";

    /// acl:agent IRI
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";

    /// acl:accessTo IRI
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
}

/// FOAF vocabulary constants
pub mod foaf {
    /// foaf:primaryTopic IRI
    pub const PRIMARY_TOPIC: &str = "http://xmlns.com/foaf/0.1/primaryTopic";
}

/// SKOS vocabulary constants
pub mod skos {
    /// skos:Concept IRI
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

    /// skos:prefLabel IRI
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    /// skos:altLabel IRI
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_classification() {
        assert!(ldp::is_container(ldp::CONTAINER));
        assert!(ldp::is_container(ldp::BASIC_CONTAINER));
        assert!(ldp::is_container(ldp::DIRECT_CONTAINER));
        assert!(ldp::is_container(ldp::INDIRECT_CONTAINER));
        assert!(!ldp::is_container(ldp::RDF_SOURCE));
        assert!(!ldp::is_container(ldp::NON_RDF_SOURCE));
        assert!(!ldp::is_container(ldp::RESOURCE));
    }

    #[test]
    fn test_dc_type_is_not_rdf_type() {
        assert_ne!(dc::TYPE, rdf::TYPE);
    }
}
