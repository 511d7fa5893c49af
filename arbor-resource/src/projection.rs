//! Resource projection
//!
//! A resource is not stored as one record: it is a projection assembled from
//! several named graphs. `find_resource` performs the metadata fetch against
//! the server-managed graph and classifies the result as live, missing, or
//! deleted; the live `Resource` then derives each projection graph on demand
//! with a fixed query per graph name.

use crate::error::Result;
use arbor_model::{Iri, Literal, Quad, Subject, Term};
use arbor_store::{Binding, GraphPattern, QuadStore, SelectQuery, TriplePattern, Variable};
use arbor_vocab::{dc, ldp, rdf, trellis};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// The fixed set of graphs a resource view is grouped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionGraph {
    /// User-authored triples
    UserManaged,
    /// Engine-maintained metadata
    ServerManaged,
    /// Append-only provenance
    Audit,
    /// ACL authorization triples
    AccessControl,
    /// Derived ldp:contains edges
    Containment,
    /// Derived membership edges
    Membership,
}

impl ProjectionGraph {
    /// Every projection graph, in stream_all order
    pub const ALL: [ProjectionGraph; 6] = [
        ProjectionGraph::UserManaged,
        ProjectionGraph::ServerManaged,
        ProjectionGraph::Audit,
        ProjectionGraph::AccessControl,
        ProjectionGraph::Containment,
        ProjectionGraph::Membership,
    ];

    /// The graph name quads of this projection are emitted under
    pub fn iri(&self) -> Iri {
        match self {
            ProjectionGraph::UserManaged => Iri::new(trellis::PREFER_USER_MANAGED),
            ProjectionGraph::ServerManaged => Iri::new(trellis::PREFER_SERVER_MANAGED),
            ProjectionGraph::Audit => Iri::new(trellis::PREFER_AUDIT),
            ProjectionGraph::AccessControl => Iri::new(trellis::PREFER_ACCESS_CONTROL),
            ProjectionGraph::Containment => Iri::new(ldp::PREFER_CONTAINMENT),
            ProjectionGraph::Membership => Iri::new(ldp::PREFER_MEMBERSHIP),
        }
    }

    /// Resolve a projection graph from its graph name
    pub fn from_iri(iri: &Iri) -> Option<ProjectionGraph> {
        ProjectionGraph::ALL.into_iter().find(|g| &g.iri() == iri)
    }
}

/// Metadata about the binary backing a NonRDFSource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    /// Where the bytes live
    pub location: Iri,
    /// When the binary was last modified
    pub modified: DateTime<Utc>,
    /// Optional MIME type
    pub mime_type: Option<String>,
    /// Optional size in bytes
    pub size: Option<u64>,
}

/// The state of an identifier: a live resource, or one of the sentinels.
#[derive(Clone, Debug)]
pub enum ResourceView {
    /// A live resource snapshot
    Live(Resource),
    /// No record exists for the identifier
    Missing,
    /// A tombstone marker is present
    Deleted,
}

impl ResourceView {
    /// Check for the missing sentinel
    pub fn is_missing(&self) -> bool {
        matches!(self, ResourceView::Missing)
    }

    /// Check for the deleted sentinel
    pub fn is_deleted(&self) -> bool {
        matches!(self, ResourceView::Deleted)
    }

    /// Get the live resource, if any
    pub fn as_live(&self) -> Option<&Resource> {
        match self {
            ResourceView::Live(res) => Some(res),
            _ => None,
        }
    }

    /// Unwrap into the live resource, if any
    pub fn into_live(self) -> Option<Resource> {
        match self {
            ResourceView::Live(res) => Some(res),
            _ => None,
        }
    }
}

/// An immutable snapshot of a live resource.
///
/// Metadata is captured at `find_resource` time; the per-graph quad streams
/// query the store on demand, and every `stream` call issues a fresh query.
#[derive(Clone, Debug)]
pub struct Resource {
    identifier: Iri,
    store: Arc<dyn QuadStore>,
    include_ldp_type: bool,
    interaction_model: Iri,
    modified: DateTime<Utc>,
    data: HashMap<Iri, Term>,
    binary_data: HashMap<Iri, Term>,
}

/// Try to load a resource view.
///
/// Performs the metadata fetch, equivalent to:
///
/// ```sparql
/// SELECT ?predicate ?object ?binarySubject ?binaryPredicate ?binaryObject
/// WHERE {
///   GRAPH trellis:PreferServerManaged {
///     IDENTIFIER ?predicate ?object
///     OPTIONAL {
///       IDENTIFIER dc:hasPart ?binarySubject .
///       IDENTIFIER rdf:type ldp:NonRDFSource .
///       ?binarySubject ?binaryPredicate ?binaryObject
///     }
///   }
/// }
/// ```
///
/// With no metadata at all the view is `Missing`; with a
/// `dc:type trellis:DeletedResource` marker it is `Deleted`; otherwise the
/// live resource is returned and its graph streams are computed on demand.
pub async fn find_resource(
    store: Arc<dyn QuadStore>,
    identifier: Iri,
    include_ldp_type: bool,
) -> Result<ResourceView> {
    tracing::debug!(%identifier, "fetching resource metadata");
    let predicate = Variable::new("predicate");
    let object = Variable::new("object");
    let binary_subject = Variable::new("binarySubject");
    let binary_predicate = Variable::new("binaryPredicate");
    let binary_object = Variable::new("binaryObject");

    let server = Iri::new(trellis::PREFER_SERVER_MANAGED);
    let query = SelectQuery::new()
        .select([
            predicate.clone(),
            object.clone(),
            binary_subject.clone(),
            binary_predicate.clone(),
            binary_object.clone(),
        ])
        .pattern(GraphPattern::named(
            server.clone(),
            vec![TriplePattern::new(
                identifier.clone(),
                predicate.clone(),
                object.clone(),
            )],
        ))
        .optional(GraphPattern::named(
            server,
            vec![
                TriplePattern::new(
                    identifier.clone(),
                    Iri::new(dc::HAS_PART),
                    binary_subject.clone(),
                ),
                TriplePattern::new(
                    identifier.clone(),
                    Iri::new(rdf::TYPE),
                    Iri::new(ldp::NON_RDF_SOURCE),
                ),
                TriplePattern::new(
                    binary_subject.clone(),
                    binary_predicate.clone(),
                    binary_object.clone(),
                ),
            ],
        ));

    let rows = store.select(&query).await?;
    let mut data: HashMap<Iri, Term> = HashMap::new();
    let mut binary_data: HashMap<Iri, Term> = HashMap::new();
    for row in rows {
        if let (Some(Term::Iri(p)), Some(o)) = (row.get(&binary_predicate), row.get(&binary_object))
        {
            binary_data.insert(p.clone(), o.clone());
        }
        if let (Some(Term::Iri(p)), Some(o)) = (row.get(&predicate), row.get(&object)) {
            data.insert(p.clone(), o.clone());
        }
    }

    let interaction_model = match data.get(&Iri::new(rdf::TYPE)).and_then(Term::as_iri) {
        Some(iri) => iri.clone(),
        None => return Ok(ResourceView::Missing),
    };
    let modified = match data
        .get(&Iri::new(dc::MODIFIED))
        .and_then(Term::lexical)
        .and_then(parse_instant)
    {
        Some(instant) => instant,
        None => return Ok(ResourceView::Missing),
    };

    let deleted = Iri::new(trellis::DELETED_RESOURCE);
    if data.get(&Iri::new(dc::TYPE)).and_then(Term::as_iri) == Some(&deleted) {
        return Ok(ResourceView::Deleted);
    }

    Ok(ResourceView::Live(Resource {
        identifier,
        store,
        include_ldp_type,
        interaction_model,
        modified,
        data,
        binary_data,
    }))
}

impl Resource {
    /// The resource identifier
    pub fn identifier(&self) -> &Iri {
        &self.identifier
    }

    /// The LDP interaction model
    pub fn interaction_model(&self) -> &Iri {
        &self.interaction_model
    }

    /// The modification time
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// The parent container, if any
    pub fn container(&self) -> Option<&Iri> {
        self.as_iri(dc::IS_PART_OF)
    }

    /// The ldp:membershipResource, if configured
    pub fn membership_resource(&self) -> Option<&Iri> {
        self.as_iri(ldp::MEMBERSHIP_RESOURCE)
    }

    /// The ldp:hasMemberRelation, if configured
    pub fn member_relation(&self) -> Option<&Iri> {
        self.as_iri(ldp::HAS_MEMBER_RELATION)
    }

    /// The ldp:isMemberOfRelation, if configured
    pub fn member_of_relation(&self) -> Option<&Iri> {
        self.as_iri(ldp::IS_MEMBER_OF_RELATION)
    }

    /// The ldp:insertedContentRelation, if configured
    pub fn inserted_content_relation(&self) -> Option<&Iri> {
        self.as_iri(ldp::INSERTED_CONTENT_RELATION)
    }

    /// Where this resource's binary lives, if it has one
    pub fn binary_location(&self) -> Option<&Iri> {
        self.as_iri(dc::HAS_PART)
    }

    /// Binary metadata for a NonRDFSource
    pub fn binary_metadata(&self) -> Option<Binary> {
        let location = self.binary_location()?.clone();
        let modified = self
            .binary_data
            .get(&Iri::new(dc::MODIFIED))
            .and_then(Term::lexical)
            .and_then(parse_instant)?;
        let mime_type = self
            .binary_data
            .get(&Iri::new(dc::FORMAT))
            .and_then(Term::lexical)
            .map(str::to_string);
        let size = self
            .binary_data
            .get(&Iri::new(dc::EXTENT))
            .and_then(Term::lexical)
            .and_then(|s| s.parse().ok());
        Some(Binary {
            location,
            modified,
            mime_type,
            size,
        })
    }

    /// Check whether any access-control triples exist for this resource
    pub async fn has_acl(&self) -> Result<bool> {
        let pattern = GraphPattern::named(
            self.identifier.acl_graph(),
            vec![TriplePattern::new(
                Variable::new("subject"),
                Variable::new("predicate"),
                Variable::new("object"),
            )],
        );
        Ok(self.store.ask(&pattern).await?)
    }

    /// Stream the quads of one projection graph.
    ///
    /// Each call issues a fresh query against the store.
    pub async fn stream(&self, graph: ProjectionGraph) -> Result<Vec<Quad>> {
        match graph {
            ProjectionGraph::UserManaged => self.fetch_user_quads().await,
            ProjectionGraph::ServerManaged => Ok(self.server_managed_quads()),
            ProjectionGraph::Audit => {
                self.fetch_all_from_graph(self.identifier.audit_graph(), graph.iri())
                    .await
            }
            ProjectionGraph::AccessControl => {
                self.fetch_all_from_graph(self.identifier.acl_graph(), graph.iri())
                    .await
            }
            ProjectionGraph::Containment => self.fetch_containment_quads().await,
            ProjectionGraph::Membership => self.fetch_membership_quads().await,
        }
    }

    /// Stream every projection graph, concatenated
    pub async fn stream_all(&self) -> Result<Vec<Quad>> {
        let mut quads = Vec::new();
        for graph in ProjectionGraph::ALL {
            quads.extend(self.stream(graph).await?);
        }
        Ok(quads)
    }

    fn as_iri(&self, predicate: &str) -> Option<&Iri> {
        self.data.get(&Iri::new(predicate)).and_then(Term::as_iri)
    }

    /// The metadata rows captured at load time, re-homed under the
    /// server-managed projection graph name.
    fn server_managed_quads(&self) -> Vec<Quad> {
        let graph = ProjectionGraph::ServerManaged.iri();
        let mut quads: Vec<Quad> = self
            .data
            .iter()
            .map(|(p, o)| {
                Quad::new(
                    graph.clone(),
                    self.identifier.clone(),
                    p.clone(),
                    o.clone(),
                )
            })
            .collect();
        if let Some(binary) = self.binary_location() {
            quads.extend(self.binary_data.iter().map(|(p, o)| {
                Quad::new(graph.clone(), binary.clone(), p.clone(), o.clone())
            }));
        }
        quads
    }

    /// All triples of one named graph, re-homed under a projection graph name.
    ///
    /// Equivalent to:
    ///
    /// ```sparql
    /// SELECT ?subject ?predicate ?object
    /// WHERE { GRAPH fromGraph { ?subject ?predicate ?object } }
    /// ```
    async fn fetch_all_from_graph(&self, from: Iri, to: Iri) -> Result<Vec<Quad>> {
        let subject = Variable::new("subject");
        let predicate = Variable::new("predicate");
        let object = Variable::new("object");
        let query = SelectQuery::new()
            .select([subject.clone(), predicate.clone(), object.clone()])
            .pattern(GraphPattern::named(
                from,
                vec![TriplePattern::new(
                    subject.clone(),
                    predicate.clone(),
                    object.clone(),
                )],
            ));
        let rows = self.store.select(&query).await?;
        Ok(quads_from_rows(rows, &to, None, &subject, &predicate, &object))
    }

    async fn fetch_user_quads(&self) -> Result<Vec<Quad>> {
        let to = ProjectionGraph::UserManaged.iri();
        let mut quads = Vec::new();
        if self.include_ldp_type {
            quads.push(Quad::new(
                to.clone(),
                self.identifier.clone(),
                Iri::new(rdf::TYPE),
                self.interaction_model.clone(),
            ));
        }
        quads.extend(
            self.fetch_all_from_graph(self.identifier.clone(), to)
                .await?,
        );
        Ok(quads)
    }

    /// Containment edges, for container models only.
    ///
    /// Equivalent to:
    ///
    /// ```sparql
    /// SELECT ?object
    /// WHERE { GRAPH trellis:PreferServerManaged { ?object dc:isPartOf IDENTIFIER } }
    /// ```
    async fn fetch_containment_quads(&self) -> Result<Vec<Quad>> {
        if !ldp::is_container(self.interaction_model.as_str()) {
            return Ok(Vec::new());
        }
        let object = Variable::new("object");
        let query = SelectQuery::new()
            .select([object.clone()])
            .pattern(GraphPattern::named(
                Iri::new(trellis::PREFER_SERVER_MANAGED),
                vec![TriplePattern::new(
                    object.clone(),
                    Iri::new(dc::IS_PART_OF),
                    self.identifier.clone(),
                )],
            ));
        let rows = self.store.select(&query).await?;
        let graph = ProjectionGraph::Containment.iri();
        Ok(rows
            .iter()
            .filter_map(|row| row.get(&object))
            .map(|child| {
                Quad::new(
                    graph.clone(),
                    self.identifier.clone(),
                    Iri::new(ldp::CONTAINS),
                    child.clone(),
                )
            })
            .collect())
    }

    async fn fetch_membership_quads(&self) -> Result<Vec<Quad>> {
        let mut quads = self.fetch_indirect_member_quads().await?;
        quads.extend(self.fetch_direct_member_quads().await?);
        quads.extend(self.fetch_direct_member_quads_inverse().await?);
        Ok(quads)
    }

    /// Indirect membership: containers whose membership resource is this
    /// resource contribute one quad per contained child per matching value
    /// of the inserted-content relation.
    ///
    /// Equivalent to:
    ///
    /// ```sparql
    /// SELECT ?subject ?predicate ?object
    /// WHERE {
    ///   GRAPH trellis:PreferServerManaged {
    ///     ?s ldp:member IDENTIFIER .
    ///     ?s ldp:membershipResource ?subject .
    ///     ?s rdf:type ldp:IndirectContainer .
    ///     ?s ldp:hasMemberRelation ?predicate .
    ///     ?s ldp:insertedContentRelation ?o .
    ///     ?res dc:isPartOf ?s .
    ///   }
    ///   GRAPH ?res { ?res ?o ?object }
    /// }
    /// ```
    async fn fetch_indirect_member_quads(&self) -> Result<Vec<Quad>> {
        let s = Variable::new("s");
        let o = Variable::new("o");
        let res = Variable::new("res");
        let subject = Variable::new("subject");
        let predicate = Variable::new("predicate");
        let object = Variable::new("object");
        let query = SelectQuery::new()
            .select([subject.clone(), predicate.clone(), object.clone()])
            .pattern(GraphPattern::named(
                Iri::new(trellis::PREFER_SERVER_MANAGED),
                vec![
                    TriplePattern::new(s.clone(), Iri::new(ldp::MEMBER), self.identifier.clone()),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::MEMBERSHIP_RESOURCE),
                        subject.clone(),
                    ),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(rdf::TYPE),
                        Iri::new(ldp::INDIRECT_CONTAINER),
                    ),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::HAS_MEMBER_RELATION),
                        predicate.clone(),
                    ),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::INSERTED_CONTENT_RELATION),
                        o.clone(),
                    ),
                    TriplePattern::new(res.clone(), Iri::new(dc::IS_PART_OF), s.clone()),
                ],
            ))
            .pattern(GraphPattern::var_graph(
                res.clone(),
                vec![TriplePattern::new(res.clone(), o.clone(), object.clone())],
            ));
        let rows = self.store.select(&query).await?;
        let graph = ProjectionGraph::Membership.iri();
        Ok(quads_from_rows(
            rows, &graph, None, &subject, &predicate, &object,
        ))
    }

    /// Direct membership, forward path.
    ///
    /// Equivalent to:
    ///
    /// ```sparql
    /// SELECT ?subject ?predicate ?object
    /// WHERE {
    ///   GRAPH trellis:PreferServerManaged {
    ///     ?s ldp:member IDENTIFIER .
    ///     ?s ldp:membershipResource ?subject .
    ///     ?s ldp:hasMemberRelation ?predicate .
    ///     ?s ldp:insertedContentRelation ldp:MemberSubject .
    ///     ?object dc:isPartOf ?s .
    ///   }
    /// }
    /// ```
    async fn fetch_direct_member_quads(&self) -> Result<Vec<Quad>> {
        let s = Variable::new("s");
        let subject = Variable::new("subject");
        let predicate = Variable::new("predicate");
        let object = Variable::new("object");
        let query = SelectQuery::new()
            .select([subject.clone(), predicate.clone(), object.clone()])
            .pattern(GraphPattern::named(
                Iri::new(trellis::PREFER_SERVER_MANAGED),
                vec![
                    TriplePattern::new(s.clone(), Iri::new(ldp::MEMBER), self.identifier.clone()),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::MEMBERSHIP_RESOURCE),
                        subject.clone(),
                    ),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::HAS_MEMBER_RELATION),
                        predicate.clone(),
                    ),
                    TriplePattern::new(
                        s.clone(),
                        Iri::new(ldp::INSERTED_CONTENT_RELATION),
                        Iri::new(ldp::MEMBER_SUBJECT),
                    ),
                    TriplePattern::new(object.clone(), Iri::new(dc::IS_PART_OF), s.clone()),
                ],
            ));
        let rows = self.store.select(&query).await?;
        let graph = ProjectionGraph::Membership.iri();
        Ok(quads_from_rows(
            rows, &graph, None, &subject, &predicate, &object,
        ))
    }

    /// Direct membership, inverse path: this resource is a child of a
    /// container configured with ldp:isMemberOfRelation.
    ///
    /// Equivalent to:
    ///
    /// ```sparql
    /// SELECT ?predicate ?object
    /// WHERE {
    ///   GRAPH trellis:PreferServerManaged {
    ///     IDENTIFIER dc:isPartOf ?subject .
    ///     ?subject ldp:isMemberOfRelation ?predicate .
    ///     ?subject ldp:membershipResource ?object .
    ///     ?subject ldp:insertedContentRelation ldp:MemberSubject .
    ///   }
    /// }
    /// ```
    async fn fetch_direct_member_quads_inverse(&self) -> Result<Vec<Quad>> {
        let subject = Variable::new("subject");
        let predicate = Variable::new("predicate");
        let object = Variable::new("object");
        let query = SelectQuery::new()
            .select([predicate.clone(), object.clone()])
            .pattern(GraphPattern::named(
                Iri::new(trellis::PREFER_SERVER_MANAGED),
                vec![
                    TriplePattern::new(
                        self.identifier.clone(),
                        Iri::new(dc::IS_PART_OF),
                        subject.clone(),
                    ),
                    TriplePattern::new(
                        subject.clone(),
                        Iri::new(ldp::IS_MEMBER_OF_RELATION),
                        predicate.clone(),
                    ),
                    TriplePattern::new(
                        subject.clone(),
                        Iri::new(ldp::MEMBERSHIP_RESOURCE),
                        object.clone(),
                    ),
                    TriplePattern::new(
                        subject.clone(),
                        Iri::new(ldp::INSERTED_CONTENT_RELATION),
                        Iri::new(ldp::MEMBER_SUBJECT),
                    ),
                ],
            ));
        let rows = self.store.select(&query).await?;
        let graph = ProjectionGraph::Membership.iri();
        Ok(quads_from_rows(
            rows,
            &graph,
            Some(&self.identifier),
            &subject,
            &predicate,
            &object,
        ))
    }
}

/// Build quads from solution rows.
///
/// The subject comes from `fixed_subject` when given, else from the subject
/// variable; rows whose subject is a literal or whose predicate is not an
/// IRI are skipped.
fn quads_from_rows(
    rows: Vec<Binding>,
    graph: &Iri,
    fixed_subject: Option<&Iri>,
    subject: &Variable,
    predicate: &Variable,
    object: &Variable,
) -> Vec<Quad> {
    rows.iter()
        .filter_map(|row| {
            let s: Subject = match fixed_subject {
                Some(iri) => Subject::Iri(iri.clone()),
                None => match row.get(subject)? {
                    Term::Iri(iri) => Subject::Iri(iri.clone()),
                    Term::Blank(b) => Subject::Blank(b.clone()),
                    Term::Literal(_) => return None,
                },
            };
            let p = row.get(predicate)?.as_iri()?.clone();
            let o = row.get(object)?.clone();
            Some(Quad::new(graph.clone(), s, p, o))
        })
        .collect()
}

fn parse_instant(lexical: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(lexical)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an instant the way the engine stores modification times
pub(crate) fn format_instant(instant: DateTime<Utc>) -> Literal {
    Literal::typed(
        instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        Iri::new(arbor_vocab::xsd::DATE_TIME),
    )
}
