//! Resource lifecycle service
//!
//! `QuadResourceService` implements the `ResourceService` operations over any
//! `QuadStore`. Each mutation compiles into a single `Update` batch, so the
//! backend's atomicity guarantee covers the whole lifecycle step.

use crate::error::{Error, Result};
use crate::event::{Event, EventSerializer};
use crate::projection::{find_resource, format_instant, Binary, ResourceView};
use crate::session::Session;
use arbor_model::{Dataset, Iri, Literal, Quad, Term};
use arbor_store::{QuadStore, Update};
use arbor_vocab::{activitystreams, dc, ldp, rdf, trellis, xsd};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static SERVICE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The resource lifecycle operations.
///
/// Every method returns a completion future; callers that await each
/// completion before issuing the next operation on the same identifier
/// observe their operations in program order.
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Fetch the current state of an identifier. Never fails on a healthy
    /// backend: absent records yield the `Missing` sentinel.
    async fn get(&self, identifier: &Iri) -> Result<ResourceView>;

    /// Create a resource. The caller must have observed `Missing` for this
    /// identifier; the engine does not re-check.
    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Result<()>;

    /// Replace a resource: the user-managed graph is replaced wholesale,
    /// server-managed metadata is rewritten, the audit graph is preserved.
    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Result<()>;

    /// Write a tombstone. Subsequent `get` calls yield `Deleted`. The audit
    /// graph is left untouched.
    async fn delete(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
    ) -> Result<()>;

    /// Append immutable (audit) data. This is the only write path to the
    /// audit graph; nothing is ever removed from it.
    async fn add(&self, identifier: &Iri, session: &Session, dataset: &Dataset) -> Result<()>;

    /// Update the modification timestamp of an existing resource
    async fn touch(&self, identifier: &Iri) -> Result<()>;

    /// The interaction models this service accepts
    fn supported_interaction_models(&self) -> &HashSet<Iri>;

    /// Mint a fresh opaque identifier, unique within this service instance
    fn generate_identifier(&self) -> String;
}

/// A `ResourceService` backed by a `QuadStore`.
pub struct QuadResourceService {
    store: Arc<dyn QuadStore>,
    supported: HashSet<Iri>,
    serializer: Option<Arc<dyn EventSerializer>>,
    include_ldp_type: bool,
    id_prefix: String,
    id_counter: AtomicU64,
}

impl fmt::Debug for QuadResourceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadResourceService")
            .field("store", &self.store)
            .field("supported", &self.supported)
            .field("include_ldp_type", &self.include_ldp_type)
            .field("id_prefix", &self.id_prefix)
            .finish()
    }
}

impl QuadResourceService {
    /// Create a service over the given store, supporting every interaction
    /// model the engine implements.
    pub fn new(store: Arc<dyn QuadStore>) -> Self {
        let supported = [
            ldp::RDF_SOURCE,
            ldp::NON_RDF_SOURCE,
            ldp::CONTAINER,
            ldp::BASIC_CONTAINER,
            ldp::DIRECT_CONTAINER,
            ldp::INDIRECT_CONTAINER,
        ]
        .into_iter()
        .map(Iri::new)
        .collect();
        let instance = SERVICE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            store,
            supported,
            serializer: None,
            include_ldp_type: false,
            id_prefix: format!("{instance}-"),
            id_counter: AtomicU64::new(0),
        }
    }

    /// Restrict the advertised interaction models
    pub fn with_supported_models(mut self, models: impl IntoIterator<Item = Iri>) -> Self {
        self.supported = models.into_iter().collect();
        self
    }

    /// Emit events through the given serializer on create/replace/delete
    pub fn with_event_serializer(mut self, serializer: Arc<dyn EventSerializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Include the interaction-model triple in user-managed streams
    pub fn with_ldp_type(mut self, include: bool) -> Self {
        self.include_ldp_type = include;
        self
    }

    fn check_interaction_model(&self, ixn_model: &Iri) -> Result<()> {
        if self.supported.contains(ixn_model) {
            Ok(())
        } else {
            Err(Error::constraint(format!(
                "unsupported interaction model: {ixn_model}"
            )))
        }
    }

    /// Validate the container configuration and binary requirements of a
    /// create/replace payload.
    fn check_constraints(
        identifier: &Iri,
        ixn_model: &Iri,
        dataset: &Dataset,
        binary: Option<&Binary>,
    ) -> Result<()> {
        if ixn_model.as_str() == ldp::NON_RDF_SOURCE && binary.is_none() {
            return Err(Error::constraint(format!(
                "{identifier}: a NonRDFSource requires binary metadata"
            )));
        }
        let config = |predicate: &str| user_object(dataset, identifier, predicate);
        match ixn_model.as_str() {
            ldp::DIRECT_CONTAINER => {
                if config(ldp::MEMBERSHIP_RESOURCE).is_none() {
                    return Err(Error::constraint(format!(
                        "{identifier}: a DirectContainer requires ldp:membershipResource"
                    )));
                }
                let has_member = config(ldp::HAS_MEMBER_RELATION).is_some();
                let is_member_of = config(ldp::IS_MEMBER_OF_RELATION).is_some();
                if has_member == is_member_of {
                    return Err(Error::constraint(format!(
                        "{identifier}: a DirectContainer requires exactly one of \
                         ldp:hasMemberRelation and ldp:isMemberOfRelation"
                    )));
                }
            }
            ldp::INDIRECT_CONTAINER => {
                if config(ldp::MEMBERSHIP_RESOURCE).is_none()
                    || config(ldp::HAS_MEMBER_RELATION).is_none()
                {
                    return Err(Error::constraint(format!(
                        "{identifier}: an IndirectContainer requires \
                         ldp:membershipResource and ldp:hasMemberRelation"
                    )));
                }
                match config(ldp::INSERTED_CONTENT_RELATION) {
                    None => {
                        return Err(Error::constraint(format!(
                            "{identifier}: an IndirectContainer requires \
                             ldp:insertedContentRelation"
                        )));
                    }
                    Some(Term::Iri(iri)) if iri.as_str() == ldp::MEMBER_SUBJECT => {
                        return Err(Error::constraint(format!(
                            "{identifier}: an IndirectContainer may not use \
                             ldp:MemberSubject as its inserted-content relation"
                        )));
                    }
                    Some(_) => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Server-managed metadata rows for a create/replace.
    fn server_quads(
        &self,
        identifier: &Iri,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Vec<Quad> {
        let server = Iri::new(trellis::PREFER_SERVER_MANAGED);
        let now = format_instant(Utc::now());
        let mut quads = vec![
            Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(rdf::TYPE),
                ixn_model.clone(),
            ),
            Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(dc::MODIFIED),
                now,
            ),
        ];
        if let Some(parent) = container {
            quads.push(Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(dc::IS_PART_OF),
                parent.clone(),
            ));
        }
        if ixn_model.as_str() == ldp::NON_RDF_SOURCE {
            if let Some(binary) = binary {
                quads.push(Quad::new(
                    server.clone(),
                    identifier.clone(),
                    Iri::new(dc::HAS_PART),
                    binary.location.clone(),
                ));
                quads.push(Quad::new(
                    server.clone(),
                    binary.location.clone(),
                    Iri::new(dc::MODIFIED),
                    format_instant(binary.modified),
                ));
                if let Some(mime) = &binary.mime_type {
                    quads.push(Quad::new(
                        server.clone(),
                        binary.location.clone(),
                        Iri::new(dc::FORMAT),
                        Literal::simple(mime.clone()),
                    ));
                }
                if let Some(size) = binary.size {
                    quads.push(Quad::new(
                        server.clone(),
                        binary.location.clone(),
                        Iri::new(dc::EXTENT),
                        Literal::typed(size.to_string(), Iri::new(xsd::LONG)),
                    ));
                }
            }
        }
        if matches!(
            ixn_model.as_str(),
            ldp::DIRECT_CONTAINER | ldp::INDIRECT_CONTAINER
        ) {
            quads.extend(self.membership_config_quads(identifier, dataset, &server));
        }
        quads
    }

    /// Server-managed copies of the membership configuration, so the
    /// membership derivations can run against one graph.
    fn membership_config_quads(
        &self,
        identifier: &Iri,
        dataset: &Dataset,
        server: &Iri,
    ) -> Vec<Quad> {
        let mut quads = Vec::new();
        for predicate in [
            ldp::MEMBERSHIP_RESOURCE,
            ldp::HAS_MEMBER_RELATION,
            ldp::IS_MEMBER_OF_RELATION,
        ] {
            if let Some(object) = user_object(dataset, identifier, predicate) {
                quads.push(Quad::new(
                    server.clone(),
                    identifier.clone(),
                    Iri::new(predicate),
                    object,
                ));
            }
        }
        let inserted = user_object(dataset, identifier, ldp::INSERTED_CONTENT_RELATION)
            .unwrap_or_else(|| Term::Iri(Iri::new(ldp::MEMBER_SUBJECT)));
        quads.push(Quad::new(
            server.clone(),
            identifier.clone(),
            Iri::new(ldp::INSERTED_CONTENT_RELATION),
            inserted,
        ));
        if let Some(member) = user_object(dataset, identifier, ldp::MEMBERSHIP_RESOURCE) {
            quads.push(Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(ldp::MEMBER),
                member,
            ));
        }
        quads
    }

    /// Shared create/replace path. `replace` first removes the previous
    /// user-managed graph, ACL graph and server-managed rows.
    async fn store_resource(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
        replace: bool,
    ) -> Result<()> {
        self.check_interaction_model(ixn_model)?;
        Self::check_constraints(identifier, ixn_model, dataset, binary)?;

        let server = Iri::new(trellis::PREFER_SERVER_MANAGED);
        let mut update = Update::new();
        if replace {
            update = update
                .clear_graph(identifier.clone())
                .clear_graph(identifier.acl_graph())
                .delete_subject(server.clone(), identifier.clone());
            // The previous binary descriptor must go too; its subject is only
            // discoverable by reading the current metadata.
            if let ResourceView::Live(previous) =
                find_resource(self.store.clone(), identifier.clone(), false).await?
            {
                if let Some(binary_subject) = previous.binary_location() {
                    update = update.delete_subject(server.clone(), binary_subject.clone());
                }
            }
        }

        let mut quads: Vec<Quad> = dataset
            .graph(&Iri::new(trellis::PREFER_USER_MANAGED))
            .map(|q| q.with_graph(identifier.clone()))
            .collect();
        quads.extend(
            dataset
                .graph(&Iri::new(trellis::PREFER_ACCESS_CONTROL))
                .map(|q| q.with_graph(identifier.acl_graph())),
        );
        quads.extend(self.server_quads(identifier, ixn_model, dataset, container, binary));

        let activity = if replace {
            activitystreams::UPDATE
        } else {
            activitystreams::CREATE
        };
        self.store.apply(update.insert(quads)).await.map_err(|e| {
            tracing::debug!(%identifier, error = %e, "quad store rejected resource write");
            e
        })?;
        self.emit(identifier, session, ixn_model, dataset, activity);
        Ok(())
    }

    /// Emit a lifecycle event; serialization problems never fail the
    /// operation.
    fn emit(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        activity: &str,
    ) {
        let Some(serializer) = &self.serializer else {
            return;
        };
        let inbox = user_object(dataset, identifier, ldp::INBOX)
            .and_then(|t| t.as_iri().cloned());
        let event = Event::new(identifier.clone(), Iri::new(activity))
            .with_agent(session.agent.clone())
            .with_target_type(ixn_model.clone());
        let event = match inbox {
            Some(inbox) => event.with_inbox(inbox),
            None => event,
        };
        match serializer.serialize(&event) {
            Some(serialized) => {
                tracing::debug!(%identifier, %serialized, "emitted resource event")
            }
            None => tracing::debug!(%identifier, "event serialization yielded no output"),
        }
    }
}

#[async_trait]
impl ResourceService for QuadResourceService {
    async fn get(&self, identifier: &Iri) -> Result<ResourceView> {
        find_resource(self.store.clone(), identifier.clone(), self.include_ldp_type).await
    }

    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Result<()> {
        self.store_resource(identifier, session, ixn_model, dataset, container, binary, false)
            .await
    }

    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Result<()> {
        self.store_resource(identifier, session, ixn_model, dataset, container, binary, true)
            .await
    }

    async fn delete(
        &self,
        identifier: &Iri,
        session: &Session,
        ixn_model: &Iri,
        _dataset: &Dataset,
    ) -> Result<()> {
        let server = Iri::new(trellis::PREFER_SERVER_MANAGED);
        let mut update = Update::new()
            .clear_graph(identifier.clone())
            .clear_graph(identifier.acl_graph())
            .delete_subject(server.clone(), identifier.clone());
        if let ResourceView::Live(previous) =
            find_resource(self.store.clone(), identifier.clone(), false).await?
        {
            if let Some(binary_subject) = previous.binary_location() {
                update = update.delete_subject(server.clone(), binary_subject.clone());
            }
        }
        let tombstone = vec![
            Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(rdf::TYPE),
                ixn_model.clone(),
            ),
            Quad::new(
                server.clone(),
                identifier.clone(),
                Iri::new(dc::TYPE),
                Iri::new(trellis::DELETED_RESOURCE),
            ),
            Quad::new(
                server,
                identifier.clone(),
                Iri::new(dc::MODIFIED),
                format_instant(Utc::now()),
            ),
        ];
        self.store.apply(update.insert(tombstone)).await.map_err(|e| {
            tracing::debug!(%identifier, error = %e, "quad store rejected tombstone write");
            e
        })?;
        self.emit(
            identifier,
            session,
            ixn_model,
            &Dataset::new(),
            activitystreams::DELETE,
        );
        Ok(())
    }

    async fn add(&self, identifier: &Iri, _session: &Session, dataset: &Dataset) -> Result<()> {
        let audit_graph = identifier.audit_graph();
        let quads: Vec<Quad> = dataset
            .graph(&Iri::new(trellis::PREFER_AUDIT))
            .map(|q| q.with_graph(audit_graph.clone()))
            .collect();
        tracing::debug!(%identifier, count = quads.len(), "appending audit quads");
        Ok(self.store.apply(Update::new().insert(quads)).await?)
    }

    async fn touch(&self, identifier: &Iri) -> Result<()> {
        let view = find_resource(self.store.clone(), identifier.clone(), false).await?;
        if view.is_missing() {
            return Err(Error::not_found(identifier));
        }
        let server = Iri::new(trellis::PREFER_SERVER_MANAGED);
        let update = Update::new()
            .delete_predicate(server.clone(), identifier.clone(), Iri::new(dc::MODIFIED))
            .insert(vec![Quad::new(
                server,
                identifier.clone(),
                Iri::new(dc::MODIFIED),
                format_instant(Utc::now()),
            )]);
        Ok(self.store.apply(update).await?)
    }

    fn supported_interaction_models(&self) -> &HashSet<Iri> {
        &self.supported
    }

    fn generate_identifier(&self) -> String {
        format!(
            "{}{}",
            self.id_prefix,
            self.id_counter.fetch_add(1, Ordering::Relaxed)
        )
    }
}

/// First object of a user-managed triple (identifier, predicate, _) in the
/// input dataset.
fn user_object(dataset: &Dataset, identifier: &Iri, predicate: &str) -> Option<Term> {
    let graph = Iri::new(trellis::PREFER_USER_MANAGED);
    let subject = arbor_model::Subject::Iri(identifier.clone());
    let predicate = Iri::new(predicate);
    let result = dataset
        .matching(Some(&graph), Some(&subject), Some(&predicate), None)
        .map(|q| q.object.clone())
        .next();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_store::MemoryQuadStore;

    fn iri(s: &str) -> Iri {
        Iri::new(s)
    }

    fn service() -> QuadResourceService {
        QuadResourceService::new(Arc::new(MemoryQuadStore::new()))
    }

    fn user_quad(id: &Iri, predicate: &str, object: Term) -> Quad {
        Quad::new(
            iri(trellis::PREFER_USER_MANAGED),
            id.clone(),
            iri(predicate),
            object,
        )
    }

    #[tokio::test]
    async fn test_unsupported_interaction_model() {
        let svc = service().with_supported_models([iri(ldp::RDF_SOURCE)]);
        let id = iri("trellis:data/x");
        let err = svc
            .create(
                &id,
                &Session::anonymous(),
                &iri(ldp::BASIC_CONTAINER),
                &Dataset::new(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_non_rdf_source_requires_binary() {
        let svc = service();
        let id = iri("trellis:data/file");
        let err = svc
            .create(
                &id,
                &Session::anonymous(),
                &iri(ldp::NON_RDF_SOURCE),
                &Dataset::new(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_direct_container_config_validation() {
        let svc = service();
        let id = iri("trellis:data/dc");
        let session = Session::anonymous();

        // Missing membership resource
        let err = svc
            .create(&id, &session, &iri(ldp::DIRECT_CONTAINER), &Dataset::new(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));

        // Both member relations at once
        let mut dataset = Dataset::new();
        dataset.add(user_quad(
            &id,
            ldp::MEMBERSHIP_RESOURCE,
            Term::Iri(iri("trellis:data/m")),
        ));
        dataset.add(user_quad(
            &id,
            ldp::HAS_MEMBER_RELATION,
            Term::Iri(iri(dc::RELATION)),
        ));
        dataset.add(user_quad(
            &id,
            ldp::IS_MEMBER_OF_RELATION,
            Term::Iri(iri(dc::IS_PART_OF)),
        ));
        let err = svc
            .create(&id, &session, &iri(ldp::DIRECT_CONTAINER), &dataset, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_indirect_container_rejects_member_subject() {
        let svc = service();
        let id = iri("trellis:data/ic");
        let mut dataset = Dataset::new();
        dataset.add(user_quad(
            &id,
            ldp::MEMBERSHIP_RESOURCE,
            Term::Iri(iri("trellis:data/m")),
        ));
        dataset.add(user_quad(
            &id,
            ldp::HAS_MEMBER_RELATION,
            Term::Iri(iri(dc::RELATION)),
        ));
        dataset.add(user_quad(
            &id,
            ldp::INSERTED_CONTENT_RELATION,
            Term::Iri(iri(ldp::MEMBER_SUBJECT)),
        ));
        let err = svc
            .create(
                &id,
                &Session::anonymous(),
                &iri(ldp::INDIRECT_CONTAINER),
                &dataset,
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_direct_container_defaults_inserted_content_relation() {
        let svc = service();
        let id = iri("trellis:data/dc");
        let mut dataset = Dataset::new();
        dataset.add(user_quad(
            &id,
            ldp::MEMBERSHIP_RESOURCE,
            Term::Iri(iri("trellis:data/m")),
        ));
        dataset.add(user_quad(
            &id,
            ldp::IS_MEMBER_OF_RELATION,
            Term::Iri(iri(dc::IS_PART_OF)),
        ));
        svc.create(
            &id,
            &Session::anonymous(),
            &iri(ldp::DIRECT_CONTAINER),
            &dataset,
            None,
            None,
        )
        .await
        .unwrap();

        let view = svc.get(&id).await.unwrap();
        let res = view.as_live().expect("live resource");
        assert_eq!(
            res.inserted_content_relation(),
            Some(&iri(ldp::MEMBER_SUBJECT))
        );
        assert_eq!(res.member_of_relation(), Some(&iri(dc::IS_PART_OF)));
        assert!(res.member_relation().is_none());
    }

    #[tokio::test]
    async fn test_touch_missing_resource() {
        let svc = service();
        let err = svc.touch(&iri("trellis:data/none")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_generate_identifier_uniqueness() {
        let svc = service();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(svc.generate_identifier()));
        }
    }

    #[tokio::test]
    async fn test_identifiers_distinct_across_instances() {
        let a = service();
        let b = service();
        assert_ne!(a.generate_identifier(), b.generate_identifier());
    }
}
