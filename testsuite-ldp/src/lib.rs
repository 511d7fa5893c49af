//! # LDP Resource Service Conformance Suite
//!
//! Reusable checks that every `ResourceService` implementation must satisfy,
//! whatever backend it runs on. Each public function drives one property or
//! scenario against a caller-supplied service and panics on violation; wire
//! them up from a backend crate's integration tests:
//!
//! ```ignore
//! #[tokio::test]
//! async fn create() {
//!     let svc = my_backend_service();
//!     testsuite_ldp::create_resource(&svc, &Session::anonymous()).await;
//! }
//! ```

use arbor_model::{Dataset, Iri, Literal, Quad, Term};
use arbor_resource::{Binary, Error, ProjectionGraph, Resource, ResourceService, Session};
use arbor_vocab::{activitystreams, dc, foaf, ldp, prov, rdf, skos, trellis, xsd};
use chrono::{DateTime, TimeZone, Utc};

/// A subject IRI used by the shared dataset builder
pub const SUBJECT0: &str = "http://example.com/subject/0";
/// A subject IRI used by the shared dataset builder
pub const SUBJECT1: &str = "http://example.com/subject/1";
/// A subject IRI used by the shared dataset builder
pub const SUBJECT2: &str = "http://example.com/subject/2";

/// The root container every test resource is created under
pub fn root_container() -> Iri {
    Iri::new(trellis::DATA_PREFIX)
}

/// Mint a fresh resource identifier under the data prefix
pub fn fresh_identifier(svc: &impl ResourceService) -> Iri {
    Iri::new(format!(
        "{}{}",
        trellis::DATA_PREFIX,
        svc.generate_identifier()
    ))
}

/// Build the three-quad dataset the scenarios start from
pub fn build_dataset(resource: &Iri, title: &str, subject: &str) -> Dataset {
    let graph = Iri::new(trellis::PREFER_USER_MANAGED);
    let mut dataset = Dataset::new();
    dataset.add(Quad::new(
        graph.clone(),
        resource.clone(),
        Iri::new(dc::TITLE),
        Literal::simple(title),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        resource.clone(),
        Iri::new(dc::SUBJECT),
        Iri::new(subject),
    ));
    dataset.add(Quad::new(
        graph,
        resource.clone(),
        Iri::new(rdf::TYPE),
        Iri::new(skos::CONCEPT),
    ));
    dataset
}

fn user_quad(resource: &Iri, predicate: &str, object: impl Into<Term>) -> Quad {
    Quad::new(
        Iri::new(trellis::PREFER_USER_MANAGED),
        resource.clone(),
        Iri::new(predicate),
        object.into(),
    )
}

async fn expect_live(svc: &impl ResourceService, identifier: &Iri) -> Resource {
    svc.get(identifier)
        .await
        .expect("get should not fail")
        .into_live()
        .unwrap_or_else(|| panic!("expected a live resource at {identifier}"))
}

fn truncated_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(instant.timestamp_millis())
        .single()
        .expect("valid millisecond timestamp")
}

/// Check the standard properties of a freshly written resource
pub async fn check_resource(
    res: &Resource,
    identifier: &Iri,
    ldp_type: &Iri,
    time: DateTime<Utc>,
    dataset: &Dataset,
) {
    assert_eq!(res.interaction_model(), ldp_type, "interaction model");
    assert_eq!(res.identifier(), identifier, "identifier");
    assert!(
        res.modified() >= truncated_to_millis(time),
        "modification time lower bound"
    );
    assert!(res.modified() <= Utc::now(), "modification time upper bound");
    assert!(!res.has_acl().await.expect("acl check"), "no ACL expected");

    let is_non_rdf = ldp_type.as_str() == ldp::NON_RDF_SOURCE;
    assert_eq!(res.binary_metadata().is_some(), is_non_rdf, "binary metadata");

    let has_membership = matches!(
        ldp_type.as_str(),
        ldp::DIRECT_CONTAINER | ldp::INDIRECT_CONTAINER
    );
    assert_eq!(
        res.membership_resource().is_some(),
        has_membership,
        "ldp:membershipResource"
    );
    assert_eq!(
        res.member_relation().is_some() || res.member_of_relation().is_some(),
        has_membership,
        "ldp:hasMemberRelation or ldp:isMemberOfRelation"
    );
    assert_eq!(
        res.inserted_content_relation().is_some(),
        has_membership,
        "ldp:insertedContentRelation"
    );

    for quad in res
        .stream(ProjectionGraph::UserManaged)
        .await
        .expect("user stream")
    {
        assert!(
            dataset.contains(&quad),
            "unexpected user-managed quad: {quad}"
        );
    }
}

/// Before any operation, every identifier is missing
pub async fn missing_before_any_operation(svc: &impl ResourceService, _session: &Session) {
    let identifier = fresh_identifier(svc);
    assert!(svc.get(&identifier).await.expect("get").is_missing());
}

/// Creating a resource makes its user-managed quads readable
pub async fn create_resource(svc: &impl ResourceService, session: &Session) {
    let identifier = fresh_identifier(svc);
    let dataset = build_dataset(&identifier, "Creation Test", SUBJECT1);

    assert!(svc.get(&identifier).await.expect("get").is_missing());
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");

    let res = expect_live(svc, &identifier).await;
    let quads = res
        .stream(ProjectionGraph::UserManaged)
        .await
        .expect("user stream");
    assert_eq!(quads.len(), 3);
    for quad in quads {
        assert!(dataset.contains(&quad), "quad not in input dataset: {quad}");
    }
}

/// Replacement is total, not additive
pub async fn replace_resource(svc: &impl ResourceService, session: &Session) {
    let identifier = fresh_identifier(svc);
    let dataset = build_dataset(&identifier, "Replacement Test", SUBJECT2);

    assert!(svc.get(&identifier).await.expect("get").is_missing());
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");

    let mut replacement = Dataset::new();
    replacement.add(user_quad(
        &identifier,
        skos::PREF_LABEL,
        Literal::simple("preferred label"),
    ));
    replacement.add(user_quad(
        &identifier,
        skos::ALT_LABEL,
        Literal::simple("alternate label"),
    ));
    replacement.add(user_quad(&identifier, rdf::TYPE, Iri::new(skos::CONCEPT)));

    svc.replace(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &replacement,
        Some(&root_container()),
        None,
    )
    .await
    .expect("replace");

    let res = expect_live(svc, &identifier).await;
    let quads = res
        .stream(ProjectionGraph::UserManaged)
        .await
        .expect("user stream");
    assert_eq!(quads.len(), 3);
    for quad in quads {
        assert!(
            replacement.contains(&quad),
            "stale quad after replace: {quad}"
        );
    }
}

/// Deletion leaves a tombstone behind
pub async fn delete_resource(svc: &impl ResourceService, session: &Session) {
    let identifier = fresh_identifier(svc);
    let dataset = build_dataset(&identifier, "Deletion Test", SUBJECT1);

    assert!(svc.get(&identifier).await.expect("get").is_missing());
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");
    assert!(!svc.get(&identifier).await.expect("get").is_deleted());

    svc.delete(
        &identifier,
        session,
        &Iri::new(ldp::RESOURCE),
        &Dataset::new(),
    )
    .await
    .expect("delete");
    assert!(svc.get(&identifier).await.expect("get").is_deleted());
}

fn audit_dataset(identifier: &Iri, activity_iri: &Iri, activity_type: &str) -> Dataset {
    let graph = Iri::new(trellis::PREFER_AUDIT);
    let mut dataset = Dataset::new();
    dataset.add(Quad::new(
        graph.clone(),
        identifier.clone(),
        Iri::new(prov::WAS_GENERATED_BY),
        activity_iri.clone(),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        activity_iri.clone(),
        Iri::new(rdf::TYPE),
        Iri::new(prov::ACTIVITY),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        activity_iri.clone(),
        Iri::new(rdf::TYPE),
        Iri::new(activity_type),
    ));
    dataset.add(Quad::new(
        graph,
        activity_iri.clone(),
        Iri::new(prov::AT_TIME),
        Literal::typed(Utc::now().to_rfc3339(), Iri::new(xsd::DATE_TIME)),
    ));
    dataset
}

/// The audit graph accumulates; nothing is ever replaced
pub async fn add_immutable_data(svc: &impl ResourceService, session: &Session) {
    let identifier = fresh_identifier(svc);
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &build_dataset(&identifier, "Immutable Resource Test", SUBJECT2),
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");

    let audit1 = Iri::new(format!(
        "{}{}",
        trellis::BNODE_PREFIX,
        svc.generate_identifier()
    ));
    let dataset1 = audit_dataset(&identifier, &audit1, activitystreams::CREATE);
    svc.add(&identifier, session, &dataset1).await.expect("add");

    let res = expect_live(svc, &identifier).await;
    let quads = res.stream(ProjectionGraph::Audit).await.expect("audit stream");
    assert_eq!(quads.len(), 4);
    for quad in &quads {
        assert!(dataset1.contains(quad), "unexpected audit quad: {quad}");
    }

    let audit2 = Iri::new(format!(
        "{}{}",
        trellis::BNODE_PREFIX,
        svc.generate_identifier()
    ));
    let dataset2 = audit_dataset(&identifier, &audit2, activitystreams::UPDATE);
    svc.add(&identifier, session, &dataset2).await.expect("add");

    let res = expect_live(svc, &identifier).await;
    let quads = res.stream(ProjectionGraph::Audit).await.expect("audit stream");
    assert_eq!(quads.len(), 8);
    for quad in &quads {
        assert!(
            dataset1.contains(quad) || dataset2.contains(quad),
            "unexpected audit quad: {quad}"
        );
    }
}

/// An RDFSource exposes its metadata and nothing container-specific
pub async fn rdf_source(svc: &impl ResourceService, session: &Session) {
    let time = Utc::now();
    let identifier = fresh_identifier(svc);
    let dataset = build_dataset(&identifier, "Create LDP-RS Test", SUBJECT1);

    assert!(svc.get(&identifier).await.expect("get").is_missing());
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");

    let res = expect_live(svc, &identifier).await;
    check_resource(&res, &identifier, &Iri::new(ldp::RDF_SOURCE), time, &dataset).await;
    assert_eq!(
        res.stream(ProjectionGraph::UserManaged)
            .await
            .expect("user stream")
            .len(),
        3
    );
    assert_eq!(res.container(), Some(&root_container()));
}

/// A NonRDFSource carries binary metadata with millisecond-true timestamps
pub async fn non_rdf_source(svc: &impl ResourceService, session: &Session) {
    let time = Utc::now();
    let identifier = fresh_identifier(svc);
    let dataset = build_dataset(&identifier, "Create LDP-NR Test", SUBJECT2);

    let binary_time = Utc::now();
    let binary = Binary {
        location: Iri::new(format!("binary:location/{}", svc.generate_identifier())),
        modified: binary_time,
        mime_type: Some("text/plain".to_string()),
        size: Some(150),
    };

    assert!(svc.get(&identifier).await.expect("get").is_missing());
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::NON_RDF_SOURCE),
        &dataset,
        Some(&root_container()),
        Some(&binary),
    )
    .await
    .expect("create");

    let res = expect_live(svc, &identifier).await;
    check_resource(&res, &identifier, &Iri::new(ldp::NON_RDF_SOURCE), time, &dataset).await;
    assert_eq!(
        res.stream(ProjectionGraph::UserManaged)
            .await
            .expect("user stream")
            .len(),
        3
    );

    let meta = res.binary_metadata().expect("binary metadata");
    assert_eq!(meta.location, binary.location);
    assert!(meta.modified >= truncated_to_millis(binary_time));
    assert!(meta.modified <= Utc::now());
    assert_eq!(meta.mime_type.as_deref(), Some("text/plain"));
    assert_eq!(meta.size, Some(150));
}

async fn container_with_two_children(
    svc: &impl ResourceService,
    session: &Session,
    ixn_model: &str,
    dataset0: &Dataset,
    identifier: &Iri,
    base: &str,
) -> (Iri, Iri) {
    assert!(svc.get(identifier).await.expect("get").is_missing());
    svc.create(
        identifier,
        session,
        &Iri::new(ixn_model),
        dataset0,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create container");

    let child1 = Iri::new(format!("{base}/child1"));
    let dataset1 = build_dataset(&child1, "Contained Child 1", SUBJECT1);
    assert!(svc.get(&child1).await.expect("get").is_missing());
    svc.create(
        &child1,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset1,
        Some(identifier),
        None,
    )
    .await
    .expect("create child1");

    let child2 = Iri::new(format!("{base}/child2"));
    let dataset2 = build_dataset(&child2, "Contained Child 2", SUBJECT2);
    assert!(svc.get(&child2).await.expect("get").is_missing());
    svc.create(
        &child2,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &dataset2,
        Some(identifier),
        None,
    )
    .await
    .expect("create child2");

    (child1, child2)
}

async fn check_containment(res: &Resource, identifier: &Iri, children: &[&Iri]) {
    let quads = res
        .stream(ProjectionGraph::Containment)
        .await
        .expect("containment stream");
    assert_eq!(quads.len(), children.len());
    for child in children {
        let expected = Quad::new(
            Iri::new(ldp::PREFER_CONTAINMENT),
            identifier.clone(),
            Iri::new(ldp::CONTAINS),
            (*child).clone(),
        );
        assert!(
            quads.contains(&expected),
            "missing containment quad for {child}"
        );
    }
}

/// A plain ldp:Container lists its children as containment quads
pub async fn container(svc: &impl ResourceService, session: &Session) {
    let time = Utc::now();
    let base = format!("{}{}", trellis::DATA_PREFIX, svc.generate_identifier());
    let identifier = Iri::new(base.as_str());
    let dataset0 = build_dataset(&identifier, "Container Test", SUBJECT0);

    let (child1, child2) =
        container_with_two_children(svc, session, ldp::CONTAINER, &dataset0, &identifier, &base)
            .await;

    let res = expect_live(svc, &identifier).await;
    check_resource(&res, &identifier, &Iri::new(ldp::CONTAINER), time, &dataset0).await;
    check_containment(&res, &identifier, &[&child1, &child2]).await;
    assert_eq!(
        res.stream(ProjectionGraph::UserManaged)
            .await
            .expect("user stream")
            .len(),
        3
    );
}

/// A BasicContainer lists its children as containment quads
pub async fn basic_container(svc: &impl ResourceService, session: &Session) {
    let time = Utc::now();
    let base = format!("{}{}", trellis::DATA_PREFIX, svc.generate_identifier());
    let identifier = Iri::new(base.as_str());
    let dataset0 = build_dataset(&identifier, "Basic Container Test", SUBJECT0);

    let (child1, child2) = container_with_two_children(
        svc,
        session,
        ldp::BASIC_CONTAINER,
        &dataset0,
        &identifier,
        &base,
    )
    .await;

    let res = expect_live(svc, &identifier).await;
    check_resource(
        &res,
        &identifier,
        &Iri::new(ldp::BASIC_CONTAINER),
        time,
        &dataset0,
    )
    .await;
    check_containment(&res, &identifier, &[&child1, &child2]).await;
}

/// A DirectContainer with an is-member-of relation: each child projects the
/// inverse membership edge
pub async fn direct_container(svc: &impl ResourceService, session: &Session) {
    if !svc
        .supported_interaction_models()
        .contains(&Iri::new(ldp::DIRECT_CONTAINER))
    {
        return;
    }

    let time = Utc::now();
    let base = format!("{}{}", trellis::DATA_PREFIX, svc.generate_identifier());
    let identifier = Iri::new(base.as_str());
    let member = Iri::new(format!("{base}/member"));
    let mut dataset0 = build_dataset(&identifier, "Direct Container Test", SUBJECT0);
    dataset0.add(user_quad(
        &identifier,
        ldp::MEMBERSHIP_RESOURCE,
        member.clone(),
    ));
    dataset0.add(user_quad(
        &identifier,
        ldp::IS_MEMBER_OF_RELATION,
        Iri::new(dc::IS_PART_OF),
    ));

    let (child1, child2) = container_with_two_children(
        svc,
        session,
        ldp::DIRECT_CONTAINER,
        &dataset0,
        &identifier,
        &base,
    )
    .await;

    let res = expect_live(svc, &identifier).await;
    check_resource(
        &res,
        &identifier,
        &Iri::new(ldp::DIRECT_CONTAINER),
        time,
        &dataset0,
    )
    .await;
    assert_eq!(res.membership_resource(), Some(&member));
    assert_eq!(res.member_of_relation(), Some(&Iri::new(dc::IS_PART_OF)));
    assert!(res.member_relation().is_none());
    assert_eq!(
        res.inserted_content_relation(),
        Some(&Iri::new(ldp::MEMBER_SUBJECT))
    );
    check_containment(&res, &identifier, &[&child1, &child2]).await;
    assert_eq!(
        res.stream(ProjectionGraph::UserManaged)
            .await
            .expect("user stream")
            .len(),
        5
    );

    // The inverse path surfaces on each contained child
    for child in [&child1, &child2] {
        let child_res = expect_live(svc, child).await;
        let membership = child_res
            .stream(ProjectionGraph::Membership)
            .await
            .expect("membership stream");
        let expected = Quad::new(
            Iri::new(ldp::PREFER_MEMBERSHIP),
            (*child).clone(),
            Iri::new(dc::IS_PART_OF),
            member.clone(),
        );
        assert!(
            membership.contains(&expected),
            "missing inverse membership quad for {child}"
        );
    }
}

/// A DirectContainer with a has-member relation: the membership resource
/// projects one edge per contained child
pub async fn direct_container_forward_membership(
    svc: &impl ResourceService,
    session: &Session,
) {
    if !svc
        .supported_interaction_models()
        .contains(&Iri::new(ldp::DIRECT_CONTAINER))
    {
        return;
    }

    let base = format!("{}{}", trellis::DATA_PREFIX, svc.generate_identifier());
    let identifier = Iri::new(base.as_str());
    let member = Iri::new(format!("{base}/member"));

    svc.create(
        &member,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &build_dataset(&member, "Membership Resource", SUBJECT0),
        Some(&root_container()),
        None,
    )
    .await
    .expect("create membership resource");

    let mut dataset0 = build_dataset(&identifier, "Forward Direct Container Test", SUBJECT0);
    dataset0.add(user_quad(
        &identifier,
        ldp::MEMBERSHIP_RESOURCE,
        member.clone(),
    ));
    dataset0.add(user_quad(
        &identifier,
        ldp::HAS_MEMBER_RELATION,
        Iri::new(dc::RELATION),
    ));

    let (child1, child2) = container_with_two_children(
        svc,
        session,
        ldp::DIRECT_CONTAINER,
        &dataset0,
        &identifier,
        &base,
    )
    .await;

    let member_res = expect_live(svc, &member).await;
    let membership = member_res
        .stream(ProjectionGraph::Membership)
        .await
        .expect("membership stream");
    assert_eq!(membership.len(), 2);
    for child in [&child1, &child2] {
        let expected = Quad::new(
            Iri::new(ldp::PREFER_MEMBERSHIP),
            member.clone(),
            Iri::new(dc::RELATION),
            (*child).clone(),
        );
        assert!(
            membership.contains(&expected),
            "missing forward membership quad for {child}"
        );
    }
}

/// An IndirectContainer projects membership through the inserted-content
/// relation of each child
pub async fn indirect_container(svc: &impl ResourceService, session: &Session) {
    if !svc
        .supported_interaction_models()
        .contains(&Iri::new(ldp::INDIRECT_CONTAINER))
    {
        return;
    }

    let time = Utc::now();
    let base = format!("{}{}", trellis::DATA_PREFIX, svc.generate_identifier());
    let identifier = Iri::new(base.as_str());
    let member = Iri::new(format!("{base}/member"));

    svc.create(
        &member,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &build_dataset(&member, "Membership Resource", SUBJECT0),
        Some(&root_container()),
        None,
    )
    .await
    .expect("create membership resource");

    let mut dataset0 = build_dataset(&identifier, "Indirect Container Test", SUBJECT0);
    dataset0.add(user_quad(
        &identifier,
        ldp::MEMBERSHIP_RESOURCE,
        member.clone(),
    ));
    dataset0.add(user_quad(
        &identifier,
        ldp::HAS_MEMBER_RELATION,
        Iri::new(dc::RELATION),
    ));
    dataset0.add(user_quad(
        &identifier,
        ldp::INSERTED_CONTENT_RELATION,
        Iri::new(foaf::PRIMARY_TOPIC),
    ));

    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::INDIRECT_CONTAINER),
        &dataset0,
        Some(&root_container()),
        None,
    )
    .await
    .expect("create container");

    let mut topics = Vec::new();
    let mut children = Vec::new();
    for n in 1..=2 {
        let child = Iri::new(format!("{base}/child{n}"));
        let topic = Iri::new(format!("http://example.com/topic/{n}"));
        let mut dataset = build_dataset(&child, "Indirect Container Child", SUBJECT1);
        dataset.add(user_quad(&child, foaf::PRIMARY_TOPIC, topic.clone()));
        svc.create(
            &child,
            session,
            &Iri::new(ldp::RDF_SOURCE),
            &dataset,
            Some(&identifier),
            None,
        )
        .await
        .expect("create child");
        topics.push(topic);
        children.push(child);
    }

    let res = expect_live(svc, &identifier).await;
    check_resource(
        &res,
        &identifier,
        &Iri::new(ldp::INDIRECT_CONTAINER),
        time,
        &dataset0,
    )
    .await;
    assert_eq!(res.membership_resource(), Some(&member));
    assert_eq!(res.member_relation(), Some(&Iri::new(dc::RELATION)));
    assert_eq!(
        res.inserted_content_relation(),
        Some(&Iri::new(foaf::PRIMARY_TOPIC))
    );
    assert!(res.member_of_relation().is_none());
    check_containment(&res, &identifier, &[&children[0], &children[1]]).await;
    assert_eq!(
        res.stream(ProjectionGraph::UserManaged)
            .await
            .expect("user stream")
            .len(),
        6
    );

    // Membership surfaces on the membership resource
    let member_res = expect_live(svc, &member).await;
    let membership = member_res
        .stream(ProjectionGraph::Membership)
        .await
        .expect("membership stream");
    assert_eq!(membership.len(), 2);
    for topic in &topics {
        let expected = Quad::new(
            Iri::new(ldp::PREFER_MEMBERSHIP),
            member.clone(),
            Iri::new(dc::RELATION),
            topic.clone(),
        );
        assert!(
            membership.contains(&expected),
            "missing indirect membership quad for {topic}"
        );
    }
}

/// Touch moves the modification time forward and fails for missing resources
pub async fn touch_resource(svc: &impl ResourceService, session: &Session) {
    let missing = fresh_identifier(svc);
    assert!(matches!(
        svc.touch(&missing).await,
        Err(Error::NotFound(_))
    ));

    let identifier = fresh_identifier(svc);
    svc.create(
        &identifier,
        session,
        &Iri::new(ldp::RDF_SOURCE),
        &build_dataset(&identifier, "Touch Test", SUBJECT1),
        Some(&root_container()),
        None,
    )
    .await
    .expect("create");

    let before = expect_live(svc, &identifier).await.modified();
    svc.touch(&identifier).await.expect("touch");
    let after = expect_live(svc, &identifier).await.modified();
    assert!(after >= before, "touch must not move time backwards");
    assert!(after <= Utc::now());
}

/// 1,000 successive identifiers are 1,000 distinct strings
pub fn identifier_generation(svc: &impl ResourceService) {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..1000 {
        assert!(
            seen.insert(svc.generate_identifier()),
            "identifier collision"
        );
    }
}
