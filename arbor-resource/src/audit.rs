//! Audit-trail generation
//!
//! Lifecycle operations are recorded as PROV activities. These builders
//! produce the audit dataset for one state transition; callers hand the
//! result to `ResourceService::add`, the only write path to the audit graph.

use crate::projection::format_instant;
use crate::session::Session;
use arbor_model::{BlankNode, Dataset, Iri, Quad, Subject, Term};
use arbor_vocab::{activitystreams, prov, rdf, trellis};

/// Audit quads for a resource creation
pub fn creation(identifier: &Iri, session: &Session) -> Dataset {
    activity(identifier, session, activitystreams::CREATE)
}

/// Audit quads for a resource update
pub fn update(identifier: &Iri, session: &Session) -> Dataset {
    activity(identifier, session, activitystreams::UPDATE)
}

/// Audit quads for a resource deletion
pub fn deletion(identifier: &Iri, session: &Session) -> Dataset {
    activity(identifier, session, activitystreams::DELETE)
}

fn activity(identifier: &Iri, session: &Session, activity_type: &str) -> Dataset {
    let graph = Iri::new(trellis::PREFER_AUDIT);
    let event = BlankNode::fresh();
    let mut dataset = Dataset::new();
    dataset.add(Quad::new(
        graph.clone(),
        identifier.clone(),
        Iri::new(prov::WAS_GENERATED_BY),
        Term::Blank(event.clone()),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        Subject::Blank(event.clone()),
        Iri::new(rdf::TYPE),
        Iri::new(prov::ACTIVITY),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        Subject::Blank(event.clone()),
        Iri::new(rdf::TYPE),
        Iri::new(activity_type),
    ));
    dataset.add(Quad::new(
        graph.clone(),
        Subject::Blank(event.clone()),
        Iri::new(prov::WAS_ASSOCIATED_WITH),
        session.agent.clone(),
    ));
    dataset.add(Quad::new(
        graph,
        Subject::Blank(event),
        Iri::new(prov::AT_TIME),
        format_instant(session.created),
    ));
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_activity_shape() {
        let id = Iri::new("trellis:data/r1");
        let session = Session::anonymous();
        let dataset = creation(&id, &session);
        assert_eq!(dataset.len(), 5);
        assert!(dataset
            .iter()
            .all(|q| q.graph.as_str() == trellis::PREFER_AUDIT));
        assert!(dataset
            .iter()
            .any(|q| q.object == Term::Iri(Iri::new(activitystreams::CREATE))));
        assert!(dataset
            .iter()
            .any(|q| q.object == Term::Iri(session.agent.clone())));
    }

    #[test]
    fn test_each_activity_gets_a_fresh_event_node() {
        let id = Iri::new("trellis:data/r1");
        let session = Session::anonymous();
        let first = creation(&id, &session);
        let second = update(&id, &session);
        let node = |ds: &Dataset| {
            ds.iter()
                .find(|q| q.predicate.as_str() == prov::WAS_GENERATED_BY)
                .and_then(|q| match &q.object {
                    Term::Blank(b) => Some(b.clone()),
                    _ => None,
                })
                .expect("generated-by quad")
        };
        assert_ne!(node(&first), node(&second));
    }
}
