//! Lifecycle events and their ActivityStream serialization
//!
//! The engine emits an `Event` on create, replace and delete. How an event
//! leaves the process is a collaborator concern: an `EventSerializer` turns
//! it into an optional string, and a failed serialization simply yields
//! nothing; it never fails the triggering operation.

use arbor_model::Iri;
use arbor_vocab::activitystreams;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// A resource lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Identifier of the event itself (a urn:uuid IRI)
    pub identifier: Iri,
    /// Agents responsible for the change
    pub agents: Vec<Iri>,
    /// The resource the event is about
    pub target: Option<Iri>,
    /// RDF types of the target (its interaction model)
    pub target_types: Vec<Iri>,
    /// Activity types (as:Create, as:Update, as:Delete, ...)
    pub types: Vec<Iri>,
    /// ldp:inbox of the target, if it advertises one
    pub inbox: Option<Iri>,
    /// When the event was created
    pub created: DateTime<Utc>,
}

impl Event {
    /// Create an event about a target resource with one activity type
    pub fn new(target: Iri, activity: Iri) -> Self {
        Self {
            identifier: Iri::new(format!("urn:uuid:{}", Uuid::new_v4())),
            agents: Vec::new(),
            target: Some(target),
            target_types: Vec::new(),
            types: vec![activity],
            inbox: None,
            created: Utc::now(),
        }
    }

    /// Add a responsible agent
    pub fn with_agent(mut self, agent: Iri) -> Self {
        self.agents.push(agent);
        self
    }

    /// Add a target type
    pub fn with_target_type(mut self, target_type: Iri) -> Self {
        self.target_types.push(target_type);
        self
    }

    /// Set the target's inbox
    pub fn with_inbox(mut self, inbox: Iri) -> Self {
        self.inbox = Some(inbox);
        self
    }
}

/// Turns an event into an optional serialized form.
///
/// Implementations must not panic; an event that cannot be serialized is
/// reported as `None`.
pub trait EventSerializer: Send + Sync {
    /// Serialize an event, or yield nothing
    fn serialize(&self, event: &Event) -> Option<String>;
}

/// Serializes events as Activity Streams 2.0 JSON.
///
/// Activity-stream types are written by their local name; all other type
/// IRIs are written in full. Empty collections and absent options are
/// omitted from the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityStreamSerializer;

impl ActivityStreamSerializer {
    /// Create a serializer
    pub fn new() -> Self {
        Self
    }
}

impl EventSerializer for ActivityStreamSerializer {
    fn serialize(&self, event: &Event) -> Option<String> {
        let mut map = Map::new();
        map.insert(
            "@context".to_string(),
            json!("https://www.w3.org/ns/activitystreams"),
        );
        map.insert("id".to_string(), json!(event.identifier.as_str()));
        let types: Vec<String> = event.types.iter().map(|t| as_term(t)).collect();
        map.insert("type".to_string(), json!(types));
        if let Some(inbox) = &event.inbox {
            map.insert("inbox".to_string(), json!(inbox.as_str()));
        }
        if !event.agents.is_empty() {
            let agents: Vec<&str> = event.agents.iter().map(Iri::as_str).collect();
            map.insert("actor".to_string(), json!(agents));
        }
        if let Some(target) = &event.target {
            let mut object = Map::new();
            object.insert("id".to_string(), json!(target.as_str()));
            if !event.target_types.is_empty() {
                let types: Vec<String> = event.target_types.iter().map(|t| as_term(t)).collect();
                object.insert("type".to_string(), json!(types));
            }
            map.insert("object".to_string(), Value::Object(object));
        }
        map.insert(
            "published".to_string(),
            json!(event.created.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        serde_json::to_string(&map).ok()
    }
}

/// Compact an IRI to its local name when it lives in the AS namespace
fn as_term(iri: &Iri) -> String {
    iri.as_str()
        .strip_prefix(activitystreams::NS)
        .map(str::to_string)
        .unwrap_or_else(|| iri.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_vocab::{ldp, prov};

    fn sample_event() -> Event {
        Event::new(
            Iri::new("trellis:data/resource"),
            Iri::new(activitystreams::CREATE),
        )
        .with_agent(Iri::new("info:user/test"))
        .with_target_type(Iri::new(ldp::CONTAINER))
        .with_inbox(Iri::new("info:ldn/inbox"))
    }

    #[test]
    fn test_serialization_structure() {
        let mut event = sample_event();
        event.types.push(Iri::new(prov::ACTIVITY));

        let json = ActivityStreamSerializer::new()
            .serialize(&event)
            .expect("serialization");
        let map: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(map["@context"], "https://www.w3.org/ns/activitystreams");
        assert_eq!(map["id"], event.identifier.as_str());
        assert_eq!(map["inbox"], "info:ldn/inbox");

        let types = map["type"].as_array().unwrap();
        assert!(types.contains(&json!("Create")));
        assert!(types.contains(&json!(prov::ACTIVITY)));

        let actors = map["actor"].as_array().unwrap();
        assert!(actors.contains(&json!("info:user/test")));

        let object = map["object"].as_object().unwrap();
        assert_eq!(object["id"], "trellis:data/resource");
        assert!(object["type"].as_array().unwrap().contains(&json!(ldp::CONTAINER)));

        assert!(map["published"].is_string());
    }

    #[test]
    fn test_empty_elements_are_omitted() {
        let mut event = sample_event();
        event.inbox = None;
        event.agents.clear();
        event.target_types.clear();

        let json = ActivityStreamSerializer::new()
            .serialize(&event)
            .expect("serialization");
        let map: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(map.get("inbox").is_none());
        assert!(map.get("actor").is_none());
        let object = map["object"].as_object().unwrap();
        assert!(object.get("type").is_none());
        assert!(object.contains_key("id"));
    }

    #[test]
    fn test_inbox_in_serialization() {
        let json = ActivityStreamSerializer::new()
            .serialize(&sample_event())
            .expect("serialization");
        assert!(json.contains("\"inbox\":\"info:ldn/inbox\""));
    }

    #[test]
    fn test_event_identifiers_are_unique() {
        let a = sample_event();
        let b = sample_event();
        assert_ne!(a.identifier, b.identifier);
    }
}
