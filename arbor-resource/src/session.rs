//! Session - the acting agent behind a lifecycle operation

use arbor_model::Iri;
use arbor_vocab::trellis;
use chrono::{DateTime, Utc};

/// The agent and start time of a sequence of operations.
///
/// Recorded in the audit trail by `audit::creation` and friends; a session
/// carries no other capabilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// IRI of the acting agent
    pub agent: Iri,
    /// When the session began
    pub created: DateTime<Utc>,
}

impl Session {
    /// Create a session for the given agent, starting now
    pub fn new(agent: impl Into<Iri>) -> Self {
        Self {
            agent: agent.into(),
            created: Utc::now(),
        }
    }

    /// Create a session for the anonymous agent
    pub fn anonymous() -> Self {
        Self::new(Iri::new(trellis::ANONYMOUS_AGENT))
    }

    /// Create a session for the administrative agent
    pub fn administrator() -> Self {
        Self::new(Iri::new(trellis::ADMINISTRATOR_AGENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_agents() {
        let anon = Session::anonymous();
        assert_eq!(anon.agent.as_str(), trellis::ANONYMOUS_AGENT);

        let admin = Session::administrator();
        assert_eq!(admin.agent.as_str(), trellis::ADMINISTRATOR_AGENT);

        let custom = Session::new(Iri::new("https://example.com/agent/alice"));
        assert!(custom.created <= Utc::now());
    }
}
