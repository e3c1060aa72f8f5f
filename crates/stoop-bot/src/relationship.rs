//! Relationship actions and their last-write-wins records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four recognized relationship verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipState {
    /// Strong positive interest.
    Smash,
    /// Neutral rejection.
    Pass,
    /// Negative rejection.
    Block,
    /// Reset to the neutral baseline.
    Clear,
}

impl RelationshipState {
    /// Parse a wire verb. Unknown verbs return `None` so callers can
    /// drop them as forward-compatible no-ops.
    pub fn parse(verb: &str) -> Option<Self> {
        match verb {
            "smash" => Some(Self::Smash),
            "pass" => Some(Self::Pass),
            "block" => Some(Self::Block),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }

    /// The wire verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smash => "smash",
            Self::Pass => "pass",
            Self::Block => "block",
            Self::Clear => "clear",
        }
    }
}

impl std::fmt::Display for RelationshipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last-known state of one directed (from, to) relationship.
///
/// Only the record with the latest `time` is retained; an event carrying
/// an older timestamp than the stored record is discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub state: RelationshipState,
    pub time: DateTime<Utc>,
}
