//! DID documents, profile metadata, and the outbound profile-list payload.

use serde::{Deserialize, Serialize};
use stoop_graph::PeerId;

/// Wire type tag of the ranked profile list.
pub const PROFILE_LIST_TYPE: &str = "profiles";

/// Resolved DID document of a peer, as cached by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    /// Canonical DID (the stable peer identity).
    pub id: String,
    /// Identity (signing) key, base64.
    pub ik: String,
    /// Exchange key, base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ek: Option<String>,
    /// Messaging endpoints the peer can be reached on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
}

impl DidDocument {
    /// The graph identity of this document.
    pub fn peer_id(&self) -> PeerId {
        PeerId::new(&self.id)
    }
}

/// Partial profile fields as pushed by a peer.
///
/// `avatar` is accepted on the wire but dropped unconditionally before
/// storage: binary profile pictures travel peer-to-peer, the bot never
/// retains them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Stored profile metadata for a peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProfileMeta {
    /// Shallow merge: each present incoming field overwrites the stored
    /// one, absent fields leave stored values untouched. The avatar
    /// field never lands.
    pub fn merge(&mut self, fields: ProfileFields) {
        if let Some(title) = fields.title {
            self.title = Some(title);
        }
        if let Some(description) = fields.description {
            self.description = Some(description);
        }
    }
}

/// Everything the bot knows about one peer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProfileRecord {
    pub did: Option<DidDocument>,
    pub meta: Option<ProfileMeta>,
}

/// Discovery score annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub score: f64,
}

/// One entry of the ranked discovery reply.
///
/// `did`/`meta` may be absent for peers the graph has scored but the bot
/// has never profiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<DidDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProfileMeta>,
    pub scores: Scores,
}

/// The outbound profile-list payload pushed back to a discovering peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileListMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<RankedProfile>,
    /// Pagination cursor; windowing is not implemented, always "0".
    pub after: String,
}

impl ProfileListMessage {
    /// Wrap a ranked list in the wire envelope.
    pub fn new(data: Vec<RankedProfile>) -> Self {
        Self {
            kind: PROFILE_LIST_TYPE.to_owned(),
            data,
            after: "0".to_owned(),
        }
    }
}
