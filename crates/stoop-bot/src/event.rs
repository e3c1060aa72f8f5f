//! Inbound events from the messaging layer.
//!
//! The session layer authenticates and decodes peer messages, then hands
//! them to the bot as [`Event`]s over a channel. The `from` peer of a
//! relationship event is the authenticated message sender, not a field
//! the sender controls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stoop_graph::PeerId;

use crate::profile::{DidDocument, ProfileFields};

/// One authenticated inbound message, ready for the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A peer registered with the neighborhood.
    Join { peer: PeerId, did: DidDocument },

    /// A peer pushed a (partial) profile update.
    ProfileUpdate { peer: PeerId, fields: ProfileFields },

    /// A peer declared a relationship action toward another peer.
    ///
    /// `action` is carried as the raw wire verb: unknown verbs must reach
    /// the bot so it can log and drop them instead of failing to decode.
    Relationship {
        from: PeerId,
        to: PeerId,
        action: String,
        /// Digest of the signed action payload, for log correlation.
        digest: String,
        time: DateTime<Utc>,
    },

    /// A peer asked for the ranked neighborhood listing.
    Discover { peer: PeerId },
}
