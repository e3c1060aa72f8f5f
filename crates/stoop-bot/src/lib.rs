//! Stoop Neighborhood Admin Bot
//!
//! The bot mediates a neighborhood of peers in a social-discovery
//! protocol: peers submit signed relationship actions (smash, pass,
//! block, clear) against each other, and the bot answers discovery
//! requests with ranked, profile-annotated peer lists computed over the
//! resulting relationship graph.
//!
//! # Data flow
//!
//! ```text
//! relationship action ──> NeighborhoodBot ──> RelationshipGraph
//!   (sender != target,      (LWW by event        (edge mutation,
//!    LWW by timestamp)       timestamp)           score invalidation)
//!
//! discovery request ───> NeighborhoodBot ──> ranked ScoreEntry list
//!                           (join with DID      joined with profile
//!                            + profile cache)   metadata, sent back)
//! ```
//!
//! The messaging/session layer and key custody are external
//! collaborators: inbound authenticated events arrive as [`Event`]s and
//! outbound delivery goes through the injected [`ProfileSender`].
//! Anomalies expected under gossip (stale events, self-actions, unknown
//! verbs) are recovered locally with a log line; only unregistered
//! discovery and delivery failures surface as errors.

mod bot;
mod error;
mod event;
mod profile;
mod relationship;

pub use bot::{NeighborhoodBot, ProfileSender};
pub use error::{Error, Result};
pub use event::Event;
pub use profile::{
    DidDocument, ProfileFields, ProfileListMessage, ProfileMeta, RankedProfile, Scores,
    PROFILE_LIST_TYPE,
};
pub use relationship::{RelationshipRecord, RelationshipState};

pub use stoop_graph::PeerId;
