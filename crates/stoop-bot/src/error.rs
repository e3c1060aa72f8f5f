//! Error types for the bot.

use stoop_graph::PeerId;
use thiserror::Error;

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bot operations.
///
/// Expected gossip noise (stale events, self-actions, unknown verbs) is
/// not represented here: those are recovered locally and only logged.
#[derive(Debug, Error)]
pub enum Error {
    /// Discovery was requested by a peer with no stored DID document.
    /// Distinct from an empty neighborhood: the bot does not know the
    /// requester at all.
    #[error("peer {0} is not registered with this neighborhood")]
    UnregisteredPeer(PeerId),

    /// The messaging layer failed to deliver a profile list.
    #[error("profile delivery failed: {0}")]
    Delivery(String),
}
