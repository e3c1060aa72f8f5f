//! The neighborhood bot itself.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use stoop_graph::{PeerId, RelationshipGraph};

use crate::error::{Error, Result};
use crate::event::Event;
use crate::profile::{
    DidDocument, ProfileFields, ProfileListMessage, ProfileRecord, RankedProfile, Scores,
};
use crate::relationship::{RelationshipRecord, RelationshipState};

/// Outbound delivery of a profile list to one peer.
///
/// Implemented by the messaging layer; the bot only needs fire-and-await
/// delivery with an error it can surface.
pub trait ProfileSender: Send + Sync {
    fn send_profiles(
        &self,
        to: PeerId,
        message: ProfileListMessage,
    ) -> BoxFuture<'static, Result<()>>;
}

/// Admin bot for one neighborhood.
///
/// Single-owner state machine: events are applied one at a time, so the
/// relationship store and the graph always agree. Concurrency lives in
/// the channel feeding [`NeighborhoodBot::run`], not in here.
pub struct NeighborhoodBot {
    graph: RelationshipGraph,
    profiles: HashMap<PeerId, ProfileRecord>,
    /// Directed (from, to) -> latest accepted action.
    relationships: HashMap<(PeerId, PeerId), RelationshipRecord>,
    sender: Arc<dyn ProfileSender>,
}

impl NeighborhoodBot {
    pub fn new(sender: Arc<dyn ProfileSender>) -> Self {
        Self {
            graph: RelationshipGraph::new(),
            profiles: HashMap::new(),
            relationships: HashMap::new(),
            sender,
        }
    }

    /// Register a peer: admit it to the graph and cache its DID document.
    ///
    /// Re-joining refreshes the document (rotated keys, new endpoints)
    /// without disturbing graph edges or stored metadata.
    pub fn on_join(&mut self, peer: PeerId, did: DidDocument) {
        self.graph.get_or_create(&peer);
        let record = self.profiles.entry(peer.clone()).or_default();
        record.did = Some(did);
        info!("{peer} joined the neighborhood");
    }

    /// Merge a partial profile update into the stored metadata.
    ///
    /// Avatars are dropped here: [`ProfileMeta`](crate::ProfileMeta) has
    /// no field for them, so they cannot survive the merge.
    pub fn on_profile_update(&mut self, peer: PeerId, fields: ProfileFields) {
        let record = self.profiles.entry(peer.clone()).or_default();
        record.meta.get_or_insert_with(Default::default).merge(fields);
        debug!("profile updated for {peer}");
    }

    /// Apply one relationship action, last-write-wins per directed pair.
    ///
    /// Self-actions are dropped. An action older than the stored record
    /// for the same (from, to) pair is dropped; events may arrive in any
    /// order, and only the latest declaration stands. On a timestamp tie
    /// the stored record wins, so redelivery is a no-op.
    pub fn on_relationship(
        &mut self,
        from: PeerId,
        to: PeerId,
        state: RelationshipState,
        time: DateTime<Utc>,
    ) {
        if from == to {
            info!("{from} tried to {state} themselves, ignoring");
            return;
        }

        let pair = (from.clone(), to.clone());
        if let Some(current) = self.relationships.get(&pair) {
            if current.time >= time {
                debug!(
                    "stale {state} from {from} to {to}: stored {} >= event {time}",
                    current.time
                );
                return;
            }
        }
        self.relationships
            .insert(pair, RelationshipRecord { state, time });

        match state {
            RelationshipState::Smash => self.graph.connect_directed(&from, &to),
            RelationshipState::Pass | RelationshipState::Block => {
                self.graph.disconnect_directed(&from, &to)
            }
            RelationshipState::Clear => self.graph.reset_edges(&from, &to),
        }
    }

    /// Answer a discovery request: the ranked neighborhood joined with
    /// cached profiles, pushed back to the requester.
    ///
    /// Only registered peers (those with a stored DID document) may
    /// discover; everyone else gets [`Error::UnregisteredPeer`].
    pub async fn on_discover(&mut self, peer: PeerId) -> Result<Vec<RankedProfile>> {
        let registered = self
            .profiles
            .get(&peer)
            .is_some_and(|record| record.did.is_some());
        if !registered {
            return Err(Error::UnregisteredPeer(peer));
        }

        let ranked = self.ranked_profiles();
        debug!("{peer} discovers {} ranked profiles", ranked.len());

        self.sender
            .send_profiles(peer, ProfileListMessage::new(ranked.clone()))
            .await?;
        Ok(ranked)
    }

    fn ranked_profiles(&mut self) -> Vec<RankedProfile> {
        let profiles = &self.profiles;
        self.graph
            .get_scores()
            .iter()
            .map(|entry| {
                let record = profiles.get(&entry.id);
                RankedProfile {
                    did: record.and_then(|r| r.did.clone()),
                    meta: record.and_then(|r| r.meta.clone()),
                    scores: Scores { score: entry.score },
                }
            })
            .collect()
    }

    /// Apply one inbound event.
    ///
    /// Unknown relationship verbs are logged and dropped without storing
    /// a record, so a later valid action is not shadowed by garbage.
    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Join { peer, did } => {
                self.on_join(peer, did);
                Ok(())
            }
            Event::ProfileUpdate { peer, fields } => {
                self.on_profile_update(peer, fields);
                Ok(())
            }
            Event::Relationship {
                from,
                to,
                action,
                digest,
                time,
            } => {
                match RelationshipState::parse(&action) {
                    Some(state) => self.on_relationship(from, to, state, time),
                    None => warn!("unknown action! {action} from {from} (digest {digest})"),
                }
                Ok(())
            }
            Event::Discover { peer } => self.on_discover(peer).await.map(drop),
        }
    }

    /// Consume events until the channel closes.
    ///
    /// Per-event errors are logged and the loop keeps going; one bad
    /// request must not take the neighborhood down.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) {
        while let Some(event) = events.recv().await {
            if let Err(err) = self.handle_event(event).await {
                error!("event handling failed: {err}");
            }
        }
        info!("event channel closed, bot shutting down");
    }
}
