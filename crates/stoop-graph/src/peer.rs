//! Peer identity.
//!
//! A [`PeerId`] is the stable string identifier used as the graph's node
//! key: either the canonical id of a peer's DID document, or a key
//! fingerprint computed with [`PeerId::from_public_key`]. The full id is
//! always used for identity comparison; truncation is a presentation-layer
//! concern that never reaches the graph.

/// Stable string identifier for a peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PeerId(String);

impl PeerId {
    /// Create from an already-canonical identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fingerprint a public key into a PeerId.
    ///
    /// Double-BLAKE3 (Archivist/IPFS style):
    /// hash1 = BLAKE3(pubkey), hash2 = BLAKE3(hash1), id = "b3b3/{hash2}"
    pub fn from_public_key(pubkey: &[u8]) -> Self {
        let hash1 = blake3::hash(pubkey);
        let hash2 = blake3::hash(hash1.as_bytes());
        Self(format!("b3b3/{}", hex::encode(hash2.as_bytes())))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PeerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        let a = PeerId::from_public_key(b"some public key bytes");
        let b = PeerId::from_public_key(b"some public key bytes");
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("b3b3/"));
    }

    #[test]
    fn fingerprint_differs_per_key() {
        let a = PeerId::from_public_key(b"key one");
        let b = PeerId::from_public_key(b"key two");
        assert_ne!(a, b);
    }

    #[test]
    fn full_id_compares_whole_string() {
        // Ids sharing a prefix must not compare equal.
        let a = PeerId::new("b3b3/aabbcc");
        let b = PeerId::new("b3b3/aabbdd");
        assert_ne!(a, b);
    }
}
