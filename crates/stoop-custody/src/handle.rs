//! Key handles and the composite-id key store.
//!
//! HSM-resident keys are addressed by a `{class}-{hexid}` composite id:
//! the PKCS#11 object class joined to the hex-encoded key id with
//! [`SPLITTER`]. Hex encoding guarantees the separator never appears
//! inside the id component, so the encoding splits unambiguously.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Separator between object class and hex key id in a composite id.
pub const SPLITTER: char = '-';

/// PKCS#11 object class of a stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ObjectClass {
    /// CKO_PUBLIC_KEY
    Public = 2,
    /// CKO_PRIVATE_KEY
    Private = 3,
    /// CKO_SECRET_KEY
    Secret = 4,
}

impl ObjectClass {
    /// Map a raw PKCS#11 class value back to the enum.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            2 => Some(Self::Public),
            3 => Some(Self::Private),
            4 => Some(Self::Secret),
            _ => None,
        }
    }
}

/// Opaque reference to an HSM-resident key object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyHandle {
    class: ObjectClass,
    id: Vec<u8>,
}

impl KeyHandle {
    /// Create a handle from a class and raw key id bytes.
    pub fn new(class: ObjectClass, id: impl Into<Vec<u8>>) -> Self {
        Self {
            class,
            id: id.into(),
        }
    }

    /// The object class.
    pub fn class(&self) -> ObjectClass {
        self.class
    }

    /// The raw key id bytes.
    pub fn key_id(&self) -> &[u8] {
        &self.id
    }

    /// The `{class}-{hexid}` encoding used for store lookups.
    pub fn composite_id(&self) -> String {
        format!("{}{}{}", self.class as u32, SPLITTER, hex::encode(&self.id))
    }

    /// Parse a composite id back into a handle.
    pub fn parse(composite: &str) -> Result<Self> {
        let (class, id) = composite
            .split_once(SPLITTER)
            .ok_or_else(|| Error::InvalidHandle(composite.to_owned()))?;
        let class = class
            .parse::<u32>()
            .ok()
            .and_then(ObjectClass::from_raw)
            .ok_or_else(|| Error::InvalidHandle(composite.to_owned()))?;
        let id = hex::decode(id).map_err(|_| Error::InvalidHandle(composite.to_owned()))?;
        Ok(Self { class, id })
    }
}

impl std::fmt::Display for KeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.composite_id())
    }
}

/// In-memory map of composite id to key material.
///
/// Stands in for the HSM token's object table at the custody boundary; a
/// miss is a hard failure because no operation can proceed without its key.
#[derive(Debug, Default)]
pub struct KeyStore {
    keys: HashMap<String, Vec<u8>>,
}

impl KeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store material under the handle's composite id.
    pub fn insert(&mut self, handle: &KeyHandle, material: Vec<u8>) {
        self.keys.insert(handle.composite_id(), material);
    }

    /// Look up material for a handle.
    pub fn get(&self, handle: &KeyHandle) -> Result<&[u8]> {
        self.get_by_composite_id(&handle.composite_id())
    }

    /// Look up material by raw composite id.
    pub fn get_by_composite_id(&self, composite: &str) -> Result<&[u8]> {
        self.keys
            .get(composite)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::KeyCustodyMiss(composite.to_owned()))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_roundtrip() {
        let handle = KeyHandle::new(ObjectClass::Private, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(handle.composite_id(), "3-deadbeef");
        let parsed = KeyHandle::parse(&handle.composite_id()).unwrap();
        assert_eq!(parsed, handle);
    }

    #[test]
    fn hex_id_never_contains_splitter() {
        // Arbitrary bytes hex-encode to [0-9a-f] only.
        let handle = KeyHandle::new(ObjectClass::Secret, (0u8..=255).collect::<Vec<_>>());
        let composite = handle.composite_id();
        assert_eq!(composite.matches(SPLITTER).count(), 1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            KeyHandle::parse("no splitter"),
            Err(Error::InvalidHandle(_))
        ));
        assert!(matches!(
            KeyHandle::parse("9-aabb"),
            Err(Error::InvalidHandle(_))
        ));
        assert!(matches!(
            KeyHandle::parse("3-not hex"),
            Err(Error::InvalidHandle(_))
        ));
    }

    #[test]
    fn store_miss_is_a_hard_failure() {
        let store = KeyStore::new();
        let handle = KeyHandle::new(ObjectClass::Public, vec![1, 2, 3]);
        assert!(matches!(
            store.get(&handle),
            Err(Error::KeyCustodyMiss(id)) if id == "2-010203"
        ));
    }

    #[test]
    fn store_returns_what_was_inserted() {
        let mut store = KeyStore::new();
        let handle = KeyHandle::new(ObjectClass::Secret, vec![7]);
        store.insert(&handle, vec![42; 32]);
        assert_eq!(store.get(&handle).unwrap(), &[42; 32][..]);
        assert_eq!(store.get_by_composite_id("4-07").unwrap(), &[42; 32][..]);
    }
}
