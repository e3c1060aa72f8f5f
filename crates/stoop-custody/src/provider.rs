//! The provider boundary.
//!
//! An [`HsmProvider`] exposes the standard primitive set against keys it
//! custodies. Implementations are assumed NOT to tolerate concurrent
//! calls - that is the whole reason [`crate::SerializedHsm`] exists - so
//! callers must never invoke a provider directly from concurrent tasks.

use crate::error::Result;
use crate::handle::{KeyHandle, ObjectClass};

/// Handles for a freshly generated asymmetric key pair.
#[derive(Debug, Clone)]
pub struct KeyPairHandles {
    pub public: KeyHandle,
    pub private: KeyHandle,
}

/// Boundary to a (possibly hardware-backed) cryptographic provider.
pub trait HsmProvider: Send + Sync + 'static {
    /// Sign `data` with the private key behind `key`.
    fn sign(&self, key: &KeyHandle, data: &[u8]) -> Result<Vec<u8>>;

    /// Verify `signature` over `data` with the public key behind `key`.
    fn verify(&self, key: &KeyHandle, data: &[u8], signature: &[u8]) -> Result<bool>;

    /// Hash `data`.
    fn digest(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Encrypt `plaintext` under `key`.
    fn encrypt(&self, key: &KeyHandle, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` under `key`.
    fn decrypt(&self, key: &KeyHandle, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Derive `length` bytes from `key` and caller-supplied `info`.
    fn derive_bits(&self, key: &KeyHandle, info: &[u8], length: usize) -> Result<Vec<u8>>;

    /// Derive a new secret key from `key` in the given `context`.
    fn derive_key(&self, key: &KeyHandle, context: &str) -> Result<KeyHandle>;

    /// Export `key` encrypted under `wrapping`.
    fn wrap_key(&self, wrapping: &KeyHandle, key: &KeyHandle) -> Result<Vec<u8>>;

    /// Import previously wrapped material as a key of `class`.
    fn unwrap_key(
        &self,
        wrapping: &KeyHandle,
        wrapped: &[u8],
        class: ObjectClass,
    ) -> Result<KeyHandle>;

    /// Generate a fresh asymmetric key pair.
    fn generate_key(&self) -> Result<KeyPairHandles>;

    /// Import raw key material as a key of `class`.
    fn import_key(&self, class: ObjectClass, material: &[u8]) -> Result<KeyHandle>;

    /// Export the raw material behind `key`.
    fn export_key(&self, key: &KeyHandle) -> Result<Vec<u8>>;
}
