//! Software-backed provider for tests and local development.
//!
//! Keys live in an in-memory [`KeyStore`]; signing is ed25519, digests
//! and key derivation are BLAKE3. Encrypt/decrypt and wrap/unwrap report
//! [`Error::Unsupported`] - this provider carries no symmetric cipher,
//! those primitives belong to a real PKCS#11 token.

use std::sync::{Mutex, MutexGuard};

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::error::{Error, Result};
use crate::handle::{KeyHandle, KeyStore, ObjectClass};
use crate::provider::{HsmProvider, KeyPairHandles};

/// Bytes of the BLAKE3 fingerprint used as a key id.
const KEY_ID_LEN: usize = 16;

/// In-memory ed25519/BLAKE3 provider.
#[derive(Debug, Default)]
pub struct SoftwareProvider {
    keys: Mutex<KeyStore>,
}

impl SoftwareProvider {
    /// Create a provider with an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> Result<MutexGuard<'_, KeyStore>> {
        self.keys
            .lock()
            .map_err(|_| Error::Provider("key store lock poisoned".into()))
    }

    fn key_id(material: &[u8]) -> Vec<u8> {
        blake3::hash(material).as_bytes()[..KEY_ID_LEN].to_vec()
    }

    fn fixed_material(material: &[u8]) -> Result<[u8; 32]> {
        material
            .try_into()
            .map_err(|_| Error::Provider(format!("bad key material length {}", material.len())))
    }
}

impl HsmProvider for SoftwareProvider {
    fn sign(&self, key: &KeyHandle, data: &[u8]) -> Result<Vec<u8>> {
        let store = self.store()?;
        let material = Self::fixed_material(store.get(key)?)?;
        let signing = SigningKey::from_bytes(&material);
        Ok(signing.sign(data).to_bytes().to_vec())
    }

    fn verify(&self, key: &KeyHandle, data: &[u8], signature: &[u8]) -> Result<bool> {
        let store = self.store()?;
        let material = Self::fixed_material(store.get(key)?)?;
        let verifying = VerifyingKey::from_bytes(&material)?;
        let signature = Signature::from_slice(signature)?;
        Ok(verifying.verify(data, &signature).is_ok())
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(blake3::hash(data).as_bytes().to_vec())
    }

    fn encrypt(&self, _key: &KeyHandle, _plaintext: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported("encrypt"))
    }

    fn decrypt(&self, _key: &KeyHandle, _ciphertext: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported("decrypt"))
    }

    fn derive_bits(&self, key: &KeyHandle, info: &[u8], length: usize) -> Result<Vec<u8>> {
        let store = self.store()?;
        let material = Self::fixed_material(store.get(key)?)?;
        let mut hasher = blake3::Hasher::new_keyed(&material);
        hasher.update(info);
        let mut out = vec![0u8; length];
        hasher.finalize_xof().fill(&mut out);
        Ok(out)
    }

    fn derive_key(&self, key: &KeyHandle, context: &str) -> Result<KeyHandle> {
        let mut store = self.store()?;
        let derived = blake3::derive_key(context, store.get(key)?);
        let handle = KeyHandle::new(ObjectClass::Secret, Self::key_id(&derived));
        store.insert(&handle, derived.to_vec());
        Ok(handle)
    }

    fn wrap_key(&self, _wrapping: &KeyHandle, _key: &KeyHandle) -> Result<Vec<u8>> {
        Err(Error::Unsupported("wrap_key"))
    }

    fn unwrap_key(
        &self,
        _wrapping: &KeyHandle,
        _wrapped: &[u8],
        _class: ObjectClass,
    ) -> Result<KeyHandle> {
        Err(Error::Unsupported("unwrap_key"))
    }

    fn generate_key(&self) -> Result<KeyPairHandles> {
        let signing = SigningKey::generate(&mut OsRng);
        let verifying = signing.verifying_key();

        let id = Self::key_id(verifying.as_bytes());
        let public = KeyHandle::new(ObjectClass::Public, id.clone());
        let private = KeyHandle::new(ObjectClass::Private, id);

        let mut store = self.store()?;
        store.insert(&public, verifying.as_bytes().to_vec());
        store.insert(&private, signing.to_bytes().to_vec());
        Ok(KeyPairHandles { public, private })
    }

    fn import_key(&self, class: ObjectClass, material: &[u8]) -> Result<KeyHandle> {
        let handle = KeyHandle::new(class, Self::key_id(material));
        self.store()?.insert(&handle, material.to_vec());
        Ok(handle)
    }

    fn export_key(&self, key: &KeyHandle) -> Result<Vec<u8>> {
        Ok(self.store()?.get(key)?.to_vec())
    }
}
