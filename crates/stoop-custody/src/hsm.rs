//! Serialized facade over a crypto provider.

use std::sync::Arc;

use crate::error::Result;
use crate::handle::{KeyHandle, ObjectClass};
use crate::provider::{HsmProvider, KeyPairHandles};
use crate::queue::SerialQueue;

/// One provider, one queue: the process-wide entry point for crypto.
///
/// Every primitive is routed through the shared [`SerialQueue`], so calls
/// from any number of concurrent tasks execute one at a time in submission
/// order. Clones share the queue; never construct a second `SerializedHsm`
/// over the same underlying session.
pub struct SerializedHsm<P> {
    provider: Arc<P>,
    queue: SerialQueue,
}

impl<P> Clone for SerializedHsm<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            queue: self.queue.clone(),
        }
    }
}

impl<P: HsmProvider> SerializedHsm<P> {
    /// Wrap a provider with a fresh queue. Call once at process startup.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            queue: SerialQueue::new(),
        }
    }

    pub async fn sign(&self, key: KeyHandle, data: Vec<u8>) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.sign(&key, &data) })
            .await
    }

    pub async fn verify(&self, key: KeyHandle, data: Vec<u8>, signature: Vec<u8>) -> Result<bool> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.verify(&key, &data, &signature) })
            .await
    }

    pub async fn digest(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.digest(&data) })
            .await
    }

    pub async fn encrypt(&self, key: KeyHandle, plaintext: Vec<u8>) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.encrypt(&key, &plaintext) })
            .await
    }

    pub async fn decrypt(&self, key: KeyHandle, ciphertext: Vec<u8>) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.decrypt(&key, &ciphertext) })
            .await
    }

    pub async fn derive_bits(&self, key: KeyHandle, info: Vec<u8>, length: usize) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.derive_bits(&key, &info, length) })
            .await
    }

    pub async fn derive_key(&self, key: KeyHandle, context: String) -> Result<KeyHandle> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.derive_key(&key, &context) })
            .await
    }

    pub async fn wrap_key(&self, wrapping: KeyHandle, key: KeyHandle) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.wrap_key(&wrapping, &key) })
            .await
    }

    pub async fn unwrap_key(
        &self,
        wrapping: KeyHandle,
        wrapped: Vec<u8>,
        class: ObjectClass,
    ) -> Result<KeyHandle> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.unwrap_key(&wrapping, &wrapped, class) })
            .await
    }

    pub async fn generate_key(&self) -> Result<KeyPairHandles> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.generate_key() })
            .await
    }

    pub async fn import_key(&self, class: ObjectClass, material: Vec<u8>) -> Result<KeyHandle> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.import_key(class, &material) })
            .await
    }

    pub async fn export_key(&self, key: KeyHandle) -> Result<Vec<u8>> {
        let provider = Arc::clone(&self.provider);
        self.queue
            .submit(move || async move { provider.export_key(&key) })
            .await
    }
}
