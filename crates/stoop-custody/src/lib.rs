//! Stoop Key Custody - Serialized HSM Access
//!
//! A hardware security module session is a stateful, non-reentrant
//! resource: concurrent calls into it corrupt internal state or return
//! results for the wrong caller. This crate makes such a session safe to
//! use from arbitrary concurrent tasks by funneling every cryptographic
//! operation through one ordered queue.
//!
//! # Overview
//!
//! - [`SerialQueue`] executes submitted async operations strictly one at a
//!   time, in submission order, delivering each result (or error) only to
//!   its own submitter. One failing operation never stalls the queue.
//! - [`HsmProvider`] is the boundary to the underlying crypto provider:
//!   the standard primitive set (sign, verify, digest, encrypt, decrypt,
//!   derive, wrap/unwrap, generate/import/export) keyed by [`KeyHandle`].
//! - [`SerializedHsm`] wraps one provider with one queue and exposes the
//!   async primitive set. Construct it once at process startup and pass
//!   clones around: every clone shares the same queue, preserving the
//!   mutual-exclusion guarantee. Building a second `SerializedHsm` over
//!   the same session would reintroduce the race this crate exists to
//!   prevent.
//! - [`KeyStore`] resolves keys by their `{class}-{hexid}` composite id
//!   ([`KeyHandle::composite_id`]).
//! - [`SoftwareProvider`] is an in-memory, software-backed provider
//!   (ed25519 + BLAKE3) for tests and local development.
//!
//! # Example
//!
//! ```rust,ignore
//! let hsm = SerializedHsm::new(SoftwareProvider::new());
//! let pair = hsm.generate_key().await?;
//! let signature = hsm.sign(pair.private.clone(), message).await?;
//! assert!(hsm.verify(pair.public, message, signature).await?);
//! ```

mod error;
mod handle;
mod hsm;
mod provider;
mod queue;
mod soft;

pub use error::{Error, Result};
pub use handle::{KeyHandle, KeyStore, ObjectClass, SPLITTER};
pub use hsm::SerializedHsm;
pub use provider::{HsmProvider, KeyPairHandles};
pub use queue::SerialQueue;
pub use soft::SoftwareProvider;
