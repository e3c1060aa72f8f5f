//! Error types for key custody.

use thiserror::Error;

/// Result type for custody operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in custody operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The crypto queue worker is gone; no further operations can run.
    #[error("crypto queue has shut down")]
    QueueClosed,

    /// Key lookup by composite id found nothing.
    #[error("no key found for composite id {0}")]
    KeyCustodyMiss(String),

    /// A composite key id failed to parse.
    #[error("invalid key handle: {0}")]
    InvalidHandle(String),

    /// The provider does not implement this primitive.
    #[error("operation not supported by this provider: {0}")]
    Unsupported(&'static str),

    /// Signature creation or verification failed structurally.
    #[error("signature error: {0}")]
    Signature(#[from] ed25519_dalek::SignatureError),

    /// Provider-internal failure.
    #[error("provider error: {0}")]
    Provider(String),
}
