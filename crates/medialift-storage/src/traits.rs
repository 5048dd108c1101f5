use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Failures surfaced by an object store backend.
///
/// Backends map their native error shapes onto these variants so the
/// pipeline's classifier can decide retryability without knowing which
/// backend is in play. Errors a backend cannot map land in `Opaque` and
/// are classified from their message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("caller is not authorized to write this object")]
    Unauthorized,

    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("operation was canceled by the caller")]
    Canceled,

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("store is misconfigured: {0}")]
    BucketMisconfigured(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("checksum mismatch for uploaded object: {0}")]
    ChecksumMismatch(String),

    #[error("retry limit exceeded")]
    RetryLimitExceeded,

    #[error("unknown store error: {0}")]
    Unknown(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Opaque(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Destination-agnostic object store.
///
/// `put` must be atomic from the reader's point of view: a key either holds
/// the complete object or does not exist.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` at `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()>;

    /// Resolve the URL from which the object at `key` can be fetched.
    async fn retrievable_url(&self, key: &str) -> StoreResult<String>;

    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> StoreResult<bool>;
}
