//! Hooks and traits for caller integration
//!
//! The pipeline consumes an identity capability and reports progress through
//! caller-supplied callbacks. Both are defined here so the surrounding
//! application (UI, session layer) can plug in without the pipeline
//! depending on it.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Minimal identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub display_name: Option<String>,
}

impl Caller {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            display_name: None,
        }
    }
}

/// Trait for resolving the current authenticated caller.
///
/// The surrounding application implements this against its session layer;
/// the pipeline only asks whether a caller is present.
pub trait IdentityProvider: Send + Sync {
    fn current_caller(&self) -> Option<Caller>;
}

/// Identity provider returning a fixed answer. Useful for tests and for
/// deployments where authentication happens upstream of the pipeline.
pub struct FixedIdentity(Option<Caller>);

impl FixedIdentity {
    pub fn caller(id: Uuid) -> Self {
        Self(Some(Caller::new(id)))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_caller(&self) -> Option<Caller> {
        self.0.clone()
    }
}

type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;
type RetryFn = Arc<dyn Fn(u32) + Send + Sync>;
type StatusFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Fire-and-forget progress callbacks supplied by the caller.
///
/// All callbacks default to no-ops; nothing in the pipeline consumes their
/// return values.
#[derive(Clone, Default)]
pub struct UploadHooks {
    on_progress: Option<ProgressFn>,
    on_retry: Option<RetryFn>,
    on_compression_status: Option<StatusFn>,
}

impl UploadHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, f: impl Fn(u8) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    pub fn with_retry(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_retry = Some(Arc::new(f));
        self
    }

    pub fn with_compression_status(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_compression_status = Some(Arc::new(f));
        self
    }

    /// Report transfer progress in percent (0..=100).
    pub fn progress(&self, percent: u8) {
        if let Some(f) = &self.on_progress {
            f(percent);
        }
    }

    /// Report that attempt `attempt` failed and a retry is about to begin.
    pub fn retry(&self, attempt: u32) {
        if let Some(f) = &self.on_retry {
            f(attempt);
        }
    }

    /// Report a human-readable compression status message.
    pub fn compression_status(&self, message: &str) {
        if let Some(f) = &self.on_compression_status {
            f(message);
        }
    }
}

impl fmt::Debug for UploadHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadHooks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .field("on_compression_status", &self.on_compression_status.is_some())
            .finish()
    }
}
