//! Upload orchestrator
//!
//! Drives one file through the full pipeline: identity check, compression,
//! validation, connectivity probe, then the transfer attempt loop with
//! linear backoff. Every exit path produces an `UploadResult`; the
//! orchestrator never panics on a bad file or a flaky store.
//!
//! Cancellation is drop-based: dropping the future returned by `upload`
//! abandons the transfer, and a store that observes its own cancellation
//! reports `StoreError::Canceled`.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use medialift_core::error::{ErrorDetails, UploadErrorKind};
use medialift_core::hooks::IdentityProvider;
use medialift_core::models::compression::CompressionSummary;
use medialift_core::models::source_file::SourceFile;
use medialift_core::models::upload::{UploadOptions, UploadResult};
use medialift_storage::ObjectStore;

use crate::classifier::{classify_store_error, classify_validation};
use crate::compression::compress_to_budget;
use crate::connectivity::probe_store;
use crate::validator::UploadValidator;

/// Why a file skipped re-encoding and uploads as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    CompressionDisabled,
    NotAnImage,
    EncodeFailed,
}

/// The bytes that will actually travel, after the compression stage.
#[derive(Debug)]
pub enum Prepared {
    Compressed(medialift_core::models::compression::CompressionOutcome),
    Original { reason: PassThroughReason },
}

/// Orchestrates uploads against an object store.
pub struct SafeUploader {
    store: Arc<dyn ObjectStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl SafeUploader {
    pub fn new(store: Arc<dyn ObjectStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    /// Upload `file` to `destination`.
    ///
    /// `attempts` in the result counts transfer attempts only; rejections
    /// before the first `put` report 0.
    pub async fn upload(
        &self,
        file: &SourceFile,
        destination: &str,
        options: &UploadOptions,
    ) -> UploadResult {
        let upload_id = Uuid::new_v4();
        tracing::info!(
            %upload_id,
            name = %file.name,
            destination,
            size_bytes = file.size(),
            "starting upload"
        );

        if self.identity.current_caller().is_none() {
            let details = ErrorDetails::upload(
                UploadErrorKind::Unauthenticated,
                "no authenticated caller for upload",
            );
            tracing::debug!(%upload_id, "rejected unauthenticated upload");
            return UploadResult::failed(&details, 0, None);
        }

        let prepared = self.prepare(file, options);
        let summary = match &prepared {
            Prepared::Compressed(outcome) => Some(outcome.summary()),
            Prepared::Original { reason } => {
                tracing::debug!(%upload_id, ?reason, "uploading original bytes");
                None
            }
        };
        let (data, content_type) = match &prepared {
            Prepared::Compressed(outcome) if outcome.was_compressed() => {
                (outcome.data.clone(), "image/jpeg".to_string())
            }
            Prepared::Compressed(outcome) => (outcome.data.clone(), file.content_type.clone()),
            Prepared::Original { .. } => (file.data.clone(), file.content_type.clone()),
        };

        let candidate = SourceFile::new(file.name.clone(), content_type.clone(), data.clone());
        let validator = UploadValidator::new(options.max_file_bytes);
        if let Err(e) = validator.validate(&candidate) {
            let details = classify_validation(&e);
            tracing::debug!(%upload_id, code = %details.code, "rejected in validation");
            return UploadResult::failed(&details, 0, summary);
        }

        if let Err(e) = probe_store(self.store.as_ref()).await {
            let details = classify_store_error(&e);
            tracing::warn!(%upload_id, code = %details.code, "store unreachable, aborting");
            return UploadResult::failed(&details, 0, summary);
        }

        self.transfer(upload_id, destination, data, &content_type, options, summary)
            .await
    }

    fn prepare(&self, file: &SourceFile, options: &UploadOptions) -> Prepared {
        if !options.compress {
            return Prepared::Original {
                reason: PassThroughReason::CompressionDisabled,
            };
        }
        if !file.is_image() {
            return Prepared::Original {
                reason: PassThroughReason::NotAnImage,
            };
        }
        match compress_to_budget(file, &options.plan, &options.hooks) {
            Ok(outcome) => Prepared::Compressed(outcome),
            Err(e) => {
                tracing::warn!(
                    name = %file.name,
                    error = %format!("{e:#}"),
                    "compression failed, uploading original bytes"
                );
                Prepared::Original {
                    reason: PassThroughReason::EncodeFailed,
                }
            }
        }
    }

    async fn transfer(
        &self,
        upload_id: Uuid,
        destination: &str,
        data: Bytes,
        content_type: &str,
        options: &UploadOptions,
        summary: Option<CompressionSummary>,
    ) -> UploadResult {
        let hooks = &options.hooks;
        let max_retries = options.max_retries.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            hooks.progress(0);

            // One attempt is the whole put-then-resolve sequence; a failure
            // in either half is classified and retried the same way. `put`
            // replaces the object, so re-running a half-finished attempt is
            // safe.
            let attempt_result = match self
                .store
                .put(destination, data.clone(), content_type)
                .await
            {
                Ok(()) => {
                    hooks.progress(100);
                    match self.store.retrievable_url(destination).await {
                        Ok(url) => Ok(url),
                        Err(e) => {
                            tracing::warn!(
                                %upload_id,
                                attempt,
                                error = %e,
                                "stored object but could not resolve its url"
                            );
                            Err(e)
                        }
                    }
                }
                Err(e) => Err(e),
            };

            match attempt_result {
                Ok(url) => {
                    tracing::info!(%upload_id, attempt, %url, "upload succeeded");
                    return UploadResult::succeeded(url, attempt, summary);
                }
                Err(e) => {
                    let details = classify_store_error(&e);
                    if !details.should_retry {
                        tracing::warn!(
                            %upload_id,
                            attempt,
                            code = %details.code,
                            "terminal failure, not retrying"
                        );
                        return UploadResult::failed(&details, attempt, summary);
                    }
                    if attempt >= max_retries {
                        let wrapped = ErrorDetails::retry_limit_exceeded(attempt, &details);
                        tracing::error!(%upload_id, attempt, "retry budget spent");
                        return UploadResult::failed(&wrapped, attempt, summary);
                    }
                    tracing::warn!(
                        %upload_id,
                        attempt,
                        code = %details.code,
                        "attempt failed, backing off"
                    );
                    hooks.retry(attempt);
                    tokio::time::sleep(options.retry_delay * attempt).await;
                }
            }
        }
    }
}
