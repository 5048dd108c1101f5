use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compression::{CompressionPlan, CompressionSummary};
use crate::error::ErrorDetails;
use crate::hooks::UploadHooks;

/// Default number of transfer attempts per file
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base backoff delay; attempt n waits `delay * n`
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Default post-compression byte ceiling (5 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Immutable per-call upload configuration.
///
/// Built once via the chained `with_*` methods; there is no module-level
/// mutable default to merge against.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub max_file_bytes: u64,
    pub compress: bool,
    pub plan: CompressionPlan,
    pub hooks: UploadHooks,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            compress: true,
            plan: CompressionPlan::default(),
            hooks: UploadHooks::default(),
        }
    }
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_plan(mut self, plan: CompressionPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_hooks(mut self, hooks: UploadHooks) -> Self {
        self.hooks = hooks;
        self
    }
}

/// Terminal outcome of one file's journey through the pipeline.
///
/// `success == true` always carries a non-empty `url`; `success == false`
/// never does. `attempts` counts real transfer attempts: pre-flight
/// rejections (identity, validation, connectivity) report 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub success: bool,
    pub url: Option<String>,
    pub user_message: Option<String>,
    pub technical_message: Option<String>,
    pub error_code: Option<String>,
    pub suggested_action: Option<String>,
    pub attempts: u32,
    pub compression: Option<CompressionSummary>,
    pub completed_at: DateTime<Utc>,
}

impl UploadResult {
    pub fn succeeded(url: String, attempts: u32, compression: Option<CompressionSummary>) -> Self {
        Self {
            success: true,
            url: Some(url),
            user_message: None,
            technical_message: None,
            error_code: None,
            suggested_action: None,
            attempts,
            compression,
            completed_at: Utc::now(),
        }
    }

    pub fn failed(
        details: &ErrorDetails,
        attempts: u32,
        compression: Option<CompressionSummary>,
    ) -> Self {
        Self {
            success: false,
            url: None,
            user_message: Some(details.user_message.clone()),
            technical_message: Some(details.technical_message.clone()),
            error_code: Some(details.code.clone()),
            suggested_action: details.suggested_action.clone(),
            attempts,
            compression,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadErrorKind;

    #[test]
    fn options_defaults() {
        let options = UploadOptions::new();
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.retry_delay, Duration::from_secs(1));
        assert_eq!(options.max_file_bytes, 5 * 1024 * 1024);
        assert!(options.compress);
    }

    #[test]
    fn options_builder_overrides() {
        let options = UploadOptions::new()
            .with_max_retries(5)
            .with_retry_delay(Duration::from_millis(250))
            .with_max_file_bytes(1024)
            .with_compression(false);
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_delay, Duration::from_millis(250));
        assert_eq!(options.max_file_bytes, 1024);
        assert!(!options.compress);
    }

    #[test]
    fn options_retries_floor_at_one() {
        assert_eq!(UploadOptions::new().with_max_retries(0).max_retries, 1);
    }

    #[test]
    fn success_carries_url_failure_does_not() {
        let ok = UploadResult::succeeded("https://cdn.example/a.jpg".into(), 1, None);
        assert!(ok.success);
        assert!(ok.url.as_deref().is_some_and(|u| !u.is_empty()));
        assert!(ok.error_code.is_none());

        let details = ErrorDetails::upload(UploadErrorKind::NetworkError, "reset");
        let failed = UploadResult::failed(&details, 2, None);
        assert!(!failed.success);
        assert!(failed.url.is_none());
        assert_eq!(failed.error_code.as_deref(), Some("NETWORK_ERROR"));
        assert_eq!(failed.attempts, 2);
    }

    #[test]
    fn result_serializes() {
        let ok = UploadResult::succeeded("https://cdn.example/a.jpg".into(), 1, None);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("cdn.example"));
    }
}
