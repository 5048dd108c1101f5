//! Error taxonomy module
//!
//! Every failure the upload pipeline can surface is classified into one of
//! the kinds below. Object-store failures and catalog-store (metadata CRUD)
//! failures are kept as separate taxonomies because they come from different
//! external collaborators and carry different retry semantics.
//!
//! Each kind carries static metadata: a machine-readable code, whether a
//! retry is worthwhile, a suggested user action, and the level at which the
//! raw error should be logged.

use serde::{Deserialize, Serialize};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like validation failures
    Debug,
    /// Warning level - for recoverable issues like transient store errors
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Classified failure kinds for the upload pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadErrorKind {
    Unauthorized,
    UserCanceled,
    ObjectNotFound,
    StoreMisconfigured,
    QuotaExceeded,
    Unauthenticated,
    RetryLimitExceeded,
    ChecksumMismatch,
    UnknownStoreError,
    NetworkError,
    FileTooLarge,
    NotAnImage,
    NameTooLong,
    EmptyFile,
    UnknownError,
}

/// Static metadata per kind: (code, retryable, suggested_action, log_level).
/// User messages stay per-variant in `user_message` for readability.
fn upload_kind_metadata(
    kind: UploadErrorKind,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    use UploadErrorKind::*;
    match kind {
        Unauthorized => (
            "UNAUTHORIZED",
            false,
            Some("Contact an administrator to request upload access"),
            LogLevel::Debug,
        ),
        UserCanceled => ("USER_CANCELED", false, None, LogLevel::Debug),
        ObjectNotFound => (
            "OBJECT_NOT_FOUND",
            false,
            Some("Verify the destination path and try again"),
            LogLevel::Warn,
        ),
        StoreMisconfigured => (
            "STORE_MISCONFIGURED",
            false,
            Some("Contact support; the storage bucket needs attention"),
            LogLevel::Warn,
        ),
        QuotaExceeded => (
            "QUOTA_EXCEEDED",
            false,
            Some("Free up storage space or upgrade the plan"),
            LogLevel::Warn,
        ),
        Unauthenticated => (
            "UNAUTHENTICATED",
            false,
            Some("Sign in and retry the upload"),
            LogLevel::Debug,
        ),
        RetryLimitExceeded => (
            "RETRY_LIMIT_EXCEEDED",
            false,
            Some("Check your connection and try again later"),
            LogLevel::Error,
        ),
        ChecksumMismatch => (
            "CHECKSUM_MISMATCH",
            true,
            Some("Retry the upload"),
            LogLevel::Warn,
        ),
        UnknownStoreError => (
            "UNKNOWN_STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        NetworkError => (
            "NETWORK_ERROR",
            true,
            Some("Check your internet connection and retry"),
            LogLevel::Warn,
        ),
        FileTooLarge => (
            "FILE_TOO_LARGE",
            false,
            Some("Reduce the file size and try again"),
            LogLevel::Debug,
        ),
        NotAnImage => (
            "NOT_AN_IMAGE",
            false,
            Some("Choose an image file (JPEG, PNG, WebP, GIF)"),
            LogLevel::Debug,
        ),
        NameTooLong => (
            "NAME_TOO_LONG",
            false,
            Some("Rename the file to 100 characters or fewer"),
            LogLevel::Debug,
        ),
        EmptyFile => (
            "EMPTY_FILE",
            false,
            Some("Choose a non-empty file"),
            LogLevel::Debug,
        ),
        UnknownError => (
            "UNKNOWN_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl UploadErrorKind {
    /// Machine-readable error code (e.g. "QUOTA_EXCEEDED")
    pub fn code(self) -> &'static str {
        upload_kind_metadata(self).0
    }

    /// Whether a retry is worth attempting for this kind
    pub fn is_retryable(self) -> bool {
        upload_kind_metadata(self).1
    }

    /// Suggested action for the user, when one exists
    pub fn suggested_action(self) -> Option<&'static str> {
        upload_kind_metadata(self).2
    }

    /// Level at which the raw error should be logged
    pub fn log_level(self) -> LogLevel {
        upload_kind_metadata(self).3
    }

    /// Human-readable message safe to show to the user
    pub fn user_message(self) -> &'static str {
        use UploadErrorKind::*;
        match self {
            Unauthorized => "You don't have permission to upload this file.",
            UserCanceled => "The upload was canceled.",
            ObjectNotFound => "The upload destination could not be found.",
            StoreMisconfigured => "The storage service is misconfigured.",
            QuotaExceeded => "Storage quota exceeded.",
            Unauthenticated => "You need to sign in before uploading.",
            RetryLimitExceeded => "The upload failed after several attempts.",
            ChecksumMismatch => "The uploaded data did not match; please try again.",
            UnknownStoreError => "An unexpected storage error occurred.",
            NetworkError => "A network problem interrupted the upload.",
            FileTooLarge => "The file is too large to upload.",
            NotAnImage => "Only image files can be uploaded.",
            NameTooLong => "The file name is too long.",
            EmptyFile => "The file is empty.",
            UnknownError => "Something went wrong during the upload.",
        }
    }
}

/// Raw failures from the catalog (metadata/document) store.
///
/// These come from a different collaborator than the object store and must
/// not be conflated with it; all of them are terminal for the operation
/// that raised them.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("document already exists: {0}")]
    AlreadyExists(String),
}

/// Classified failure kinds for the catalog store. All non-retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogErrorKind {
    PermissionDenied,
    DocumentNotFound,
    DocumentAlreadyExists,
}

impl CatalogErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            CatalogErrorKind::PermissionDenied => "PERMISSION_DENIED",
            CatalogErrorKind::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            CatalogErrorKind::DocumentAlreadyExists => "DOCUMENT_ALREADY_EXISTS",
        }
    }

    pub fn is_retryable(self) -> bool {
        false
    }

    pub fn suggested_action(self) -> Option<&'static str> {
        match self {
            CatalogErrorKind::PermissionDenied => {
                Some("Contact an administrator to request access")
            }
            CatalogErrorKind::DocumentNotFound => Some("Verify the record exists and try again"),
            CatalogErrorKind::DocumentAlreadyExists => {
                Some("Use a different name or update the existing record")
            }
        }
    }

    pub fn log_level(self) -> LogLevel {
        LogLevel::Debug
    }

    pub fn user_message(self) -> &'static str {
        match self {
            CatalogErrorKind::PermissionDenied => {
                "You don't have permission to modify this record."
            }
            CatalogErrorKind::DocumentNotFound => "The requested record could not be found.",
            CatalogErrorKind::DocumentAlreadyExists => "A record with this name already exists.",
        }
    }
}

/// A classified error: what to tell the user, what to log, and whether a
/// retry is worthwhile. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub user_message: String,
    pub technical_message: String,
    pub code: String,
    pub should_retry: bool,
    pub suggested_action: Option<String>,
}

impl ErrorDetails {
    /// Build details for an upload-pipeline failure kind.
    pub fn upload(kind: UploadErrorKind, technical: impl Into<String>) -> Self {
        Self {
            user_message: kind.user_message().to_string(),
            technical_message: technical.into(),
            code: kind.code().to_string(),
            should_retry: kind.is_retryable(),
            suggested_action: kind.suggested_action().map(str::to_string),
        }
    }

    /// Build details for a catalog-store failure kind.
    pub fn catalog(kind: CatalogErrorKind, technical: impl Into<String>) -> Self {
        Self {
            user_message: kind.user_message().to_string(),
            technical_message: technical.into(),
            code: kind.code().to_string(),
            should_retry: kind.is_retryable(),
            suggested_action: kind.suggested_action().map(str::to_string),
        }
    }

    /// Wrap the last classified error once the retry budget is spent.
    pub fn retry_limit_exceeded(attempts: u32, last: &ErrorDetails) -> Self {
        Self::upload(
            UploadErrorKind::RetryLimitExceeded,
            format!(
                "retry limit reached after {} attempts; last error: {}",
                attempts, last.technical_message
            ),
        )
    }
}
