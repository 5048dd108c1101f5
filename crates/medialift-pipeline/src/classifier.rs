//! Error classification
//!
//! Converts raw store, catalog, and validation failures into `ErrorDetails`
//! and logs the raw error at the level the taxonomy assigns to its kind.
//! Classification is the single place where retryability is decided;
//! nothing downstream re-inspects raw errors.

use medialift_core::error::{
    CatalogError, CatalogErrorKind, ErrorDetails, LogLevel, UploadErrorKind,
};
use medialift_storage::StoreError;

use crate::validator::ValidationError;

/// Classify a raw object-store failure.
pub fn classify_store_error(error: &StoreError) -> ErrorDetails {
    let kind = match error {
        StoreError::Unauthorized => UploadErrorKind::Unauthorized,
        StoreError::Unauthenticated => UploadErrorKind::Unauthenticated,
        StoreError::Canceled => UploadErrorKind::UserCanceled,
        StoreError::NotFound(_) => UploadErrorKind::ObjectNotFound,
        StoreError::BucketMisconfigured(_) => UploadErrorKind::StoreMisconfigured,
        StoreError::QuotaExceeded => UploadErrorKind::QuotaExceeded,
        StoreError::ChecksumMismatch(_) => UploadErrorKind::ChecksumMismatch,
        StoreError::RetryLimitExceeded => UploadErrorKind::RetryLimitExceeded,
        StoreError::Unknown(_) => UploadErrorKind::UnknownStoreError,
        StoreError::Io(_) => UploadErrorKind::NetworkError,
        StoreError::Opaque(message) => classify_message(message),
    };
    log_raw(kind.log_level(), kind.code(), &error.to_string());
    ErrorDetails::upload(kind, error.to_string())
}

/// Fallback classification for errors that only carry a message.
fn classify_message(message: &str) -> UploadErrorKind {
    let lower = message.to_lowercase();
    if ["network", "cors", "fetch", "connection"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        UploadErrorKind::NetworkError
    } else if ["too large", "payload", "exceeds"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        UploadErrorKind::FileTooLarge
    } else {
        UploadErrorKind::UnknownError
    }
}

/// Classify a raw catalog-store failure.
pub fn classify_catalog_error(error: &CatalogError) -> ErrorDetails {
    let kind = match error {
        CatalogError::PermissionDenied(_) => CatalogErrorKind::PermissionDenied,
        CatalogError::DocumentNotFound(_) => CatalogErrorKind::DocumentNotFound,
        CatalogError::AlreadyExists(_) => CatalogErrorKind::DocumentAlreadyExists,
    };
    log_raw(kind.log_level(), kind.code(), &error.to_string());
    ErrorDetails::catalog(kind, error.to_string())
}

/// Classify a pre-flight validation failure.
pub fn classify_validation(error: &ValidationError) -> ErrorDetails {
    let kind = match error {
        ValidationError::NotAnImage { .. } => UploadErrorKind::NotAnImage,
        ValidationError::EmptyFile => UploadErrorKind::EmptyFile,
        ValidationError::FileTooLarge { .. } => UploadErrorKind::FileTooLarge,
        ValidationError::NameTooLong { .. } => UploadErrorKind::NameTooLong,
    };
    log_raw(kind.log_level(), kind.code(), &error.to_string());
    ErrorDetails::upload(kind, error.to_string())
}

fn log_raw(level: LogLevel, code: &str, raw: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(code, raw, "classified failure"),
        LogLevel::Warn => tracing::warn!(code, raw, "classified failure"),
        LogLevel::Error => tracing::error!(code, raw, "classified failure"),
    }
}
