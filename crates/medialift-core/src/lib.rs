//! Medialift Core Library
//!
//! This crate provides the domain models, error taxonomy, caller hooks,
//! and configuration shared across all medialift components.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ConfigError, PipelineConfig};
pub use error::{CatalogError, CatalogErrorKind, ErrorDetails, LogLevel, UploadErrorKind};
pub use hooks::{Caller, FixedIdentity, IdentityProvider, UploadHooks};
pub use models::{
    CompressionOutcome, CompressionPlan, CompressionSummary, InvalidQuality, SourceFile,
    UploadOptions, UploadResult,
};
