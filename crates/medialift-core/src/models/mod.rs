//! Domain models shared across the pipeline.

pub mod compression;
pub mod source_file;
pub mod upload;

pub use compression::{CompressionOutcome, CompressionPlan, CompressionSummary, InvalidQuality};
pub use source_file::SourceFile;
pub use upload::{UploadOptions, UploadResult};
