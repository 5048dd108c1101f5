use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::source_file::SourceFile;

/// Default byte budget the compression engine aims for (1 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Default ceiling for the dominant image axis, in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
/// Default initial lossy-encoding quality factor
pub const DEFAULT_INITIAL_QUALITY: f32 = 0.8;
/// Default re-encode attempt ceiling
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Quality factor outside (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid quality factor {0}; must be in (0, 1]")]
pub struct InvalidQuality(pub f32);

/// Immutable configuration for one compression run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionPlan {
    pub max_bytes: u64,
    pub max_dimension: u32,
    pub initial_quality: f32,
    pub max_attempts: u32,
}

impl Default for CompressionPlan {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES, DEFAULT_MAX_DIMENSION)
    }
}

impl CompressionPlan {
    pub fn new(max_bytes: u64, max_dimension: u32) -> Self {
        Self {
            max_bytes,
            max_dimension: max_dimension.max(1),
            initial_quality: DEFAULT_INITIAL_QUALITY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_initial_quality(mut self, quality: f32) -> Result<Self, InvalidQuality> {
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(InvalidQuality(quality));
        }
        self.initial_quality = quality;
        Ok(self)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Artifact of one compression run.
///
/// Invariant: `compressed_bytes <= original_bytes`; a run that could not
/// shrink the file reports the original bytes with `ratio_percent == 0`.
#[derive(Debug, Clone)]
pub struct CompressionOutcome {
    pub data: Bytes,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub ratio_percent: f32,
    pub original_dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
}

impl CompressionOutcome {
    /// Outcome for a file that was not re-encoded (already within budget,
    /// or the best re-encode would have grown it).
    ///
    /// `dimensions` may be the `(0, 0)` sentinel when the caller skipped
    /// decoding and could not sniff the dimensions from the header.
    pub fn pass_through(file: &SourceFile, dimensions: (u32, u32)) -> Self {
        Self {
            data: file.data.clone(),
            original_bytes: file.size(),
            compressed_bytes: file.size(),
            ratio_percent: 0.0,
            original_dimensions: dimensions,
            new_dimensions: dimensions,
        }
    }

    /// Outcome for a successful re-encode.
    pub fn compressed(
        file: &SourceFile,
        data: Vec<u8>,
        original_dimensions: (u32, u32),
        new_dimensions: (u32, u32),
    ) -> Self {
        let original_bytes = file.size();
        let compressed_bytes = data.len() as u64;
        let ratio_percent = if original_bytes > 0 {
            ((original_bytes as f64 - compressed_bytes as f64) / original_bytes as f64 * 100.0)
                as f32
        } else {
            0.0
        };
        Self {
            data: Bytes::from(data),
            original_bytes,
            compressed_bytes,
            ratio_percent,
            original_dimensions,
            new_dimensions,
        }
    }

    /// Whether the bytes were actually re-encoded
    pub fn was_compressed(&self) -> bool {
        self.compressed_bytes < self.original_bytes
    }

    pub fn summary(&self) -> CompressionSummary {
        CompressionSummary {
            original_bytes: self.original_bytes,
            compressed_bytes: self.compressed_bytes,
            ratio_percent: self.ratio_percent,
            original_dimensions: self.original_dimensions,
            new_dimensions: self.new_dimensions,
        }
    }
}

/// Serializable summary of a compression run, embedded in upload results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionSummary {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub ratio_percent: f32,
    pub original_dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_defaults() {
        let plan = CompressionPlan::default();
        assert_eq!(plan.max_bytes, DEFAULT_MAX_BYTES);
        assert_eq!(plan.max_dimension, DEFAULT_MAX_DIMENSION);
        assert_eq!(plan.initial_quality, DEFAULT_INITIAL_QUALITY);
        assert_eq!(plan.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn plan_rejects_invalid_quality() {
        assert!(CompressionPlan::default().with_initial_quality(0.0).is_err());
        assert!(CompressionPlan::default().with_initial_quality(1.5).is_err());
        assert!(CompressionPlan::default()
            .with_initial_quality(-0.3)
            .is_err());
        let plan = CompressionPlan::default().with_initial_quality(0.92).unwrap();
        assert_eq!(plan.initial_quality, 0.92);
    }

    #[test]
    fn plan_clamps_attempt_floor() {
        let plan = CompressionPlan::default().with_max_attempts(0);
        assert_eq!(plan.max_attempts, 1);
    }

    #[test]
    fn pass_through_reports_zero_ratio() {
        let file = SourceFile::new("a.png", "image/png", vec![7u8; 100]);
        let outcome = CompressionOutcome::pass_through(&file, (10, 10));
        assert_eq!(outcome.ratio_percent, 0.0);
        assert_eq!(outcome.compressed_bytes, outcome.original_bytes);
        assert_eq!(outcome.original_dimensions, outcome.new_dimensions);
        assert!(!outcome.was_compressed());
    }

    #[test]
    fn compressed_reports_savings() {
        let file = SourceFile::new("a.png", "image/png", vec![7u8; 1000]);
        let outcome = CompressionOutcome::compressed(&file, vec![1u8; 250], (100, 50), (80, 40));
        assert_eq!(outcome.compressed_bytes, 250);
        assert!((outcome.ratio_percent - 75.0).abs() < 0.01);
        assert!(outcome.was_compressed());
    }
}
