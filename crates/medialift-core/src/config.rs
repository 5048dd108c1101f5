//! Configuration module
//!
//! Environment-driven defaults for the pipeline. `PipelineConfig` is read
//! once at startup and converted into the immutable per-call option structs;
//! there is no mutable global that callers merge against.

use std::env;
use std::time::Duration;

use crate::models::compression::CompressionPlan;
use crate::models::upload::UploadOptions;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Pipeline defaults, overridable via `MEDIALIFT_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub max_file_bytes: u64,
    pub compress: bool,
    pub compression_max_bytes: u64,
    pub max_dimension: u32,
    pub initial_quality: f32,
    pub compression_max_attempts: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let options = UploadOptions::default();
        let plan = CompressionPlan::default();
        Self {
            max_retries: options.max_retries,
            retry_delay_ms: options.retry_delay.as_millis() as u64,
            max_file_bytes: options.max_file_bytes,
            compress: options.compress,
            compression_max_bytes: plan.max_bytes,
            max_dimension: plan.max_dimension,
            initial_quality: plan.initial_quality,
            compression_max_attempts: plan.max_attempts,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the process environment (with `.env` support).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_retries: parse_var(&lookup, "MEDIALIFT_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: parse_var(
                &lookup,
                "MEDIALIFT_RETRY_DELAY_MS",
                defaults.retry_delay_ms,
            )?,
            max_file_bytes: parse_var(
                &lookup,
                "MEDIALIFT_MAX_FILE_BYTES",
                defaults.max_file_bytes,
            )?,
            compress: parse_var(&lookup, "MEDIALIFT_COMPRESS", defaults.compress)?,
            compression_max_bytes: parse_var(
                &lookup,
                "MEDIALIFT_COMPRESSION_MAX_BYTES",
                defaults.compression_max_bytes,
            )?,
            max_dimension: parse_var(&lookup, "MEDIALIFT_MAX_DIMENSION", defaults.max_dimension)?,
            initial_quality: parse_var(
                &lookup,
                "MEDIALIFT_INITIAL_QUALITY",
                defaults.initial_quality,
            )?,
            compression_max_attempts: parse_var(
                &lookup,
                "MEDIALIFT_COMPRESSION_MAX_ATTEMPTS",
                defaults.compression_max_attempts,
            )?,
        })
    }

    /// Build the immutable per-call options this configuration describes.
    pub fn upload_options(&self) -> UploadOptions {
        let plan = CompressionPlan::new(self.compression_max_bytes, self.max_dimension)
            .with_initial_quality(self.initial_quality)
            .unwrap_or_else(|_| CompressionPlan::new(self.compression_max_bytes, self.max_dimension))
            .with_max_attempts(self.compression_max_attempts);
        UploadOptions::new()
            .with_max_retries(self.max_retries)
            .with_retry_delay(Duration::from_millis(self.retry_delay_ms))
            .with_max_file_bytes(self.max_file_bytes)
            .with_compression(self.compress)
            .with_plan(plan)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
