//! Compression engine
//!
//! Re-encodes oversized images as JPEG, walking quality down and then
//! dimensions until the output fits the byte budget or the attempt ceiling
//! is hit. The engine is best-effort: when the ceiling is reached it keeps
//! the smallest candidate it produced, and it never returns bytes larger
//! than the input.

use std::io::Cursor;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};

use medialift_core::hooks::UploadHooks;
use medialift_core::models::compression::{CompressionOutcome, CompressionPlan};
use medialift_core::models::source_file::SourceFile;

use crate::dimensions::fit_within;

/// Multiplier applied to the quality factor after each failed attempt
const QUALITY_DECAY: f32 = 0.8;
/// Below this quality, reset quality and shrink dimensions instead
const QUALITY_FLOOR: f32 = 0.5;
/// Multiplier applied to both axes when quality alone is not enough
const DIMENSION_SHRINK: f64 = 0.9;

/// Compress `file` to fit `plan.max_bytes`.
///
/// Files already within budget are passed through without decoding.
/// Returns an error only when the input cannot be decoded as an image;
/// a run that exhausts its attempts still returns an outcome.
pub fn compress_to_budget(
    file: &SourceFile,
    plan: &CompressionPlan,
    hooks: &UploadHooks,
) -> anyhow::Result<CompressionOutcome> {
    if file.size() <= plan.max_bytes {
        let dimensions = probe_dimensions(file);
        tracing::debug!(
            name = %file.name,
            size_bytes = file.size(),
            max_bytes = plan.max_bytes,
            "file already within budget, skipping compression"
        );
        return Ok(CompressionOutcome::pass_through(file, dimensions));
    }

    hooks.compression_status("Compressing image...");

    let image = ImageReader::new(Cursor::new(file.data.as_ref()))
        .with_guessed_format()
        .with_context(|| format!("cannot sniff image format of {}", file.name))?
        .decode()
        .with_context(|| format!("cannot decode {} as an image", file.name))?;

    let original_dimensions = (image.width(), image.height());
    let mut target = fit_within(original_dimensions.0, original_dimensions.1, plan.max_dimension);
    let mut quality = plan.initial_quality;
    let mut best: Option<(Vec<u8>, (u32, u32))> = None;

    for attempt in 1..=plan.max_attempts {
        let candidate = encode_jpeg(&image, original_dimensions, target, quality)
            .with_context(|| format!("cannot re-encode {}", file.name))?;

        tracing::debug!(
            name = %file.name,
            attempt,
            quality,
            width = target.0,
            height = target.1,
            candidate_bytes = candidate.len(),
            max_bytes = plan.max_bytes,
            "compression attempt"
        );

        let is_best = best
            .as_ref()
            .is_none_or(|(bytes, _)| candidate.len() < bytes.len());
        if is_best {
            best = Some((candidate.clone(), target));
        }

        if candidate.len() as u64 <= plan.max_bytes {
            hooks.compression_status("Compression complete");
            return Ok(CompressionOutcome::compressed(
                file,
                candidate,
                original_dimensions,
                target,
            ));
        }

        quality *= QUALITY_DECAY;
        if quality < QUALITY_FLOOR {
            quality = plan.initial_quality;
            target = (
                ((target.0 as f64 * DIMENSION_SHRINK) as u32).max(1),
                ((target.1 as f64 * DIMENSION_SHRINK) as u32).max(1),
            );
            hooks.compression_status("Reducing image dimensions...");
        }
    }

    // Ceiling reached: keep the smallest candidate, unless even that is no
    // smaller than the input.
    let (bytes, dimensions) = best.context("compression produced no candidates")?;
    if bytes.len() as u64 >= file.size() {
        tracing::warn!(
            name = %file.name,
            size_bytes = file.size(),
            "best re-encode did not shrink the file, keeping original"
        );
        hooks.compression_status("Keeping original file");
        return Ok(CompressionOutcome::pass_through(file, original_dimensions));
    }

    tracing::warn!(
        name = %file.name,
        best_bytes = bytes.len(),
        max_bytes = plan.max_bytes,
        "attempt ceiling reached, keeping best effort above budget"
    );
    hooks.compression_status("Compression complete");
    Ok(CompressionOutcome::compressed(
        file,
        bytes,
        original_dimensions,
        dimensions,
    ))
}

/// Header-only dimension sniff for the fast path. Files whose format cannot
/// be sniffed report the `(0, 0)` sentinel rather than failing, since the
/// fast path never decodes.
fn probe_dimensions(file: &SourceFile) -> (u32, u32) {
    ImageReader::new(Cursor::new(file.data.as_ref()))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .unwrap_or((0, 0))
}

fn encode_jpeg(
    image: &DynamicImage,
    original: (u32, u32),
    target: (u32, u32),
    quality: f32,
) -> anyhow::Result<Vec<u8>> {
    let resized;
    let frame = if target == original {
        image
    } else {
        resized = image.resize_exact(target.0, target.1, FilterType::Lanczos3);
        &resized
    };

    let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut Cursor::new(&mut buffer), quality)
        .encode_image(&frame.to_rgb8())?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn gradient_bmp(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Bmp)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn small_file_passes_through_untouched() {
        let file = SourceFile::new("tiny.jpg", "image/jpeg", vec![0u8; 512]);
        let plan = CompressionPlan::new(1024, 1920);
        let outcome = compress_to_budget(&file, &plan, &UploadHooks::new()).unwrap();
        assert!(!outcome.was_compressed());
        assert_eq!(outcome.data, file.data);
        assert_eq!(outcome.ratio_percent, 0.0);
    }

    #[test]
    fn unsniffable_fast_path_reports_sentinel_dimensions() {
        let file = SourceFile::new("blob.jpg", "image/jpeg", vec![0x00u8; 64]);
        let plan = CompressionPlan::new(1024, 1920);
        let outcome = compress_to_budget(&file, &plan, &UploadHooks::new()).unwrap();
        assert!(!outcome.was_compressed());
        assert_eq!(outcome.original_dimensions, (0, 0));
        assert_eq!(outcome.new_dimensions, (0, 0));
    }

    #[test]
    fn oversized_image_is_reencoded_within_budget() {
        let bmp = gradient_bmp(512, 512);
        assert!(bmp.len() > 64 * 1024);
        let file = SourceFile::new("big.bmp", "image/bmp", bmp);
        let plan = CompressionPlan::new(64 * 1024, 1920);

        let outcome = compress_to_budget(&file, &plan, &UploadHooks::new()).unwrap();
        assert!(outcome.was_compressed());
        assert!(outcome.compressed_bytes <= 64 * 1024);
        assert_eq!(outcome.original_dimensions, (512, 512));
        assert_eq!(outcome.new_dimensions, (512, 512));
        assert!(outcome.ratio_percent > 0.0);
    }

    #[test]
    fn dimension_ceiling_downscales() {
        let bmp = gradient_bmp(512, 256);
        let file = SourceFile::new("wide.bmp", "image/bmp", bmp);
        let plan = CompressionPlan::new(64 * 1024, 100);

        let outcome = compress_to_budget(&file, &plan, &UploadHooks::new()).unwrap();
        assert_eq!(outcome.new_dimensions, (100, 50));
    }

    #[test]
    fn impossible_budget_keeps_best_effort_smaller_than_input() {
        let bmp = gradient_bmp(256, 256);
        let file = SourceFile::new("stubborn.bmp", "image/bmp", bmp);
        let plan = CompressionPlan::new(1, 1920).with_max_attempts(3);

        let outcome = compress_to_budget(&file, &plan, &UploadHooks::new()).unwrap();
        assert!(outcome.compressed_bytes <= outcome.original_bytes);
    }

    #[test]
    fn undecodable_input_is_an_error() {
        let file = SourceFile::new("junk.jpg", "image/jpeg", vec![0xAAu8; 4096]);
        let plan = CompressionPlan::new(1024, 1920);
        assert!(compress_to_budget(&file, &plan, &UploadHooks::new()).is_err());
    }

    #[test]
    fn status_hook_fires_during_compression() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let hooks = UploadHooks::new().with_compression_status(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let file = SourceFile::new("big.bmp", "image/bmp", gradient_bmp(512, 512));
        let plan = CompressionPlan::new(64 * 1024, 1920);
        compress_to_budget(&file, &plan, &hooks).unwrap();
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }
}
