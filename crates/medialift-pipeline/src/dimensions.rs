//! Dimension planning for downscaled re-encodes.

/// Scale `(width, height)` so the dominant axis fits `max_dimension`,
/// preserving aspect ratio.
///
/// Dimensions already within the ceiling come back unchanged. The scaled
/// minor axis is rounded to the nearest pixel and floored at 1 so extreme
/// aspect ratios never collapse to zero. On square inputs the width is
/// treated as the dominant axis.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    if width >= height {
        let ratio = max_dimension as f64 / width as f64;
        let scaled = ((height as f64 * ratio).round() as u32).max(1);
        (max_dimension, scaled)
    } else {
        let ratio = max_dimension as f64 / height as f64;
        let scaled = ((width as f64 * ratio).round() as u32).max(1);
        (scaled, max_dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_ceiling_is_unchanged() {
        assert_eq!(fit_within(800, 600, 1920), (800, 600));
        assert_eq!(fit_within(1920, 1080, 1920), (1920, 1080));
    }

    #[test]
    fn landscape_scales_on_width() {
        assert_eq!(fit_within(4000, 3000, 1920), (1920, 1440));
    }

    #[test]
    fn portrait_scales_on_height() {
        assert_eq!(fit_within(3000, 4000, 1920), (1440, 1920));
    }

    #[test]
    fn square_scales_both_axes() {
        assert_eq!(fit_within(4096, 4096, 1024), (1024, 1024));
    }

    #[test]
    fn extreme_aspect_ratio_keeps_minor_axis_at_least_one() {
        let (w, h) = fit_within(100_000, 10, 1000);
        assert_eq!(w, 1000);
        assert!(h >= 1);
    }

    #[test]
    fn rounds_rather_than_truncates() {
        // 1000 * (500 / 1500) = 333.33 rounds to 333; 999 * (500/1500) = 333
        assert_eq!(fit_within(1500, 1000, 500), (500, 333));
        // 1001 * (500 / 1500) = 333.67 rounds to 334
        assert_eq!(fit_within(1500, 1001, 500), (500, 334));
    }
}
