//! Resolution calculators built around a base size.
//!
//! The base size is the edge length of the square (1:1) case; other ratios
//! are sized so the total pixel count never exceeds base² .

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSize {
    pub width: u32,
    pub height: u32,
}

/// Ratios commonly offered by the resolution selector.
pub const COMMON_ASPECT_RATIOS: &[&str] = &[
    "21:9", "16:9", "3:2", "4:3", "1:1", "3:4", "2:3", "9:16", "9:21",
];

/// Compute the resolution for a ratio at the given base size.
///
/// Square ratios return `(base, base)` exactly, bypassing the rounding
/// step. Non-square results are floored to multiples of 8 for encoder
/// friendliness.
///
/// `calculate_resolution(1440, 16, 9)` is `1920x1080`.
pub fn calculate_resolution(base_size: u32, width_ratio: u32, height_ratio: u32) -> ResolutionSize {
    if width_ratio == height_ratio {
        return ResolutionSize {
            width: base_size,
            height: base_size,
        };
    }

    let max_pixels = f64::from(base_size) * f64::from(base_size);
    let ratio = f64::from(width_ratio) / f64::from(height_ratio);

    let height = (max_pixels / ratio).sqrt();
    let width = height * ratio;

    ResolutionSize {
        width: floor_to_multiple(width, 8),
        height: floor_to_multiple(height, 8),
    }
}

/// Compute resolutions for a batch of `"w:h"` ratio strings.
///
/// Invalid entries are logged and skipped.
pub fn calculate_resolutions(
    base_size: u32,
    aspect_ratios: &[&str],
) -> BTreeMap<String, ResolutionSize> {
    let mut result = BTreeMap::new();

    for ratio in aspect_ratios {
        let Some((w, h)) = split_ratio(ratio) else {
            tracing::warn!("Invalid aspect ratio: {ratio}");
            continue;
        };
        result.insert((*ratio).to_string(), calculate_resolution(base_size, w, h));
    }

    result
}

/// Compute a bounded resolution: the base-size result rescaled so the
/// larger edge fits under `max_size` and the smaller edge reaches
/// `min_size`, then clamped into `[min_size, max_size]`.
///
/// The order matters: scale-down runs before the scale-up check, the clamp
/// runs last, and every rescaled value is floored to a multiple of 16.
pub fn calculate_resolution_with_bounds(
    base_size: u32,
    width_ratio: u32,
    height_ratio: u32,
    min_size: u32,
    max_size: u32,
) -> ResolutionSize {
    let ResolutionSize {
        mut width,
        mut height,
    } = calculate_resolution(base_size, width_ratio, height_ratio);

    let max_dimension = width.max(height);
    let min_dimension = width.min(height);

    if max_dimension > max_size {
        let scale = f64::from(max_size) / f64::from(max_dimension);
        width = floor_to_multiple(f64::from(width) * scale, 16);
        height = floor_to_multiple(f64::from(height) * scale, 16);
    }

    if min_dimension < min_size {
        let scale = f64::from(min_size) / f64::from(min_dimension);
        width = floor_to_multiple(f64::from(width) * scale, 16);
        height = floor_to_multiple(f64::from(height) * scale, 16);
    }

    width = width.clamp(min_size, max_size);
    height = height.clamp(min_size, max_size);

    ResolutionSize {
        width: floor_to_multiple(f64::from(width), 16),
        height: floor_to_multiple(f64::from(height), 16),
    }
}

/// Compute the largest resolution for an edit-model ratio without a base
/// size: the long edge starts at 2048 and the short edge is derived,
/// keeping both within `[64, 2048]` and floored to multiples of 8.
pub fn calculate_edit_resolution(width_ratio: u32, height_ratio: u32) -> ResolutionSize {
    const MIN_SIZE: u32 = 64;
    const MAX_SIZE: u32 = 2048;
    const STEP: u32 = 8;

    if width_ratio == height_ratio {
        return ResolutionSize {
            width: MAX_SIZE,
            height: MAX_SIZE,
        };
    }

    let ratio = f64::from(width_ratio) / f64::from(height_ratio);

    let (mut width, mut height) = if ratio > 1.0 {
        let width = f64::from(MAX_SIZE);
        let height = width / ratio;
        if height < f64::from(MIN_SIZE) {
            let height = f64::from(MIN_SIZE);
            (height * ratio, height)
        } else {
            (width, height)
        }
    } else {
        let height = f64::from(MAX_SIZE);
        let width = height * ratio;
        if width < f64::from(MIN_SIZE) {
            let width = f64::from(MIN_SIZE);
            (width, width / ratio)
        } else {
            (width, height)
        }
    };

    width = f64::from(floor_to_multiple(width, STEP));
    height = f64::from(floor_to_multiple(height, STEP));

    ResolutionSize {
        width: (width as u32).clamp(MIN_SIZE, MAX_SIZE),
        height: (height as u32).clamp(MIN_SIZE, MAX_SIZE),
    }
}

/// Check a base size against range and step constraints.
pub fn validate_base_size(base_size: u32, min: u32, max: u32, step: u32) -> bool {
    base_size >= min && base_size <= max && base_size % step == 0
}

/// Clamp a base size into range and snap it to the nearest step multiple.
pub fn normalize_base_size(base_size: u32, min: u32, max: u32, step: u32) -> u32 {
    let clamped = base_size.clamp(min, max);
    let snapped = (f64::from(clamped) / f64::from(step)).round() as u32 * step;
    snapped.clamp(min, max)
}

fn floor_to_multiple(value: f64, multiple: u32) -> u32 {
    ((value / f64::from(multiple)).floor() as u32) * multiple
}

fn split_ratio(ratio: &str) -> Option<(u32, u32)> {
    let (w, h) = ratio.split_once(':')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_nine_at_1440() {
        let size = calculate_resolution(1440, 16, 9);
        assert_eq!(
            size,
            ResolutionSize {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_square_bypasses_rounding() {
        // 1020 is not a multiple of 8; the square case must keep it as-is.
        let size = calculate_resolution(1020, 1, 1);
        assert_eq!(
            size,
            ResolutionSize {
                width: 1020,
                height: 1020
            }
        );
        assert_eq!(
            calculate_resolution(1024, 1, 1),
            ResolutionSize {
                width: 1024,
                height: 1024
            }
        );
    }

    #[test]
    fn test_non_square_floors_to_multiples_of_eight() {
        let size = calculate_resolution(1440, 4, 3);
        assert_eq!(size.width % 8, 0);
        assert_eq!(size.height % 8, 0);
        // Pixel budget is never exceeded.
        assert!(size.width as u64 * size.height as u64 <= 1440 * 1440);
    }

    #[test]
    fn test_batch_skips_invalid_ratios() {
        let result = calculate_resolutions(1024, &["16:9", "bogus", "0:1"]);
        assert_eq!(result.len(), 1);
        assert!(result.contains_key("16:9"));
    }

    #[test]
    fn test_bounds_floors_to_sixteen() {
        let size = calculate_resolution_with_bounds(1440, 16, 9, 64, 2048);
        assert_eq!(
            size,
            ResolutionSize {
                width: 1920,
                height: 1072
            }
        );
    }

    #[test]
    fn test_bounds_scales_down_oversized() {
        let size = calculate_resolution_with_bounds(4096, 16, 9, 64, 2048);
        assert!(size.width <= 2048 && size.height <= 2048);
        assert_eq!(size.width % 16, 0);
        assert_eq!(size.height % 16, 0);
    }

    #[test]
    fn test_bounds_scales_up_undersized() {
        let size = calculate_resolution_with_bounds(128, 21, 9, 128, 2048);
        assert!(size.height >= 128);
    }

    #[test]
    fn test_edit_resolution_maximizes_long_edge() {
        assert_eq!(
            calculate_edit_resolution(1, 1),
            ResolutionSize {
                width: 2048,
                height: 2048
            }
        );
        let size = calculate_edit_resolution(16, 9);
        assert_eq!(size.width, 2048);
        assert_eq!(size.height, 1152);
    }

    #[test]
    fn test_base_size_validation() {
        assert!(validate_base_size(1440, 512, 2048, 8));
        assert!(!validate_base_size(1443, 512, 2048, 8));
        assert!(!validate_base_size(256, 512, 2048, 8));
        assert_eq!(normalize_base_size(1450, 512, 2048, 8), 1448);
        assert_eq!(normalize_base_size(500, 512, 2048, 8), 512);
    }
}
