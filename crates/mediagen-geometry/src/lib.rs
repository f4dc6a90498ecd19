//! mediagen-geometry: aspect-ratio matching and resolution math.

pub mod aspect;
pub mod resolution;

pub use aspect::{
    format_aspect_ratio, match_closest_aspect_ratio, parse_aspect_ratio, parse_size_ratio,
};
pub use resolution::{
    COMMON_ASPECT_RATIOS, ResolutionSize, calculate_edit_resolution, calculate_resolution,
    calculate_resolution_with_bounds, calculate_resolutions, normalize_base_size,
    validate_base_size,
};
