//! Aspect-ratio parsing, formatting, and closest-match selection.

/// Extract a numeric ratio (width / height) from a `"16:9"`-style string.
///
/// Returns `None` for the `auto`/`smart` sentinels (meaning "infer from
/// uploaded media") and for malformed input.
pub fn parse_aspect_ratio(aspect_ratio: &str) -> Option<f64> {
    if aspect_ratio == "auto" || aspect_ratio == "smart" {
        return None;
    }

    let (w, h) = aspect_ratio.split_once(':')?;
    let w: f64 = w.parse().ok()?;
    let h: f64 = h.parse().ok()?;
    if !w.is_finite() || !h.is_finite() || h == 0.0 {
        return None;
    }

    Some(w / h)
}

/// Extract a numeric ratio from a `"1920*1080"`-style size string.
pub fn parse_size_ratio(size: &str) -> Option<f64> {
    if size == "auto" || size == "smart" {
        return None;
    }

    let (w, h) = size.split_once('*')?;
    let w: f64 = w.parse().ok()?;
    let h: f64 = h.parse().ok()?;
    if !w.is_finite() || !h.is_finite() || h == 0.0 {
        return None;
    }

    Some(w / h)
}

/// Pick the option whose extracted ratio is closest to `target`.
///
/// Options whose extractor returns `None` (the `auto`/`smart` sentinels)
/// are skipped. Ties keep the first-seen option: the comparison is strict
/// `<`, so a later equal candidate never replaces an earlier one. Falls
/// back to the first option when nothing is extractable.
pub fn match_closest_aspect_ratio<'a, T, F>(
    target: f64,
    options: &'a [T],
    extract: F,
) -> Option<&'a T>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut closest = options.first()?;
    let mut min_diff = f64::INFINITY;

    for option in options {
        let Some(ratio) = extract(option) else {
            continue;
        };
        let diff = (target - ratio).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = option;
        }
    }

    Some(closest)
}

/// Common ratios keyed by their value rounded to three decimals.
const COMMON_RATIO_LABELS: &[(&str, &str)] = &[
    ("2.333", "21:9"),
    ("2.370", "21:9"),
    ("1.778", "16:9"),
    ("1.777", "16:9"),
    ("1.500", "3:2"),
    ("1.333", "4:3"),
    ("1.250", "5:4"),
    ("1.000", "1:1"),
    ("0.800", "4:5"),
    ("0.750", "3:4"),
    ("0.667", "2:3"),
    ("0.563", "9:16"),
    ("0.562", "9:16"),
    ("0.429", "9:21"),
    ("0.422", "9:21"),
];

/// Render a numeric ratio as a `"w:h"` label.
///
/// Ratios matching the common table are mapped to their canonical label;
/// anything else is approximated as hundredths and reduced by GCD.
pub fn format_aspect_ratio(ratio: f64) -> String {
    let key = format!("{ratio:.3}");
    if let Some((_, label)) = COMMON_RATIO_LABELS.iter().find(|(k, _)| *k == key) {
        return (*label).to_string();
    }

    let w = (ratio * 100.0).round() as u64;
    let h = 100u64;
    let divisor = gcd(w, h);
    format!("{}:{}", w / divisor, h / divisor)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}
