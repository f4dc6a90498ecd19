//! mediagen-prompt: `@Image1` / `@Video2` / `@Element3` reference handling.
//!
//! Prompts may reference uploaded media by 1-based position. Parsing is a
//! pure scan over the prompt string; validation checks the references
//! against the counts of available media without mutating anything.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(Image|Video|Element)(\d+)").unwrap());

/// Kind of media a prompt reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Image,
    Video,
    Element,
}

impl ReferenceKind {
    fn label(&self) -> &'static str {
        match self {
            ReferenceKind::Image => "image",
            ReferenceKind::Video => "video",
            ReferenceKind::Element => "element",
        }
    }
}

/// Character span of a reference inside the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One parsed `@` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReference {
    pub kind: ReferenceKind,
    /// 1-based position into the media list of that kind.
    pub index: u32,
    /// Raw token, e.g. `"@Image1"`.
    pub raw: String,
    pub span: Span,
}

/// Counts of media available for referencing, plus an optional total cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceCounts {
    pub images: usize,
    pub videos: usize,
    pub elements: usize,
    /// Vendor cap on total referenced items (e.g. 7 for Kling O1).
    pub max_total: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceValidationError {
    pub reference: String,
    pub message: String,
    pub span: Span,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceValidation {
    pub is_valid: bool,
    pub errors: Vec<ReferenceValidationError>,
    pub warnings: Vec<String>,
}

/// Parse every `@` reference in the prompt, in order of appearance.
pub fn parse_references(prompt: &str) -> Vec<ParsedReference> {
    REFERENCE_RE
        .captures_iter(prompt)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = match caps.get(1)?.as_str() {
                "Image" => ReferenceKind::Image,
                "Video" => ReferenceKind::Video,
                _ => ReferenceKind::Element,
            };
            let index: u32 = caps.get(2)?.as_str().parse().ok()?;
            Some(ParsedReference {
                kind,
                index,
                raw: whole.as_str().to_string(),
                span: Span {
                    start: whole.start(),
                    end: whole.end(),
                },
            })
        })
        .collect()
}

/// Validate every reference against the available media counts.
///
/// Errors accumulate, one per out-of-range or non-positive reference, no
/// short-circuiting. Exceeding `max_total` and repeating a token are
/// warnings, not errors.
pub fn validate_references(prompt: &str, counts: &ReferenceCounts) -> ReferenceValidation {
    let references = parse_references(prompt);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for reference in &references {
        let available = match reference.kind {
            ReferenceKind::Image => counts.images,
            ReferenceKind::Video => counts.videos,
            ReferenceKind::Element => counts.elements,
        };
        let label = reference.kind.label();

        if reference.index < 1 {
            errors.push(ReferenceValidationError {
                reference: reference.raw.clone(),
                message: format!("{label} index must start at 1"),
                span: reference.span,
            });
        } else if reference.index as usize > available {
            errors.push(ReferenceValidationError {
                reference: reference.raw.clone(),
                message: format!(
                    "{label} {} does not exist ({available} available)",
                    reference.index
                ),
                span: reference.span,
            });
        }
    }

    if let Some(max_total) = counts.max_total {
        let total = counts.images + counts.videos + counts.elements;
        if total > max_total {
            warnings.push(format!(
                "media count exceeds the limit: {total} items uploaded, at most {max_total} supported"
            ));
        }
    }

    let mut seen = HashSet::new();
    for reference in &references {
        if !seen.insert(reference.raw.as_str()) {
            warnings.push(format!("duplicate reference: {}", reference.raw));
        }
    }

    ReferenceValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Indices referenced per kind, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedIndices {
    pub images: Vec<u32>,
    pub videos: Vec<u32>,
    pub elements: Vec<u32>,
}

pub fn referenced_indices(prompt: &str) -> ReferencedIndices {
    let mut result = ReferencedIndices::default();

    for reference in parse_references(prompt) {
        let bucket = match reference.kind {
            ReferenceKind::Image => &mut result.images,
            ReferenceKind::Video => &mut result.videos,
            ReferenceKind::Element => &mut result.elements,
        };
        bucket.push(reference.index);
    }

    for bucket in [
        &mut result.images,
        &mut result.videos,
        &mut result.elements,
    ] {
        bucket.sort_unstable();
        bucket.dedup();
    }

    result
}

/// Whether the prompt contains any `@` reference at all.
pub fn has_references(prompt: &str) -> bool {
    REFERENCE_RE.is_match(prompt)
}

/// Resolve references into the prompt.
///
/// Intentionally returns the prompt unchanged: the vendor APIs resolve
/// `@` tokens against the submitted media arrays themselves, so the tokens
/// must stay in the prompt verbatim.
pub fn resolve_references(prompt: &str) -> String {
    prompt.to_string()
}

/// Human-readable hints listing the tokens currently available.
pub fn reference_hints(counts: &ReferenceCounts) -> Vec<String> {
    let mut hints = Vec::new();

    let describe = |label: &str, count: usize| {
        let tokens: Vec<String> = (1..=count).map(|i| format!("@{label}{i}")).collect();
        format!("available {} references: {}", label.to_lowercase(), tokens.join(", "))
    };

    if counts.images > 0 {
        hints.push(describe("Image", counts.images));
    }
    if counts.videos > 0 {
        hints.push(describe("Video", counts.videos));
    }
    if counts.elements > 0 {
        hints.push(describe("Element", counts.elements));
    }

    if hints.is_empty() {
        hints.push("upload images or videos to reference them with @ in the prompt".to_string());
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_references_with_spans() {
        let refs = parse_references("@Image1 and @Video2");
        assert_eq!(refs.len(), 2);

        assert_eq!(refs[0].kind, ReferenceKind::Image);
        assert_eq!(refs[0].index, 1);
        assert_eq!(refs[0].raw, "@Image1");
        assert_eq!(refs[0].span, Span { start: 0, end: 7 });

        assert_eq!(refs[1].kind, ReferenceKind::Video);
        assert_eq!(refs[1].index, 2);
        assert_eq!(refs[1].span, Span { start: 12, end: 19 });
    }

    #[test]
    fn test_parse_is_restartable() {
        let prompt = "@Element3 once";
        assert_eq!(parse_references(prompt), parse_references(prompt));
    }

    #[test]
    fn test_parse_ignores_unknown_tokens() {
        assert!(parse_references("@Audio1 @image1 plain text").is_empty());
    }

    #[test]
    fn test_validate_out_of_range_image() {
        let counts = ReferenceCounts {
            images: 1,
            ..Default::default()
        };
        let validation = validate_references("@Image2", &counts);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(validation.errors[0].reference, "@Image2");
        assert!(validation.errors[0].message.contains("image 2"));
    }

    #[test]
    fn test_validate_accumulates_all_errors() {
        let counts = ReferenceCounts {
            images: 1,
            videos: 0,
            ..Default::default()
        };
        let validation = validate_references("@Image2 @Video1 @Image3", &counts);
        assert_eq!(validation.errors.len(), 3);
    }

    #[test]
    fn test_validate_duplicate_is_warning_not_error() {
        let counts = ReferenceCounts {
            images: 1,
            ..Default::default()
        };
        let validation = validate_references("@Image1 then @Image1", &counts);
        assert!(validation.is_valid);
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.warnings[0].contains("@Image1"));
    }

    #[test]
    fn test_validate_total_cap_is_warning() {
        let counts = ReferenceCounts {
            images: 5,
            videos: 3,
            elements: 0,
            max_total: Some(7),
        };
        let validation = validate_references("@Image1", &counts);
        assert!(validation.is_valid);
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_referenced_indices_sorted_dedup() {
        let indices = referenced_indices("@Image3 @Image1 @Image3 @Video2");
        assert_eq!(indices.images, vec![1, 3]);
        assert_eq!(indices.videos, vec![2]);
        assert!(indices.elements.is_empty());
    }

    #[test]
    fn test_resolve_is_a_no_op() {
        let prompt = "@Image1 walking through @Element2";
        assert_eq!(resolve_references(prompt), prompt);
    }

    #[test]
    fn test_reference_hints() {
        let counts = ReferenceCounts {
            images: 2,
            ..Default::default()
        };
        let hints = reference_hints(&counts);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("@Image1, @Image2"));
    }
}
