//! Small helpers shared by the provider route modules.

use crate::error::RouteError;

/// Sentinel ratio values meaning "infer from uploaded media".
pub(crate) fn is_smart_ratio(value: &str) -> bool {
    value == "smart" || value == "auto"
}

/// Trim and truncate a prompt, failing when nothing is left.
pub(crate) fn required_prompt(
    prompt: &str,
    max_len: usize,
    what: &str,
) -> Result<String, RouteError> {
    let truncated: String = prompt.chars().take(max_len).collect();
    if truncated.trim().is_empty() {
        return Err(RouteError::invalid(format!(
            "{what} requires a non-empty prompt"
        )));
    }
    Ok(truncated)
}

/// Strip a `data:` URI down to its bare base64 payload.
///
/// Some PPIO endpoints take raw base64 rather than a full data URI;
/// anything without the prefix passes through unchanged.
pub(crate) fn strip_data_uri_prefix(input: &str) -> &str {
    if input.starts_with("data:") {
        input.split_once(',').map(|(_, b64)| b64).unwrap_or(input)
    } else {
        input
    }
}

/// Promote a bare base64 payload to a JPEG data URI.
pub(crate) fn ensure_data_uri(input: &str) -> String {
    if input.starts_with("data:") || input.starts_with("http://") || input.starts_with("https://")
    {
        input.to_string()
    } else {
        format!("data:image/jpeg;base64,{input}")
    }
}
