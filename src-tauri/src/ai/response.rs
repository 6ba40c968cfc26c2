//! Helpers for cleaning up model output before parsing.

/// Strip markdown code fences from an LLM response if present.
/// Providers without a strict JSON mode often wrap JSON in ```json ... ```.
pub fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    // Remove opening fence (with optional language tag)
    let after_open = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        // Single-line fence: drop the backticks and any language tag
        None => trimmed
            .trim_start_matches('`')
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim_start(),
    };
    let cleaned = after_open.trim_end();
    match cleaned.strip_suffix("```") {
        Some(inner) => inner.trim().to_string(),
        None => cleaned.to_string(),
    }
}

/// Shorten `text` to at most `max` bytes for logs and error messages,
/// respecting char boundaries.
pub fn truncate_for_log(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
