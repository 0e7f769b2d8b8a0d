/// Strips surrounding whitespace and leading/trailing markdown code fences
/// (with or without a language tag) from a raw model reply. Replies
/// frequently arrive wrapped in a json fence even when the prompt asks for
/// bare lines.
///
/// Idempotent: sanitizing already-clean text returns it unchanged. Interior
/// content is preserved byte for byte.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // The opening fence may carry a language tag; discard through the
        // end of its line.
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => "",
        };
    }

    let trimmed = text.trim_end();
    if let Some(rest) = trimmed.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}
