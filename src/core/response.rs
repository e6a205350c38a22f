//! Discord payload limits and truncation helpers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Drop message chunking, add title/field limits for reply embeds
//! - 1.0.0: Embed and message truncation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord embed title limit
pub const TITLE_LIMIT: usize = 256;
/// Discord embed field value limit
pub const FIELD_VALUE_LIMIT: usize = 1024;
/// Discord embed field name limit
pub const FIELD_NAME_LIMIT: usize = 256;

/// Truncate text to at most `max_chars` characters, marking the cut with an ellipsis
///
/// Counts characters rather than bytes, so multi-byte text never splits mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

/// Truncate text for embed descriptions (4096 character limit)
pub fn truncate_for_embed(text: &str) -> String {
    truncate_chars(text, EMBED_LIMIT)
}
