//! Text normalization shared across the engine
//!
//! Every matchable term and every searchable corpus goes through
//! [`normalize`] so that substring matching is exact and deterministic:
//! lowercase, non-alphanumeric runs collapsed to a single space, trimmed.

/// Normalize free text into matchable form
///
/// Lowercase, replace every non-alphanumeric run with a single space,
/// collapse whitespace, trim.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_space = true;
        }
    }
    out
}

/// Extract significant words from text: normalized, length >= 4,
/// order-preserving, de-duplicated, capped at `max`
#[must_use]
pub fn significant_words(text: &str, max: usize) -> Vec<String> {
    let normalized = normalize(text);
    let mut words: Vec<String> = Vec::new();
    for word in normalized.split(' ') {
        if word.len() < 4 {
            continue;
        }
        if words.iter().any(|w| w == word) {
            continue;
        }
        words.push(word.to_string());
        if words.len() == max {
            break;
        }
    }
    words
}

/// Clip a snippet to `max` characters, ellipsis-truncated
///
/// Clipping counts characters, not bytes, so multi-byte text never
/// splits a code point.
#[must_use]
pub fn clip_snippet(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max).collect();
    out.push('…');
    out
}

/// Strip a trailing file extension from a document title
#[must_use]
pub fn strip_extension(title: &str) -> &str {
    match title.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() <= 5 && !ext.contains(' ') => stem,
        _ => title,
    }
}
