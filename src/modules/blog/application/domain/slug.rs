use std::sync::LazyLock;

use regex::Regex;

use super::entities::ContentValidationError;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("slug pattern is valid"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"));

/// ASCII slug of `text`: lowercased, punctuation dropped, whitespace and
/// hyphen runs collapsed to a single `-`.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    SEPARATORS
        .replace_all(kept.trim(), "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

/// Like [`slugify`], cut to `max_len` without leaving a trailing separator.
pub fn slugify_within(text: &str, max_len: usize) -> String {
    let slug = slugify(text);
    if slug.len() <= max_len {
        return slug;
    }
    slug[..max_len].trim_end_matches(['-', '_']).to_string()
}

pub fn validate_slug(slug: &str, max_len: usize) -> Result<(), ContentValidationError> {
    if slug.is_empty() || slug.len() > max_len || !SLUG_PATTERN.is_match(slug) {
        return Err(ContentValidationError::InvalidSlug);
    }
    Ok(())
}
