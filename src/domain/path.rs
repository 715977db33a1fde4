//! Colon-delimited configuration key paths.
//!
//! Keys like `logging:level:default` encode a hierarchy: every delimited
//! segment becomes one element in the written document. The decomposition
//! rules must match whatever produced the flat keys, otherwise the tree
//! shape comes out wrong.

use crate::domain::error::{DomainError, DomainResult};

/// Separator between key path segments.
pub const KEY_DELIMITER: char = ':';

/// Split a key into its parent path and its leaf segment.
///
/// `"a:b:c"` yields `(Some("a:b"), "c")`, `"a"` yields `(None, "a")`.
///
/// # Errors
/// `DomainError::InvalidKey` if the key is empty or the leaf segment is empty
/// (trailing delimiter).
pub fn split_key(key: &str) -> DomainResult<(Option<&str>, &str)> {
    if key.is_empty() {
        return Err(DomainError::invalid_key(key, "key must not be empty"));
    }

    let (parent, leaf) = match key.rfind(KEY_DELIMITER) {
        Some(idx) => (Some(&key[..idx]), &key[idx + KEY_DELIMITER.len_utf8()..]),
        None => (None, key),
    };

    if leaf.is_empty() {
        return Err(DomainError::invalid_key(key, "empty path segment"));
    }
    if !is_element_name(leaf) {
        return Err(invalid_segment(key, leaf));
    }
    Ok((parent, leaf))
}

/// Parent path of a key, `None` for single-segment keys.
pub fn parent_path(key: &str) -> Option<&str> {
    key.rfind(KEY_DELIMITER).map(|idx| &key[..idx])
}

/// Last segment of a key.
pub fn section_key(key: &str) -> &str {
    match key.rfind(KEY_DELIMITER) {
        Some(idx) => &key[idx + KEY_DELIMITER.len_utf8()..],
        None => key,
    }
}

/// Join segments into a single key.
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            key.push(KEY_DELIMITER);
        }
        key.push_str(segment.as_ref());
    }
    key
}

/// All segments of a key, root first.
///
/// Fails on the same inputs as [`split_key`] applied to every ancestor, so a
/// key accepted here can be resolved into a tree without errors.
pub fn segments(key: &str) -> DomainResult<Vec<&str>> {
    if key.is_empty() {
        return Err(DomainError::invalid_key(key, "key must not be empty"));
    }
    let parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
    if parts.iter().any(|s| s.is_empty()) {
        return Err(DomainError::invalid_key(key, "empty path segment"));
    }
    if let Some(bad) = parts.iter().find(|s| !is_element_name(s)) {
        return Err(invalid_segment(key, bad));
    }
    Ok(parts)
}

/// True if `name` is a well-formed XML element name (XML 1.0 `Name`
/// production, without the namespace colon).
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

fn invalid_segment(key: &str, segment: &str) -> DomainError {
    DomainError::invalid_key(
        key,
        format!("'{segment}' is not a valid XML element name"),
    )
}
