//! Domain entities: core data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat configuration mapping: colon-delimited key to value.
///
/// Iteration order is insertion order; it decides sibling order in the
/// written document.
pub type ConfigMap = IndexMap<String, String>;

/// How line breaks inside text content are written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewlineHandling {
    /// Normalize `\r\n`, `\r` and `\n` to the configured newline
    #[default]
    Replace,
    /// Write text unchanged
    None,
}

/// Indentation and newline settings applied uniformly to emitted markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatOptions {
    /// Put nested elements on their own indented lines
    pub indent: bool,
    /// Character used for one indentation step
    pub indent_char: char,
    /// Number of `indent_char` per nesting level
    pub indent_size: usize,
    /// Newline treatment inside text content
    pub newline_handling: NewlineHandling,
    /// Replacement line break for `NewlineHandling::Replace`
    pub newline: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: true,
            indent_char: ' ',
            indent_size: 2,
            newline_handling: NewlineHandling::Replace,
            newline: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    /// Apply the newline policy to a text value.
    pub fn normalize_text<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        match self.newline_handling {
            NewlineHandling::None => std::borrow::Cow::Borrowed(text),
            NewlineHandling::Replace => normalize_newlines(text, &self.newline),
        }
    }
}

/// Replace every line break style in `text` with `newline`.
pub fn normalize_newlines<'a>(text: &'a str, newline: &str) -> std::borrow::Cow<'a, str> {
    if !text.contains(['\r', '\n']) {
        return std::borrow::Cow::Borrowed(text);
    }
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    if newline == "\n" {
        std::borrow::Cow::Owned(unified)
    } else {
        std::borrow::Cow::Owned(unified.replace('\n', newline))
    }
}

/// Parse a `KEY=VALUE` pair, splitting at the first `=`.
///
/// Returns None if there is no `=` in the input.
pub fn parse_pair(pair: &str) -> Option<(String, String)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
}

/// Expand environment variables and tilde in a string.
///
/// Supports `$VAR`, `${VAR}` and `~` (home directory).
/// Undefined variables are left unexpanded.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
