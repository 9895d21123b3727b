//! Creature naming: extraction of the generator's suggested name and the
//! deterministic fallback used when no usable suggestion is returned.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shortest suggested name accepted from the generator (characters).
pub const MIN_SUGGESTED_NAME_LEN: usize = 4;

/// Longest suggested name accepted from the generator (characters).
pub const MAX_SUGGESTED_NAME_LEN: usize = 8;

/// Longest creature name the record store accepts (characters).
pub const MAX_CREATURE_NAME_LEN: usize = 20;

/// Prefix the generator is instructed to put in front of its suggestion.
pub const NAME_LINE_PREFIX: &str = "Pokemon Name:";

/// Matches a `Pokemon Name: <name>` line, tolerating markdown bold markers
/// around the label.
static NAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\**[ \t]*Pokemon Name:[ \t]*\**[ \t]*([^\r\n]*)").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Deterministic fallback name derived from a handle.
///
/// Non-alphanumeric characters are stripped, then one of five suffix
/// templates is chosen by `stripped.len() % 5`:
///
/// | index | template            |
/// |-------|---------------------|
/// | 0     | `{s}mon`            |
/// | 1     | `{s}chu`            |
/// | 2     | `{first 4}eon`      |
/// | 3     | `{first 5}ite`      |
/// | 4     | `{s}zard`           |
///
/// An empty stripped handle yields `"mon"`.
///
/// ```
/// use v0mon_core::naming::fallback_name;
///
/// assert_eq!(fallback_name("elonmusk"), "elonmite");
/// assert_eq!(fallback_name("___"), "mon");
/// ```
pub fn fallback_name(handle: &str) -> String {
    let stripped: String = handle
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let len = stripped.chars().count();

    match len % 5 {
        0 => format!("{stripped}mon"),
        1 => format!("{stripped}chu"),
        2 => format!("{}eon", prefix_chars(&stripped, 4)),
        3 => format!("{}ite", prefix_chars(&stripped, 5)),
        _ => format!("{stripped}zard"),
    }
}

fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

// ---------------------------------------------------------------------------
// Suggested name extraction
// ---------------------------------------------------------------------------

/// Extract the generator's suggested name from its text reply.
///
/// Only the first `Pokemon Name:` line is considered. Returns `None` when
/// no such line exists or its value falls outside
/// [`MIN_SUGGESTED_NAME_LEN`]..=[`MAX_SUGGESTED_NAME_LEN`] characters.
pub fn extract_suggested_name(text: &str) -> Option<String> {
    let captures = NAME_LINE_RE.captures(text)?;
    let name = captures.get(1)?.as_str().trim().trim_matches('*').trim();
    let len = name.chars().count();

    if (MIN_SUGGESTED_NAME_LEN..=MAX_SUGGESTED_NAME_LEN).contains(&len) {
        Some(name.to_string())
    } else {
        None
    }
}

/// The generator's text with every `Pokemon Name:` line removed.
///
/// Returns `None` if nothing but whitespace remains.
pub fn strip_name_line(text: &str) -> Option<String> {
    let remaining = text
        .lines()
        .filter(|line| !NAME_LINE_RE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n");
    let remaining = remaining.trim();

    if remaining.is_empty() {
        None
    } else {
        Some(remaining.to_string())
    }
}

/// Description shown when no generator text is available.
pub fn default_description(creature_name: &str, handle: &str) -> String {
    format!("This is {creature_name}, a unique Pokemon created for @{handle}")
}
