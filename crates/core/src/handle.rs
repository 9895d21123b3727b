//! Social-media handle normalisation.
//!
//! A [`Handle`] is the cache key for everything downstream: the record
//! store row, the storage object key and the public page URL. Parsing is
//! the only way to obtain one, so every `Handle` in the system is already
//! trimmed, `@`-stripped, validated and lowercased.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Maximum handle length after normalisation.
pub const MAX_HANDLE_LENGTH: usize = 15;

/// Accepted handle shape (before lowercasing).
pub const HANDLE_PATTERN: &str = r"^[a-zA-Z0-9_]{1,15}$";

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HANDLE_PATTERN).expect("valid regex"));

/// A normalized handle: lowercase ASCII letters, digits and underscores,
/// 1 to 15 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Normalize and validate raw user input.
    ///
    /// Trims surrounding whitespace, strips a single leading `@`, then
    /// checks the result against [`HANDLE_PATTERN`] and lowercases it.
    ///
    /// ```
    /// use v0mon_core::handle::Handle;
    ///
    /// assert_eq!(Handle::parse("  @ElonMusk ").unwrap().as_str(), "elonmusk");
    /// assert!(Handle::parse("###").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

        if !HANDLE_RE.is_match(stripped) {
            return Err(CoreError::InvalidHandle(format!(
                "Must be 1-{MAX_HANDLE_LENGTH} characters, letters, numbers and underscores only (got '{stripped}')"
            )));
        }

        Ok(Self(stripped.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object storage key for this handle's artifact: `{handle}.{ext}`.
    ///
    /// The key carries nothing but the handle; writing it again replaces
    /// the previous artifact.
    pub fn storage_key(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
