//! Generation prompt composition.
//!
//! [`build_prompt`] is a pure template: the same handle, typing and
//! traits always produce the same instruction text.

use crate::element::TypePair;
use crate::handle::Handle;
use crate::naming::{MAX_SUGGESTED_NAME_LEN, MIN_SUGGESTED_NAME_LEN, NAME_LINE_PREFIX};

/// Maximum number of personality traits listed in a prompt.
pub const MAX_PROMPT_TRAITS: usize = 6;

/// Extra traits suggested by keywords in the handle itself.
///
/// Only the first matching group applies.
pub fn flavor_traits(handle: &Handle) -> Vec<String> {
    let h = handle.as_str();
    let traits: &[&str] = if h.contains("0x") || h.contains("crypto") {
        &["tech-savvy", "digital"]
    } else if h.contains("art") || h.contains("design") {
        &["artistic", "creative"]
    } else if h.contains("music") || h.contains("dj") {
        &["melodic", "rhythmic"]
    } else {
        &[]
    };
    traits.iter().map(|t| t.to_string()).collect()
}

/// Compose the instruction sent to the image generator.
///
/// `personality` is the combined type personality phrase and `traits`
/// the merged trait list; only the first [`MAX_PROMPT_TRAITS`] traits are
/// listed. The prompt ends with a response-format directive asking the
/// generator to open its text reply with `Pokemon Name: <name>`.
pub fn build_prompt(
    handle: &Handle,
    types: &TypePair,
    personality: &str,
    traits: &[String],
) -> String {
    let type_description = types.describe();
    let primary = types.primary();
    let listed_traits = traits
        .iter()
        .take(MAX_PROMPT_TRAITS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let secondary_line = types
        .secondary()
        .map(|s| format!("- Secondary type: {s}\n"))
        .unwrap_or_default();

    let element_names = types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(" and ");
    let plural = if types.is_dual() { "s" } else { "" };
    let element_colors = match types.secondary() {
        Some(secondary) => format!("{primary} and {secondary}"),
        None => primary.to_string(),
    };

    format!(
        "Create a unique Pokemon-style creature inspired by the username \"@{handle}\" that embodies a {personality} personality.

Key characteristics:
- Type: {type_description}
- Primary type: {primary}
{secondary_line}- Personality traits: {listed_traits}
- Username inspiration: @{handle}

Design requirements:
- Original creature design (not copying existing Pokemon)
- Colorful and appealing anime/cartoon art style
- Fantasy creature with unique features that reflect the username
- Should embody the personality: {personality}
- Include magical/elemental effects related to: {element_names} type{plural}
- Make it look friendly and approachable
- Use vibrant colors that match the {element_colors} element{plural}
- Show clear visual indicators of being a {type_description} Pokemon

Style: High-quality anime/cartoon style, vibrant colors, Pokemon-inspired but completely original design, cute and appealing.

Response format: begin your text reply with a single line \"{NAME_LINE_PREFIX} <name>\" giving the creature an original name of {MIN_SUGGESTED_NAME_LEN} to {MAX_SUGGESTED_NAME_LEN} letters, followed by a one or two sentence description of the creature."
    )
}
