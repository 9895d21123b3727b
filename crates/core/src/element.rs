//! The closed set of elemental types and their static lookup tables.
//!
//! Each type carries a display label, a badge colour (used by the HTML
//! page and the preview card renderer) and a personality profile that
//! feeds the generation prompt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Element type enum
// ---------------------------------------------------------------------------

/// One of the 18 elemental categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    /// Every type, in canonical order.
    pub const ALL: [ElementType; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Lowercase identifier, as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Human-readable label with the first letter capitalised.
    pub fn label(self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Badge colour as `0xRRGGBB`.
    pub fn badge_color(self) -> u32 {
        match self {
            Self::Normal => 0xA8A878,
            Self::Fire => 0xF08030,
            Self::Water => 0x6890F0,
            Self::Electric => 0xF8D030,
            Self::Grass => 0x78C850,
            Self::Ice => 0x98D8D8,
            Self::Fighting => 0xC03028,
            Self::Poison => 0xA040A0,
            Self::Ground => 0xE0C068,
            Self::Flying => 0xA890F0,
            Self::Psychic => 0xF85888,
            Self::Bug => 0xA8B820,
            Self::Rock => 0xB8A038,
            Self::Ghost => 0x705898,
            Self::Dragon => 0x7038F8,
            Self::Dark => 0x705848,
            Self::Steel => 0xB8B8D0,
            Self::Fairy => 0xEE99AC,
        }
    }

    /// Badge colour as a CSS hex string, e.g. `#F08030`.
    pub fn badge_css(self) -> String {
        format!("#{:06X}", self.badge_color())
    }

    /// Whether dark text reads better than white on this type's badge.
    pub fn prefers_dark_text(self) -> bool {
        matches!(self, Self::Electric | Self::Ice | Self::Fairy | Self::Ground)
    }

    /// Static personality profile for this type.
    pub fn profile(self) -> TypeProfile {
        let (personality, traits): (&str, [&str; 3]) = match self {
            Self::Normal => ("friendly and adaptable", ["loyal", "versatile", "approachable"]),
            Self::Fire => ("passionate and energetic", ["brave", "determined", "warm-hearted"]),
            Self::Water => ("calm and flowing", ["peaceful", "adaptable", "nurturing"]),
            Self::Electric => ("energetic and quick", ["fast", "shocking", "bright"]),
            Self::Grass => ("peaceful and natural", ["gentle", "growth-oriented", "harmonious"]),
            Self::Ice => ("cool and composed", ["elegant", "pristine", "crystalline"]),
            Self::Fighting => ("strong and determined", ["brave", "disciplined", "powerful"]),
            Self::Poison => ("mysterious and cunning", ["sneaky", "toxic", "resilient"]),
            Self::Ground => ("steady and reliable", ["sturdy", "grounded", "protective"]),
            Self::Flying => ("free and soaring", ["graceful", "swift", "independent"]),
            Self::Psychic => ("intelligent and mystical", ["wise", "telepathic", "mysterious"]),
            Self::Bug => ("industrious and persistent", ["hardworking", "social", "resilient"]),
            Self::Rock => ("solid and dependable", ["tough", "enduring", "protective"]),
            Self::Ghost => ("mysterious and ethereal", ["spooky", "elusive", "otherworldly"]),
            Self::Dragon => ("majestic and powerful", ["legendary", "fierce", "noble"]),
            Self::Dark => ("cunning and mysterious", ["sneaky", "night-active", "enigmatic"]),
            Self::Steel => ("strong and technological", ["durable", "metallic", "precise"]),
            Self::Fairy => ("magical and whimsical", ["enchanting", "playful", "mystical"]),
        };
        TypeProfile {
            personality,
            traits,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Internal(format!("Unknown element type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Type pair
// ---------------------------------------------------------------------------

/// A creature's typing: one primary type and an optional, distinct
/// secondary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypePair {
    primary: ElementType,
    secondary: Option<ElementType>,
}

impl TypePair {
    pub fn single(primary: ElementType) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Build a pair, rejecting a secondary type equal to the primary.
    pub fn new(primary: ElementType, secondary: Option<ElementType>) -> Result<Self, CoreError> {
        if secondary == Some(primary) {
            return Err(CoreError::Internal(format!(
                "Secondary type must differ from primary type '{primary}'"
            )));
        }
        Ok(Self { primary, secondary })
    }

    pub fn primary(&self) -> ElementType {
        self.primary
    }

    pub fn secondary(&self) -> Option<ElementType> {
        self.secondary
    }

    pub fn is_dual(&self) -> bool {
        self.secondary.is_some()
    }

    /// Primary then secondary.
    pub fn iter(&self) -> impl Iterator<Item = ElementType> + '_ {
        std::iter::once(self.primary).chain(self.secondary)
    }

    /// `"fire type"` or `"fire/water dual-type"`.
    pub fn describe(&self) -> String {
        match self.secondary {
            Some(secondary) => format!("{}/{secondary} dual-type", self.primary),
            None => format!("{} type", self.primary),
        }
    }
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Static personality row for a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeProfile {
    pub personality: &'static str,
    pub traits: [&'static str; 3],
}

/// Combined personality for a creature's typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Personality {
    pub description: String,
    pub traits: Vec<String>,
}

/// Number of secondary-type traits merged into a dual-type personality.
const SECONDARY_TRAIT_COUNT: usize = 2;

/// Combine the personality profiles of a type pair.
///
/// Dual types read as `"{primary} with {secondary} qualities"` and gain
/// the first two traits of the secondary type.
pub fn build_personality(types: &TypePair) -> Personality {
    let primary = types.primary().profile();
    let mut description = primary.personality.to_string();
    let mut traits: Vec<String> = primary.traits.iter().map(|t| t.to_string()).collect();

    if let Some(secondary) = types.secondary() {
        let secondary = secondary.profile();
        description = format!("{description} with {} qualities", secondary.personality);
        traits.extend(
            secondary
                .traits
                .iter()
                .take(SECONDARY_TRAIT_COUNT)
                .map(|t| t.to_string()),
        );
    }

    Personality {
        description,
        traits,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_contains_eighteen_distinct_types() {
        let set: HashSet<_> = ElementType::ALL.into_iter().collect();
        assert_eq!(set.len(), 18);
    }

    #[test]
    fn from_str_round_trips_every_type() {
        for t in ElementType::ALL {
            assert_eq!(t.as_str().parse::<ElementType>().unwrap(), t);
        }
        assert_eq!("FIRE".parse::<ElementType>().unwrap(), ElementType::Fire);
        assert!("plasma".parse::<ElementType>().is_err());
    }

    #[test]
    fn label_capitalises_first_letter() {
        assert_eq!(ElementType::Electric.label(), "Electric");
        assert_eq!(ElementType::Ice.label(), "Ice");
    }

    #[test]
    fn badge_css_is_uppercase_hex() {
        assert_eq!(ElementType::Fire.badge_css(), "#F08030");
        assert_eq!(ElementType::Fairy.badge_css(), "#EE99AC");
    }

    #[test]
    fn pair_rejects_duplicate_secondary() {
        assert!(TypePair::new(ElementType::Fire, Some(ElementType::Fire)).is_err());
        assert!(TypePair::new(ElementType::Fire, Some(ElementType::Water)).is_ok());
    }

    #[test]
    fn describe_single_and_dual() {
        assert_eq!(TypePair::single(ElementType::Fire).describe(), "fire type");
        let dual = TypePair::new(ElementType::Fire, Some(ElementType::Flying)).unwrap();
        assert_eq!(dual.describe(), "fire/flying dual-type");
    }

    #[test]
    fn single_type_personality() {
        let p = build_personality(&TypePair::single(ElementType::Water));
        assert_eq!(p.description, "calm and flowing");
        assert_eq!(p.traits, vec!["peaceful", "adaptable", "nurturing"]);
    }

    #[test]
    fn dual_type_personality_merges_two_secondary_traits() {
        let pair = TypePair::new(ElementType::Fire, Some(ElementType::Ghost)).unwrap();
        let p = build_personality(&pair);
        assert_eq!(
            p.description,
            "passionate and energetic with mysterious and ethereal qualities"
        );
        assert_eq!(
            p.traits,
            vec!["brave", "determined", "warm-hearted", "spooky", "elusive"]
        );
    }
}
