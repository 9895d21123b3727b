//! Random elemental type selection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::element::{ElementType, TypePair};

/// Probability that a freshly generated creature gets two types.
pub const DUAL_TYPE_PROBABILITY: f64 = 0.3;

/// Draw a typing for a new creature.
///
/// With probability [`DUAL_TYPE_PROBABILITY`] the first two entries of a
/// shuffled copy of [`ElementType::ALL`] are used (so the pair is always
/// distinct); otherwise a single uniformly chosen type.
pub fn select_types<R: Rng + ?Sized>(rng: &mut R) -> TypePair {
    if rng.random_bool(DUAL_TYPE_PROBABILITY) {
        let mut pool = ElementType::ALL;
        pool.shuffle(rng);
        TypePair::new(pool[0], Some(pool[1])).unwrap_or_else(|_| TypePair::single(pool[0]))
    } else {
        let index = rng.random_range(0..ElementType::ALL.len());
        TypePair::single(ElementType::ALL[index])
    }
}

/// [`select_types`] using the thread-local RNG.
pub fn select_types_random() -> TypePair {
    select_types(&mut rand::rng())
}
