//! Domain logic for v0mon: handle normalisation, elemental typing,
//! fallback naming, and prompt composition.
//!
//! Everything in this crate is pure (or takes its randomness as a
//! parameter) so it can be exercised without any I/O.

pub mod element;
pub mod error;
pub mod handle;
pub mod naming;
pub mod prompt;
pub mod types;
pub mod typing;
