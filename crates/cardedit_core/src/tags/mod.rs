//! Tag-set parsing, universe bookkeeping and selection state.
//!
//! # Responsibility
//! - Parse and serialize free-form tag strings with one shared grammar.
//! - Track every known tag plus the "add new tag" sentinel.
//! - Derive and mutate per-session tag selection.
//!
//! # Invariants
//! - The sentinel always occupies index 0 and is never serialized.
//! - Tags are case-sensitive opaque tokens.

pub mod grammar;
pub mod selection;
pub mod universe;
