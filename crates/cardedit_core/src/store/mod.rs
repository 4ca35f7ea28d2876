//! Record store boundary.
//!
//! # Responsibility
//! - Define what the editor needs from the external record store.
//! - Provide an in-memory store for probes and tests.
//!
//! # Invariants
//! - `all_user_tags` returns each distinct tag once.
//! - Stores only receive writes for committed, modified facts.

use crate::model::fact::{Fact, FactId};
use crate::tags::grammar::parse_tags;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;

pub use memory::InMemoryFactStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(FactId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "fact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid fact data: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Storage contract consumed by the editor service.
pub trait FactStore {
    /// Gets one fact by id.
    fn get_fact(&self, id: FactId) -> StoreResult<Option<Fact>>;
    /// Replaces a stored fact's field values and tag string.
    fn save_fact(&mut self, fact: &Fact) -> StoreResult<()>;
    /// Returns every distinct tag used by any stored fact.
    fn all_user_tags(&self) -> StoreResult<Vec<String>>;
}

/// Collects distinct tags from tag strings, sorted case-insensitively.
///
/// Ties keep a stable byte order so `Math` and `math` both survive.
pub fn collect_distinct_tags<'a, I>(tag_strings: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut unique = BTreeSet::new();
    for tags in tag_strings {
        unique.extend(parse_tags(tags));
    }
    let mut sorted: Vec<String> = unique.into_iter().collect();
    sorted.sort_by_key(|tag| tag.to_lowercase());
    sorted
}

#[cfg(test)]
mod tests {
    use super::collect_distinct_tags;

    #[test]
    fn distinct_tags_are_sorted_case_insensitively() {
        let tags = collect_distinct_tags(["math, Zoo", "art,math", "", "Math"]);
        assert_eq!(tags, vec!["art", "Math", "math", "Zoo"]);
    }
}
