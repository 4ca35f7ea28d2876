//! Tag selection derived from a tag string against a universe.
//!
//! # Responsibility
//! - Mark which universe entries are selected by a tag string.
//! - Apply user toggles and serialize the result canonically.
//!
//! # Invariants
//! - `checked` is aligned 1:1 with the universe entries it was derived from.
//! - The sentinel position is never checked and never serialized.
//! - Tokens absent from the universe are dropped on derive.

use crate::tags::grammar::{join_tags, parse_tags};
use crate::tags::universe::{TagEntry, TagUniverse, SENTINEL_INDEX};
use log::debug;

/// Per-session selection state over a universe snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelectionModel {
    entries: Vec<TagEntry>,
    checked: Vec<bool>,
}

impl TagSelectionModel {
    /// Derives selection state for `tags` against `universe`.
    pub fn derive(tags: &str, universe: &TagUniverse) -> Self {
        let parsed = parse_tags(tags);
        let entries = universe.entries().to_vec();
        let checked: Vec<bool> = entries
            .iter()
            .map(|entry| {
                entry
                    .as_tag()
                    .is_some_and(|tag| parsed.iter().any(|token| token == tag))
            })
            .collect();

        let selected = checked.iter().filter(|value| **value).count();
        debug!(
            "event=tag_selection_derive module=tags status=ok parsed={} selected={} dropped={}",
            parsed.len(),
            selected,
            parsed.len() - selected
        );
        Self { entries, checked }
    }

    /// Flips membership of a real tag.
    ///
    /// Returns the new state, or `None` for the sentinel or an unknown index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let current = self.selectable(index)?;
        let next = !current;
        self.checked[index] = next;
        Some(next)
    }

    /// Sets membership of a real tag explicitly.
    ///
    /// Returns `false` when `index` is the sentinel or out of range.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> bool {
        if self.selectable(index).is_none() {
            return false;
        }
        self.checked[index] = checked;
        true
    }

    /// Canonical tag string of the selection, in universe order.
    pub fn serialize(&self) -> String {
        join_tags(self.selected_tags())
    }

    /// Selected tags in universe order.
    pub fn selected_tags(&self) -> Vec<&str> {
        self.entries
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .filter_map(|(entry, _)| entry.as_tag())
            .collect()
    }

    /// Selection flags aligned with the universe entries.
    pub fn checked(&self) -> &[bool] {
        &self.checked
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn selectable(&self, index: usize) -> Option<bool> {
        if index == SENTINEL_INDEX {
            return None;
        }
        self.checked.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::TagSelectionModel;
    use crate::tags::universe::TagUniverse;

    fn universe(tags: &[&str]) -> TagUniverse {
        let mut universe = TagUniverse::new();
        universe.load(tags.iter().copied());
        universe
    }

    #[test]
    fn derive_marks_members_and_never_sentinel() {
        let universe = universe(&["math", "history", "art"]);
        let model = TagSelectionModel::derive("art, math", &universe);
        assert_eq!(model.checked(), &[false, true, false, true]);
    }

    #[test]
    fn serialize_follows_universe_order() {
        let universe = universe(&["math", "history", "art"]);
        let model = TagSelectionModel::derive("art,math", &universe);
        assert_eq!(model.serialize(), "math, art");
    }

    #[test]
    fn toggle_rejects_sentinel_and_out_of_range() {
        let universe = universe(&["math"]);
        let mut model = TagSelectionModel::derive("", &universe);
        assert_eq!(model.toggle(0), None);
        assert_eq!(model.toggle(7), None);
        assert!(!model.set_checked(0, true));
        assert_eq!(model.checked(), &[false, false]);
    }

    #[test]
    fn toggle_flips_membership() {
        let universe = universe(&["math", "bio"]);
        let mut model = TagSelectionModel::derive("math", &universe);
        assert_eq!(model.toggle(1), Some(false));
        assert_eq!(model.toggle(2), Some(true));
        assert!(!model.is_checked(1));
        assert!(model.is_checked(2));
        assert!(!model.is_checked(99));
        assert_eq!(model.serialize(), "bio");
    }

    #[test]
    fn empty_selection_serializes_to_empty_string() {
        let universe = universe(&["math"]);
        let model = TagSelectionModel::derive("unknown", &universe);
        assert_eq!(model.serialize(), "");
        assert!(model.selected_tags().is_empty());
    }
}
