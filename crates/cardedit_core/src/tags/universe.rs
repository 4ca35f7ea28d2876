//! Tag universe: every tag known across the record store.
//!
//! # Responsibility
//! - Materialize the store's distinct tags once per editing session.
//! - Keep the "add new tag" sentinel pinned at index 0.
//! - Insert freshly created tags right after the sentinel.
//!
//! # Invariants
//! - `entries[0]` is always `TagEntry::AddNew`; no other entry is.
//! - Real tags are unique (case-sensitive) and never empty.
//! - `load` only has an effect the first time it is called.

use crate::tags::grammar::normalize_new_tag;
use log::{debug, info};
use std::sync::{Arc, PoisonError, RwLock};

/// Position of the sentinel entry.
pub const SENTINEL_INDEX: usize = 0;

/// One entry of the universe list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagEntry {
    /// Reserved "create a new tag" action. Never a real tag.
    AddNew,
    Tag(String),
}

impl TagEntry {
    /// Returns the tag name, or `None` for the sentinel.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::AddNew => None,
            Self::Tag(name) => Some(name.as_str()),
        }
    }
}

/// Result of inserting a new tag into the universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Tag was inserted at index 1.
    Inserted(String),
    /// Tag already existed; universe unchanged.
    AlreadyKnown(String),
    /// Input was empty, whitespace-only or contained a separator.
    Rejected,
}

impl AppendOutcome {
    /// Normalized tag name when the input was accepted.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Inserted(tag) | Self::AlreadyKnown(tag) => Some(tag.as_str()),
            Self::Rejected => None,
        }
    }
}

/// Ordered list of known tags with the sentinel in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUniverse {
    entries: Vec<TagEntry>,
    loaded: bool,
}

impl Default for TagUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl TagUniverse {
    /// Creates an unloaded universe holding only the sentinel.
    pub fn new() -> Self {
        Self {
            entries: vec![TagEntry::AddNew],
            loaded: false,
        }
    }

    /// Populates the universe from the store's distinct tags.
    ///
    /// Store order is kept. Empty names and repeats are skipped. Returns
    /// `false` without touching anything when already loaded.
    pub fn load<I, S>(&mut self, all_known_tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.loaded {
            debug!("event=tag_universe_load module=tags status=skipped reason=already_loaded");
            return false;
        }

        for tag in all_known_tags {
            let tag = tag.into();
            if tag.is_empty() || self.contains(&tag) {
                continue;
            }
            self.entries.push(TagEntry::Tag(tag));
        }
        self.loaded = true;
        info!(
            "event=tag_universe_load module=tags status=ok tag_count={}",
            self.tag_count()
        );
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Inserts a new tag immediately after the sentinel.
    pub fn append(&mut self, tag: &str) -> AppendOutcome {
        let Some(tag) = normalize_new_tag(tag) else {
            debug!("event=tag_append module=tags status=rejected");
            return AppendOutcome::Rejected;
        };
        if self.contains(&tag) {
            debug!("event=tag_append module=tags status=skipped reason=already_known");
            return AppendOutcome::AlreadyKnown(tag);
        }

        self.entries
            .insert(SENTINEL_INDEX + 1, TagEntry::Tag(tag.clone()));
        info!(
            "event=tag_append module=tags status=ok tag_count={}",
            self.tag_count()
        );
        AppendOutcome::Inserted(tag)
    }

    /// All entries including the sentinel.
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Number of entries including the sentinel.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the sentinel is present from construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of real tags.
    pub fn tag_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// Real tags in universe order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(TagEntry::as_tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags().any(|known| known == tag)
    }

    pub fn position(&self, tag: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.as_tag() == Some(tag))
    }

    /// Display labels with the sentinel rendered as `add_new_label`.
    pub fn labels<'a>(&'a self, add_new_label: &'a str) -> Vec<&'a str> {
        self.entries
            .iter()
            .map(|entry| entry.as_tag().unwrap_or(add_new_label))
            .collect()
    }
}

/// Thread-safe handle over one `TagUniverse`.
///
/// `ensure_loaded` and `append` take the write lock, reads take the read
/// lock, so an append is never interleaved with a derive.
#[derive(Debug, Clone, Default)]
pub struct SharedTagUniverse {
    inner: Arc<RwLock<TagUniverse>>,
}

impl SharedTagUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the universe with tags from `fetch` unless already loaded.
    ///
    /// `fetch` runs at most once across all clones of this handle; later
    /// callers observe the populated universe. Returns whether this call
    /// performed the load.
    pub fn ensure_loaded<F, E>(&self, fetch: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<Vec<String>, E>,
    {
        if self.read(TagUniverse::is_loaded) {
            return Ok(false);
        }

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_loaded() {
            return Ok(false);
        }
        let tags = fetch()?;
        Ok(guard.load(tags))
    }

    pub fn append(&self, tag: &str) -> AppendOutcome {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(tag)
    }

    /// Runs `f` against the universe under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&TagUniverse) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Clones the current universe state.
    pub fn snapshot(&self) -> TagUniverse {
        self.read(TagUniverse::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppendOutcome, SharedTagUniverse, TagEntry, TagUniverse};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn tags_of(universe: &TagUniverse) -> Vec<&str> {
        universe.tags().collect()
    }

    #[test]
    fn load_places_sentinel_first_and_keeps_store_order() {
        let mut universe = TagUniverse::new();
        assert!(universe.load(["zoo", "art", "math"]));
        assert_eq!(universe.len(), 4);
        assert_eq!(universe.entries()[0], TagEntry::AddNew);
        assert_eq!(tags_of(&universe), vec!["zoo", "art", "math"]);
    }

    #[test]
    fn second_load_is_noop_and_keeps_appended_tags() {
        let mut universe = TagUniverse::new();
        universe.load(["math"]);
        universe.append("bio");
        assert!(!universe.load(["other"]));
        assert_eq!(tags_of(&universe), vec!["bio", "math"]);
    }

    #[test]
    fn load_skips_empty_and_duplicate_names() {
        let mut universe = TagUniverse::new();
        universe.load(["math", "", "math", "Math"]);
        assert_eq!(tags_of(&universe), vec!["math", "Math"]);
    }

    #[test]
    fn append_rejects_blank_and_reports_known() {
        let mut universe = TagUniverse::new();
        universe.load(["math"]);
        assert_eq!(universe.append(""), AppendOutcome::Rejected);
        assert_eq!(universe.append("   "), AppendOutcome::Rejected);
        assert_eq!(
            universe.append("math"),
            AppendOutcome::AlreadyKnown("math".to_string())
        );
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn labels_render_sentinel() {
        let mut universe = TagUniverse::new();
        universe.load(["math"]);
        assert_eq!(universe.labels("Add new tag"), vec!["Add new tag", "math"]);
    }

    #[test]
    fn shared_universe_fetches_once() {
        let shared = SharedTagUniverse::new();
        let first = shared.ensure_loaded(|| Ok::<_, Infallible>(vec!["math".to_string()]));
        assert_eq!(first, Ok(true));

        shared.append("bio");
        let second: Result<bool, Infallible> =
            shared.ensure_loaded(|| panic!("store must not be queried twice"));
        assert_eq!(second, Ok(false));
        let snapshot = shared.snapshot();
        assert_eq!(tags_of(&snapshot), vec!["bio", "math"]);
    }

    #[test]
    fn concurrent_loads_fetch_once_and_keep_appended_tags() {
        let shared = SharedTagUniverse::new();
        let fetches = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let fetches = Arc::clone(&fetches);
                thread::spawn(move || {
                    shared.ensure_loaded(|| {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, Infallible>(vec!["geo".to_string(), "math".to_string()])
                    })
                })
            })
            .collect();
        let loaded_by_this_call: Vec<bool> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(loaded_by_this_call.iter().filter(|loaded| **loaded).count(), 1);

        shared.append("bio");
        let reload = shared.ensure_loaded(|| {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(Vec::new())
        });
        assert_eq!(reload, Ok(false));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(tags_of(&shared.snapshot()), vec!["bio", "geo", "math"]);
    }
}
