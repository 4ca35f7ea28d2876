//! Commit-or-discard decision for one edit session.
//!
//! # Invariants
//! - `evaluate` is pure: no side effects, same inputs give the same outcome.
//! - Tag strings are compared textually, not as token sets.

/// Aggregated result of an editing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// At least one field or the tag string changed.
    Modified,
    Unchanged,
}

impl SaveOutcome {
    pub fn is_modified(self) -> bool {
        matches!(self, Self::Modified)
    }

    /// Result code reported to whoever opened the editor.
    pub fn result(self) -> EditResult {
        match self {
            Self::Modified => EditResult::Ok,
            Self::Unchanged => EditResult::Canceled,
        }
    }
}

/// Result code handed back to the caller of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// Something was written; the caller should refresh and persist.
    Ok,
    /// Nothing changed, or the user cancelled.
    Canceled,
}

/// Single decision point mapping reconciliation results to an outcome.
pub struct SaveDecision;

impl SaveDecision {
    /// Returns `Modified` if any field changed or the tag string differs.
    pub fn evaluate<I>(field_results: I, original_tags: &str, new_tags: &str) -> SaveOutcome
    where
        I: IntoIterator<Item = bool>,
    {
        let any_field_changed = field_results.into_iter().any(|changed| changed);
        if any_field_changed || original_tags != new_tags {
            SaveOutcome::Modified
        } else {
            SaveOutcome::Unchanged
        }
    }
}
