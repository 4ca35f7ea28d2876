//! Dirty tracking for a single field.
//!
//! # Responsibility
//! - Capture a field's value as the session baseline.
//! - Keep user edits in a working value until reconciliation.
//!
//! # Invariants
//! - The field is only written by `reconcile`, never by `set_working`.
//! - `reconcile` is idempotent: a repeat call reports no change.
//! - Display transforms never reach the working value.

use crate::model::fact::Field;
use std::borrow::Cow;

/// Display-only text transform, e.g. locale-specific reshaping.
pub trait DisplayTransform {
    fn apply(&self, text: &str) -> String;
}

impl<F> DisplayTransform for F
where
    F: Fn(&str) -> String,
{
    fn apply(&self, text: &str) -> String {
        self(text)
    }
}

/// Working copy of one field for the lifetime of an edit session.
#[derive(Debug)]
pub struct FieldEditSession<'f> {
    field: &'f mut Field,
    original: String,
    working: String,
}

impl<'f> FieldEditSession<'f> {
    /// Captures the field's current value as baseline and working value.
    pub fn open(field: &'f mut Field) -> Self {
        let original = field.value.clone();
        Self {
            working: original.clone(),
            original,
            field,
        }
    }

    /// Field definition name used as the editor label.
    pub fn label(&self) -> &str {
        self.field.name()
    }

    pub fn ordinal(&self) -> u32 {
        self.field.definition.ordinal
    }

    /// Value captured when the session was opened.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn working(&self) -> &str {
        &self.working
    }

    /// Replaces the working value. The field itself is not touched.
    pub fn set_working(&mut self, value: impl Into<String>) {
        self.working = value.into();
    }

    /// Whether the working value differs from the field's current value.
    pub fn is_dirty(&self) -> bool {
        self.working != self.field.value
    }

    /// Writes the working value back when it differs from the field.
    ///
    /// Returns whether a write happened.
    pub fn reconcile(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        self.field.value.clone_from(&self.working);
        true
    }

    /// Text to render on screen; the working value is left as is.
    pub fn display_text(&self, transform: Option<&dyn DisplayTransform>) -> Cow<'_, str> {
        match transform {
            Some(transform) => Cow::Owned(transform.apply(&self.working)),
            None => Cow::Borrowed(self.working.as_str()),
        }
    }
}
