//! Edit sessions over one fact.
//!
//! # Responsibility
//! - Hold working copies of field text and the tag string while editing.
//! - Write back to the fact only on commit.
//!
//! # Invariants
//! - A session borrows its fact; nothing outlives the session.
//! - Dropping a session without committing leaves the fact untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fact_edit;
pub mod field_edit;

/// Error for edit-session intents that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSessionError {
    /// Session was opened read-only (display transform active).
    ReadOnly,
    /// Field index does not exist in the fact.
    FieldIndexOutOfRange { index: usize, len: usize },
    /// Tag intent received while the tag picker is not open.
    TagPickerClosed,
}

impl Display for EditSessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "edit session is read-only; commit is disabled"),
            Self::FieldIndexOutOfRange { index, len } => {
                write!(f, "field index {index} out of range for {len} fields")
            }
            Self::TagPickerClosed => write!(f, "tag picker is not open"),
        }
    }
}

impl Error for EditSessionError {}
