//! Domain model for editable facts.
//!
//! # Responsibility
//! - Define the record shape shared by the record store and edit sessions.
//!
//! # Invariants
//! - Every fact is identified by a stable `FactId`.
//! - Field membership and order are fixed while an edit session is open.

pub mod fact;
