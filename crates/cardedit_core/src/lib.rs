//! Core editing logic for card facts.
//! This crate is the single source of truth for edit-session invariants:
//! field dirty tracking, tag-set synchronization and the commit decision.

pub mod config;
pub mod decision;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;
pub mod store;
pub mod tags;

pub use config::{ConfigError, EditorConfig};
pub use decision::{EditResult, SaveDecision, SaveOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::fact::{Fact, FactId, FactValidationError, Field, FieldDefinition};
pub use service::editor_service::{EditorService, EditorServiceError, SessionAction};
pub use session::fact_edit::{CommitReport, FactEditSession, TagPick};
pub use session::field_edit::{DisplayTransform, FieldEditSession};
pub use session::EditSessionError;
pub use store::{FactStore, InMemoryFactStore, StoreError, StoreResult};
pub use tags::grammar::{join_tags, parse_tags, TAG_SEPARATOR};
pub use tags::selection::TagSelectionModel;
pub use tags::universe::{AppendOutcome, SharedTagUniverse, TagEntry, TagUniverse};

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
