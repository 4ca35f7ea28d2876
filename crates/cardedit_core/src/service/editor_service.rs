//! Fact editing use-case service.
//!
//! # Responsibility
//! - Load facts from the record store and open edit sessions on them.
//! - Feed the shared tag universe from the store, once.
//! - Persist a committed fact only when something was modified.
//!
//! # Invariants
//! - The store never receives a write for discarded or unchanged sessions.
//! - One tag universe is shared by every session this service opens.

use crate::config::EditorConfig;
use crate::decision::EditResult;
use crate::model::fact::{Fact, FactId};
use crate::session::fact_edit::{CommitReport, FactEditSession};
use crate::session::EditSessionError;
use crate::store::{FactStore, StoreError};
use crate::tags::selection::TagSelectionModel;
use crate::tags::universe::SharedTagUniverse;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for fact editing use-cases.
#[derive(Debug)]
pub enum EditorServiceError {
    /// Target fact does not exist.
    FactNotFound(FactId),
    /// Record store failure.
    Store(StoreError),
    /// Intent rejected by the edit session.
    Session(EditSessionError),
}

impl Display for EditorServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactNotFound(id) => write!(f, "fact not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::FactNotFound(_) => None,
        }
    }
}

impl From<StoreError> for EditorServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::FactNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<EditSessionError> for EditorServiceError {
    fn from(value: EditSessionError) -> Self {
        Self::Session(value)
    }
}

/// How the caller ended an editing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Commit,
    Discard,
}

/// Editor facade over a record store implementation.
pub struct EditorService<S: FactStore> {
    store: S,
    universe: SharedTagUniverse,
    config: EditorConfig,
}

impl<S: FactStore> EditorService<S> {
    /// Creates a service with a fresh, unloaded tag universe.
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self {
            store,
            universe: SharedTagUniverse::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle to the tag universe shared by this service's sessions.
    pub fn universe(&self) -> &SharedTagUniverse {
        &self.universe
    }

    /// Loads a fact by stable ID.
    pub fn load_fact(&self, id: FactId) -> Result<Fact, EditorServiceError> {
        self.store
            .get_fact(id)?
            .ok_or(EditorServiceError::FactNotFound(id))
    }

    /// Opens an edit session over a caller-owned fact.
    pub fn open_session<'f>(&self, fact: &'f mut Fact) -> FactEditSession<'f> {
        FactEditSession::open(fact, self.universe.clone(), &self.config)
    }

    /// Opens the session's tag picker, loading store tags on first use.
    pub fn open_tag_picker<'s>(
        &self,
        session: &'s mut FactEditSession<'_>,
    ) -> Result<&'s TagSelectionModel, EditorServiceError> {
        let store = &self.store;
        Ok(session.open_tag_picker(|| store.all_user_tags())?)
    }

    /// Writes a committed fact back when the report says it was modified.
    pub fn persist(
        &mut self,
        fact: &Fact,
        report: &CommitReport,
    ) -> Result<EditResult, EditorServiceError> {
        if !report.outcome.is_modified() {
            info!(
                "event=fact_persist module=service status=skipped fact_id={} reason=unchanged",
                fact.id
            );
            return Ok(EditResult::Canceled);
        }

        if let Err(err) = self.store.save_fact(fact) {
            error!(
                "event=fact_persist module=service status=error fact_id={} error={}",
                fact.id, err
            );
            return Err(err.into());
        }
        info!(
            "event=fact_persist module=service status=ok fact_id={}",
            fact.id
        );
        Ok(EditResult::Ok)
    }

    /// Runs one full edit interaction against a stored fact.
    ///
    /// `edit` applies user intents and decides whether to commit. The store
    /// is written only for a committed, modified session.
    pub fn edit_fact<F>(&mut self, id: FactId, edit: F) -> Result<EditResult, EditorServiceError>
    where
        F: FnOnce(&mut FactEditSession<'_>, &Self) -> Result<SessionAction, EditorServiceError>,
    {
        let mut fact = self.load_fact(id)?;
        let report = {
            let mut session = self.open_session(&mut fact);
            match edit(&mut session, self)? {
                SessionAction::Commit => session.commit()?,
                SessionAction::Discard => return Ok(session.discard()),
            }
        };
        self.persist(&fact, &report)
    }
}
