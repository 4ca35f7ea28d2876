//! Full editing interaction over one fact.
//!
//! # Responsibility
//! - Route field text intents to per-field sessions.
//! - Drive the tag picker: lazy universe load, toggles, new tags.
//! - Combine reconciliation results into one commit decision.
//!
//! # Invariants
//! - The fact is written only inside `commit`.
//! - The working tag string changes only on picker confirm or new-tag add.
//! - Read-only sessions never write.

use crate::config::EditorConfig;
use crate::decision::{EditResult, SaveDecision, SaveOutcome};
use crate::model::fact::{Fact, FactId};
use crate::session::field_edit::FieldEditSession;
use crate::session::EditSessionError;
use crate::tags::grammar::{parse_tags, TAG_SEPARATOR};
use crate::tags::selection::TagSelectionModel;
use crate::tags::universe::{AppendOutcome, SharedTagUniverse, SENTINEL_INDEX};
use log::{debug, info, warn};

/// What a tag-picker activation resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPick {
    /// A real tag was toggled to `selected`.
    Toggled { index: usize, selected: bool },
    /// Sentinel activated; caller should prompt for new tag text.
    AddNewRequested,
    /// Index out of range; nothing changed.
    Ignored,
}

/// Summary of a committed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub fact_id: FactId,
    pub outcome: SaveOutcome,
    /// Ordinals of fields whose value was written back.
    pub changed_fields: Vec<u32>,
    pub tags_changed: bool,
}

impl CommitReport {
    pub fn result(&self) -> EditResult {
        self.outcome.result()
    }
}

/// Transient state for editing one fact.
#[derive(Debug)]
pub struct FactEditSession<'f> {
    fact_id: FactId,
    fields: Vec<FieldEditSession<'f>>,
    tags: &'f mut String,
    original_tags: String,
    working_tags: String,
    universe: SharedTagUniverse,
    picker: Option<TagSelectionModel>,
    read_only: bool,
}

impl<'f> FactEditSession<'f> {
    /// Opens a session; the fact stays untouched until `commit`.
    pub fn open(fact: &'f mut Fact, universe: SharedTagUniverse, config: &EditorConfig) -> Self {
        let Fact { id, fields, tags } = fact;
        let fields: Vec<FieldEditSession<'f>> =
            fields.iter_mut().map(FieldEditSession::open).collect();
        let read_only = !config.commit_allowed();

        info!(
            "event=edit_session_open module=session status=ok fact_id={} field_count={} read_only={}",
            id,
            fields.len(),
            read_only
        );

        Self {
            fact_id: *id,
            fields,
            original_tags: tags.clone(),
            working_tags: tags.clone(),
            tags,
            universe,
            picker: None,
            read_only,
        }
    }

    pub fn fact_id(&self) -> FactId {
        self.fact_id
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn fields(&self) -> &[FieldEditSession<'f>] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Result<&FieldEditSession<'f>, EditSessionError> {
        let len = self.fields.len();
        self.fields
            .get(index)
            .ok_or(EditSessionError::FieldIndexOutOfRange { index, len })
    }

    /// Replaces the working text of one field.
    pub fn set_field_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EditSessionError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(EditSessionError::FieldIndexOutOfRange { index, len })?;
        field.set_working(text);
        Ok(())
    }

    /// Tag string as stored when the session opened.
    pub fn original_tags(&self) -> &str {
        &self.original_tags
    }

    /// Tag string that `commit` would write.
    pub fn working_tags(&self) -> &str {
        &self.working_tags
    }

    /// Opens the tag picker, loading the universe via `fetch` if needed.
    ///
    /// `fetch` is only called when the shared universe is still unloaded.
    /// Re-opening discards unconfirmed toggles.
    pub fn open_tag_picker<F, E>(&mut self, fetch: F) -> Result<&TagSelectionModel, E>
    where
        F: FnOnce() -> Result<Vec<String>, E>,
    {
        self.universe.ensure_loaded(fetch)?;
        let working = self.working_tags.as_str();
        let model = self
            .universe
            .read(|universe| TagSelectionModel::derive(working, universe));
        debug!(
            "event=tag_picker_open module=session status=ok fact_id={} entries={}",
            self.fact_id,
            model.len()
        );
        Ok(&*self.picker.insert(model))
    }

    pub fn tag_picker(&self) -> Option<&TagSelectionModel> {
        self.picker.as_ref()
    }

    /// Activates one picker entry.
    ///
    /// The sentinel is never toggled; it resolves to `AddNewRequested`.
    pub fn pick_tag(&mut self, index: usize) -> Result<TagPick, EditSessionError> {
        let picker = self
            .picker
            .as_mut()
            .ok_or(EditSessionError::TagPickerClosed)?;
        if index == SENTINEL_INDEX {
            return Ok(TagPick::AddNewRequested);
        }
        Ok(match picker.toggle(index) {
            Some(selected) => TagPick::Toggled { index, selected },
            None => TagPick::Ignored,
        })
    }

    /// Accepts the picker selection as the new working tag string.
    pub fn confirm_tag_picker(&mut self) -> Result<&str, EditSessionError> {
        let picker = self.picker.take().ok_or(EditSessionError::TagPickerClosed)?;
        self.working_tags = picker.serialize();
        debug!(
            "event=tag_picker_confirm module=session status=ok fact_id={} selected={}",
            self.fact_id,
            picker.selected_tags().len()
        );
        Ok(&self.working_tags)
    }

    /// Closes the picker without changing the working tag string.
    pub fn cancel_tag_picker(&mut self) {
        if self.picker.take().is_some() {
            debug!(
                "event=tag_picker_cancel module=session status=ok fact_id={}",
                self.fact_id
            );
        }
    }

    /// Creates a tag, selects it and re-derives the open picker.
    ///
    /// Rejected input leaves every piece of state unchanged. The picker is
    /// rebuilt from the working tag string, so unconfirmed toggles are lost.
    pub fn add_new_tag(&mut self, text: &str) -> AppendOutcome {
        let outcome = self.universe.append(text);
        let Some(tag) = outcome.tag() else {
            return outcome;
        };

        if !parse_tags(&self.working_tags).iter().any(|known| known == tag) {
            if self.working_tags.trim().is_empty() {
                self.working_tags = tag.to_string();
            } else {
                self.working_tags.push_str(TAG_SEPARATOR);
                self.working_tags.push_str(tag);
            }
        }

        if self.picker.is_some() {
            let working = self.working_tags.as_str();
            let model = self
                .universe
                .read(|universe| TagSelectionModel::derive(working, universe));
            self.picker = Some(model);
        }
        outcome
    }

    /// Reconciles every field and the tag string into the fact.
    pub fn commit(mut self) -> Result<CommitReport, EditSessionError> {
        if self.read_only {
            warn!(
                "event=edit_session_commit module=session status=rejected fact_id={} reason=read_only",
                self.fact_id
            );
            return Err(EditSessionError::ReadOnly);
        }

        let mut results = Vec::with_capacity(self.fields.len());
        let mut changed_fields = Vec::new();
        for field in &mut self.fields {
            let changed = field.reconcile();
            if changed {
                changed_fields.push(field.ordinal());
            }
            results.push(changed);
        }

        let tags_changed = *self.tags != self.working_tags;
        if tags_changed {
            self.tags.clone_from(&self.working_tags);
        }

        let outcome = SaveDecision::evaluate(results, &self.original_tags, &self.working_tags);
        info!(
            "event=edit_session_commit module=session status=ok fact_id={} changed_fields={} tags_changed={} modified={}",
            self.fact_id,
            changed_fields.len(),
            tags_changed,
            outcome.is_modified()
        );
        Ok(CommitReport {
            fact_id: self.fact_id,
            outcome,
            changed_fields,
            tags_changed,
        })
    }

    /// Ends the session without writing anything.
    pub fn discard(self) -> EditResult {
        info!(
            "event=edit_session_discard module=session status=ok fact_id={}",
            self.fact_id
        );
        EditResult::Canceled
    }
}

#[cfg(test)]
mod tests {
    use super::{FactEditSession, TagPick};
    use crate::config::EditorConfig;
    use crate::model::fact::{Fact, Field};
    use crate::session::EditSessionError;
    use crate::tags::universe::SharedTagUniverse;
    use std::convert::Infallible;

    fn fact() -> Fact {
        Fact::new(
            vec![Field::new("Front", 0, "France"), Field::new("Back", 1, "Paris")],
            "geo",
        )
    }

    fn store_tags() -> Result<Vec<String>, Infallible> {
        Ok(vec!["geo".to_string(), "math".to_string()])
    }

    #[test]
    fn pick_requires_open_picker() {
        let mut fact = fact();
        let mut session =
            FactEditSession::open(&mut fact, SharedTagUniverse::new(), &EditorConfig::default());
        assert_eq!(session.pick_tag(1), Err(EditSessionError::TagPickerClosed));
        assert!(session.confirm_tag_picker().is_err());
    }

    #[test]
    fn sentinel_pick_requests_new_tag() {
        let mut fact = fact();
        let mut session =
            FactEditSession::open(&mut fact, SharedTagUniverse::new(), &EditorConfig::default());
        session.open_tag_picker(store_tags).unwrap();
        assert_eq!(session.pick_tag(0), Ok(TagPick::AddNewRequested));
        assert_eq!(session.pick_tag(9), Ok(TagPick::Ignored));
        assert_eq!(
            session.pick_tag(2),
            Ok(TagPick::Toggled {
                index: 2,
                selected: true
            })
        );
    }

    #[test]
    fn add_new_tag_rederives_picker_from_working_tags() {
        let mut fact = fact();
        let mut session =
            FactEditSession::open(&mut fact, SharedTagUniverse::new(), &EditorConfig::default());
        session.open_tag_picker(store_tags).unwrap();
        // universe: [sentinel, geo, math]; unconfirmed uncheck of geo
        session.pick_tag(1).unwrap();

        session.add_new_tag("bio");
        assert_eq!(session.working_tags(), "geo, bio");
        let picker = session.tag_picker().unwrap();
        // universe: [sentinel, bio, geo, math]
        assert_eq!(picker.checked(), &[false, true, true, false]);
        assert_eq!(picker.serialize(), "bio, geo");
        assert_eq!(session.confirm_tag_picker().unwrap(), "bio, geo");
    }

    #[test]
    fn field_index_out_of_range_is_reported() {
        let mut fact = fact();
        let mut session =
            FactEditSession::open(&mut fact, SharedTagUniverse::new(), &EditorConfig::default());
        assert_eq!(
            session.set_field_text(5, "x"),
            Err(EditSessionError::FieldIndexOutOfRange { index: 5, len: 2 })
        );
    }
}
