//! In-memory record store.

use super::{collect_distinct_tags, FactStore, StoreError, StoreResult};
use crate::model::fact::{Fact, FactId};
use log::debug;
use std::collections::BTreeMap;

/// Map-backed store keyed by fact id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactStore {
    facts: BTreeMap<FactId, Fact>,
    saves: usize,
}

impl InMemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a fact without counting it as a save.
    pub fn insert(&mut self, fact: Fact) -> FactId {
        let id = fact.id;
        self.facts.insert(id, fact);
        id
    }

    /// Number of successful `save_fact` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl FactStore for InMemoryFactStore {
    fn get_fact(&self, id: FactId) -> StoreResult<Option<Fact>> {
        Ok(self.facts.get(&id).cloned())
    }

    fn save_fact(&mut self, fact: &Fact) -> StoreResult<()> {
        let stored = self
            .facts
            .get_mut(&fact.id)
            .ok_or(StoreError::NotFound(fact.id))?;
        if stored.fields.len() != fact.fields.len() {
            return Err(StoreError::InvalidData(format!(
                "field count mismatch: stored {} got {}",
                stored.fields.len(),
                fact.fields.len()
            )));
        }
        stored.clone_from(fact);
        self.saves += 1;
        debug!(
            "event=fact_save module=store status=ok fact_id={} saves={}",
            fact.id, self.saves
        );
        Ok(())
    }

    fn all_user_tags(&self) -> StoreResult<Vec<String>> {
        Ok(collect_distinct_tags(
            self.facts.values().map(|fact| fact.tags.as_str()),
        ))
    }
}
