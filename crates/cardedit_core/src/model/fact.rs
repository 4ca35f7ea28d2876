//! Fact domain model.
//!
//! # Responsibility
//! - Define the content record ("fact") that cards are generated from.
//! - Keep fields ordered by their definition ordinal.
//!
//! # Invariants
//! - `id` is stable and never reused for another fact.
//! - `fields` are sorted by `definition.ordinal`, ordinals are unique, and
//!   fields are never added/removed during an edit session.
//! - Deserialized facts go through the same ordering and validation.
//! - `tags` is the raw tag string as stored, not normalized here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every fact known by the record store.
pub type FactId = Uuid;

/// Field definition shared by every fact of the same model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Display name shown as the field label.
    pub name: String,
    /// Position of the field inside its fact.
    pub ordinal: u32,
}

/// One named text value owned by a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub definition: FieldDefinition,
    /// Current persisted text. Any value, including empty, is valid.
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ordinal: u32, value: impl Into<String>) -> Self {
        Self {
            definition: FieldDefinition {
                name: name.into(),
                ordinal,
            },
            value: value.into(),
        }
    }

    /// Display name from the field definition.
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Validation error for externally supplied fact data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactValidationError {
    NilId,
    DuplicateOrdinal(u32),
}

impl Display for FactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "fact id must not be nil"),
            Self::DuplicateOrdinal(ordinal) => {
                write!(f, "field ordinal {ordinal} appears more than once")
            }
        }
    }
}

impl Error for FactValidationError {}

/// Content record underlying one or more displayable cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FactWire")]
pub struct Fact {
    pub id: FactId,
    pub fields: Vec<Field>,
    /// Comma separated tag string, as persisted by the record store.
    pub tags: String,
}

impl Fact {
    /// Creates a fact with a generated stable ID.
    ///
    /// Fields are reordered by ordinal so iteration order matches the model.
    pub fn new(fields: Vec<Field>, tags: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), fields, tags)
    }

    /// Creates a fact with a caller-provided stable ID.
    ///
    /// Used by stores that already own the identity.
    pub fn with_id(id: FactId, mut fields: Vec<Field>, tags: impl Into<String>) -> Self {
        fields.sort_by_key(|field| field.definition.ordinal);
        Self {
            id,
            fields,
            tags: tags.into(),
        }
    }

    /// Checks id and ordinal uniqueness.
    ///
    /// Assumes fields are already sorted, as every constructor leaves them.
    pub fn validate(&self) -> Result<(), FactValidationError> {
        if self.id.is_nil() {
            return Err(FactValidationError::NilId);
        }
        for pair in self.fields.windows(2) {
            if pair[0].definition.ordinal == pair[1].definition.ordinal {
                return Err(FactValidationError::DuplicateOrdinal(
                    pair[0].definition.ordinal,
                ));
            }
        }
        Ok(())
    }

    /// Looks up a field by its display name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }
}

#[derive(Deserialize)]
struct FactWire {
    id: FactId,
    fields: Vec<Field>,
    tags: String,
}

impl TryFrom<FactWire> for Fact {
    type Error = FactValidationError;

    fn try_from(value: FactWire) -> Result<Self, Self::Error> {
        let fact = Self::with_id(value.id, value.fields, value.tags);
        fact.validate()?;
        Ok(fact)
    }
}

#[cfg(test)]
mod tests {
    use super::{Fact, Field};

    #[test]
    fn fact_new_orders_fields_by_ordinal() {
        let fact = Fact::new(
            vec![Field::new("Back", 1, "Paris"), Field::new("Front", 0, "France")],
            "geo",
        );
        let names: Vec<&str> = fact.fields.iter().map(Field::name).collect();
        assert_eq!(names, vec!["Front", "Back"]);
        assert!(!fact.id.is_nil());
    }

    #[test]
    fn field_lookup_by_name() {
        let fact = Fact::new(vec![Field::new("Front", 0, "France")], "");
        assert_eq!(fact.field("Front").map(|f| f.value.as_str()), Some("France"));
        assert!(fact.field("Missing").is_none());
    }
}
