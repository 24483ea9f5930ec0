//! Per-question answer tracking.

use serde::{Deserialize, Serialize};

use crate::model::AnswerField;

/// The player's current choice for each answer field.
///
/// This type does not check values against the presented options; the
/// session does that before calling [`AnswerState::select`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
    year: Option<String>,
    event: Option<String>,
    relation: Option<String>,
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `field`, replacing any earlier choice.
    pub fn select(&mut self, field: AnswerField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn get(&self, field: AnswerField) -> Option<&str> {
        match field {
            AnswerField::Year => self.year.as_deref(),
            AnswerField::Event => self.event.as_deref(),
            AnswerField::Relation => self.relation.as_deref(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Unanswered fields in display order.
    pub fn missing(&self) -> Vec<AnswerField> {
        AnswerField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot_mut(&mut self, field: AnswerField) -> &mut Option<String> {
        match field {
            AnswerField::Year => &mut self.year,
            AnswerField::Event => &mut self.event,
            AnswerField::Relation => &mut self.relation,
        }
    }
}
