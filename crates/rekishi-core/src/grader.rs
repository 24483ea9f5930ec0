//! Answer grading.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerState;
use crate::error::QuizError;
use crate::model::{AnswerField, Record};

/// The true answers for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectValues {
    pub year: String,
    pub event: String,
    pub relation: String,
}

impl CorrectValues {
    pub fn from_record(record: &Record) -> Self {
        Self {
            year: record.year.clone(),
            event: record.event.clone(),
            relation: record.relation.clone(),
        }
    }
}

/// Outcome of grading one complete answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub is_correct: bool,
    pub correct_values: CorrectValues,
    /// Fields whose selection differed from the true value.
    pub wrong_fields: Vec<AnswerField>,
}

impl fmt::Display for GradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_correct {
            write!(f, "Correct!")
        } else {
            let c = &self.correct_values;
            write!(
                f,
                "Incorrect. The correct answer is {}, {}, {}.",
                c.year, c.event, c.relation
            )
        }
    }
}

/// Compare `answers` with `question` using exact string equality.
///
/// Returns [`QuizError::IncompleteAnswer`] without grading if any field is unset.
pub fn grade(answers: &AnswerState, question: &Record) -> Result<GradeResult, QuizError> {
    let missing = answers.missing();
    if !missing.is_empty() {
        return Err(QuizError::IncompleteAnswer { missing });
    }

    let wrong_fields: Vec<AnswerField> = AnswerField::ALL
        .into_iter()
        .filter(|f| answers.get(*f) != Some(question.answer(*f)))
        .collect();

    Ok(GradeResult {
        is_correct: wrong_fields.is_empty(),
        correct_values: CorrectValues::from_record(question),
        wrong_fields,
    })
}
