//! Quiz engine error types.
//!
//! Parse failures and session-level failures are kept apart: a `ParseError`
//! means no dataset could be built, a `QuizError` means a single user action
//! was refused and the session is still usable.

use thiserror::Error;

use crate::model::AnswerField;

/// Errors produced while turning raw delimited text into a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text was empty (or whitespace only), so there is no header line.
    #[error("dataset is empty: no header line found")]
    EmptyInput,

    /// A header name appears more than once.
    #[error("duplicate header column: {0}")]
    DuplicateHeader(String),

    /// A required column is missing from the header line.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A data line does not have one value per header.
    #[error("malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors returned by quiz session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The era filter matched no records.
    #[error("no questions match the current era filter")]
    EmptyPool,

    /// Grading was requested before every field was answered.
    #[error("answer incomplete, still missing: {}", join_fields(.missing))]
    IncompleteAnswer { missing: Vec<AnswerField> },

    /// There is no active question to answer.
    #[error("no active question")]
    NoActiveQuestion,

    /// The value is not one of the options presented for the field.
    #[error("'{value}' is not one of the {field} options")]
    NotAnOption { field: AnswerField, value: String },

    /// An option was picked by a position the option set does not have.
    #[error("{field} has {available} options, there is no option {position}")]
    NoSuchOption {
        field: AnswerField,
        position: usize,
        available: usize,
    },
}

fn join_fields(fields: &[AnswerField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
