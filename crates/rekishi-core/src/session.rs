//! Quiz session orchestration.
//!
//! A [`QuizSession`] owns everything one player's quiz needs: the loaded
//! dataset, the era filter, the active question with its option sets, the
//! answers given so far and the random source. Each operation runs to
//! completion; there is no shared state between sessions.

use std::sync::Arc;

use uuid::Uuid;

use crate::answers::AnswerState;
use crate::error::QuizError;
use crate::filter::filter_by_era;
use crate::grader::{grade, GradeResult};
use crate::model::{AnswerField, Dataset, EraSelection, OptionSet, Record};
use crate::options::{build_options, DEFAULT_MAX_OPTIONS};
use crate::random::{RandomSource, StdRandom};

/// Configuration for a quiz session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Options per answer field, correct value included. Values below 1 are treated as 1.
    pub max_options: usize,
    /// Era filter applied to the first question.
    pub eras: EraSelection,
    /// Seed for the default random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_options: DEFAULT_MAX_OPTIONS,
            eras: EraSelection::all(),
            seed: None,
        }
    }
}

/// The record being asked about and the options shown for it.
#[derive(Debug, Clone)]
pub struct ActiveQuestion {
    record: Record,
    year: OptionSet,
    event: OptionSet,
    relation: OptionSet,
}

impl ActiveQuestion {
    /// Prompt text: the person the question is about.
    pub fn prompt(&self) -> &str {
        &self.record.person
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn options(&self, field: AnswerField) -> &OptionSet {
        match field {
            AnswerField::Year => &self.year,
            AnswerField::Event => &self.event,
            AnswerField::Relation => &self.relation,
        }
    }
}

/// Pick one record uniformly at random.
pub fn select_question<'a, R: RandomSource + ?Sized>(
    pool: &[&'a Record],
    rng: &mut R,
) -> Result<&'a Record, QuizError> {
    if pool.is_empty() {
        return Err(QuizError::EmptyPool);
    }
    Ok(pool[rng.next_index(pool.len())])
}

/// One player's quiz over a loaded dataset.
pub struct QuizSession {
    id: Uuid,
    dataset: Arc<Dataset>,
    max_options: usize,
    eras: EraSelection,
    active: Option<ActiveQuestion>,
    answers: AnswerState,
    last_grade: Option<GradeResult>,
    rng: Box<dyn RandomSource>,
}

impl QuizSession {
    /// Start a session. No question is active until [`next_question`](Self::next_question).
    pub fn new(dataset: Arc<Dataset>, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        };
        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            records = dataset.len(),
            seeded = config.seed.is_some(),
            "quiz session started"
        );

        Self {
            id,
            dataset,
            max_options: config.max_options.max(1),
            eras: config.eras,
            active: None,
            answers: AnswerState::new(),
            last_grade: None,
            rng: Box::new(rng),
        }
    }

    /// Replace the random source.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn eras(&self) -> &EraSelection {
        &self.eras
    }

    pub fn active(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    pub fn answers(&self) -> &AnswerState {
        &self.answers
    }

    /// Result of the most recent submit for the active question.
    pub fn last_grade(&self) -> Option<&GradeResult> {
        self.last_grade.as_ref()
    }

    /// Records that pass the current era filter.
    pub fn pool(&self) -> Vec<&Record> {
        filter_by_era(self.dataset.records(), &self.eras)
    }

    /// Clear the previous grade and answers, then draw a new question.
    ///
    /// On [`QuizError::EmptyPool`] the session is left without an active question.
    pub fn next_question(&mut self) -> Result<&ActiveQuestion, QuizError> {
        self.last_grade = None;
        self.answers.clear();
        self.active = None;

        let dataset = Arc::clone(&self.dataset);
        let pool = filter_by_era(dataset.records(), &self.eras);
        let rng = self.rng.as_mut();

        let record = match select_question(&pool, rng) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    session = %self.id,
                    eras = ?self.eras.labels().collect::<Vec<_>>(),
                    "era filter matched no records"
                );
                return Err(e);
            }
        };

        let mut build = |field: AnswerField| {
            build_options(field, &pool, record.answer(field), self.max_options, rng)
        };
        let year = build(AnswerField::Year);
        let event = build(AnswerField::Event);
        let relation = build(AnswerField::Relation);

        tracing::debug!(
            session = %self.id,
            person = %record.person,
            pool = pool.len(),
            "selected question"
        );

        Ok(self.active.insert(ActiveQuestion {
            record: record.clone(),
            year,
            event,
            relation,
        }))
    }

    /// Replace the era filter and draw a new question from it.
    pub fn apply_filter(&mut self, eras: EraSelection) -> Result<&ActiveQuestion, QuizError> {
        self.eras = eras;
        self.next_question()
    }

    /// Record a choice for `field`. The value must be one of the presented options.
    pub fn select(&mut self, field: AnswerField, value: &str) -> Result<(), QuizError> {
        let active = self.active.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        if !active.options(field).contains(value) {
            return Err(QuizError::NotAnOption {
                field,
                value: value.to_string(),
            });
        }
        self.answers.select(field, value);
        Ok(())
    }

    /// Record a choice by its 1-based position in the displayed option list.
    pub fn select_position(&mut self, field: AnswerField, position: usize) -> Result<&str, QuizError> {
        let active = self.active.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        let options = active.options(field);
        let value = position
            .checked_sub(1)
            .and_then(|idx| options.get(idx))
            .ok_or(QuizError::NoSuchOption {
                field,
                position,
                available: options.len(),
            })?;
        self.answers.select(field, value);
        Ok(value)
    }

    /// Grade the current answers against the active question.
    ///
    /// Incomplete answers are refused with [`QuizError::IncompleteAnswer`] and
    /// leave the session untouched.
    pub fn submit(&mut self) -> Result<GradeResult, QuizError> {
        let active = self.active.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        let result = grade(&self.answers, &active.record)?;
        tracing::debug!(
            session = %self.id,
            correct = result.is_correct,
            "graded answer"
        );
        self.last_grade = Some(result.clone());
        Ok(result)
    }
}
