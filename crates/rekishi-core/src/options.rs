//! Distractor generation.
//!
//! For each answer field the player sees the correct value mixed with up to
//! `max_options - 1` wrong values drawn from the same field across the
//! current question pool.

use std::collections::HashSet;

use crate::model::{AnswerField, OptionSet, Record};
use crate::random::{shuffle, RandomSource};

/// Options shown per field: five distractors plus the correct value.
pub const DEFAULT_MAX_OPTIONS: usize = 6;

/// Distinct values of `field` across `pool`, in order of first appearance.
pub fn distinct_values<'a>(pool: &[&'a Record], field: AnswerField) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    pool.iter()
        .map(|r| r.answer(field))
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Build the shuffled option set for one field.
///
/// Algorithm:
/// 1. Collect the distinct values of `field` in `pool`
/// 2. Drop `correct` to get the wrong-value pool
/// 3. Shuffle it and keep at most `max_options - 1` values
/// 4. Add `correct` and shuffle again
///
/// Small pools give fewer options; the result always holds `correct` exactly once.
pub fn build_options<R: RandomSource + ?Sized>(
    field: AnswerField,
    pool: &[&Record],
    correct: &str,
    max_options: usize,
    rng: &mut R,
) -> OptionSet {
    let mut wrong: Vec<&str> = distinct_values(pool, field)
        .into_iter()
        .filter(|v| *v != correct)
        .collect();

    shuffle(&mut wrong, rng);
    wrong.truncate(max_options.saturating_sub(1));

    let mut values: Vec<String> = wrong.into_iter().map(str::to_string).collect();
    values.push(correct.to_string());
    shuffle(&mut values, rng);

    OptionSet::new(field, values)
}
