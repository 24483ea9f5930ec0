//! Injectable randomness.
//!
//! Question selection and option shuffling both go through [`RandomSource`]
//! so that sessions can run on a seeded generator in production and on a
//! fixed index sequence in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed indices.
pub trait RandomSource: Send {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Pick a uniformly random element, `None` for an empty slice.
pub fn choose<'a, T, R: RandomSource + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// `rand`'s standard generator, optionally seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct StdRandom(StdRng);

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RandomSource for StdRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of values, each reduced modulo the requested bound.
///
/// The list wraps around when exhausted; an empty list always yields 0.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: Vec<usize>,
    pos: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, pos: 0 }
    }

    /// A source that always answers 0.
    pub fn zeros() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedSequence {
    fn next_index(&mut self, len: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_wraps_and_reduces() {
        let mut seq = FixedSequence::new(vec![7, 1]);
        assert_eq!(seq.next_index(3), 1);
        assert_eq!(seq.next_index(3), 1);
        assert_eq!(seq.next_index(5), 2);
    }

    #[test]
    fn identity_shuffle_with_matching_indices() {
        // At step i the swap partner equals i, so nothing moves.
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut seq = FixedSequence::new(vec![3, 2, 1]);
        shuffle(&mut items, &mut seq);
        assert_eq!(items, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn zero_shuffle_rotates_left() {
        let mut items = vec![1, 2, 3];
        shuffle(&mut items, &mut FixedSequence::zeros());
        // i=2 swaps with 0 -> [3,2,1]; i=1 swaps with 0 -> [2,3,1]
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        let xs: Vec<usize> = (0..16).map(|_| a.next_index(100)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.next_index(100)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 100));
    }

    #[test]
    fn choose_handles_empty_and_picks_by_index() {
        let empty: [u8; 0] = [];
        assert!(choose(&empty, &mut FixedSequence::zeros()).is_none());
        let items = ["x", "y", "z"];
        assert_eq!(choose(&items, &mut FixedSequence::new(vec![2])), Some(&"z"));
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = StdRandom::seeded(7);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
