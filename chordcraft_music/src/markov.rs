// Degree-transition sampling over a style's Markov matrix.
//
// A row lists weighted targets for the current degree index. Sampling draws
// one uniform value and walks the row in listed order, returning the first
// target whose running sum reaches the draw. Rows are not renormalized: a
// row whose weights sum below 1.0 can be overshot by the draw, in which case
// the last listed target is taken. A row summing above 1.0 simply never
// reaches its final weights in full.
//
// A degree with no row at all falls back to a uniform pick among the seven
// heptatonic indices, nudged once (+1 mod 7) if it lands on the current one.

use crate::style::{Transition, TransitionMatrix};
use chordcraft_prng::RandomSource;
use tracing::trace;

/// Number of indices the uniform fallback chooses among.
pub const FALLBACK_DEGREES: usize = 7;

/// Pick a target from `row` for a draw in `[0, 1)`.
///
/// Returns `None` only for an empty row.
pub fn sample_row(row: &[Transition], draw: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for t in row {
        cumulative += t.probability;
        if cumulative >= draw {
            return Some(t.to);
        }
    }
    row.last().map(|t| t.to)
}

/// Uniform choice in `0..7`, avoiding `current` with a single +1 retry.
pub fn uniform_fallback(current: usize, rng: &mut impl RandomSource) -> usize {
    let pick = rng.pick_index(FALLBACK_DEGREES);
    if pick == current {
        (pick + 1) % FALLBACK_DEGREES
    } else {
        pick
    }
}

/// The degree index that follows `current` under `matrix`.
pub fn next_degree(matrix: &TransitionMatrix, current: usize, rng: &mut impl RandomSource) -> usize {
    let sampled = matrix
        .row(current)
        .and_then(|row| sample_row(row, rng.next_f64()));
    match sampled {
        Some(next) => next,
        None => {
            let next = uniform_fallback(current, rng);
            trace!(current, next, "no transition row, uniform fallback");
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcraft_prng::{ChordRng, ScriptedRandom};

    fn row(targets: &[(usize, f64)]) -> Vec<Transition> {
        targets
            .iter()
            .map(|&(to, probability)| Transition { to, probability })
            .collect()
    }

    #[test]
    fn zero_draw_takes_first_key() {
        let r = row(&[(4, 0.3), (5, 0.3), (3, 0.4)]);
        assert_eq!(sample_row(&r, 0.0), Some(4));
    }

    #[test]
    fn walks_in_listed_order() {
        let r = row(&[(4, 0.3), (5, 0.3), (3, 0.4)]);
        assert_eq!(sample_row(&r, 0.3), Some(4)); // cumulative >= draw, inclusive
        assert_eq!(sample_row(&r, 0.31), Some(5));
        assert_eq!(sample_row(&r, 0.61), Some(3));
    }

    #[test]
    fn underflowing_row_falls_back_to_last_key() {
        let r = row(&[(3, 0.5), (4, 0.3), (0, 0.15)]);
        assert_eq!(sample_row(&r, 0.97), Some(0));
    }

    #[test]
    fn overflowing_row_never_errors() {
        let r = row(&[(5, 0.6), (3, 0.6)]);
        assert_eq!(sample_row(&r, 0.99), Some(3));
    }

    #[test]
    fn empty_row_is_none() {
        assert_eq!(sample_row(&[], 0.5), None);
    }

    #[test]
    fn fallback_avoids_current_with_single_retry() {
        // always_last picks index 6
        let mut rng = ScriptedRandom::always_last();
        assert_eq!(uniform_fallback(6, &mut rng), 0);
        assert_eq!(uniform_fallback(3, &mut rng), 6);
        let mut rng = ScriptedRandom::always_first();
        assert_eq!(uniform_fallback(0, &mut rng), 1);
    }

    #[test]
    fn missing_row_uses_fallback() {
        let matrix = TransitionMatrix::new().with_row(0, &[(1, 1.0)]);
        let mut rng = ChordRng::new(11);
        for _ in 0..200 {
            let next = next_degree(&matrix, 3, &mut rng);
            assert!(next < FALLBACK_DEGREES);
            assert_ne!(next, 3);
        }
    }

    #[test]
    fn present_row_consumes_one_draw() {
        let matrix = TransitionMatrix::new().with_row(0, &[(1, 0.5), (2, 0.5)]);
        let mut rng = ScriptedRandom::new(vec![0.9, 0.1]);
        assert_eq!(next_degree(&matrix, 0, &mut rng), 2);
        assert_eq!(next_degree(&matrix, 0, &mut rng), 1);
        assert_eq!(rng.consumed(), 2);
    }
}
