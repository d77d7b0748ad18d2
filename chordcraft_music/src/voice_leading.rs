// Greedy voice-leading optimizer.
//
// For each chord, nine candidate voicings are generated: three inversions
// (root position, then the lowest note rotated up an octave, twice) times
// three octave placements (as-is, down 12, up 12). Candidates that leave the
// playable range F2-C6 (41..=84) are discarded, never clamped.
//
// The first chord takes the candidate whose mean pitch sits closest to middle
// C. Every later chord takes the candidate minimizing
//
//     sum over shared voices of (curr[i] - prev[i])^2
//     + 5 if the chords have different sizes
//     + 0.1 * (mean(curr) - 60)^2
//
// with both chords sorted ascending. Squared movement prefers many small
// steps over one leap; the centering term keeps long sequences from drifting
// out of register. Ties keep the earliest candidate in generation order.
//
// The choice is greedy: each chord is optimal only relative to the chord
// chosen before it. A chord with no in-range candidate keeps its original
// pitches.

use tracing::debug;

/// F2.
pub const PLAYABLE_LOW: u8 = 41;
/// C6.
pub const PLAYABLE_HIGH: u8 = 84;
/// Middle C, the register the optimizer gravitates to.
pub const CENTER_PITCH: f64 = 60.0;

const SIZE_MISMATCH_PENALTY: f64 = 5.0;
const CENTERING_WEIGHT: f64 = 0.1;
const INVERSION_COUNT: usize = 3;
const OCTAVE_SHIFTS: [i16; 3] = [0, -12, 12];

/// Root position plus two successive "lowest note up an octave" rotations.
/// Always three, whatever the chord size.
pub fn inversions(pitches: &[u8]) -> Vec<Vec<i16>> {
    let mut current: Vec<i16> = pitches.iter().map(|&p| i16::from(p)).collect();
    current.sort_unstable();
    let mut result = Vec::with_capacity(INVERSION_COUNT);
    for _ in 0..INVERSION_COUNT {
        result.push(current.clone());
        if current.is_empty() {
            continue;
        }
        let lowest = current.remove(0);
        current.push(lowest + 12);
    }
    result
}

/// The in-range candidates for one chord, in generation order.
pub fn candidates(pitches: &[u8]) -> Vec<Vec<u8>> {
    if pitches.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for inversion in inversions(pitches) {
        for shift in OCTAVE_SHIFTS {
            let shifted: Vec<i16> = inversion.iter().map(|&p| p + shift).collect();
            if in_playable_range(&shifted) {
                out.push(shifted.into_iter().map(|p| p as u8).collect());
            }
        }
    }
    out
}

fn in_playable_range(pitches: &[i16]) -> bool {
    let low = pitches.iter().copied().min();
    let high = pitches.iter().copied().max();
    matches!((low, high), (Some(lo), Some(hi))
        if lo >= i16::from(PLAYABLE_LOW) && hi <= i16::from(PLAYABLE_HIGH))
}

/// Arithmetic mean; 0 for an empty chord.
pub fn mean_pitch(pitches: &[u8]) -> f64 {
    if pitches.is_empty() {
        return 0.0;
    }
    pitches.iter().map(|&p| f64::from(p)).sum::<f64>() / pitches.len() as f64
}

/// Cost of moving from `prev` to `curr`.
pub fn transition_cost(prev: &[u8], curr: &[u8]) -> f64 {
    let mut prev_sorted = prev.to_vec();
    prev_sorted.sort_unstable();
    let mut curr_sorted = curr.to_vec();
    curr_sorted.sort_unstable();

    let movement: f64 = prev_sorted
        .iter()
        .zip(&curr_sorted)
        .map(|(&p, &c)| {
            let d = f64::from(c) - f64::from(p);
            d * d
        })
        .sum();
    let mismatch = if prev.len() != curr.len() {
        SIZE_MISMATCH_PENALTY
    } else {
        0.0
    };
    let drift = mean_pitch(curr) - CENTER_PITCH;
    movement + mismatch + CENTERING_WEIGHT * drift * drift
}

/// Voice-lead a sequence of raw chord pitch sets.
pub fn optimize(sequence: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let mut result: Vec<Vec<u8>> = Vec::with_capacity(sequence.len());
    for (i, chord) in sequence.iter().enumerate() {
        let options = candidates(chord);
        let chosen = match result.last() {
            None => closest_to_center(options),
            Some(prev) => cheapest_from(prev, options),
        };
        match chosen {
            Some(voicing) => result.push(voicing),
            None => {
                debug!(index = i, ?chord, "no playable voicing, keeping original pitches");
                result.push(chord.clone());
            }
        }
    }
    result
}

fn closest_to_center(options: Vec<Vec<u8>>) -> Option<Vec<u8>> {
    pick_min(options, |c| (mean_pitch(c) - CENTER_PITCH).abs())
}

fn cheapest_from(prev: &[u8], options: Vec<Vec<u8>>) -> Option<Vec<u8>> {
    pick_min(options, |c| transition_cost(prev, c))
}

/// First candidate with the strictly smallest score.
fn pick_min(options: Vec<Vec<u8>>, score: impl Fn(&[u8]) -> f64) -> Option<Vec<u8>> {
    let mut best: Option<(f64, Vec<u8>)> = None;
    for candidate in options {
        let s = score(candidate.as_slice());
        match &best {
            Some((best_score, _)) if s >= *best_score => {}
            _ => best = Some((s, candidate)),
        }
    }
    best.map(|(_, c)| c)
}
