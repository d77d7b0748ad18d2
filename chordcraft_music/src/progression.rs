// Open-ended chord progression generation.
//
// A progression always opens on the tonic (degree index 0) and then walks the
// style's transition matrix one bar at a time (markov.rs). The walk runs over
// raw matrix indices, 0-6. Scales with fewer than seven degrees (pentatonic,
// blues) wrap an index onto their chord list only when the chord is looked
// up; the unwrapped index stays current for the next transition, so the
// matrix keeps seeing the motion it was written for.

use crate::chord::{Chord, chords};
use crate::markov::next_degree;
use crate::style::{Style, StyleCatalog, StyleDef};
use chordcraft_prng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub style: Style,
    /// Number of bars (one chord per bar).
    pub length: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            style: Style::Pop,
            length: 4,
        }
    }
}

/// Generate a progression in `root`/`scale_name` using the builtin catalog.
///
/// Empty when the root or scale is unknown, or when `length` is 0.
pub fn generate(
    root: &str,
    scale_name: &str,
    options: &GenerateOptions,
    rng: &mut impl RandomSource,
) -> Vec<Chord> {
    let available = chords(root, scale_name);
    let Some(style) = StyleCatalog::builtin().get(options.style) else {
        warn!(style = %options.style, "style missing from builtin catalog");
        return Vec::new();
    };
    generate_with(&available, style, options.length, rng)
}

/// Walk `style`'s matrix for `length` bars over the given diatonic chords.
pub fn generate_with(
    available: &[Chord],
    style: &StyleDef,
    length: usize,
    rng: &mut impl RandomSource,
) -> Vec<Chord> {
    if available.is_empty() || length == 0 {
        debug!(chords = available.len(), length, "nothing to generate");
        return Vec::new();
    }
    degree_walk(style, length, rng)
        .into_iter()
        .map(|index| available[index % available.len()].clone())
        .collect()
}

/// The raw (unwrapped) degree indices of a `length`-bar walk.
pub fn degree_walk(style: &StyleDef, length: usize, rng: &mut impl RandomSource) -> Vec<usize> {
    let mut indices = Vec::with_capacity(length);
    if length == 0 {
        return indices;
    }
    let mut current = 0;
    indices.push(current);
    for _ in 1..length {
        current = next_degree(&style.transitions, current, rng);
        indices.push(current);
    }
    indices
}
