// Chordcraft Music Engine
//
// Music theory and progression generation: given a key and a scale, derive
// the diatonic chords, generate stylistic progressions from per-style Markov
// transition matrices, expand them into timed note events with rhythm
// patterns and style voicings, and voice-lead fixed example progressions.
//
// Architecture:
// - note.rs: Pitch classes with fixed sharp spelling
// - scale.rs: Static scale/mode table and scale-note derivation
// - chord.rs: Diatonic third stacking, quality lookup, roman numerals, pitches
// - voicing.rs: Per-style voicing rearrangements (drop-2, wide, sheen, ...)
// - style.rs: Style catalog (transition matrices, rhythm patterns, voicings)
// - markov.rs: Cumulative transition sampling with uniform fallback
// - progression.rs: Tonic-anchored progression walks over a style's matrix
// - rhythm.rs: Onset-trigger rhythm application producing `MidiEvent`s
// - voice_leading.rs: Greedy inversion/octave optimizer for smooth motion
// - presets.rs: Fixed example progressions and variation sequences
// - config.rs: JSON generator settings
// - error.rs: Boundary errors (config/catalog loading, name parsing)
//
// The core is synchronous and pure. The only non-determinism is the random
// source, which callers pass in (`chordcraft_prng::RandomSource`), so a seed
// or a scripted source reproduces any run exactly. Nothing in the core
// returns an error: unknown names yield empty results and data gaps fall back
// to documented defaults.

pub mod chord;
pub mod config;
pub mod error;
pub mod markov;
pub mod note;
pub mod presets;
pub mod progression;
pub mod rhythm;
pub mod scale;
pub mod style;
pub mod voice_leading;
pub mod voicing;

pub use chordcraft_prng::{ChordRng, RandomSource, ScriptedRandom};
