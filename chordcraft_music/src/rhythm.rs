// Rhythm application: chords to timed note events.
//
// Each chord of a progression fills one bar. A bar is one pass through a
// rhythm pattern, and its length is the pattern's own step count times its
// step size, so triplet (12 x 43) and 32nd-note (32 x 16) patterns yield bars
// of a different absolute length than the standard 16 x 32.
//
// Pattern steps are onset triggers, not a sustain mask. A non-zero step starts
// the chord and the note holds until the next non-zero step (or the end of
// the bar); zero steps in between extend it rather than inserting rests.
// Zero steps before the first trigger leave the start of the bar silent.
//
// Velocity is the step scalar times 100, not 127. This leaves headroom above
// the loudest pattern step and keeps exported dynamics stable.
//
// The events are plain values for an external serializer or player (ticks at
// 128 per quarter note).

use crate::chord::{Chord, PitchOptions, chord_pitches};
use crate::style::{RhythmPattern, StyleDef};
use chordcraft_prng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Scale from pattern scalar to MIDI velocity.
pub const VELOCITY_SCALE: f32 = 100.0;

/// One chord onset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiEvent {
    pub notes: Vec<u8>,
    pub velocity: u8,
    /// Ticks.
    pub duration: u32,
    /// Ticks from the start of the sequence.
    pub start_time: u32,
}

impl MidiEvent {
    pub fn end_time(&self) -> u32 {
        self.start_time.saturating_add(self.duration)
    }
}

/// Expand `progression` into note events in `style`.
///
/// With `rhythm_enabled`, one of the style's patterns is chosen at random and
/// used for every bar of this call; otherwise every chord is a whole note.
pub fn apply_rhythm(
    progression: &[Chord],
    style: &StyleDef,
    rhythm_enabled: bool,
    rng: &mut impl RandomSource,
) -> Vec<MidiEvent> {
    let pattern = if rhythm_enabled {
        choose_pattern(style, rng)
    } else {
        RhythmPattern::whole_notes()
    };
    apply_rhythm_with_pattern(progression, style, &pattern)
}

/// Pick one pattern uniformly from the style's pool. An empty pool yields
/// whole notes.
pub fn choose_pattern(style: &StyleDef, rng: &mut impl RandomSource) -> RhythmPattern {
    if style.patterns.is_empty() {
        warn!(style = %style.style, "style has no rhythm patterns, using whole notes");
        return RhythmPattern::whole_notes();
    }
    style.patterns[rng.pick_index(style.patterns.len())].clone()
}

/// Expand `progression` with a fixed `pattern`, voiced the way `style` voices
/// chords.
pub fn apply_rhythm_with_pattern(
    progression: &[Chord],
    style: &StyleDef,
    pattern: &RhythmPattern,
) -> Vec<MidiEvent> {
    let options = PitchOptions {
        extensions: style.extended,
        variation: false,
    };
    let triggers: Vec<usize> = pattern.triggers().collect();

    let mut events = Vec::with_capacity(progression.len() * triggers.len());
    let mut bar_start: u32 = 0;
    for chord in progression {
        let notes = style.voicing.apply(&chord_pitches(chord, options));
        for (i, &step) in triggers.iter().enumerate() {
            let next = triggers.get(i + 1).copied().unwrap_or(pattern.len());
            events.push(MidiEvent {
                notes: notes.clone(),
                velocity: velocity(pattern.steps[step]),
                duration: pattern.span_ticks(next - step),
                start_time: bar_start.saturating_add(pattern.span_ticks(step)),
            });
        }
        bar_start = bar_start.saturating_add(pattern.bar_ticks());
    }
    events
}

/// Pattern scalar to MIDI velocity (x100, rounded, capped at 127).
pub fn velocity(scalar: f32) -> u8 {
    (scalar * VELOCITY_SCALE).round().clamp(0.0, 127.0) as u8
}
