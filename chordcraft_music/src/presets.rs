// Fixed example progressions and their variation sequences.
//
// Unlike the open-ended generator, these are hand-written degree lists
// (I-V-vi-IV, ii-V-I, the twelve-bar blues, ...). A variation sequence
// resolves each degree to its diatonic chord in the chosen key, computes the
// chord's pitches, and, when smooth voicing is requested, runs the whole
// sequence through the voice-leading optimizer. Both the raw and the
// voice-led pitches are kept so a display can show what changed.
//
// Degrees are 1-based and wrap onto the scale's chord list, so a seven-degree
// preset still plays on a pentatonic scale.

use crate::chord::{Chord, PitchOptions, chord_pitches, chords};
use crate::error::{MusicError, Result};
use crate::rhythm::MidiEvent;
use crate::style::TICKS_PER_BAR;
use crate::voice_leading::optimize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExampleProgression {
    pub name: &'static str,
    pub description: &'static str,
    /// 1-based scale degrees, one per bar.
    pub degrees: &'static [usize],
}

pub static EXAMPLE_PROGRESSIONS: &[ExampleProgression] = &[
    ExampleProgression {
        name: "Pop Anthem",
        description: "I-V-vi-IV, the four-chord song",
        degrees: &[1, 5, 6, 4],
    },
    ExampleProgression {
        name: "Jazz ii-V-I",
        description: "The jazz cadence, turned around through vi",
        degrees: &[2, 5, 1, 6],
    },
    ExampleProgression {
        name: "Twelve-Bar Blues",
        description: "Quick-change twelve-bar form",
        degrees: &[1, 4, 1, 1, 4, 4, 1, 1, 5, 4, 1, 5],
    },
    ExampleProgression {
        name: "Doo-Wop",
        description: "I-vi-IV-V fifties changes",
        degrees: &[1, 6, 4, 5],
    },
    ExampleProgression {
        name: "Canon",
        description: "Pachelbel's descending bass line",
        degrees: &[1, 5, 6, 3, 4, 1, 4, 5],
    },
    ExampleProgression {
        name: "Royal Road",
        description: "IV-V-iii-vi, the J-pop favourite",
        degrees: &[4, 5, 3, 6],
    },
    ExampleProgression {
        name: "Andalusian Cadence",
        description: "Descending i-VII-VI-V; use with aeolian or harmonic minor",
        degrees: &[1, 7, 6, 5],
    },
    ExampleProgression {
        name: "Circle of Fifths",
        description: "Diatonic fifths all the way home",
        degrees: &[1, 4, 7, 3, 6, 2, 5, 1],
    },
];

/// Look up a preset by name, case-insensitively.
pub fn example_progression(name: &str) -> Result<&'static ExampleProgression> {
    let key = name.trim();
    EXAMPLE_PROGRESSIONS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| MusicError::UnknownProgression(name.to_string()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationOptions {
    pub extensions: bool,
    pub variation: bool,
    /// Run the sequence through the voice-leading optimizer.
    pub smooth_voicing: bool,
}

/// A chord plus the pitches it will be played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSequenceItem {
    #[serde(flatten)]
    pub chord: Chord,
    /// Pitches to play (voice-led when smoothing is on).
    pub midi_notes: Vec<u8>,
    /// Pitches straight from the chord, before voice leading.
    pub original_notes: Vec<u8>,
}

/// Resolve `degrees` in `root`/`scale_name` to a playable sequence.
///
/// Empty when the root or scale is unknown.
pub fn variation_sequence(
    root: &str,
    scale_name: &str,
    degrees: &[usize],
    options: VariationOptions,
) -> Vec<VariationSequenceItem> {
    let available = chords(root, scale_name);
    if available.is_empty() {
        return Vec::new();
    }
    let pitch_options = PitchOptions {
        extensions: options.extensions,
        variation: options.variation,
    };
    let picked: Vec<Chord> = degrees
        .iter()
        .map(|&d| available[d.saturating_sub(1) % available.len()].clone())
        .collect();
    let originals: Vec<Vec<u8>> = picked
        .iter()
        .map(|c| chord_pitches(c, pitch_options))
        .collect();
    let voiced = if options.smooth_voicing {
        optimize(&originals)
    } else {
        originals.clone()
    };
    picked
        .into_iter()
        .zip(originals)
        .zip(voiced)
        .map(|((chord, original_notes), midi_notes)| VariationSequenceItem {
            chord,
            midi_notes,
            original_notes,
        })
        .collect()
}

/// One whole-bar event per item, back to back.
pub fn sequence_events(items: &[VariationSequenceItem], velocity: u8) -> Vec<MidiEvent> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| MidiEvent {
            notes: item.midi_notes.clone(),
            velocity: velocity.min(127),
            duration: TICKS_PER_BAR,
            start_time: u32::try_from(i)
                .unwrap_or(u32::MAX)
                .saturating_mul(TICKS_PER_BAR),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice_leading::{PLAYABLE_HIGH, PLAYABLE_LOW};

    #[test]
    fn presets_are_unique_and_non_empty() {
        for (i, p) in EXAMPLE_PROGRESSIONS.iter().enumerate() {
            assert!(!p.degrees.is_empty());
            assert!(p.degrees.iter().all(|&d| (1..=7).contains(&d)), "{}", p.name);
            assert!(
                EXAMPLE_PROGRESSIONS[..i].iter().all(|q| q.name != p.name),
                "duplicate {}",
                p.name
            );
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(example_progression("pop anthem").unwrap().degrees, &[1, 5, 6, 4]);
        assert!(matches!(
            example_progression("Nope"),
            Err(MusicError::UnknownProgression(_))
        ));
    }

    #[test]
    fn pop_anthem_in_c() {
        let items = variation_sequence("C", "ionian", &[1, 5, 6, 4], VariationOptions::default());
        let names: Vec<&str> = items.iter().map(|i| i.chord.name.as_str()).collect();
        assert_eq!(names, ["C", "G", "Am", "F"]);
        // smoothing off: pitches untouched
        for item in &items {
            assert_eq!(item.midi_notes, item.original_notes);
        }
        assert_eq!(items[0].original_notes, vec![60, 64, 67]);
    }

    #[test]
    fn smoothing_voice_leads_within_range() {
        let options = VariationOptions {
            extensions: true,
            variation: true,
            smooth_voicing: true,
        };
        let items = variation_sequence("F#", "ionian", &[2, 5, 1, 6], options);
        assert_eq!(items.len(), 4);
        for item in &items {
            assert_eq!(item.original_notes.len(), 5);
            assert!(
                item.midi_notes
                    .iter()
                    .all(|&p| (PLAYABLE_LOW..=PLAYABLE_HIGH).contains(&p))
            );
        }
    }

    #[test]
    fn degrees_wrap_on_short_scales() {
        let items = variation_sequence("A", "minor_pentatonic", &[6, 7], VariationOptions::default());
        // five chords: degree 6 -> index 0, degree 7 -> index 1
        assert_eq!(items[0].chord.degree, 1);
        assert_eq!(items[1].chord.degree, 2);
    }

    #[test]
    fn unknown_key_is_empty() {
        assert!(variation_sequence("Q", "ionian", &[1], VariationOptions::default()).is_empty());
    }

    #[test]
    fn events_are_back_to_back_bars() {
        let items = variation_sequence("C", "ionian", &[1, 4, 5], VariationOptions::default());
        let events = sequence_events(&items, 90);
        assert_eq!(events.len(), 3);
        for (i, e) in events.iter().enumerate() {
            assert_eq!(e.start_time, i as u32 * TICKS_PER_BAR);
            assert_eq!(e.duration, TICKS_PER_BAR);
            assert_eq!(e.velocity, 90);
            assert_eq!(e.notes, items[i].midi_notes);
        }
    }

    #[test]
    fn item_serializes_flat() {
        let items = variation_sequence("C", "ionian", &[1], VariationOptions::default());
        let value = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(value["name"], "C");
        assert_eq!(value["roman"], "I");
        assert_eq!(value["midi_notes"], serde_json::json!([60, 64, 67]));
    }
}
