// Style-specific chord voicings.
//
// A voicing rearranges a chord's raw pitch set (root position, middle-C
// octave) into the spread a style calls for. The same diatonic skeleton
// comes out as a drop-2 jazz comp, a wide dark pad, or a bright synth stack
// depending only on which `Voicing` the style carries.
//
// Voicings are plain data (a serde-tagged enum) so a style catalog loaded from
// JSON can name them. All arithmetic stays inside the MIDI range: notes that
// would fall below 0 stay at their lowest octave and notes pushed above 127
// are dropped.

use serde::{Deserialize, Serialize};

/// G2. Drop-2 voicings push the bass below this.
pub const DROP2_BASS_CEILING: u8 = 43;

const MAX_PITCH: u8 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voicing {
    /// Sorted, otherwise unchanged.
    Close,
    /// Double the bass an octave below.
    BassRoot,
    /// Second-highest note down an octave, then the bass below G2.
    Drop2,
    /// Bass down an octave.
    DeepBass,
    /// Third up an octave, bass down an octave.
    Wide,
    /// Bass down an octave plus the root doubled two octaves below its
    /// original position.
    Cinematic,
    /// Bass down an octave; thin chords gain the root two octaves up.
    Sheen,
}

impl Voicing {
    /// Apply this voicing to `pitches`. The result is sorted ascending.
    pub fn apply(self, pitches: &[u8]) -> Vec<u8> {
        let mut notes = pitches.to_vec();
        notes.sort_unstable();
        if notes.is_empty() {
            return notes;
        }
        match self {
            Voicing::Close => {}
            Voicing::BassRoot => {
                if let Some(low) = octave_down(notes[0]) {
                    notes.push(low);
                }
            }
            Voicing::Drop2 => drop2(&mut notes),
            Voicing::DeepBass => deepen_bass(&mut notes),
            Voicing::Wide => {
                if notes.len() >= 2 {
                    match notes[1].checked_add(12) {
                        Some(up) if up <= MAX_PITCH => notes[1] = up,
                        _ => {}
                    }
                }
                deepen_bass(&mut notes);
            }
            Voicing::Cinematic => {
                let root = notes[0];
                deepen_bass(&mut notes);
                if let Some(sub) = root.checked_sub(24) {
                    notes.push(sub);
                }
            }
            Voicing::Sheen => {
                let root = notes[0];
                deepen_bass(&mut notes);
                if notes.len() < 4 {
                    match root.checked_add(24) {
                        Some(top) if top <= MAX_PITCH => notes.push(top),
                        _ => {}
                    }
                }
            }
        }
        notes.sort_unstable();
        notes
    }
}

fn octave_down(pitch: u8) -> Option<u8> {
    pitch.checked_sub(12)
}

/// Lower the lowest note an octave, if there is room.
fn deepen_bass(notes: &mut [u8]) {
    if let Some(low) = octave_down(notes[0]) {
        notes[0] = low;
    }
}

fn drop2(notes: &mut Vec<u8>) {
    if notes.len() >= 2 {
        let idx = notes.len() - 2;
        if let Some(dropped) = octave_down(notes[idx]) {
            notes[idx] = dropped;
        }
        notes.sort_unstable();
    }
    while notes[0] >= DROP2_BASS_CEILING {
        match octave_down(notes[0]) {
            Some(low) => notes[0] = low,
            None => break,
        }
    }
}
