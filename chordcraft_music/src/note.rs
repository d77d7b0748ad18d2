// Pitch classes with fixed sharp spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display names indexed by pitch class. Enharmonics are always spelled with
/// sharps.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// MIDI pitch of middle C; chord roots are anchored in `[60, 71]`.
pub const MIDDLE_C: u8 = 60;

/// One of the 12 pitch classes (0 = C, 11 = B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Note {
    pc: u8,
}

impl Note {
    pub fn new(pc: u8) -> Self {
        Note { pc: pc % 12 }
    }

    pub fn pc(self) -> u8 {
        self.pc
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.pc as usize]
    }

    /// Parse one of the 12 sharp-spelled names. The letter is matched
    /// case-insensitively; flats and other spellings are rejected.
    pub fn from_name(name: &str) -> Option<Note> {
        let trimmed = name.trim();
        NOTE_NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(trimmed))
            .map(|pc| Note::new(pc as u8))
    }

    /// Move up by `semitones`, wrapping within the octave.
    pub fn transpose(self, semitones: u8) -> Note {
        Note::new(self.pc + semitones % 12)
    }

    /// Semitones from `self` up to `other`, in `0..12`.
    pub fn interval_to(self, other: Note) -> u8 {
        (other.pc + 12 - self.pc) % 12
    }

    /// MIDI pitch of this note in the middle-C octave.
    pub fn middle_pitch(self) -> u8 {
        MIDDLE_C + self.pc
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Note> for String {
    fn from(note: Note) -> String {
        note.name().to_string()
    }
}

impl TryFrom<String> for Note {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Note::from_name(&name).ok_or_else(|| format!("unknown note name '{name}'"))
    }
}
