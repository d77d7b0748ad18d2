// Scale and mode definitions.
//
// Each scale is a named list of semitone offsets from its root. The table is
// static and immutable: lookups hand out `&'static ScaleDef`, so no caller can
// alter a definition another caller depends on.
//
// Heptatonic modes drive most of the engine, but the pentatonic and blues
// scales matter too: `chord.rs` stacks thirds modulo the scale length, so the
// five- and six-note scales produce their own (often `Unknown`-quality)
// chords, and `progression.rs` wraps degree indices onto their shorter chord
// lists.

use crate::note::Note;
use serde::Serialize;
use tracing::debug;

/// A named scale: semitone offsets from the root.
///
/// Invariant: first offset 0, strictly increasing, all below 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleDef {
    pub name: &'static str,
    pub offsets: &'static [u8],
}

impl ScaleDef {
    /// Number of notes (and scale degrees).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The scale instantiated at `root`.
    pub fn notes_from(&self, root: Note) -> Vec<Note> {
        self.offsets.iter().map(|&o| root.transpose(o)).collect()
    }
}

/// Every scale the engine knows, in display order.
pub static SCALES: &[ScaleDef] = &[
    ScaleDef { name: "ionian", offsets: &[0, 2, 4, 5, 7, 9, 11] },
    ScaleDef { name: "dorian", offsets: &[0, 2, 3, 5, 7, 9, 10] },
    ScaleDef { name: "phrygian", offsets: &[0, 1, 3, 5, 7, 8, 10] },
    ScaleDef { name: "lydian", offsets: &[0, 2, 4, 6, 7, 9, 11] },
    ScaleDef { name: "mixolydian", offsets: &[0, 2, 4, 5, 7, 9, 10] },
    ScaleDef { name: "aeolian", offsets: &[0, 2, 3, 5, 7, 8, 10] },
    ScaleDef { name: "locrian", offsets: &[0, 1, 3, 5, 6, 8, 10] },
    ScaleDef { name: "harmonic_minor", offsets: &[0, 2, 3, 5, 7, 8, 11] },
    ScaleDef { name: "melodic_minor", offsets: &[0, 2, 3, 5, 7, 9, 11] },
    ScaleDef { name: "major_pentatonic", offsets: &[0, 2, 4, 7, 9] },
    ScaleDef { name: "minor_pentatonic", offsets: &[0, 3, 5, 7, 10] },
    ScaleDef { name: "blues", offsets: &[0, 3, 5, 6, 7, 10] },
];

/// Alternate names resolved to canonical table entries.
const ALIASES: &[(&str, &str)] = &[
    ("major", "ionian"),
    ("minor", "aeolian"),
    ("natural_minor", "aeolian"),
];

/// Look up a scale by name, case-insensitively. Spaces and hyphens are treated
/// as underscores, so "Major Pentatonic" finds `major_pentatonic`.
pub fn scale_by_name(name: &str) -> Option<&'static ScaleDef> {
    let key = name.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
        .unwrap_or(key.as_str());
    SCALES.iter().find(|s| s.name == canonical)
}

/// Canonical names of all known scales.
pub fn scale_names() -> impl Iterator<Item = &'static str> {
    SCALES.iter().map(|s| s.name)
}

/// The notes of `scale_name` rooted at `root`.
///
/// Unknown roots or scales give an empty vec; callers treat that as "nothing
/// to show" rather than an error.
pub fn scale_notes(root: &str, scale_name: &str) -> Vec<Note> {
    let Some(root_note) = Note::from_name(root) else {
        debug!(root, "unknown root note, returning empty scale");
        return Vec::new();
    };
    let Some(scale) = scale_by_name(scale_name) else {
        debug!(scale = scale_name, "unknown scale, returning empty scale");
        return Vec::new();
    };
    scale.notes_from(root_note)
}
