// Diatonic chord derivation.
//
// For each scale degree, chords are built by stacking diatonic thirds: take
// every other member of the scale starting at the degree, modulo the scale
// length. The semitone distances from the chord root to those members decide
// the chord quality through a fixed (third, fifth) lookup. Because the thirds
// are diatonic rather than chromatic, the modes yield their characteristic
// chords on their own (the locrian tonic is diminished, harmonic minor's III
// is augmented) and the pentatonic scales yield `Unknown` qualities wherever
// their gaps produce non-tertian stacks.
//
// Chords are pure values. They are rebuilt from scratch whenever the root or
// scale changes and are never edited in place.
//
// `chord_pitches` turns a chord into absolute MIDI pitches in the middle-C
// octave. It is used by the rhythm applier (rhythm.rs) and the fixed example
// progressions (presets.rs).

use crate::note::Note;
use crate::scale::{ScaleDef, scale_by_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Triad quality, determined only by the third and fifth intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Major,
    Minor,
    Dim,
    Aug,
    Unknown,
}

impl Quality {
    /// The fixed lookup: (4,7) major, (3,7) minor, (3,6) dim, (4,8) aug.
    pub fn from_intervals(third: u8, fifth: u8) -> Quality {
        match (third, fifth) {
            (4, 7) => Quality::Major,
            (3, 7) => Quality::Minor,
            (3, 6) => Quality::Dim,
            (4, 8) => Quality::Aug,
            _ => Quality::Unknown,
        }
    }

    /// Suffix appended to the root name for display ("Dm", "Bdim").
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Dim => "dim",
            Quality::Aug => "aug",
            Quality::Unknown => "?",
        }
    }

    /// Triad intervals used when a chord carries no interval record. Unknown
    /// quality falls back to the major shape.
    pub fn triad(self) -> (u8, u8) {
        match self {
            Quality::Minor => (3, 7),
            Quality::Dim => (3, 6),
            Quality::Aug => (4, 8),
            Quality::Major | Quality::Unknown => (4, 7),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
            Quality::Dim => "dim",
            Quality::Aug => "aug",
            Quality::Unknown => "unknown",
        };
        f.pad(s)
    }
}

/// Semitone distances (mod 12) from a chord root to its stacked members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordIntervals {
    pub third: u8,
    pub fifth: u8,
    pub seventh: u8,
    pub ninth: u8,
}

/// A chord on one scale degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub root: Note,
    pub quality: Quality,
    /// Root plus quality suffix, e.g. "F#m".
    pub name: String,
    /// Roman-numeral label, e.g. "ii", "vii°", "III+".
    pub roman: String,
    /// 1-based scale degree.
    pub degree: usize,
    /// `None` for chords built outside `chords()`; `chord_pitches` then falls
    /// back to the quality's plain triad.
    pub intervals: Option<ChordIntervals>,
}

impl Chord {
    /// A chord with no interval record, e.g. one typed in by hand.
    pub fn from_quality(root: Note, quality: Quality, degree: usize) -> Self {
        Chord {
            root,
            quality,
            name: format!("{}{}", root.name(), quality.suffix()),
            roman: roman_numeral(degree, quality),
            degree,
            intervals: None,
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.roman)
    }
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Roman numeral for a 1-based degree: upper case for major/aug (and
/// unknown), lower case for minor/dim, with ° or + appended.
pub fn roman_numeral(degree: usize, quality: Quality) -> String {
    let base = match degree {
        1..=7 => NUMERALS[degree - 1].to_string(),
        _ => degree.to_string(),
    };
    match quality {
        Quality::Major | Quality::Unknown => base,
        Quality::Minor => base.to_lowercase(),
        Quality::Dim => format!("{}°", base.to_lowercase()),
        Quality::Aug => format!("{base}+"),
    }
}

/// Build the chord on 0-based `index` of `scale` rooted at `root`.
fn chord_on_degree(notes: &[Note], index: usize) -> Chord {
    let len = notes.len();
    let root = notes[index];
    let member = |step: usize| root.interval_to(notes[(index + step) % len]);
    let intervals = ChordIntervals {
        third: member(2),
        fifth: member(4),
        seventh: member(6),
        ninth: member(1),
    };
    let quality = Quality::from_intervals(intervals.third, intervals.fifth);
    let degree = index + 1;
    Chord {
        root,
        quality,
        name: format!("{}{}", root.name(), quality.suffix()),
        roman: roman_numeral(degree, quality),
        degree,
        intervals: Some(intervals),
    }
}

/// Diatonic chords of an already-resolved scale.
pub fn chords_for(root: Note, scale: &ScaleDef) -> Vec<Chord> {
    let notes = scale.notes_from(root);
    (0..notes.len()).map(|i| chord_on_degree(&notes, i)).collect()
}

/// One chord per degree of `scale_name` at `root`. Empty when either name is
/// unknown.
pub fn chords(root: &str, scale_name: &str) -> Vec<Chord> {
    match (Note::from_name(root), scale_by_name(scale_name)) {
        (Some(root), Some(scale)) => chords_for(root, scale),
        _ => {
            tracing::debug!(root, scale = scale_name, "no chords for unknown root or scale");
            Vec::new()
        }
    }
}

/// Which optional chord members to add on top of the triad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchOptions {
    /// Add the seventh.
    pub extensions: bool,
    /// With `extensions`, also add the ninth an octave up.
    pub variation: bool,
}

/// Absolute pitches for `chord`, root anchored in the middle-C octave.
///
/// Pitches are listed root, third, fifth, then seventh and ninth when
/// requested. A chord without an interval record always yields the bare
/// triad of its quality; `options` is ignored for it.
pub fn chord_pitches(chord: &Chord, options: PitchOptions) -> Vec<u8> {
    let root = chord.root.middle_pitch();
    match chord.intervals {
        Some(iv) => {
            let mut pitches = vec![root, root + iv.third, root + iv.fifth];
            if options.extensions {
                pitches.push(root + iv.seventh);
                if options.variation {
                    pitches.push(root + iv.ninth + 12);
                }
            }
            pitches
        }
        None => {
            let (third, fifth) = chord.quality.triad();
            vec![root, root + third, root + fifth]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(chords: &[Chord]) -> Vec<(String, String, Quality)> {
        chords
            .iter()
            .map(|c| (c.name.clone(), c.roman.clone(), c.quality))
            .collect()
    }

    #[test]
    fn c_ionian_chords() {
        let got = summary(&chords("C", "ionian"));
        let expected = [
            ("C", "I", Quality::Major),
            ("Dm", "ii", Quality::Minor),
            ("Em", "iii", Quality::Minor),
            ("F", "IV", Quality::Major),
            ("G", "V", Quality::Major),
            ("Am", "vi", Quality::Minor),
            ("Bdim", "vii°", Quality::Dim),
        ];
        assert_eq!(got.len(), expected.len());
        for (g, (name, roman, q)) in got.iter().zip(expected) {
            assert_eq!(g.0, name);
            assert_eq!(g.1, roman);
            assert_eq!(g.2, q);
        }
    }

    #[test]
    fn degrees_are_one_based() {
        let cs = chords("G", "mixolydian");
        for (i, c) in cs.iter().enumerate() {
            assert_eq!(c.degree, i + 1);
        }
    }

    #[test]
    fn locrian_tonic_is_diminished() {
        let cs = chords("B", "locrian");
        assert_eq!(cs[0].quality, Quality::Dim);
        assert_eq!(cs[0].roman, "i°");
        // m7b5: flat seventh over a diminished triad
        assert_eq!(cs[0].intervals.map(|iv| iv.seventh), Some(10));
    }

    #[test]
    fn harmonic_minor_has_augmented_mediant() {
        let cs = chords("A", "harmonic_minor");
        assert_eq!(cs[2].name, "Caug");
        assert_eq!(cs[2].roman, "III+");
        assert_eq!(cs[4].quality, Quality::Major); // raised leading tone gives V
    }

    #[test]
    fn quality_is_pure_function_of_intervals() {
        for scale in crate::scale::SCALES {
            for root in crate::note::NOTE_NAMES {
                for chord in chords(root, scale.name) {
                    let iv = chord.intervals.expect("derived chords carry intervals");
                    assert_eq!(chord.quality, Quality::from_intervals(iv.third, iv.fifth));
                }
            }
        }
    }

    #[test]
    fn ninth_follows_scale_step_in_short_scales() {
        // C major pentatonic: C D E G A. Degree 1 ninth is D (2), third is E
        // (index 2), fifth is A (index 4).
        let cs = chords("C", "major_pentatonic");
        assert_eq!(cs.len(), 5);
        let iv = cs[0].intervals.unwrap();
        assert_eq!(iv.ninth, 2);
        assert_eq!(iv.third, 4);
        assert_eq!(iv.fifth, 9);
        assert_eq!(cs[0].quality, Quality::Unknown);
        // Degree 5 (A): third wraps to D (index 1), fifth to G (index 3).
        let iv = cs[4].intervals.unwrap();
        assert_eq!((iv.third, iv.fifth), (5, 10));
    }

    #[test]
    fn unknown_names_give_no_chords() {
        assert!(chords("Cb", "ionian").is_empty());
        assert!(chords("C", "nonsense").is_empty());
    }

    #[test]
    fn c_major_triad_pitches() {
        let c = &chords("C", "ionian")[0];
        assert_eq!(chord_pitches(c, PitchOptions::default()), vec![60, 64, 67]);
    }

    #[test]
    fn extensions_and_variation() {
        let g = &chords("C", "ionian")[4];
        let seventh = chord_pitches(g, PitchOptions { extensions: true, variation: false });
        assert_eq!(seventh, vec![67, 71, 74, 77]);
        let ninth = chord_pitches(g, PitchOptions { extensions: true, variation: true });
        assert_eq!(ninth, vec![67, 71, 74, 77, 81]);
        // variation alone adds nothing
        let plain = chord_pitches(g, PitchOptions { extensions: false, variation: true });
        assert_eq!(plain, vec![67, 71, 74]);
    }

    #[test]
    fn roots_stay_in_middle_octave() {
        for chord in chords("B", "ionian") {
            let p = chord_pitches(&chord, PitchOptions::default());
            assert!((60..=71).contains(&p[0]));
        }
    }

    #[test]
    fn fallback_without_intervals() {
        let root = Note::new(2);
        let minor = Chord::from_quality(root, Quality::Minor, 2);
        assert_eq!(minor.name, "Dm");
        assert_eq!(minor.roman, "ii");
        assert_eq!(chord_pitches(&minor, PitchOptions::default()), vec![62, 65, 69]);
        let dim = Chord::from_quality(root, Quality::Dim, 7);
        assert_eq!(chord_pitches(&dim, PitchOptions::default()), vec![62, 65, 68]);
        let aug = Chord::from_quality(root, Quality::Aug, 3);
        assert_eq!(aug.roman, "III+");
        assert_eq!(
            chord_pitches(&aug, PitchOptions { extensions: true, variation: true }),
            vec![62, 66, 70]
        );
    }
}
