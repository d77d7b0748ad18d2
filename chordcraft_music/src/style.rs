// Per-style generation data.
//
// A style bundles three things that turn one harmonic skeleton into
// genre-specific output:
// - a transition matrix over 0-based scale-degree indices, walked by
//   progression.rs (jazz leans on ii-V-I, pop circles I-V-vi-IV, ...),
// - a pool of rhythm patterns, one of which rhythm.rs picks per call,
// - a voicing (voicing.rs) applied to every chord's pitches.
//
// The builtin catalog is constructed lazily once and shared read-only.
// Callers that want to tweak a style clone its `StyleDef`; a whole catalog
// can also be loaded from JSON (`StyleCatalog::load`).
//
// Matrix rows are ordered lists, not maps: cumulative sampling walks them in
// listed order, so the order is part of each style's behavior. Row sums are
// deliberately not normalized. Pop's tonic row sums to exactly 1.0, the blues
// tonic row to 0.95 (the remainder falls to the last listed target) and the
// epic tonic row to 1.05 (its last target is slightly starved). The dark
// style has no rows for indices 3 and 6; the generator falls back to a
// uniform pick there.

use crate::error::{MusicError, Result, read_to_string};
use crate::voicing::Voicing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

/// Ticks per quarter note.
pub const TICKS_PER_QUARTER: u32 = 128;

/// Default step length: one sixteenth note.
pub const TICKS_PER_SIXTEENTH: u32 = TICKS_PER_QUARTER / 4;

/// One 4/4 bar.
pub const TICKS_PER_BAR: u32 = TICKS_PER_QUARTER * 4;

/// An eighth-note triplet, rounded up from 128/3.
pub const TICKS_PER_TRIPLET_EIGHTH: u32 = 43;

/// A thirty-second note, for high-resolution patterns.
pub const TICKS_PER_THIRTY_SECOND: u32 = TICKS_PER_QUARTER / 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Pop,
    Jazz,
    Blues,
    Rnb,
    Rock,
    Lofi,
    Epic,
    Bossa,
    Folk,
    Hyperpop,
    Jpop,
    Future,
    Dark,
}

impl Style {
    pub const ALL: [Style; 13] = [
        Style::Pop,
        Style::Jazz,
        Style::Blues,
        Style::Rnb,
        Style::Rock,
        Style::Lofi,
        Style::Epic,
        Style::Bossa,
        Style::Folk,
        Style::Hyperpop,
        Style::Jpop,
        Style::Future,
        Style::Dark,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Pop => "pop",
            Style::Jazz => "jazz",
            Style::Blues => "blues",
            Style::Rnb => "rnb",
            Style::Rock => "rock",
            Style::Lofi => "lofi",
            Style::Epic => "epic",
            Style::Bossa => "bossa",
            Style::Folk => "folk",
            Style::Hyperpop => "hyperpop",
            Style::Jpop => "jpop",
            Style::Future => "future",
            Style::Dark => "dark",
        }
    }

    /// Styles that voice every chord as a seventh chord.
    pub fn uses_extended_voicing(self) -> bool {
        matches!(
            self,
            Style::Jazz
                | Style::Rnb
                | Style::Lofi
                | Style::Bossa
                | Style::Future
                | Style::Jpop
                | Style::Hyperpop
        )
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Style {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| MusicError::UnknownStyle(s.to_string()))
    }
}

/// One weighted edge out of a matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub to: usize,
    pub probability: f64,
}

/// Source degree index -> ordered list of weighted targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionMatrix {
    rows: BTreeMap<usize, Vec<Transition>>,
}

impl TransitionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style row insertion; `targets` keep their listed order.
    pub fn with_row(mut self, from: usize, targets: &[(usize, f64)]) -> Self {
        self.rows.insert(
            from,
            targets
                .iter()
                .map(|&(to, probability)| Transition { to, probability })
                .collect(),
        );
        self
    }

    pub fn row(&self, from: usize) -> Option<&[Transition]> {
        self.rows.get(&from).map(Vec::as_slice)
    }

    /// Source indices that have a row.
    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    /// Sum of a row's probabilities, or `None` for a missing row.
    pub fn row_total(&self, from: usize) -> Option<f64> {
        self.row(from).map(|r| r.iter().map(|t| t.probability).sum())
    }
}

/// A one-bar rhythm: per-step velocity scalars in `[0, 1]`, 0 meaning no
/// onset on that step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmPattern {
    pub name: String,
    pub steps: Vec<f32>,
    /// Overrides the default sixteenth-note step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks_per_step: Option<u32>,
}

impl RhythmPattern {
    pub fn new(name: &str, steps: &[f32]) -> Self {
        RhythmPattern {
            name: name.to_string(),
            steps: steps.to_vec(),
            ticks_per_step: None,
        }
    }

    pub fn with_ticks_per_step(mut self, ticks: u32) -> Self {
        self.ticks_per_step = Some(ticks);
        self
    }

    /// Single sustained onset spanning a full 4/4 bar. Used whenever rhythm
    /// is switched off.
    pub fn whole_notes() -> Self {
        RhythmPattern::new("Whole Notes", &[0.8]).with_ticks_per_step(TICKS_PER_BAR)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn ticks_per_step(&self) -> u32 {
        self.ticks_per_step.unwrap_or(TICKS_PER_SIXTEENTH)
    }

    /// Length of one bar of this pattern. Not always 512: triplet and
    /// high-resolution patterns make longer or shorter bars.
    pub fn bar_ticks(&self) -> u32 {
        self.span_ticks(self.len())
    }

    /// Ticks covered by `steps` steps, saturating at `u32::MAX`.
    pub fn span_ticks(&self, steps: usize) -> u32 {
        u32::try_from(steps)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.ticks_per_step())
    }

    /// Whether a full bar of this pattern fits in a `u32` tick count.
    pub fn bar_fits(&self) -> bool {
        u32::try_from(self.len())
            .ok()
            .and_then(|n| n.checked_mul(self.ticks_per_step()))
            .is_some()
    }

    /// Indices of the steps that start a note.
    pub fn triggers(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .map(|(i, _)| i)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDef {
    pub style: Style,
    pub transitions: TransitionMatrix,
    pub patterns: Vec<RhythmPattern>,
    pub voicing: Voicing,
    /// Voice chords with their sevenths.
    pub extended: bool,
}

impl StyleDef {
    pub fn pattern(&self, name: &str) -> Option<&RhythmPattern> {
        self.patterns.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Read-only registry of style definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleCatalog {
    styles: Vec<StyleDef>,
}

static BUILTIN: LazyLock<StyleCatalog> = LazyLock::new(StyleCatalog::builtin_styles);

impl StyleCatalog {
    /// The shared builtin catalog.
    pub fn builtin() -> &'static StyleCatalog {
        &BUILTIN
    }

    pub fn get(&self, style: Style) -> Option<&StyleDef> {
        self.styles.iter().find(|def| def.style == style)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDef> {
        self.styles.iter()
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: StyleCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject data the engine cannot use: velocities outside `[0, 1]`,
    /// zero-length steps, bars too long for a `u32` tick count, negative
    /// probabilities, duplicate styles.
    pub fn validate(&self) -> Result<()> {
        for (i, def) in self.styles.iter().enumerate() {
            if self.styles[..i].iter().any(|d| d.style == def.style) {
                return Err(MusicError::InvalidConfig(format!(
                    "style {} defined twice",
                    def.style
                )));
            }
            for pattern in &def.patterns {
                if pattern.is_empty() {
                    return Err(MusicError::InvalidConfig(format!(
                        "{}: pattern '{}' has no steps",
                        def.style, pattern.name
                    )));
                }
                if pattern.ticks_per_step == Some(0) {
                    return Err(MusicError::InvalidConfig(format!(
                        "{}: pattern '{}' has zero ticks per step",
                        def.style, pattern.name
                    )));
                }
                if !pattern.bar_fits() {
                    return Err(MusicError::InvalidConfig(format!(
                        "{}: pattern '{}' bar overflows the tick range",
                        def.style, pattern.name
                    )));
                }
                if let Some(v) = pattern.steps.iter().find(|v| !(0.0..=1.0).contains(*v)) {
                    return Err(MusicError::InvalidConfig(format!(
                        "{}: pattern '{}' has velocity {v} outside [0, 1]",
                        def.style, pattern.name
                    )));
                }
            }
            for from in def.transitions.sources() {
                let row = def.transitions.row(from).unwrap_or_default();
                if row.iter().any(|t| t.probability < 0.0) {
                    return Err(MusicError::InvalidConfig(format!(
                        "{}: row {from} has a negative probability",
                        def.style
                    )));
                }
            }
        }
        Ok(())
    }

    fn builtin_styles() -> Self {
        let styles = Style::ALL.into_iter().map(builtin_def).collect();
        StyleCatalog { styles }
    }
}

fn style_def(
    style: Style,
    transitions: TransitionMatrix,
    patterns: Vec<RhythmPattern>,
    voicing: Voicing,
) -> StyleDef {
    StyleDef {
        style,
        transitions,
        patterns,
        voicing,
        extended: style.uses_extended_voicing(),
    }
}

// Degree indices: 0 = I, 1 = ii, 2 = iii, 3 = IV, 4 = V, 5 = vi, 6 = vii.
fn builtin_def(style: Style) -> StyleDef {
    let m = TransitionMatrix::new;
    match style {
        Style::Pop => style_def(
            style,
            m().with_row(0, &[(4, 0.3), (5, 0.3), (3, 0.2), (1, 0.1), (2, 0.1)])
                .with_row(1, &[(4, 0.5), (3, 0.2), (5, 0.2), (0, 0.1)])
                .with_row(2, &[(5, 0.4), (3, 0.4), (1, 0.2)])
                .with_row(3, &[(0, 0.35), (4, 0.35), (5, 0.2), (1, 0.1)])
                .with_row(4, &[(0, 0.4), (5, 0.35), (3, 0.25)])
                .with_row(5, &[(3, 0.4), (4, 0.3), (1, 0.2), (0, 0.1)])
                .with_row(6, &[(0, 0.7), (5, 0.3)]),
            vec![
                RhythmPattern::new(
                    "Four on the Floor",
                    &[0.9, 0.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Pop Push",
                    &[0.9, 0.0, 0.0, 0.6, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.7, 0.0, 0.6, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::BassRoot,
        ),
        Style::Jazz => style_def(
            style,
            m().with_row(0, &[(1, 0.4), (5, 0.25), (3, 0.2), (2, 0.15)])
                .with_row(1, &[(4, 0.7), (6, 0.15), (2, 0.15)])
                .with_row(2, &[(5, 0.6), (1, 0.3), (3, 0.1)])
                .with_row(3, &[(1, 0.3), (6, 0.3), (4, 0.2), (0, 0.2)])
                .with_row(4, &[(0, 0.7), (5, 0.2), (2, 0.1)])
                .with_row(5, &[(1, 0.6), (3, 0.25), (4, 0.15)])
                .with_row(6, &[(2, 0.5), (0, 0.3), (5, 0.2)]),
            vec![
                RhythmPattern::new(
                    "Charleston",
                    &[0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Swing Comp",
                    &[0.8, 0.0, 0.5, 0.7, 0.0, 0.5, 0.8, 0.0, 0.5, 0.7, 0.0, 0.5],
                )
                .with_ticks_per_step(TICKS_PER_TRIPLET_EIGHTH),
            ],
            Voicing::Drop2,
        ),
        Style::Blues => style_def(
            style,
            m().with_row(0, &[(3, 0.5), (4, 0.3), (0, 0.15)])
                .with_row(1, &[(4, 0.6), (3, 0.4)])
                .with_row(2, &[(3, 0.5), (5, 0.5)])
                .with_row(3, &[(0, 0.6), (3, 0.1), (4, 0.3)])
                .with_row(4, &[(3, 0.5), (0, 0.5)])
                .with_row(5, &[(1, 0.5), (4, 0.5)])
                .with_row(6, &[(0, 1.0)]),
            vec![
                RhythmPattern::new(
                    "Shuffle",
                    &[0.9, 0.0, 0.6, 0.8, 0.0, 0.6, 0.9, 0.0, 0.6, 0.8, 0.0, 0.6],
                )
                .with_ticks_per_step(TICKS_PER_TRIPLET_EIGHTH),
                RhythmPattern::new(
                    "Stop Time",
                    &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::BassRoot,
        ),
        Style::Rnb => style_def(
            style,
            m().with_row(0, &[(5, 0.3), (3, 0.3), (1, 0.25), (2, 0.15)])
                .with_row(1, &[(4, 0.5), (2, 0.3), (0, 0.2)])
                .with_row(2, &[(5, 0.5), (3, 0.3), (1, 0.2)])
                .with_row(3, &[(2, 0.3), (4, 0.3), (0, 0.2), (1, 0.2)])
                .with_row(4, &[(0, 0.4), (2, 0.3), (5, 0.3)])
                .with_row(5, &[(1, 0.4), (3, 0.4), (4, 0.2)])
                .with_row(6, &[(2, 0.6), (0, 0.4)]),
            vec![
                RhythmPattern::new(
                    "Slow Jam",
                    &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Neo Soul Push",
                    &[0.0, 0.0, 0.7, 0.0, 0.8, 0.0, 0.0, 0.5, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::DeepBass,
        ),
        Style::Rock => style_def(
            style,
            m().with_row(0, &[(3, 0.35), (4, 0.35), (6, 0.15), (5, 0.15)])
                .with_row(1, &[(4, 0.6), (3, 0.4)])
                .with_row(2, &[(3, 0.6), (5, 0.4)])
                .with_row(3, &[(0, 0.4), (4, 0.4), (6, 0.2)])
                .with_row(4, &[(0, 0.5), (3, 0.3), (5, 0.2)])
                .with_row(5, &[(3, 0.5), (4, 0.3), (0, 0.2)])
                .with_row(6, &[(3, 0.5), (0, 0.5)]),
            vec![
                RhythmPattern::new(
                    "Driving Eighths",
                    &[0.9, 0.0, 0.7, 0.0, 0.8, 0.0, 0.7, 0.0, 0.9, 0.0, 0.7, 0.0, 0.8, 0.0, 0.7, 0.0],
                ),
                RhythmPattern::new(
                    "Power Hits",
                    &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::BassRoot,
        ),
        Style::Lofi => style_def(
            style,
            m().with_row(0, &[(3, 0.3), (5, 0.3), (1, 0.2), (2, 0.2)])
                .with_row(1, &[(4, 0.5), (0, 0.3), (2, 0.2)])
                .with_row(2, &[(5, 0.5), (1, 0.3), (3, 0.2)])
                .with_row(3, &[(2, 0.3), (1, 0.3), (0, 0.2), (4, 0.2)])
                .with_row(4, &[(0, 0.4), (2, 0.3), (5, 0.3)])
                .with_row(5, &[(1, 0.4), (3, 0.4), (0, 0.2)])
                .with_row(6, &[(0, 0.5), (2, 0.5)]),
            vec![
                RhythmPattern::new(
                    "Lazy Keys",
                    &[0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Dusty Halves",
                    &[0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::DeepBass,
        ),
        Style::Epic => style_def(
            style,
            m().with_row(0, &[(5, 0.35), (3, 0.35), (4, 0.25), (2, 0.1)])
                .with_row(1, &[(4, 0.6), (5, 0.4)])
                .with_row(2, &[(5, 0.5), (3, 0.5)])
                .with_row(3, &[(4, 0.4), (0, 0.3), (5, 0.3)])
                .with_row(4, &[(5, 0.4), (0, 0.4), (3, 0.2)])
                .with_row(5, &[(3, 0.4), (2, 0.3), (4, 0.3)])
                .with_row(6, &[(0, 0.6), (5, 0.4)]),
            vec![
                RhythmPattern::new(
                    "Ostinato",
                    &[0.9, 0.0, 0.6, 0.6, 0.9, 0.0, 0.6, 0.6, 0.9, 0.0, 0.6, 0.6, 0.9, 0.0, 0.6, 0.6],
                ),
                RhythmPattern::new(
                    "Swells",
                    &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::Cinematic,
        ),
        Style::Bossa => style_def(
            style,
            m().with_row(0, &[(1, 0.4), (5, 0.3), (3, 0.3)])
                .with_row(1, &[(4, 0.8), (6, 0.2)])
                .with_row(2, &[(5, 0.5), (1, 0.5)])
                .with_row(3, &[(6, 0.3), (1, 0.3), (0, 0.2), (4, 0.2)])
                .with_row(4, &[(0, 0.6), (2, 0.2), (5, 0.2)])
                .with_row(5, &[(1, 0.6), (4, 0.4)])
                .with_row(6, &[(2, 0.6), (0, 0.4)]),
            vec![
                RhythmPattern::new(
                    "Bossa Clave",
                    &[0.8, 0.0, 0.0, 0.6, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.7, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Partido Alto",
                    &[0.7, 0.0, 0.5, 0.0, 0.0, 0.6, 0.0, 0.5, 0.0, 0.7, 0.0, 0.0, 0.6, 0.0, 0.5, 0.0],
                ),
            ],
            Voicing::Drop2,
        ),
        Style::Folk => style_def(
            style,
            m().with_row(0, &[(3, 0.4), (4, 0.4), (5, 0.2)])
                .with_row(1, &[(4, 0.7), (3, 0.3)])
                .with_row(2, &[(3, 0.5), (5, 0.5)])
                .with_row(3, &[(0, 0.5), (4, 0.4), (1, 0.1)])
                .with_row(4, &[(0, 0.6), (3, 0.2), (5, 0.2)])
                .with_row(5, &[(3, 0.5), (4, 0.3), (0, 0.2)])
                .with_row(6, &[(0, 1.0)]),
            vec![
                RhythmPattern::new(
                    "Strum",
                    &[0.8, 0.0, 0.5, 0.0, 0.7, 0.0, 0.5, 0.0, 0.8, 0.0, 0.5, 0.0, 0.7, 0.0, 0.5, 0.0],
                ),
                // 3/4: twelve sixteenths make a shorter bar.
                RhythmPattern::new(
                    "Waltz",
                    &[0.9, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::Close,
        ),
        Style::Hyperpop => style_def(
            style,
            m().with_row(0, &[(5, 0.3), (3, 0.3), (4, 0.2), (2, 0.2)])
                .with_row(1, &[(4, 0.4), (6, 0.3), (0, 0.3)])
                .with_row(2, &[(5, 0.4), (3, 0.3), (0, 0.3)])
                .with_row(3, &[(4, 0.4), (0, 0.3), (6, 0.3)])
                .with_row(4, &[(5, 0.4), (0, 0.3), (2, 0.3)])
                .with_row(5, &[(3, 0.5), (4, 0.3), (1, 0.2)])
                .with_row(6, &[(0, 0.5), (4, 0.5)]),
            vec![
                RhythmPattern::new(
                    "Glitch 32nds",
                    &[
                        1.0, 0.0, 0.6, 0.0, 0.8, 0.8, 0.0, 0.6, 1.0, 0.0, 0.0, 0.7, 0.9, 0.9, 0.9, 0.9,
                        1.0, 0.0, 0.6, 0.0, 0.8, 0.0, 0.8, 0.0, 1.0, 0.7, 0.7, 0.7, 0.9, 0.0, 0.9, 0.0,
                    ],
                )
                .with_ticks_per_step(TICKS_PER_THIRTY_SECOND),
                RhythmPattern::new(
                    "Supersaw Stabs",
                    &[1.0, 0.0, 0.8, 0.0, 0.0, 0.9, 0.0, 0.8, 1.0, 0.0, 0.8, 0.0, 0.0, 0.9, 0.0, 0.8],
                ),
            ],
            Voicing::Sheen,
        ),
        Style::Jpop => style_def(
            style,
            m().with_row(0, &[(3, 0.35), (5, 0.3), (4, 0.2), (1, 0.15)])
                .with_row(1, &[(4, 0.6), (2, 0.2), (0, 0.2)])
                .with_row(2, &[(5, 0.7), (3, 0.3)])
                .with_row(3, &[(4, 0.6), (2, 0.2), (0, 0.2)])
                .with_row(4, &[(2, 0.45), (5, 0.35), (0, 0.2)])
                .with_row(5, &[(3, 0.4), (1, 0.3), (4, 0.3)])
                .with_row(6, &[(2, 0.5), (0, 0.5)]),
            vec![
                RhythmPattern::new(
                    "Anime Drive",
                    &[0.9, 0.0, 0.6, 0.0, 0.8, 0.0, 0.6, 0.7, 0.0, 0.6, 0.8, 0.0, 0.7, 0.0, 0.6, 0.0],
                ),
                RhythmPattern::new(
                    "Ballad",
                    &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::Sheen,
        ),
        Style::Future => style_def(
            style,
            m().with_row(0, &[(5, 0.35), (3, 0.35), (4, 0.3)])
                .with_row(1, &[(4, 0.5), (3, 0.3), (0, 0.2)])
                .with_row(2, &[(5, 0.6), (3, 0.4)])
                .with_row(3, &[(4, 0.4), (5, 0.3), (0, 0.3)])
                .with_row(4, &[(5, 0.5), (0, 0.3), (3, 0.2)])
                .with_row(5, &[(3, 0.5), (4, 0.3), (0, 0.2)])
                .with_row(6, &[(0, 0.6), (5, 0.4)]),
            vec![
                RhythmPattern::new(
                    "Future Chops",
                    &[1.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.8, 0.0, 0.0, 0.7, 0.0, 0.0, 0.9, 0.0, 0.6, 0.6],
                ),
                RhythmPattern::new(
                    "Wobble Sustain",
                    &[0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::Sheen,
        ),
        // Rows 3 and 6 are intentionally absent.
        Style::Dark => style_def(
            style,
            m().with_row(0, &[(5, 0.3), (1, 0.25), (6, 0.2), (3, 0.25)])
                .with_row(1, &[(4, 0.5), (0, 0.5)])
                .with_row(2, &[(5, 0.6), (0, 0.4)])
                .with_row(4, &[(0, 0.5), (5, 0.3), (2, 0.2)])
                .with_row(5, &[(4, 0.4), (1, 0.3), (0, 0.3)]),
            vec![
                RhythmPattern::new(
                    "Pulse",
                    &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
                RhythmPattern::new(
                    "Heartbeat",
                    &[0.9, 0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                ),
            ],
            Voicing::Wide,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_is_registered() {
        let catalog = StyleCatalog::builtin();
        for style in Style::ALL {
            let def = catalog.get(style).expect("missing builtin style");
            assert_eq!(def.style, style);
            assert!(!def.patterns.is_empty(), "{style} has no patterns");
        }
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn parse_style_names() {
        assert_eq!("JAZZ".parse::<Style>().unwrap(), Style::Jazz);
        assert_eq!(" lofi ".parse::<Style>().unwrap(), Style::Lofi);
        assert!(matches!(
            "polka".parse::<Style>(),
            Err(MusicError::UnknownStyle(_))
        ));
    }

    #[test]
    fn dark_matrix_is_sparse() {
        let dark = StyleCatalog::builtin().get(Style::Dark).unwrap();
        assert!(dark.transitions.row(3).is_none());
        assert!(dark.transitions.row(6).is_none());
        // ...but reachable from the tonic
        let tonic: Vec<usize> = dark.transitions.row(0).unwrap().iter().map(|t| t.to).collect();
        assert!(tonic.contains(&3) && tonic.contains(&6));
    }

    #[test]
    fn row_sums_are_not_normalized() {
        let catalog = StyleCatalog::builtin();
        let total = |style, row| catalog.get(style).unwrap().transitions.row_total(row).unwrap();
        assert!((total(Style::Pop, 0) - 1.0).abs() < 1e-9);
        assert!(total(Style::Blues, 0) < 1.0);
        assert!(total(Style::Epic, 0) > 1.0);
    }

    #[test]
    fn pop_tonic_row_order() {
        let pop = StyleCatalog::builtin().get(Style::Pop).unwrap();
        let order: Vec<usize> = pop.transitions.row(0).unwrap().iter().map(|t| t.to).collect();
        assert_eq!(order, vec![4, 5, 3, 1, 2]);
    }

    #[test]
    fn extended_styles() {
        let catalog = StyleCatalog::builtin();
        let extended: Vec<Style> = catalog.iter().filter(|d| d.extended).map(|d| d.style).collect();
        assert_eq!(
            extended,
            vec![
                Style::Jazz,
                Style::Rnb,
                Style::Lofi,
                Style::Bossa,
                Style::Hyperpop,
                Style::Jpop,
                Style::Future
            ]
        );
    }

    #[test]
    fn variable_bar_lengths() {
        let catalog = StyleCatalog::builtin();
        let pop = catalog.get(Style::Pop).unwrap();
        assert_eq!(pop.patterns[0].bar_ticks(), TICKS_PER_BAR);

        let glitch = catalog.get(Style::Hyperpop).unwrap().pattern("glitch 32nds").unwrap();
        assert_eq!(glitch.len(), 32);
        assert_eq!(glitch.bar_ticks(), 32 * 16);

        let swing = catalog.get(Style::Jazz).unwrap().pattern("Swing Comp").unwrap();
        assert_eq!(swing.len(), 12);
        assert_eq!(swing.bar_ticks(), 12 * 43);

        let waltz = catalog.get(Style::Folk).unwrap().pattern("Waltz").unwrap();
        assert_eq!(waltz.bar_ticks(), 384);
    }

    #[test]
    fn whole_notes_pattern() {
        let whole = RhythmPattern::whole_notes();
        assert_eq!(whole.len(), 1);
        assert_eq!(whole.bar_ticks(), TICKS_PER_BAR);
        assert_eq!(whole.triggers().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn builtin_patterns_have_unit_velocities() {
        for def in StyleCatalog::builtin().iter() {
            for p in &def.patterns {
                assert!(p.steps.iter().all(|v| (0.0..=1.0).contains(v)), "{}", p.name);
                assert!(p.triggers().next().is_some(), "{} never triggers", p.name);
            }
        }
    }

    #[test]
    fn json_roundtrip_preserves_row_order() {
        let catalog = StyleCatalog::builtin();
        let json = catalog.to_json().unwrap();
        let back = StyleCatalog::from_json(&json).unwrap();
        assert_eq!(&back, catalog);
    }

    #[test]
    fn validate_rejects_bad_velocity() {
        let mut catalog = StyleCatalog::builtin().clone();
        catalog.styles[0].patterns[0].steps[0] = 1.5;
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(matches!(
            StyleCatalog::from_json(&json),
            Err(MusicError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_overlong_bar() {
        let mut catalog = StyleCatalog::builtin().clone();
        let pattern = &mut catalog.styles[0].patterns[0];
        pattern.ticks_per_step = Some(400_000_000);
        assert!(!pattern.bar_fits());
        assert_eq!(pattern.bar_ticks(), u32::MAX);
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(matches!(
            StyleCatalog::from_json(&json),
            Err(MusicError::InvalidConfig(_))
        ));

        // Largest step that still fits a 16-step bar is accepted.
        catalog.styles[0].patterns[0].ticks_per_step = Some(u32::MAX / 16);
        let steps = catalog.styles[0].patterns[0].len();
        assert_eq!(steps, 16);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_styles() {
        let mut catalog = StyleCatalog::builtin().clone();
        let dup = catalog.styles[0].clone();
        catalog.styles.push(dup);
        assert!(catalog.validate().is_err());
    }
}
