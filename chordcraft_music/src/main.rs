// Chordcraft CLI.
//
// Inspect scales and chords, generate styled progressions as note events, and
// voice-lead the builtin example progressions. Event output is JSON so an
// external MIDI writer or player can consume it directly.
//
// Usage:
//   chordcraft scale <ROOT> <SCALE>
//   chordcraft chords <ROOT> <SCALE>
//   chordcraft generate [--root R] [--scale S] [--style STYLE] [--bars N]
//     [--seed N] [--no-rhythm] [--config FILE] [--json]
//   chordcraft example <NAME> [--root R] [--scale S] [--extensions]
//     [--variation] [--smooth] [--json]
//   chordcraft styles
//
// Logging goes to stderr; set RUST_LOG=debug to see fallback decisions.

use chordcraft_music::chord::chords;
use chordcraft_music::config::GeneratorConfig;
use chordcraft_music::error::{MusicError, Result};
use chordcraft_music::presets::{
    EXAMPLE_PROGRESSIONS, VariationOptions, example_progression, sequence_events,
    variation_sequence,
};
use chordcraft_music::progression::generate_with;
use chordcraft_music::rhythm::{MidiEvent, apply_rhythm};
use chordcraft_music::scale::{scale_by_name, scale_names, scale_notes};
use chordcraft_music::style::{Style, StyleCatalog};
use chordcraft_music::{ChordRng, note::Note};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Velocity for example-progression exports (the same 0.8 x 100 used for
/// unrhythmed whole notes).
const EXAMPLE_VELOCITY: u8 = 80;

#[derive(Parser)]
#[command(name = "chordcraft")]
#[command(about = "Scale, chord and progression generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the notes of a scale
    Scale { root: String, scale: String },

    /// Show the diatonic chord on every degree of a scale
    Chords { root: String, scale: String },

    /// Generate a styled progression and its note events
    Generate {
        /// Root note (C, C#, D, ... B)
        #[arg(short, long)]
        root: Option<String>,

        /// Scale or mode name
        #[arg(short, long)]
        scale: Option<String>,

        /// Style (pop, jazz, blues, rnb, rock, lofi, epic, bossa, folk,
        /// hyperpop, jpop, future, dark)
        #[arg(long)]
        style: Option<String>,

        /// Number of bars
        #[arg(short, long)]
        bars: Option<usize>,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Play every chord as a whole note
        #[arg(long)]
        no_rhythm: bool,

        /// JSON generator config; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build one of the fixed example progressions
    Example {
        /// Progression name, e.g. "Pop Anthem"; omit to list them
        name: Option<String>,

        #[arg(short, long, default_value = "C")]
        root: String,

        #[arg(short, long, default_value = "ionian")]
        scale: String,

        /// Add sevenths
        #[arg(long)]
        extensions: bool,

        /// With --extensions, add ninths an octave up
        #[arg(long)]
        variation: bool,

        /// Voice-lead the sequence
        #[arg(long)]
        smooth: bool,

        /// Print the sequence and its events as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the builtin styles
    Styles,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Scale { root, scale } => show_scale(&root, &scale),
        Commands::Chords { root, scale } => show_chords(&root, &scale),
        Commands::Generate {
            root,
            scale,
            style,
            bars,
            seed,
            no_rhythm,
            config,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => GeneratorConfig::load(&path)?,
                None => GeneratorConfig::default(),
            };
            if let Some(root) = root {
                cfg.root = root;
            }
            if let Some(scale) = scale {
                cfg.scale = scale;
            }
            if let Some(style) = style {
                cfg.style = style.parse()?;
            }
            if let Some(bars) = bars {
                cfg.bars = bars;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if no_rhythm {
                cfg.rhythm = false;
            }
            cfg.validate()?;
            run_generate(&cfg, json)
        }
        Commands::Example {
            name,
            root,
            scale,
            extensions,
            variation,
            smooth,
            json,
        } => match name {
            Some(name) => {
                let options = VariationOptions {
                    extensions,
                    variation,
                    smooth_voicing: smooth,
                };
                run_example(&name, &root, &scale, options, json)
            }
            None => {
                for p in EXAMPLE_PROGRESSIONS {
                    println!("{:<20} {}", p.name, p.description);
                }
                Ok(())
            }
        },
        Commands::Styles => {
            for def in StyleCatalog::builtin().iter() {
                let patterns: Vec<String> = def
                    .patterns
                    .iter()
                    .map(|p| format!("{} ({} steps)", p.name, p.len()))
                    .collect();
                println!(
                    "{:<9} voicing={:?} sevenths={} patterns: {}",
                    def.style,
                    def.voicing,
                    def.extended,
                    patterns.join(", ")
                );
            }
            Ok(())
        }
    }
}

/// Reject unknown names up front; the engine itself would just return
/// nothing.
fn check_key(root: &str, scale: &str) -> Result<()> {
    if Note::from_name(root).is_none() {
        return Err(MusicError::UnknownRoot(root.to_string()));
    }
    if scale_by_name(scale).is_none() {
        return Err(MusicError::UnknownScale(format!(
            "{scale} (known: {})",
            scale_names().collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(())
}

fn show_scale(root: &str, scale: &str) -> Result<()> {
    check_key(root, scale)?;
    let names: Vec<&str> = scale_notes(root, scale).iter().map(|n| n.name()).collect();
    println!("{}", names.join(" "));
    Ok(())
}

fn show_chords(root: &str, scale: &str) -> Result<()> {
    check_key(root, scale)?;
    println!("{:<7} {:<7} {:<8} {:<8} intervals", "degree", "chord", "roman", "quality");
    for chord in chords(root, scale) {
        let intervals = chord
            .intervals
            .map(|iv| format!("3rd={} 5th={} 7th={} 9th={}", iv.third, iv.fifth, iv.seventh, iv.ninth))
            .unwrap_or_default();
        println!(
            "{:<7} {:<7} {:<8} {:<8} {}",
            chord.degree, chord.name, chord.roman, chord.quality, intervals
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    seed: u64,
    style: Style,
    chords: Vec<&'a str>,
    events: &'a [MidiEvent],
}

fn run_generate(cfg: &GeneratorConfig, json: bool) -> Result<()> {
    let seed = match cfg.seed {
        Some(seed) => seed,
        None => ChordRng::entropy_seed()?,
    };
    let catalog = cfg.catalog()?;
    let style = catalog
        .get(cfg.style)
        .ok_or_else(|| MusicError::UnknownStyle(cfg.style.to_string()))?;
    info!(seed, style = %cfg.style, bars = cfg.bars, "generating progression");

    let mut rng = ChordRng::new(seed);
    let available = chords(&cfg.root, &cfg.scale);
    let progression = generate_with(&available, style, cfg.bars, &mut rng);
    let events = apply_rhythm(&progression, style, cfg.rhythm, &mut rng);

    if json {
        let output = GenerateOutput {
            seed,
            style: cfg.style,
            chords: progression.iter().map(|c| c.name.as_str()).collect(),
            events: &events,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Seed: {seed}");
        println!("Key: {} {}  Style: {}", cfg.root, cfg.scale, cfg.style);
        let romans: Vec<&str> = progression.iter().map(|c| c.roman.as_str()).collect();
        let names: Vec<&str> = progression.iter().map(|c| c.name.as_str()).collect();
        println!("Progression: {}", names.join(" | "));
        println!("Numerals:    {}", romans.join(" | "));
        print_events(&events);
    }
    Ok(())
}

#[derive(Serialize)]
struct ExampleOutput<'a> {
    name: &'a str,
    sequence: &'a [chordcraft_music::presets::VariationSequenceItem],
    events: &'a [MidiEvent],
}

fn run_example(
    name: &str,
    root: &str,
    scale: &str,
    options: VariationOptions,
    json: bool,
) -> Result<()> {
    check_key(root, scale)?;
    let preset = example_progression(name)?;
    let items = variation_sequence(root, scale, preset.degrees, options);
    let events = sequence_events(&items, EXAMPLE_VELOCITY);

    if json {
        let output = ExampleOutput {
            name: preset.name,
            sequence: &items,
            events: &events,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} in {root} {scale}: {}", preset.name, preset.description);
        for item in &items {
            println!(
                "  {:<6} {:<6} {:?} -> {:?}",
                item.chord.roman, item.chord.name, item.original_notes, item.midi_notes
            );
        }
    }
    Ok(())
}

fn print_events(events: &[MidiEvent]) {
    println!("{:>6} {:>6} {:>4}  notes", "start", "dur", "vel");
    for e in events {
        println!(
            "{:>6} {:>6} {:>4}  {:?}",
            e.start_time, e.duration, e.velocity, e.notes
        );
    }
}
