// Data-driven generator settings.
//
// A `GeneratorConfig` describes one generation run: key, scale, style,
// length, rhythm switch, and an optional seed. It loads from JSON so runs
// can be saved and replayed, and every field has a default, so a config
// file only needs the fields it changes. An optional `catalog_path` points at
// a JSON style catalog that replaces the builtin one for this run.
//
// Validation happens at load time; the engine itself never sees a config it
// can't use.

use crate::error::{MusicError, Result, read_to_string};
use crate::note::Note;
use crate::scale::scale_by_name;
use crate::style::{Style, StyleCatalog};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub root: String,
    pub scale: String,
    pub style: Style,
    /// Bars to generate, one chord each. Must be at least 1.
    pub bars: usize,
    /// Apply a rhythm pattern; when false every chord is a whole note.
    pub rhythm: bool,
    /// Seed for the progression RNG. `None` picks one at run time.
    pub seed: Option<u64>,
    /// JSON style catalog to use instead of the builtin styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            root: "C".to_string(),
            scale: "ionian".to_string(),
            style: Style::Pop,
            bars: 4,
            rhythm: true,
            seed: None,
            catalog_path: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Check that the key, scale and length are usable.
    pub fn validate(&self) -> Result<()> {
        if Note::from_name(&self.root).is_none() {
            return Err(MusicError::UnknownRoot(self.root.clone()));
        }
        if scale_by_name(&self.scale).is_none() {
            return Err(MusicError::UnknownScale(self.scale.clone()));
        }
        if self.bars == 0 {
            return Err(MusicError::InvalidConfig("bars must be at least 1".into()));
        }
        Ok(())
    }

    /// The catalog this config asks for: the file at `catalog_path`, or the
    /// builtin styles.
    pub fn catalog(&self) -> Result<StyleCatalog> {
        match &self.catalog_path {
            Some(path) => StyleCatalog::load(path),
            None => Ok(StyleCatalog::builtin().clone()),
        }
    }
}
