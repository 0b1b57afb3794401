use std::{fs, path::Path};

use anyhow::Context;
use minesweeper_core::{CellCount, Coord, DEFAULT_MINES, DEFAULT_SIZE, GameConfig};
use serde::{Deserialize, Serialize};

/// Game settings from a TOML file and the command line. Unset fields fall back to the
/// next layer: flags, then file, then built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::debug!("Loaded {settings:?} from {}", path.display());
        Ok(settings)
    }

    /// Fields set in `overrides` win over ours.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            size: overrides.size.or(self.size),
            mines: overrides.mines.or(self.mines),
            seed: overrides.seed.or(self.seed),
        }
    }

    pub fn game_config(&self) -> minesweeper_core::Result<GameConfig> {
        GameConfig::new(
            self.size.unwrap_or(DEFAULT_SIZE),
            self.mines.unwrap_or(DEFAULT_MINES),
        )
    }
}
