//! Run configuration: defaults, YAML files and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a run needs to start.
///
/// `width`/`height` stay `None` until resolved against the terminal size;
/// exactly one of `seed`/`shape` should drive seeding (see [`Config::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid width in cells; unset means "use the terminal width".
    pub width: Option<usize>,
    /// Grid height in cells; unset means "use the terminal height".
    pub height: Option<usize>,
    /// Seed for the random fill.
    pub seed: Option<u64>,
    /// Catalog shape name to stamp instead of a random fill.
    pub shape: Option<String>,
    /// Column of the shape's top-left corner.
    pub shape_x_offset: i64,
    /// Row of the shape's top-left corner.
    pub shape_y_offset: i64,
    /// Animation pace; 0 means "run a single tick and exit".
    pub ticks_per_second: u32,
    /// Reseed and keep going instead of halting on extinction or a loop.
    pub infinite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            seed: None,
            shape: None,
            shape_x_offset: 0,
            shape_y_offset: 0,
            ticks_per_second: 5,
            infinite: false,
        }
    }
}

impl Config {
    /// Rows kept free of the cell matrix for the status line and prompt
    /// when the height comes from the terminal.
    pub const RESERVED_ROWS: u16 = 3;

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.seed.is_some() && self.shape.is_some() {
            return Err("give either a seed or a shape, not both".to_string());
        }
        if matches!(self.width, Some(w) if w <= 1) {
            return Err("width must be greater than 1".to_string());
        }
        if matches!(self.height, Some(h) if h <= 1) {
            return Err("height must be greater than 1".to_string());
        }
        Ok(())
    }

    /// Fill unset dimensions from the terminal size, reserving rows below
    /// the cell matrix.
    pub fn resolve_dimensions(&mut self, cols: u16, rows: u16) {
        if self.width.is_none() {
            self.width = Some(cols as usize);
        }
        if self.height.is_none() {
            self.height = Some(rows.saturating_sub(Self::RESERVED_ROWS) as usize);
        }
    }
}
