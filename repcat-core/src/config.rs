//! Engine configuration
//!
//! Resolution order for the config file:
//! 1. Explicit path (command-line argument)
//! 2. `REPCAT_CONFIG` environment variable
//! 3. Built-in defaults

use crate::error::{Error, Result};
use crate::pagination::Viewport;
use crate::state::{YearRange, DEFAULT_YEAR_BOUNDS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "REPCAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub years: YearBounds,
    pub page_size: PageSizes,
}

/// Absolute limits of the year facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub wide: usize,
    pub narrow: usize,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_YEAR_BOUNDS.min,
            max: DEFAULT_YEAR_BOUNDS.max,
        }
    }
}

impl Default for PageSizes {
    fn default() -> Self {
        Self { wide: 16, narrow: 8 }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from the explicit path, then the environment, else defaults
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load(PathBuf::from(path));
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.min > self.years.max {
            return Err(Error::Config(format!(
                "years.min ({}) is greater than years.max ({})",
                self.years.min, self.years.max
            )));
        }
        if self.page_size.wide == 0 || self.page_size.narrow == 0 {
            return Err(Error::Config("page sizes must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn year_bounds(&self) -> YearRange {
        YearRange::new(self.years.min, self.years.max)
    }

    pub fn page_size(&self, viewport: Viewport) -> usize {
        match viewport {
            Viewport::Wide => self.page_size.wide,
            Viewport::Narrow => self.page_size.narrow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.year_bounds(), YearRange::new(1600, 2025));
        assert_eq!(config.page_size(Viewport::Wide), 16);
        assert_eq!(config.page_size(Viewport::Narrow), 8);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("[page_size]\nnarrow = 6\n").unwrap();
        assert_eq!(config.page_size.narrow, 6);
        assert_eq!(config.page_size.wide, 16);
        assert_eq!(config.years.max, 2025);
    }

    #[test]
    fn test_inverted_years_rejected() {
        let result = EngineConfig::from_toml_str("[years]\nmin = 1900\nmax = 1800\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = EngineConfig::from_toml_str("[page_size]\nwide = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = EngineConfig::from_toml_str("years = [");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[years]\nmin = 1700").unwrap();

        let config = EngineConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(config.years.min, 1700);
    }
}
