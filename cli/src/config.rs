//! Configuration file handling
//!
//! Loaded from `<config dir>/glyphcast/config.toml`, or from the path given
//! with `--config`. Every key is optional.

use glyphcast::{GlyphRamp, RampError, RampPreset};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Preset name, `dense` or `sparse`
    #[serde(default)]
    pub ramp: Option<String>,
    /// Explicit glyph ramp, takes precedence over `ramp`
    #[serde(default)]
    pub custom_ramp: Option<String>,
    /// Image drawn under the welcome banner
    #[serde(default)]
    pub splash: Option<PathBuf>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Answers used when an animation prompt is left empty
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnimationConfig {
    #[serde(default = "default_delay_secs")]
    pub delay_secs: f64,
    #[serde(default = "default_loops")]
    pub loops: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            loops: default_loops(),
        }
    }
}

impl AnimationConfig {
    /// Frame delay, or `None` if the configured value is negative or not finite
    pub fn delay(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.delay_secs).ok()
    }
}

fn default_delay_secs() -> f64 {
    0.5
}

fn default_loops() -> u32 {
    1
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glyph ramp: {0}")]
    InvalidRamp(#[from] RampError),

    #[error("animation delay must be a non-negative number of seconds, got {0}")]
    InvalidDelay(f64),
}

impl Config {
    /// Load configuration from `path`, or from [`default_path`] when `None`
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_ramp(None, None)?;
        if self.animation.delay().is_none() {
            return Err(ConfigError::InvalidDelay(self.animation.delay_secs));
        }
        Ok(())
    }

    /// Pick the starting ramp
    ///
    /// Command-line values win over the file, and a custom ramp wins over a
    /// preset from the same source.
    pub fn resolve_ramp(
        &self,
        preset: Option<RampPreset>,
        custom: Option<&str>,
    ) -> Result<GlyphRamp, ConfigError> {
        if let Some(chars) = custom {
            return Ok(GlyphRamp::new(chars)?);
        }
        if let Some(preset) = preset {
            return Ok(preset.ramp());
        }
        if let Some(chars) = &self.custom_ramp {
            return Ok(GlyphRamp::new(chars)?);
        }
        match &self.ramp {
            Some(name) => Ok(name.parse::<RampPreset>()?.ramp()),
            None => Ok(GlyphRamp::default()),
        }
    }
}

/// Default config file location, if the platform has a config directory
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glyphcast").join("config.toml"))
}
