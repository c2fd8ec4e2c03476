//! Engine configuration file handling (tinct.toml)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tinct_core::Rgb;
use tinct_theme::presets::STANDARD_NEUTRAL;
use tinct_theme::{PropertyPublisher, Ramp};
use tinct_tree::OverrideOptions;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub overrider: OverriderConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Property registry naming
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Key prefix, as in `--<prefix>-primary-500`
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "color".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OverriderConfig {
    /// Foreground kept on primary-background nodes
    #[serde(default = "default_readable_foreground")]
    pub readable_foreground: Rgb,
}

fn default_readable_foreground() -> Rgb {
    Rgb::WHITE
}

impl Default for OverriderConfig {
    fn default() -> Self {
        Self {
            readable_foreground: default_readable_foreground(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaletteConfig {
    /// Replacement for the standard neutral ramp, lightest first
    #[serde(default)]
    pub neutral: Option<Vec<Rgb>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WatcherConfig {
    /// Watch for insertions at all. Dark themes never watch.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(input).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.registry.prefix.is_empty()
            || !self
                .registry
                .prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!(
                "registry.prefix {:?} must be a non-empty identifier",
                self.registry.prefix
            );
        }
        if let Some(neutral) = &self.palette.neutral {
            if neutral.len() != 10 {
                bail!(
                    "palette.neutral must list 10 colors (50 through 900), got {}",
                    neutral.len()
                );
            }
        }
        Ok(())
    }

    /// Neutral ramp used for dark and light kinds
    pub fn neutral_ramp(&self) -> Ramp {
        self.palette
            .neutral
            .as_deref()
            .and_then(|steps| <[Rgb; 10]>::try_from(steps).ok())
            .map(Ramp::from_steps)
            .unwrap_or(STANDARD_NEUTRAL)
    }

    pub fn publisher(&self) -> PropertyPublisher {
        PropertyPublisher::new(self.registry.prefix.clone(), self.neutral_ramp())
    }

    pub fn override_options(&self) -> OverrideOptions {
        OverrideOptions {
            readable_foreground: self.overrider.readable_foreground,
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
