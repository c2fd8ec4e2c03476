//! Theme persistence collaborator
//!
//! The engine never stores themes. It asks a [`ThemeProvider`] for the known
//! set and for activation, and consumes the descriptors it returns.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tinct_theme::{ThemeDescriptor, ThemePreset};

/// Failures reported by a theme provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("unknown theme {id:?}")]
    UnknownTheme { id: String },

    #[error("theme provider unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Source of theme descriptors and activation
pub trait ThemeProvider {
    /// Every known descriptor, with exactly one expected to be active
    fn list_themes(&self) -> Result<Vec<ThemeDescriptor>, ProviderError>;

    /// Mark `id` active, deactivating the previous one, and return it
    fn activate_theme(&mut self, id: &str) -> Result<ThemeDescriptor, ProviderError>;
}

/// On-disk themes file: a list of `[[themes]]` tables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThemesFile {
    #[serde(default)]
    pub themes: Vec<ThemeDescriptor>,
}

/// Provider backed by an in-memory list
#[derive(Debug, Clone, Default)]
pub struct InMemoryThemeProvider {
    themes: Vec<ThemeDescriptor>,
}

impl InMemoryThemeProvider {
    pub fn new(themes: Vec<ThemeDescriptor>) -> Self {
        Self { themes }
    }

    /// Every built-in preset, none active
    pub fn from_presets() -> Self {
        Self::new(ThemePreset::all().iter().map(|p| p.descriptor()).collect())
    }

    /// Parse a themes file from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: ThemesFile = toml::from_str(input).context("Failed to parse themes")?;
        Ok(Self::new(file.themes))
    }

    /// Load a themes file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
    }

    pub fn themes(&self) -> &[ThemeDescriptor] {
        &self.themes
    }

    /// Add a descriptor, replacing any existing one with the same id
    pub fn upsert(&mut self, theme: ThemeDescriptor) {
        match self.themes.iter_mut().find(|t| t.id == theme.id) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
    }
}

impl ThemeProvider for InMemoryThemeProvider {
    fn list_themes(&self) -> Result<Vec<ThemeDescriptor>, ProviderError> {
        Ok(self.themes.clone())
    }

    fn activate_theme(&mut self, id: &str) -> Result<ThemeDescriptor, ProviderError> {
        if !self.themes.iter().any(|t| t.id == id) {
            return Err(ProviderError::UnknownTheme { id: id.to_string() });
        }

        let mut activated = None;
        for theme in &mut self.themes {
            theme.active = theme.id == id;
            if theme.active && activated.is_none() {
                activated = Some(theme.clone());
            }
        }
        activated.ok_or_else(|| ProviderError::UnknownTheme { id: id.to_string() })
    }
}
