//! Theme descriptors
//!
//! Descriptors are created and mutated by the persistence collaborator. The
//! engine only reads them. Colors stay as the raw strings the collaborator
//! stored so that a malformed value can be reported per slot instead of
//! rejecting the whole record at deserialization time.

use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Theme kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Dark,
    Light,
    /// User palette: neutral surfaces are derived from background/text colors
    Custom,
}

impl ThemeKind {
    /// Whether neutral-surface roles are restyled from derived ramps
    pub fn derives_neutral_surfaces(self) -> bool {
        matches!(self, ThemeKind::Custom)
    }

    /// Whether late-mounted content needs to be watched
    pub fn observes_mutations(self) -> bool {
        !matches!(self, ThemeKind::Dark)
    }
}

impl Display for ThemeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::Custom => "custom",
        })
    }
}

/// The five base color slots of a descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSlot {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 5] = [
        ColorSlot::Primary,
        ColorSlot::Secondary,
        ColorSlot::Accent,
        ColorSlot::Background,
        ColorSlot::Text,
    ];

    /// Name used in registry keys
    pub fn key(self) -> &'static str {
        match self {
            ColorSlot::Primary => "primary",
            ColorSlot::Secondary => "secondary",
            ColorSlot::Accent => "accent",
            ColorSlot::Background => "background",
            ColorSlot::Text => "text",
        }
    }
}

impl Display for ColorSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One selectable palette, as persisted by the collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub id: String,
    pub name: String,
    pub kind: ThemeKind,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(default)]
    pub active: bool,
}

impl ThemeDescriptor {
    /// Raw color string stored for `slot`
    pub fn color(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Primary => &self.primary_color,
            ColorSlot::Secondary => &self.secondary_color,
            ColorSlot::Accent => &self.accent_color,
            ColorSlot::Background => &self.background_color,
            ColorSlot::Text => &self.text_color,
        }
    }
}

/// Pick the descriptor marked active.
///
/// If the collaborator ever reports more than one, the first wins.
pub fn find_active(themes: &[ThemeDescriptor]) -> Result<&ThemeDescriptor> {
    let mut active = themes.iter().filter(|t| t.active);
    let first = active.next().ok_or(ThemeError::MissingActiveTheme {
        known: themes.len(),
    })?;
    if let Some(extra) = active.next() {
        tracing::warn!(
            chosen = %first.id,
            ignored = %extra.id,
            "more than one theme marked active"
        );
    }
    Ok(first)
}
