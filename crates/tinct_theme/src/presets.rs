//! Built-in theme presets and the platform's standard neutral ramp.

use crate::descriptor::{ThemeDescriptor, ThemeKind};
use crate::ramp::Ramp;
use std::fmt::{Display, Formatter};
use tinct_core::Rgb;

/// Neutral ramp the static surface tokens were compiled against.
///
/// Dark and light themes publish this for both the background and the text
/// ramp so their built-in look is preserved.
pub const STANDARD_NEUTRAL: Ramp = Ramp::from_steps([
    Rgb::from_hex(0xF9FAFB),
    Rgb::from_hex(0xF3F4F6),
    Rgb::from_hex(0xE5E7EB),
    Rgb::from_hex(0xD1D5DB),
    Rgb::from_hex(0x9CA3AF),
    Rgb::from_hex(0x6B7280),
    Rgb::from_hex(0x4B5563),
    Rgb::from_hex(0x374151),
    Rgb::from_hex(0x1F2937),
    Rgb::from_hex(0x111827),
]);

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Default dark theme.
    Midnight,
    /// Default light theme.
    Daylight,
    /// Custom palette with a deep blue surface.
    Ocean,
    /// Custom palette with a near-black surface.
    Ember,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Midnight => "midnight",
            Self::Daylight => "daylight",
            Self::Ocean => "ocean",
            Self::Ember => "ember",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Midnight => "Midnight",
            Self::Daylight => "Daylight",
            Self::Ocean => "Ocean",
            Self::Ember => "Ember",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 4] = [
            ThemePreset::Midnight,
            ThemePreset::Daylight,
            ThemePreset::Ocean,
            ThemePreset::Ember,
        ];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    pub fn kind(self) -> ThemeKind {
        match self {
            Self::Midnight => ThemeKind::Dark,
            Self::Daylight => ThemeKind::Light,
            Self::Ocean | Self::Ember => ThemeKind::Custom,
        }
    }

    /// Build an inactive descriptor for this preset.
    pub fn descriptor(self) -> ThemeDescriptor {
        let palette = match self {
            Self::Midnight => BasePalette {
                primary: "#6366f1",
                secondary: "#8b5cf6",
                accent: "#f59e0b",
                background: "#111827",
                text: "#f9fafb",
            },
            Self::Daylight => BasePalette {
                primary: "#2563eb",
                secondary: "#7c3aed",
                accent: "#db2777",
                background: "#ffffff",
                text: "#111827",
            },
            Self::Ocean => BasePalette {
                primary: "#0ea5e9",
                secondary: "#14b8a6",
                accent: "#f97316",
                background: "#0b1d2a",
                text: "#e0f2fe",
            },
            Self::Ember => BasePalette {
                primary: "#dc2626",
                secondary: "#ea580c",
                accent: "#facc15",
                background: "#101010",
                text: "#f5f5f5",
            },
        };

        ThemeDescriptor {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
            kind: self.kind(),
            primary_color: palette.primary.to_string(),
            secondary_color: palette.secondary.to_string(),
            accent_color: palette.accent.to_string(),
            background_color: palette.background.to_string(),
            text_color: palette.text.to_string(),
            active: false,
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy)]
struct BasePalette {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    text: &'static str,
}
