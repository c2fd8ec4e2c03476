//! Property registry
//!
//! The registry is the shared custom-property store read by style
//! declarations. It is rebuilt in full on every activation: the publisher
//! never patches an existing registry, it produces a new one.

use crate::descriptor::{ColorSlot, ThemeDescriptor};
use crate::error::ThemeError;
use crate::palette::ResolvedPalette;
use crate::presets::STANDARD_NEUTRAL;
use crate::ramp::{Ramp, Weight};
use indexmap::IndexMap;
use tinct_core::Rgb;

/// Ordered key → color map of published custom properties
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyRegistry {
    entries: IndexMap<String, Rgb>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a property; last write wins
    pub fn set(&mut self, key: impl Into<String>, color: Rgb) {
        self.entries.insert(key.into(), color);
    }

    pub fn get(&self, key: &str) -> Option<Rgb> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a `:root` declaration block
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (key, color) in &self.entries {
            css.push_str(&format!("  {}: {};\n", key, color));
        }
        css.push_str("}\n");
        css
    }

    /// Plain `key → #rrggbb` map for serialization
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_hex()))
            .collect()
    }
}

/// Output of one publish: the resolved palette, the new registry, and every
/// absorbed error
#[derive(Clone, Debug)]
pub struct Publication {
    pub palette: ResolvedPalette,
    pub registry: PropertyRegistry,
    pub issues: Vec<ThemeError>,
}

/// Resolves descriptors and writes registries
#[derive(Clone, Debug)]
pub struct PropertyPublisher {
    prefix: String,
    neutral: Ramp,
}

impl Default for PropertyPublisher {
    fn default() -> Self {
        Self {
            prefix: "color".to_string(),
            neutral: STANDARD_NEUTRAL,
        }
    }
}

impl PropertyPublisher {
    pub fn new(prefix: impl Into<String>, neutral: Ramp) -> Self {
        Self {
            prefix: prefix.into(),
            neutral,
        }
    }

    /// Neutral ramp used for dark and light kinds
    pub fn neutral(&self) -> &Ramp {
        &self.neutral
    }

    /// Registry key of a base color, e.g. `--color-accent`
    pub fn base_key(&self, slot: ColorSlot) -> String {
        format!("--{}-{}", self.prefix, slot.key())
    }

    /// Registry key of a ramp step, e.g. `--color-primary-600`
    pub fn ramp_key(&self, slot: ColorSlot, weight: Weight) -> String {
        format!("--{}-{}-{}", self.prefix, slot.key(), weight)
    }

    /// Resolve `theme` and build a complete registry for it.
    ///
    /// `previous` supplies values for slots whose color fails to parse.
    pub fn publish(
        &self,
        theme: &ThemeDescriptor,
        previous: Option<&ResolvedPalette>,
    ) -> Publication {
        let (palette, issues) = ResolvedPalette::resolve(theme, previous, &self.neutral);
        let registry = self.write(&palette);

        tracing::debug!(
            theme = %theme.id,
            kind = %theme.kind,
            properties = registry.len(),
            issues = issues.len(),
            "published theme properties"
        );

        Publication {
            palette,
            registry,
            issues,
        }
    }

    /// Build a fresh registry from a resolved palette
    pub fn write(&self, palette: &ResolvedPalette) -> PropertyRegistry {
        let mut registry = PropertyRegistry::new();

        for slot in ColorSlot::ALL {
            if let Some(color) = palette.base(slot) {
                registry.set(self.base_key(slot), color);
            }
        }

        let ramps = [
            (ColorSlot::Primary, palette.primary),
            (ColorSlot::Background, palette.background),
            (ColorSlot::Text, palette.text),
        ];
        for (slot, ramp) in ramps {
            let Some(ramp) = ramp else { continue };
            for (weight, color) in ramp.iter() {
                registry.set(self.ramp_key(slot, weight), color);
            }
        }

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ThemePreset;

    #[test]
    fn test_full_registry_layout() {
        let publication = PropertyPublisher::default().publish(&ThemePreset::Ocean.descriptor(), None);
        // 5 base colors + 3 ramps of 10
        assert_eq!(publication.registry.len(), 35);
        assert_eq!(
            publication.registry.get("--color-background"),
            Some(Rgb::from_hex(0x0B1D2A))
        );
        assert_eq!(
            publication.registry.get("--color-background-500"),
            Some(Rgb::from_hex(0x0B1D2A))
        );
    }

    #[test]
    fn test_light_theme_publishes_standard_neutral() {
        let publisher = PropertyPublisher::default();
        let publication = publisher.publish(&ThemePreset::Daylight.descriptor(), None);
        for weight in Weight::ALL {
            assert_eq!(
                publication.registry.get(&publisher.ramp_key(ColorSlot::Text, weight)),
                Some(STANDARD_NEUTRAL.get(weight))
            );
            assert_eq!(
                publication
                    .registry
                    .get(&publisher.ramp_key(ColorSlot::Background, weight)),
                Some(STANDARD_NEUTRAL.get(weight))
            );
        }
    }

    #[test]
    fn test_custom_prefix() {
        let publisher = PropertyPublisher::new("theme", STANDARD_NEUTRAL);
        let publication = publisher.publish(&ThemePreset::Midnight.descriptor(), None);
        assert!(publication.registry.get("--theme-primary").is_some());
        assert!(publication.registry.get("--color-primary").is_none());
    }

    #[test]
    fn test_css_rendering() {
        let mut registry = PropertyRegistry::new();
        registry.set("--color-primary", Rgb::from_hex(0x112233));
        registry.set("--color-text", Rgb::WHITE);
        assert_eq!(
            registry.to_css(),
            ":root {\n  --color-primary: #112233;\n  --color-text: #ffffff;\n}\n"
        );
    }
}
