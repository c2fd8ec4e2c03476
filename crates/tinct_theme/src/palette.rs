//! Resolved palettes
//!
//! A [`ResolvedPalette`] is a descriptor with every color parsed and every
//! ramp derived. It is what both the registry and the overrider consume.

use crate::descriptor::{ColorSlot, ThemeDescriptor, ThemeKind};
use crate::error::ThemeError;
use crate::ramp::Ramp;
use crate::token::{ClassToken, ColorFamily};
use tinct_core::Rgb;

/// Parsed base colors plus the ramps derived from them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub kind: ThemeKind,
    bases: [Option<Rgb>; 5],
    pub primary: Option<Ramp>,
    pub background: Option<Ramp>,
    pub text: Option<Ramp>,
}

fn slot_index(slot: ColorSlot) -> usize {
    match slot {
        ColorSlot::Primary => 0,
        ColorSlot::Secondary => 1,
        ColorSlot::Accent => 2,
        ColorSlot::Background => 3,
        ColorSlot::Text => 4,
    }
}

impl ResolvedPalette {
    /// Resolve `theme`, falling back to `previous` for any slot that fails.
    ///
    /// Dark and light kinds use `neutral` for both surface ramps; custom kinds
    /// derive them from the background and text colors.
    pub fn resolve(
        theme: &ThemeDescriptor,
        previous: Option<&ResolvedPalette>,
        neutral: &Ramp,
    ) -> (Self, Vec<ThemeError>) {
        let mut issues = Vec::new();
        let mut bases = [None; 5];

        for slot in ColorSlot::ALL {
            let raw = theme.color(slot);
            let idx = slot_index(slot);
            match Rgb::parse(raw) {
                Ok(color) => bases[idx] = Some(color),
                Err(source) => {
                    tracing::warn!(theme = %theme.id, %slot, value = raw, "invalid base color, keeping previous value");
                    issues.push(ThemeError::InvalidColorFormat {
                        slot,
                        value: raw.to_string(),
                        source,
                    });
                    bases[idx] = previous.and_then(|p| p.base(slot));
                }
            }
        }

        // Ramps always follow the kept base, even when the previous theme
        // published the neutral ramp for that slot
        let derive = |slot: ColorSlot| bases[slot_index(slot)].map(Ramp::generate);

        let primary = derive(ColorSlot::Primary);
        let (background, text) = if theme.kind.derives_neutral_surfaces() {
            (derive(ColorSlot::Background), derive(ColorSlot::Text))
        } else {
            (Some(*neutral), Some(*neutral))
        };

        let palette = Self {
            kind: theme.kind,
            bases,
            primary,
            background,
            text,
        };
        (palette, issues)
    }

    /// Parsed base color for `slot`, if any was ever resolved
    pub fn base(&self, slot: ColorSlot) -> Option<Rgb> {
        self.bases[slot_index(slot)]
    }

    /// Ramp a token resolves against
    pub fn ramp_for(&self, token: &ClassToken) -> Option<&Ramp> {
        match token.family {
            ColorFamily::Primary => self.primary.as_ref(),
            ColorFamily::NeutralSurface if token.property.is_foreground() => self.text.as_ref(),
            ColorFamily::NeutralSurface => self.background.as_ref(),
        }
    }

    /// Resolved color for a token, or `None` if its ramp is unavailable
    pub fn resolve_token(&self, token: &ClassToken) -> Option<Rgb> {
        self.ramp_for(token).map(|ramp| ramp.get(token.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{ThemePreset, STANDARD_NEUTRAL};
    use crate::ramp::Weight;

    #[test]
    fn test_non_custom_kinds_use_standard_neutral() {
        for preset in [ThemePreset::Midnight, ThemePreset::Daylight] {
            let (palette, issues) =
                ResolvedPalette::resolve(&preset.descriptor(), None, &STANDARD_NEUTRAL);
            assert!(issues.is_empty());
            assert_eq!(palette.background, Some(STANDARD_NEUTRAL));
            assert_eq!(palette.text, Some(STANDARD_NEUTRAL));
        }
    }

    #[test]
    fn test_custom_kind_derives_surfaces() {
        let theme = ThemePreset::Ember.descriptor();
        let (palette, _) = ResolvedPalette::resolve(&theme, None, &STANDARD_NEUTRAL);
        assert_eq!(
            palette.background.unwrap().base(),
            Rgb::from_hex(0x101010)
        );
        assert_eq!(palette.text.unwrap().base(), Rgb::from_hex(0xF5F5F5));
    }

    #[test]
    fn test_invalid_slot_falls_back_to_previous() {
        let (first, _) =
            ResolvedPalette::resolve(&ThemePreset::Ocean.descriptor(), None, &STANDARD_NEUTRAL);

        let mut broken = ThemePreset::Ember.descriptor();
        broken.primary_color = "not-a-color".into();
        let (second, issues) = ResolvedPalette::resolve(&broken, Some(&first), &STANDARD_NEUTRAL);

        assert_eq!(issues.len(), 1);
        assert_eq!(second.primary, first.primary);
        assert_eq!(second.base(ColorSlot::Primary), first.base(ColorSlot::Primary));
        // unaffected slots are rebuilt from the new theme
        assert_eq!(second.base(ColorSlot::Background), Some(Rgb::from_hex(0x101010)));
    }

    #[test]
    fn test_fallback_after_neutral_kind_derives_from_kept_base() {
        let (midnight, _) =
            ResolvedPalette::resolve(&ThemePreset::Midnight.descriptor(), None, &STANDARD_NEUTRAL);

        let mut broken = ThemePreset::Ocean.descriptor();
        broken.background_color = "#10101g".into();
        let (palette, issues) = ResolvedPalette::resolve(&broken, Some(&midnight), &STANDARD_NEUTRAL);

        assert_eq!(issues.len(), 1);
        let kept = midnight.base(ColorSlot::Background).unwrap();
        assert_eq!(palette.base(ColorSlot::Background), Some(kept));
        assert_eq!(palette.background, Some(Ramp::generate(kept)));
        assert_ne!(palette.background, Some(STANDARD_NEUTRAL));
    }

    #[test]
    fn test_invalid_slot_without_history_is_absent() {
        let mut broken = ThemePreset::Ocean.descriptor();
        broken.background_color = "#zzzzzz".into();
        let (palette, issues) = ResolvedPalette::resolve(&broken, None, &STANDARD_NEUTRAL);

        assert_eq!(issues.len(), 1);
        assert_eq!(palette.background, None);
        let token = ClassToken::parse("background-neutral-surface-800").unwrap();
        assert_eq!(palette.resolve_token(&token), None);
        let token = ClassToken::parse("text-neutral-surface-800").unwrap();
        assert_eq!(
            palette.resolve_token(&token),
            Some(palette.text.unwrap().get(Weight::W800))
        );
    }
}
