//! Tonal ramps
//!
//! A ramp maps ten fixed weights to colors derived from a single base color.
//! Weight 500 is the base itself; lighter weights push every channel toward
//! 255 and darker weights toward 0 by fixed offsets. The blend is linear per
//! channel, not perceptual.

use crate::descriptor::ColorSlot;
use crate::error::{Result, ThemeError};
use std::fmt::{Display, Formatter};
use tinct_core::Rgb;

/// One of the ten ramp buckets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weight {
    W50,
    W100,
    W200,
    W300,
    W400,
    W500,
    W600,
    W700,
    W800,
    W900,
}

impl Weight {
    /// All weights, lightest first
    pub const ALL: [Weight; 10] = [
        Weight::W50,
        Weight::W100,
        Weight::W200,
        Weight::W300,
        Weight::W400,
        Weight::W500,
        Weight::W600,
        Weight::W700,
        Weight::W800,
        Weight::W900,
    ];

    /// Numeric weight as written in class tokens
    pub const fn value(self) -> u16 {
        match self {
            Weight::W50 => 50,
            Weight::W100 => 100,
            Weight::W200 => 200,
            Weight::W300 => 300,
            Weight::W400 => 400,
            Weight::W500 => 500,
            Weight::W600 => 600,
            Weight::W700 => 700,
            Weight::W800 => 800,
            Weight::W900 => 900,
        }
    }

    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.value() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Per-channel offset applied to the base color: positive lightens
    const fn offset(self) -> i16 {
        match self {
            Weight::W50 => 230,
            Weight::W100 => 204,
            Weight::W200 => 153,
            Weight::W300 => 102,
            Weight::W400 => 51,
            Weight::W500 => 0,
            Weight::W600 => -41,
            Weight::W700 => -80,
            Weight::W800 => -107,
            Weight::W900 => -128,
        }
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A 10-step tonal ramp
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ramp {
    steps: [Rgb; 10],
}

impl Ramp {
    /// Derive a ramp from `base`
    pub fn generate(base: Rgb) -> Self {
        let steps = Weight::ALL.map(|weight| match weight.offset() {
            0 => base,
            up if up > 0 => base.lighten(up as u8),
            down => base.darken(down.unsigned_abs() as u8),
        });
        Self { steps }
    }

    /// Parse `input` as a CSS color and derive its ramp
    pub fn parse(slot: ColorSlot, input: &str) -> Result<Self> {
        Rgb::parse(input)
            .map(Self::generate)
            .map_err(|source| ThemeError::InvalidColorFormat {
                slot,
                value: input.to_string(),
                source,
            })
    }

    /// Build a ramp from explicit steps, lightest first
    pub const fn from_steps(steps: [Rgb; 10]) -> Self {
        Self { steps }
    }

    pub fn get(&self, weight: Weight) -> Rgb {
        self.steps[weight.index()]
    }

    /// The weight-500 color
    pub fn base(&self) -> Rgb {
        self.get(Weight::W500)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weight, Rgb)> + '_ {
        Weight::ALL.into_iter().zip(self.steps.iter().copied())
    }

    /// Whether brightness never increases from weight 50 to weight 900
    pub fn is_monotonic(&self) -> bool {
        self.steps
            .windows(2)
            .all(|pair| pair[0].brightness() >= pair[1].brightness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_500_is_the_base() {
        let base = Rgb::from_hex(0x1E66F5);
        assert_eq!(Ramp::generate(base).get(Weight::W500), base);
    }

    #[test]
    fn test_fixed_offsets() {
        let ramp = Ramp::generate(Rgb::new(100, 100, 100));
        let grey = |v| Rgb::new(v, v, v);
        assert_eq!(ramp.get(Weight::W50), grey(255));
        assert_eq!(ramp.get(Weight::W100), grey(255));
        assert_eq!(ramp.get(Weight::W200), grey(253));
        assert_eq!(ramp.get(Weight::W300), grey(202));
        assert_eq!(ramp.get(Weight::W400), grey(151));
        assert_eq!(ramp.get(Weight::W600), grey(59));
        assert_eq!(ramp.get(Weight::W700), grey(20));
        assert_eq!(ramp.get(Weight::W800), grey(0));
        assert_eq!(ramp.get(Weight::W900), grey(0));
    }

    #[test]
    fn test_dark_background_ramp() {
        let ramp = Ramp::generate(Rgb::from_hex(0x101010));
        assert_eq!(ramp.get(Weight::W50), Rgb::from_hex(0xF6F6F6));
        assert_eq!(ramp.get(Weight::W800), Rgb::BLACK);
        assert!(ramp.is_monotonic());
    }

    #[test]
    fn test_parse_reports_slot() {
        let err = Ramp::parse(ColorSlot::Text, "#12").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidColorFormat {
                slot: ColorSlot::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_weight_values_round_trip() {
        for weight in Weight::ALL {
            assert_eq!(Weight::from_value(weight.value()), Some(weight));
        }
        assert_eq!(Weight::from_value(950), None);
        assert_eq!(Weight::from_value(0), None);
    }
}
