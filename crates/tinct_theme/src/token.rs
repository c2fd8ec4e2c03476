//! Static class tokens
//!
//! Tokens are fixed at render time and only ever read. The color-relevant
//! ones follow `<property>-<family>-<weight>`, for example
//! `text-neutral-surface-900` or `border-primary-300`. Everything else a node
//! carries (layout utilities, other palettes, unknown weights) is not a
//! [`ClassToken`].

use crate::ramp::Weight;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// The inline style property a token governs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleProperty {
    Background,
    Text,
    Border,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 3] = [
        StyleProperty::Background,
        StyleProperty::Text,
        StyleProperty::Border,
    ];

    /// CSS property written by the overrider
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Background => "background-color",
            StyleProperty::Text => "color",
            StyleProperty::Border => "border-color",
        }
    }

    /// Foreground roles read the text ramp; the rest read the background ramp
    pub fn is_foreground(self) -> bool {
        matches!(self, StyleProperty::Text)
    }

    fn prefix(self) -> &'static str {
        match self {
            StyleProperty::Background => "background",
            StyleProperty::Text => "text",
            StyleProperty::Border => "border",
        }
    }
}

impl Display for StyleProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

/// The palette a token draws from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    /// Brand color, always restyled from the primary ramp
    Primary,
    /// Surface styling, restyled only for custom themes
    NeutralSurface,
}

impl ColorFamily {
    fn name(self) -> &'static str {
        match self {
            ColorFamily::Primary => "primary",
            ColorFamily::NeutralSurface => "neutral-surface",
        }
    }
}

/// A parsed color-relevant class token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassToken {
    pub property: StyleProperty,
    pub family: ColorFamily,
    pub weight: Weight,
}

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(r"^(background|text|border)-(primary|neutral-surface)-(50|[1-9]00)$")
            .expect("class token grammar is a valid regex")
    })
}

impl ClassToken {
    pub const fn new(property: StyleProperty, family: ColorFamily, weight: Weight) -> Self {
        Self {
            property,
            family,
            weight,
        }
    }

    /// Parse a single token; anything off-grammar yields `None`
    pub fn parse(token: &str) -> Option<Self> {
        let caps = grammar().captures(token)?;

        let property = match &caps[1] {
            "background" => StyleProperty::Background,
            "text" => StyleProperty::Text,
            _ => StyleProperty::Border,
        };
        let family = match &caps[2] {
            "primary" => ColorFamily::Primary,
            _ => ColorFamily::NeutralSurface,
        };
        let weight = Weight::from_value(caps[3].parse().ok()?)?;

        Some(Self::new(property, family, weight))
    }

    /// Parse every color-relevant token in a list, skipping the rest
    pub fn scan<'a, I>(tokens: I) -> impl Iterator<Item = ClassToken> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        tokens.into_iter().filter_map(ClassToken::parse)
    }

    pub fn is_primary(&self) -> bool {
        self.family == ColorFamily::Primary
    }
}

impl Display for ClassToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.property.prefix(),
            self.family.name(),
            self.weight
        )
    }
}
