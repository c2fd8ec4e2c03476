//! Tinct Theme System
//!
//! Everything the engine knows about a theme before it touches a visual tree.
//!
//! # Overview
//!
//! - **Descriptors**: [`ThemeDescriptor`] records handed over by the
//!   persistence collaborator, with a [`ThemeKind`] of dark, light or custom
//! - **Ramps**: [`Ramp`] derives a 10-step tonal scale from one base color
//! - **Class tokens**: [`ClassToken`] parses static `<property>-<family>-<weight>`
//!   utility tokens such as `background-primary-600`
//! - **Registry**: [`PropertyPublisher`] resolves a descriptor into a
//!   [`ResolvedPalette`] and a [`PropertyRegistry`] of custom properties
//! - **Bus**: [`ThemeBus`] announces completed activations
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_theme::{PropertyPublisher, ThemePreset, Weight};
//!
//! let theme = ThemePreset::Ocean.descriptor();
//! let publication = PropertyPublisher::default().publish(&theme, None);
//!
//! assert!(publication.issues.is_empty());
//! let primary = publication.palette.primary.as_ref().unwrap();
//! assert_eq!(
//!     publication.registry.get("--color-primary-500"),
//!     Some(primary.get(Weight::W500))
//! );
//! ```

pub mod descriptor;
pub mod error;
pub mod palette;
pub mod presets;
pub mod ramp;
pub mod registry;
pub mod token;

pub use descriptor::{find_active, ColorSlot, ThemeDescriptor, ThemeKind};
pub use error::{Result, ThemeError};
pub use palette::ResolvedPalette;
pub use presets::{ThemePreset, STANDARD_NEUTRAL};
pub use ramp::{Ramp, Weight};
pub use registry::{PropertyPublisher, PropertyRegistry, Publication};
pub use token::{ClassToken, ColorFamily, StyleProperty};

/// Broadcasts the newly active descriptor once an activation has been applied
pub type ThemeBus = tinct_core::EventBus<ThemeDescriptor>;
