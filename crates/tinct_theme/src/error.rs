//! Theme engine error taxonomy
//!
//! None of these are fatal. They are absorbed where they occur, logged, and
//! reported back alongside whatever could still be applied.

use crate::descriptor::ColorSlot;
use thiserror::Error;
use tinct_core::ColorError;

/// Absorbed theme-application errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// A base color could not be parsed; only that slot is affected
    #[error("invalid {slot} color {value:?}: {source}")]
    InvalidColorFormat {
        slot: ColorSlot,
        value: String,
        #[source]
        source: ColorError,
    },

    /// No descriptor in the known set is marked active
    #[error("no active theme among {known} known theme(s)")]
    MissingActiveTheme { known: usize },

    /// A visual node could not be introspected and was left untouched
    #[error("override pass skipped node {node}: no class token list")]
    OverridePassSkipped { node: String },
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
