//! Error types for layout and assembly operations.

use thiserror::Error;

use crate::geometry::{Rect, Size};

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur while laying out or assembling a deck.
///
/// Layout is deterministic, so none of these are worth retrying: the same
/// input fails the same way until the configuration changes.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Unknown theme role, unknown archetype, or a malformed layout spec.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Computed geometry falls outside the canvas.
    #[error("Layout bounds error: frame {frame} exceeds canvas {canvas}")]
    LayoutBounds {
        /// The frame that was rejected.
        frame: Rect,
        /// The canvas it was placed on.
        canvas: Size,
    },

    /// Two style rules of equal precedence disagree for the same cell.
    #[error("Style rule conflict on {target}: {first} vs {second}")]
    StyleRuleConflict {
        /// Which style property was being resolved.
        target: String,
        /// Role chosen by the first matching rule.
        first: String,
        /// Role chosen by the conflicting rule.
        second: String,
    },

    /// Deck or spec serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing a deck through a sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// Shorthand for [`DeckError::Configuration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
