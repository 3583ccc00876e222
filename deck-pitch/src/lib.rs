//! # Deck Pitch
//!
//! The StepTen.io investor pitch deck: twelve slides on the 16:9 canvas,
//! declared as a [`DeckDocument`] and assembled by `deck-core`.
//!
//! ```text
//!  1 Title (bookend)        7 Business Model
//!  2 The Problem            8 Traction
//!  3 Our Solution           9 Use of Funds
//!  4 The Secret Weapon     10 Why Now?
//!  5 Competitive Advantage 11 The Team
//!  6 Market Opportunity    12 Closing (bookend)
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod slides;

use std::io::Write;

use deck_core::{
    ArchetypeRegistry, Canvas, Chrome, Deck, DeckDocument, DeckResult, DeckSink, JsonSink,
    SinkUnits, Theme,
};

/// Number of slides in the pitch deck.
pub const SLIDE_COUNT: usize = 12;

/// The pitch deck as a document.
#[must_use]
pub fn pitch_document() -> DeckDocument {
    DeckDocument {
        canvas: Canvas::WIDESCREEN,
        chrome: Chrome::default(),
        slides: slides::all(),
        ..DeckDocument::default()
    }
}

/// Assemble the pitch deck with `theme` and the standard archetypes.
///
/// # Errors
///
/// Returns the first layout error.
pub fn pitch_deck(theme: &Theme) -> DeckResult<Deck> {
    let deck = pitch_document().assemble(theme, &ArchetypeRegistry::standard())?;
    tracing::info!("Built pitch deck with theme {}", theme.name());
    Ok(deck)
}

/// Assemble the pitch deck with the built-in palette and write it as JSON.
///
/// # Errors
///
/// Returns layout, encoding, or I/O errors.
pub fn write_pitch_deck<W: Write>(writer: W, units: SinkUnits) -> DeckResult<W> {
    let deck = pitch_deck(&Theme::retro_futuristic())?;
    let mut sink = JsonSink::new(writer).with_units(units);
    sink.write_deck(&deck)?;
    Ok(sink.into_inner())
}
