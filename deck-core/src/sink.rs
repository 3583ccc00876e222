//! Output seam between assembled decks and file writers.
//!
//! The engine never encodes a presentation file itself. A [`DeckSink`]
//! receives the finished [`Deck`]; [`JsonSink`] is the in-crate
//! implementation and can emit either the inch-based deck or a flattened
//! EMU view that a presentation writer consumes directly.

use std::io::Write;

use serde::Serialize;

use crate::element::Element;
use crate::geometry::points_to_emu;
use crate::slide::Deck;
use crate::theme::Color;
use crate::DeckResult;

/// Consumer of assembled decks.
pub trait DeckSink {
    /// Write a whole deck.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write_deck(&mut self, deck: &Deck) -> DeckResult<()>;
}

/// Coordinate system of [`JsonSink`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkUnits {
    /// The deck as assembled, in inches and points.
    #[default]
    Inches,
    /// Frames and line widths in English Metric Units.
    Emu,
}

/// Writes decks as JSON.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    units: SinkUnits,
}

impl<W: Write> JsonSink<W> {
    /// Sink writing inch-based JSON.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            units: SinkUnits::Inches,
        }
    }

    /// Choose the output units.
    #[must_use]
    pub fn with_units(mut self, units: SinkUnits) -> Self {
        self.units = units;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DeckSink for JsonSink<W> {
    fn write_deck(&mut self, deck: &Deck) -> DeckResult<()> {
        match self.units {
            SinkUnits::Inches => serde_json::to_writer_pretty(&mut self.writer, deck)?,
            SinkUnits::Emu => {
                serde_json::to_writer_pretty(&mut self.writer, &EmuDeck::from(deck))?;
            }
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        tracing::debug!("Wrote deck of {} slides as {:?} JSON", deck.len(), self.units);
        Ok(())
    }
}

#[derive(Serialize)]
struct EmuDeck<'a> {
    width: i64,
    height: i64,
    slides: Vec<EmuSlide<'a>>,
}

#[derive(Serialize)]
struct EmuSlide<'a> {
    position: usize,
    background: Color,
    elements: Vec<EmuElement<'a>>,
}

#[derive(Serialize)]
struct EmuElement<'a> {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_width: Option<i64>,
    element: &'a Element,
}

impl<'a> From<&'a Deck> for EmuDeck<'a> {
    fn from(deck: &'a Deck) -> Self {
        let (_, _, width, height) = deck.canvas().bounds().to_emu();
        let slides = deck
            .slides()
            .iter()
            .map(|slide| EmuSlide {
                position: slide.position,
                background: slide.background,
                elements: slide
                    .elements
                    .iter()
                    .map(|element| {
                        let (x, y, cx, cy) = element.frame().to_emu();
                        let line_width = element
                            .as_shape()
                            .and_then(|shape| shape.border)
                            .map(|border| points_to_emu(border.width_pt));
                        EmuElement {
                            x,
                            y,
                            cx,
                            cy,
                            line_width,
                            element,
                        }
                    })
                    .collect(),
            })
            .collect();
        Self {
            width,
            height,
            slides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, ShapeSpec};
    use crate::element::ShapeKind;
    use crate::geometry::Rect;
    use crate::slide::{Chrome, DeckBuilder, SlideKind};
    use crate::theme::{Role, Theme};

    fn sample_deck(theme: &Theme) -> Deck {
        let mut deck = DeckBuilder::new(theme, Canvas::WIDESCREEN, Chrome::default());
        deck.slide(SlideKind::Content, |surface| {
            surface.place_shape(
                &ShapeSpec::new(
                    ShapeKind::RoundedRectangle,
                    Rect::from_xywh(0.5, 1.8, 2.7, 3.0),
                    Role::Muted,
                )
                .with_border(Role::Primary, 2.0),
            )?;
            Ok(())
        })
        .expect("should assemble");
        deck.finish()
    }

    #[test]
    fn test_inch_output_roundtrips() {
        let theme = Theme::retro_futuristic();
        let deck = sample_deck(&theme);
        let mut sink = JsonSink::new(Vec::new());
        sink.write_deck(&deck).expect("should write");

        let json = String::from_utf8(sink.into_inner()).expect("utf8");
        assert_eq!(Deck::from_json(&json).expect("should parse"), deck);
    }

    #[test]
    fn test_emu_output() {
        let theme = Theme::retro_futuristic();
        let deck = sample_deck(&theme);
        let mut sink = JsonSink::new(Vec::new()).with_units(SinkUnits::Emu);
        sink.write_deck(&deck).expect("should write");

        let value: serde_json::Value =
            serde_json::from_slice(&sink.into_inner()).expect("valid json");
        assert_eq!(value["width"], 9_144_000);
        assert_eq!(value["height"], 5_143_500);

        let card = &value["slides"][0]["elements"][1];
        assert_eq!(card["x"], 457_200);
        assert_eq!(card["cx"], 2_468_880);
        assert_eq!(card["line_width"], 25_400);
        assert!(value["slides"][0]["elements"][0].get("line_width").is_none());
    }
}
