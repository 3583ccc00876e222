//! Slide and deck assembly.
//!
//! A [`DeckBuilder`] owns the shared chrome and hands each slide's content
//! closure a fresh [`Surface`]. Chrome goes down first, so content always
//! draws on top of it. A slide that fails to build aborts the deck; there is
//! no partial slide.

use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, SlideBuilder, Surface, TextSpec, TextStyle};
use crate::element::{Element, ElementId, HAlign};
use crate::geometry::Rect;
use crate::theme::{Color, Role, Theme};
use crate::{DeckError, DeckResult};

/// Whether a slide carries the slide-number label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    /// Regular slide with a number label.
    #[default]
    Content,
    /// Title or closing slide, never numbered.
    Bookend,
}

/// Placement of the slide-number label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideNumberStyle {
    /// Reserved region the label occupies.
    pub region: Rect,
    /// Label typography.
    pub style: TextStyle,
    /// Label alignment inside the region.
    pub align: HAlign,
}

impl Default for SlideNumberStyle {
    fn default() -> Self {
        Self {
            region: Rect::from_xywh(9.2, 5.2, 0.6, 0.3),
            style: TextStyle::new(12.0, Role::MutedForeground),
            align: HAlign::Right,
        }
    }
}

/// Decoration shared by every slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chrome {
    /// Slide background role.
    #[serde(default = "Chrome::default_background")]
    pub background: Role,
    /// Slide-number label, `None` to disable numbering.
    #[serde(default = "Chrome::default_slide_number")]
    pub slide_number: Option<SlideNumberStyle>,
}

impl Chrome {
    fn default_background() -> Role {
        Role::Surface
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_slide_number() -> Option<SlideNumberStyle> {
        Some(SlideNumberStyle::default())
    }
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            background: Self::default_background(),
            slide_number: Self::default_slide_number(),
        }
    }
}

/// One assembled slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based position in the deck.
    pub position: usize,
    /// Content or bookend.
    pub kind: SlideKind,
    /// Resolved background color.
    pub background: Color,
    /// Number shown on the slide, if any.
    pub number: Option<usize>,
    /// Region reserved for the number label.
    #[serde(default)]
    pub reserved: Option<Rect>,
    /// Elements in z-order.
    pub elements: Vec<Element>,
}

impl Slide {
    /// Content elements overlapping the reserved slide-number region.
    ///
    /// The label itself is excluded.
    #[must_use]
    pub fn chrome_intrusions(&self) -> Vec<ElementId> {
        let Some(region) = self.reserved else {
            return Vec::new();
        };
        let skip = usize::from(self.number.is_some());
        self.elements
            .iter()
            .enumerate()
            .skip(skip)
            .filter(|(_, element)| element.frame().intersects(&region))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    /// Number of elements, chrome included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the slide has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// An assembled, immutable deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    canvas: Canvas,
    theme: String,
    slides: Vec<Slide>,
}

impl Deck {
    /// Canvas shared by every slide.
    #[must_use]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Name of the theme the deck was assembled with.
    #[must_use]
    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    /// Slides in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at a 1-based position.
    #[must_use]
    pub fn slide(&self, position: usize) -> Option<&Slide> {
        position.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Serialize the deck to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self).map_err(DeckError::Serialization)
    }

    /// Deserialize a deck from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        serde_json::from_str(json).map_err(DeckError::Serialization)
    }
}

/// Assembles slides one at a time.
#[derive(Debug)]
pub struct DeckBuilder<'t> {
    theme: &'t Theme,
    canvas: Canvas,
    chrome: Chrome,
    slides: Vec<Slide>,
}

impl<'t> DeckBuilder<'t> {
    /// Start a deck.
    #[must_use]
    pub fn new(theme: &'t Theme, canvas: Canvas, chrome: Chrome) -> Self {
        Self {
            theme,
            canvas,
            chrome,
            slides: Vec::new(),
        }
    }

    /// Append a slide whose content is drawn by `content`.
    ///
    /// Returns the slide's 1-based position.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while placing chrome or content. The
    /// slide is not added in that case.
    pub fn slide<F>(&mut self, kind: SlideKind, content: F) -> DeckResult<usize>
    where
        F: FnOnce(&mut dyn Surface) -> DeckResult<()>,
    {
        let position = self.slides.len() + 1;
        let background = self.theme.resolve(self.chrome.background)?;
        let mut surface = SlideBuilder::new(self.theme, self.canvas);

        let numbering = match (kind, self.chrome.slide_number) {
            (SlideKind::Content, Some(style)) => Some(style),
            _ => None,
        };
        if let Some(style) = numbering {
            surface.place_text(
                &TextSpec::single(style.region, position.to_string(), style.style)
                    .align(style.align),
            )?;
        }

        content(&mut surface)?;

        let slide = Slide {
            position,
            kind,
            background,
            number: numbering.map(|_| position),
            reserved: numbering.map(|style| style.region),
            elements: surface.into_elements(),
        };

        for id in slide.chrome_intrusions() {
            tracing::warn!("Slide {position}: element {id} overlaps the slide number region");
        }
        tracing::debug!(
            "Assembled slide {position} ({:?}) with {} elements",
            kind,
            slide.len()
        );
        self.slides.push(slide);
        Ok(position)
    }

    /// Number of slides assembled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether no slide has been assembled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Finish the deck.
    #[must_use]
    pub fn finish(self) -> Deck {
        tracing::info!("Assembled deck of {} slides", self.slides.len());
        Deck {
            canvas: self.canvas,
            theme: self.theme.name().to_string(),
            slides: self.slides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ShapeSpec;
    use crate::element::ShapeKind;

    fn builder(theme: &Theme) -> DeckBuilder<'_> {
        DeckBuilder::new(theme, Canvas::WIDESCREEN, Chrome::default())
    }

    #[test]
    fn test_chrome_precedes_content() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        deck.slide(SlideKind::Content, |surface| {
            surface.place_shape(&ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(0.5, 0.5, 1.0, 1.0),
                Role::Accent,
            ))?;
            Ok(())
        })
        .expect("should assemble");
        let deck = deck.finish();

        let slide = deck.slide(1).expect("slide 1");
        assert_eq!(slide.number, Some(1));
        assert_eq!(slide.len(), 2);
        let label = slide.elements[0].as_text().expect("number label first");
        assert_eq!(label.text(), "1");
        assert_eq!(label.align, HAlign::Right);
        assert_eq!(
            label.runs[0].color,
            theme.resolve(Role::MutedForeground).unwrap()
        );
        assert_eq!(slide.background, theme.resolve(Role::Surface).unwrap());
    }

    #[test]
    fn test_json_round_trip_keeps_every_bit() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        let width = 2.3 - 0.4;
        deck.slide(SlideKind::Content, |surface| {
            surface.place_shape(&ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(0.1 + 0.2, 0.5, width, 1.0),
                Role::Accent,
            ))?;
            Ok(())
        })
        .unwrap();
        let deck = deck.finish();

        let restored = Deck::from_json(&deck.to_json().unwrap()).unwrap();
        let frame = restored.slide(1).unwrap().elements[1].frame();
        assert_eq!(frame.x().to_bits(), (0.1 + 0.2_f64).to_bits());
        assert_eq!(frame.width().to_bits(), width.to_bits());
        assert_eq!(restored, deck);
    }

    #[test]
    fn test_bookends_are_unnumbered_but_counted() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        deck.slide(SlideKind::Bookend, |_| Ok(())).unwrap();
        let second = deck.slide(SlideKind::Content, |_| Ok(())).unwrap();
        deck.slide(SlideKind::Bookend, |_| Ok(())).unwrap();
        let deck = deck.finish();

        assert_eq!(second, 2);
        assert_eq!(deck.len(), 3);
        assert!(deck.slide(1).unwrap().is_empty());
        assert_eq!(deck.slide(1).unwrap().number, None);
        assert_eq!(deck.slide(2).unwrap().number, Some(2));
        assert_eq!(deck.slide(3).unwrap().number, None);
        assert!(deck.slide(0).is_none());
    }

    #[test]
    fn test_failed_slide_is_not_added() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        let result = deck.slide(SlideKind::Content, |surface| {
            surface.place_shape(&ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(9.0, 5.0, 2.0, 1.0),
                Role::Accent,
            ))?;
            Ok(())
        });
        assert!(matches!(result, Err(DeckError::LayoutBounds { .. })));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_chrome_intrusions_are_reported() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        deck.slide(SlideKind::Content, |surface| {
            surface.place_shape(&ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(0.5, 4.0, 9.0, 1.4),
                Role::Muted,
            ))?;
            surface.place_shape(&ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(0.5, 0.5, 1.0, 1.0),
                Role::Muted,
            ))?;
            Ok(())
        })
        .unwrap();
        let deck = deck.finish();
        assert_eq!(deck.slide(1).unwrap().chrome_intrusions(), vec![ElementId(1)]);
    }

    #[test]
    fn test_no_numbering_chrome() {
        let theme = Theme::retro_futuristic();
        let chrome = Chrome {
            background: Role::Secondary,
            slide_number: None,
        };
        let mut deck = DeckBuilder::new(&theme, Canvas::WIDESCREEN, chrome);
        deck.slide(SlideKind::Content, |_| Ok(())).unwrap();
        let deck = deck.finish();
        let slide = deck.slide(1).unwrap();
        assert!(slide.is_empty());
        assert_eq!(slide.number, None);
        assert_eq!(slide.background, theme.resolve(Role::Secondary).unwrap());
    }

    #[test]
    fn test_deck_json_roundtrip() {
        let theme = Theme::retro_futuristic();
        let mut deck = builder(&theme);
        deck.slide(SlideKind::Content, |_| Ok(())).unwrap();
        let deck = deck.finish();

        let json = deck.to_json().expect("should serialize");
        let restored = Deck::from_json(&json).expect("should deserialize");
        assert_eq!(restored, deck);
        assert_eq!(restored.theme_name(), theme.name());
    }
}
