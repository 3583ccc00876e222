//! Declarative deck documents.
//!
//! A [`DeckDocument`] describes a whole deck as data: canvas, chrome, extra
//! card archetypes, and per slide an ordered list of [`Block`]s. Blocks are
//! placed in order, so their order is the slide's z-order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ShapeSpec, Surface, TextSpec};
use crate::geometry::Point;
use crate::layout::{
    place_bars, place_card, place_cards_in_grid, place_table, ArchetypeRegistry, BarChartSpec,
    BarRow, CardContent, CardTemplate, GridSpec, TableContent, TableSpec,
};
use crate::slide::{Chrome, Deck, DeckBuilder, SlideKind};
use crate::theme::Theme;
use crate::{DeckError, DeckResult};

/// One placement step on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    /// A single text block.
    Text(TextSpec),
    /// A single shape.
    Shape(ShapeSpec),
    /// Label tiles on a grid, one archetype with a `label` field per item.
    Grid {
        /// Grid geometry.
        grid: GridSpec,
        /// Tile archetype.
        archetype: String,
        /// Archetype for remainder items.
        #[serde(default)]
        remainder_archetype: Option<String>,
        /// Tile labels in reading order.
        labels: Vec<String>,
    },
    /// Cards on a grid.
    Cards {
        /// Grid geometry.
        grid: GridSpec,
        /// Card archetype.
        archetype: String,
        /// Archetype for remainder items.
        #[serde(default)]
        remainder_archetype: Option<String>,
        /// Card contents in reading order.
        items: Vec<CardContent>,
    },
    /// A single card.
    Card {
        /// Card archetype.
        archetype: String,
        /// Top-left corner.
        origin: Point,
        /// Card content.
        content: CardContent,
    },
    /// Proportional bars.
    Bars {
        /// Bar geometry; defaults apply to omitted fields.
        #[serde(default)]
        spec: BarChartSpec,
        /// One entry per bar.
        rows: Vec<BarRow>,
    },
    /// A table.
    Table {
        /// Table geometry and styling.
        spec: TableSpec,
        /// Header and body cells.
        content: TableContent,
    },
}

impl Block {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Shape(_) => "shape",
            Block::Grid { .. } => "grid",
            Block::Cards { .. } => "cards",
            Block::Card { .. } => "card",
            Block::Bars { .. } => "bars",
            Block::Table { .. } => "table",
        }
    }

    /// Place the block.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying layout.
    pub fn place(&self, surface: &mut dyn Surface, registry: &ArchetypeRegistry) -> DeckResult<()> {
        match self {
            Block::Text(spec) => {
                surface.place_text(spec)?;
            }
            Block::Shape(spec) => {
                surface.place_shape(spec)?;
            }
            Block::Grid {
                grid,
                archetype,
                remainder_archetype,
                labels,
            } => {
                let items: Vec<_> = labels.iter().map(CardContent::label).collect();
                place_cards_in_grid(
                    surface,
                    grid,
                    registry,
                    archetype,
                    remainder_archetype.as_deref(),
                    &items,
                )?;
            }
            Block::Cards {
                grid,
                archetype,
                remainder_archetype,
                items,
            } => {
                place_cards_in_grid(
                    surface,
                    grid,
                    registry,
                    archetype,
                    remainder_archetype.as_deref(),
                    items,
                )?;
            }
            Block::Card {
                archetype,
                origin,
                content,
            } => {
                place_card(surface, registry.get(archetype)?, *origin, content)?;
            }
            Block::Bars { spec, rows } => {
                place_bars(surface, spec, rows)?;
            }
            Block::Table { spec, content } => {
                place_table(surface, spec, content)?;
            }
        }
        Ok(())
    }
}

/// One slide of a deck document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideDocument {
    /// Content or bookend.
    #[serde(default)]
    pub kind: SlideKind,
    /// Optional title, used in logs only.
    #[serde(default)]
    pub title: Option<String>,
    /// Blocks in z-order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl SlideDocument {
    /// A content slide.
    #[must_use]
    pub fn content(title: &str, blocks: Vec<Block>) -> Self {
        Self {
            kind: SlideKind::Content,
            title: Some(title.to_string()),
            blocks,
        }
    }

    /// A bookend slide.
    #[must_use]
    pub fn bookend(title: &str, blocks: Vec<Block>) -> Self {
        Self {
            kind: SlideKind::Bookend,
            title: Some(title.to_string()),
            blocks,
        }
    }
}

/// A whole deck as data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeckDocument {
    /// Canvas shared by every slide.
    #[serde(default)]
    pub canvas: Canvas,
    /// Shared chrome.
    #[serde(default)]
    pub chrome: Chrome,
    /// Archetypes added to (or replacing) those of the base registry.
    #[serde(default)]
    pub archetypes: BTreeMap<String, CardTemplate>,
    /// Slides in order.
    #[serde(default)]
    pub slides: Vec<SlideDocument>,
}

impl DeckDocument {
    /// Parse a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a deck.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        serde_json::from_str(json).map_err(DeckError::Serialization)
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self).map_err(DeckError::Serialization)
    }

    /// Assemble the deck, see [`assemble`].
    ///
    /// # Errors
    ///
    /// Returns the first layout error.
    pub fn assemble(&self, theme: &Theme, registry: &ArchetypeRegistry) -> DeckResult<Deck> {
        assemble(self, theme, registry)
    }
}

/// Assemble a deck document against a theme and archetype registry.
///
/// # Errors
///
/// Returns the first error, annotated with the slide position for
/// configuration errors. No partial deck is returned.
pub fn assemble(doc: &DeckDocument, theme: &Theme, registry: &ArchetypeRegistry) -> DeckResult<Deck> {
    let mut registry = registry.clone();
    for (name, template) in &doc.archetypes {
        registry.insert(name.clone(), template.clone())?;
    }

    let mut deck = DeckBuilder::new(theme, doc.canvas, doc.chrome);
    for (index, slide) in doc.slides.iter().enumerate() {
        let position = index + 1;
        tracing::debug!(
            "Assembling slide {position} {:?} with {} blocks",
            slide.title.as_deref().unwrap_or(""),
            slide.blocks.len()
        );
        deck.slide(slide.kind, |surface| {
            slide.blocks.iter().try_for_each(|block| {
                block.place(surface, &registry).map_err(|e| match e {
                    DeckError::Configuration(msg) => DeckError::Configuration(format!(
                        "slide {position}, {} block: {msg}",
                        block.name()
                    )),
                    other => other,
                })
            })
        })?;
    }
    Ok(deck.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    const DOC: &str = r##"{
        "slides": [
            { "kind": "bookend", "blocks": [
                { "type": "shape", "kind": "rectangle",
                  "frame": { "origin": { "x": 0.0, "y": 0.0 }, "size": { "width": 3.0, "height": 5.625 } },
                  "fill": "secondary" }
            ] },
            { "title": "Steps", "blocks": [
                { "type": "grid", "archetype": "step-tile",
                  "grid": { "origin": { "x": 0.5, "y": 2.0 }, "columns": 4,
                            "cell": { "width": 2.3, "height": 0.9 },
                            "spacing": { "width": 0.2, "height": 0.2 } },
                  "labels": ["1. One", "2. Two", "3. Three", "4. Four", "5. Five"] },
                { "type": "bars", "spec": { "y_start": 4.0 },
                  "rows": [ { "category": "Ops", "percent": 10, "amount": "$500K", "role": "muted" } ] }
            ] }
        ]
    }"##;

    #[test]
    fn test_document_parses_and_assembles() {
        let doc = DeckDocument::from_json(DOC).expect("should parse");
        assert_eq!(doc.slides.len(), 2);
        assert_eq!(doc.canvas, Canvas::WIDESCREEN);

        let theme = Theme::retro_futuristic();
        let deck = doc
            .assemble(&theme, &ArchetypeRegistry::standard())
            .expect("should assemble");
        assert_eq!(deck.len(), 2);

        let title = deck.slide(1).unwrap();
        assert_eq!(title.len(), 1);
        assert_eq!(title.number, None);

        // number label + 5 tiles x 2 + track + fill + 3 labels
        let steps = deck.slide(2).unwrap();
        assert_eq!(steps.len(), 1 + 10 + 5);
        let fifth = steps.elements[9].as_shape().unwrap();
        assert!((fifth.frame.y() - 2.9).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_block_type_fails_to_parse() {
        let json = r#"{ "slides": [ { "blocks": [ { "type": "radial" } ] } ] }"#;
        assert!(matches!(
            DeckDocument::from_json(json),
            Err(DeckError::Serialization(_))
        ));
    }

    #[test]
    fn test_errors_name_the_slide() {
        let doc = DeckDocument {
            slides: vec![
                SlideDocument::default(),
                SlideDocument::content(
                    "Broken",
                    vec![Block::Card {
                        archetype: "unknown".to_string(),
                        origin: Point::new(1.0, 1.0),
                        content: CardContent::new(),
                    }],
                ),
            ],
            ..DeckDocument::default()
        };
        let err = doc
            .assemble(&Theme::retro_futuristic(), &ArchetypeRegistry::standard())
            .unwrap_err();
        match err {
            DeckError::Configuration(msg) => {
                assert!(msg.contains("slide 2"));
                assert!(msg.contains("card block"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_archetypes_are_registered() {
        let mut doc = DeckDocument::default();
        doc.archetypes.insert(
            "badge".to_string(),
            CardTemplate::new(crate::geometry::Size::new(1.0, 0.5)),
        );
        doc.slides.push(SlideDocument::content(
            "Badge",
            vec![Block::Card {
                archetype: "badge".to_string(),
                origin: Point::new(1.0, 1.0),
                content: CardContent::new(),
            }],
        ));
        let deck = doc
            .assemble(&Theme::retro_futuristic(), &ArchetypeRegistry::new())
            .expect("should assemble");
        // Template without background or slots places nothing.
        assert_eq!(deck.slide(1).unwrap().len(), 1);
    }

    #[test]
    fn test_block_out_of_bounds() {
        let doc = DeckDocument {
            slides: vec![SlideDocument::content(
                "Overflow",
                vec![Block::Shape(ShapeSpec::new(
                    crate::element::ShapeKind::Oval,
                    Rect::from_xywh(9.0, 1.0, 2.0, 1.0),
                    crate::theme::Role::Accent,
                ))],
            )],
            ..DeckDocument::default()
        };
        assert!(matches!(
            doc.assemble(&Theme::retro_futuristic(), &ArchetypeRegistry::standard()),
            Err(DeckError::LayoutBounds { .. })
        ));
    }
}
