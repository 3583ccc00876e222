//! # Deck Core
//!
//! Layout and composition engine for fixed-canvas slide decks.
//! Turns semantic content (feature lists, percentages, tables, cards) into
//! absolute shapes and text blocks with theme-resolved colors.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           DeckDocument / DeckBuilder        │
//! │  - Chrome (background, slide number)        │
//! │  - Bookends, positional numbering           │
//! ├─────────────────────────────────────────────┤
//! │  Layouts         │  Styling                 │
//! │  - Grid          │  - Theme roles           │
//! │  - Bars          │  - Style rules           │
//! │  - Table         │  - Card archetypes       │
//! │  - Cards         │                          │
//! ├─────────────────────────────────────────────┤
//! │  Surface: bounds-checked place_shape/text   │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//!              Deck ──► DeckSink
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod element;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod schema;
pub mod sink;
pub mod slide;
pub mod style;
pub mod theme;

pub use canvas::{
    BorderSpec, Canvas, RunSpec, ShapeSpec, SlideBuilder, Surface, TextSpec, TextStyle,
};
pub use element::{Border, Element, ElementId, HAlign, Shape, ShapeKind, TextBlock, TextRun, VAlign};
pub use error::{DeckError, DeckResult};
pub use geometry::{Point, Rect, Size};
pub use layout::{
    place_bars, place_card, place_cards_in_grid, place_grid, place_table, ArchetypeRegistry,
    BarChartSpec, BarRow, CardContent, CardTemplate, GridSlot, GridSpec, RemainderPlacement,
    TableContent, TableSpec,
};
pub use schema::{assemble, Block, DeckDocument, SlideDocument};
pub use sink::{DeckSink, JsonSink, SinkUnits};
pub use slide::{Chrome, Deck, DeckBuilder, Slide, SlideKind, SlideNumberStyle};
pub use style::{CellContext, Condition, Precedence, RuleSet, Section, StyleRule, StyleTarget};
pub use theme::{Color, Role, Theme};

/// Deck core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
