//! Layout algorithms.
//!
//! Every algorithm is a function from a geometry spec plus content items to
//! placements on a [`Surface`](crate::canvas::Surface). None of them keeps
//! state between calls.

pub mod bars;
pub mod card;
pub mod grid;
pub mod table;

pub use bars::{filled_width, place_bars, BarChartSpec, BarGeometry, BarRow};
pub use card::{
    place_card, place_cards_in_grid, ArchetypeRegistry, CardBackground, CardContent, CardTemplate,
    RunTemplate, ShapePlacement, SlotPlacement,
};
pub use grid::{place_grid, GridSlot, GridSpec, RemainderPlacement, SlotKind};
pub use table::{column_origins, place_table, TableContent, TableGeometry, TableSpec};
