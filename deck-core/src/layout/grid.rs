//! Uniform grid layout.
//!
//! Item `i` of a grid with `C` columns sits at row `i / C`, column `i % C`,
//! offset from the grid origin by whole cell strides. Items past a declared
//! regular count are positioned from a [`RemainderPlacement`] instead, so an
//! irregular last row is data on the `GridSpec` rather than a branch in here.

use serde::{Deserialize, Serialize};

use crate::canvas::Surface;
use crate::geometry::{Point, Rect, Size, EPSILON};
use crate::{DeckError, DeckResult};

/// Where grid items past the regular count go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RemainderPlacement {
    /// One absolute origin per remainder item.
    Positions {
        /// Origins, in item order.
        positions: Vec<Point>,
    },
    /// A single row: the k-th remainder item sits at `origin.x + k * stride`.
    Row {
        /// Origin of the first remainder item.
        origin: Point,
        /// Horizontal distance between remainder items.
        stride: f64,
    },
}

impl RemainderPlacement {
    /// Origin of the `ordinal`-th remainder item, if this placement covers it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, ordinal: usize) -> Option<Point> {
        match self {
            RemainderPlacement::Positions { positions } => positions.get(ordinal).copied(),
            RemainderPlacement::Row { origin, stride } => {
                Some(origin.offset(ordinal as f64 * stride, 0.0))
            }
        }
    }

    /// How many remainder items this placement can position.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        match self {
            RemainderPlacement::Positions { positions } => Some(positions.len()),
            RemainderPlacement::Row { .. } => None,
        }
    }
}

/// Geometry of a uniform grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
    /// Items per row.
    pub columns: usize,
    /// Cell stride: distance between neighbouring cell origins.
    pub cell: Size,
    /// Gap subtracted from the stride to get the item size.
    #[serde(default)]
    pub spacing: Size,
    /// Exact item size. Takes the place of `cell - spacing` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Size>,
    /// Number of items that follow the row-major rule. `None` means all.
    #[serde(default)]
    pub regular_count: Option<usize>,
    /// Placement for items past `regular_count`.
    #[serde(default)]
    pub remainder: Option<RemainderPlacement>,
}

/// How a grid item was positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Row-major cell.
    Regular {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
    },
    /// Positioned by the remainder placement.
    Remainder {
        /// Zero-based position among the remainder items.
        ordinal: usize,
    },
}

/// A computed grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSlot {
    /// Item index.
    pub index: usize,
    /// Row-major cell or remainder ordinal.
    pub kind: SlotKind,
    /// Item frame: slot origin plus item size.
    pub frame: Rect,
}

impl GridSlot {
    /// Whether this slot came from the remainder placement.
    #[must_use]
    pub fn is_remainder(&self) -> bool {
        matches!(self.kind, SlotKind::Remainder { .. })
    }
}

impl GridSpec {
    /// A grid with no spacing and no remainder handling.
    #[must_use]
    pub fn new(origin: Point, columns: usize, cell: Size) -> Self {
        Self {
            origin,
            columns,
            cell,
            spacing: Size::default(),
            item: None,
            regular_count: None,
            remainder: None,
        }
    }

    /// Set the gap between items.
    #[must_use]
    pub fn with_spacing(mut self, spacing: Size) -> Self {
        self.spacing = spacing;
        self
    }

    /// Give every item exactly `item`, leaving the stride untouched.
    #[must_use]
    pub fn with_item_size(mut self, item: Size) -> Self {
        self.item = Some(item);
        self
    }

    /// Route items from `regular_count` onwards through `remainder`.
    #[must_use]
    pub fn with_remainder(mut self, regular_count: usize, remainder: RemainderPlacement) -> Self {
        self.regular_count = Some(regular_count);
        self.remainder = Some(remainder);
        self
    }

    /// Size of each item: the explicit item size, or the cell stride minus
    /// spacing.
    #[must_use]
    pub fn item_size(&self) -> Size {
        self.item.unwrap_or_else(|| {
            Size::new(
                self.cell.width - self.spacing.width,
                self.cell.height - self.spacing.height,
            )
        })
    }

    /// Row-major origin of cell `index`, ignoring any remainder placement.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the grid has zero columns.
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_origin(&self, index: usize) -> DeckResult<Point> {
        if self.columns == 0 {
            return Err(DeckError::config("grid needs at least one column"));
        }
        let row = index / self.columns;
        let col = index % self.columns;
        Ok(self
            .origin
            .offset(col as f64 * self.cell.width, row as f64 * self.cell.height))
    }

    /// Check that `count` items can be placed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero columns, a cell smaller than its
    /// spacing, or items past the regular count that no remainder placement
    /// covers.
    pub fn validate(&self, count: usize) -> DeckResult<()> {
        if self.columns == 0 {
            return Err(DeckError::config("grid needs at least one column"));
        }
        if !self.cell.is_valid() || !self.spacing.is_valid() || !self.item_size().is_valid() {
            return Err(DeckError::config(format!(
                "grid cell {} cannot hold spacing {}",
                self.cell, self.spacing
            )));
        }
        let item = self.item_size();
        if item.width > self.cell.width + EPSILON || item.height > self.cell.height + EPSILON {
            return Err(DeckError::config(format!(
                "grid item {item} is larger than cell {}",
                self.cell
            )));
        }
        let Some(regular) = self.regular_count else {
            return Ok(());
        };
        if count <= regular {
            return Ok(());
        }
        let extra = count - regular;
        match &self.remainder {
            None => Err(DeckError::config(format!(
                "grid declares {regular} regular items but got {count} and no remainder placement"
            ))),
            Some(placement) => match placement.capacity() {
                Some(capacity) if capacity < extra => Err(DeckError::config(format!(
                    "remainder placement lists {capacity} positions for {extra} items"
                ))),
                _ => Ok(()),
            },
        }
    }

    /// Compute the slot for item `index`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the item cannot be positioned.
    pub fn slot(&self, index: usize) -> DeckResult<GridSlot> {
        let size = self.item_size();
        match self.regular_count {
            Some(regular) if index >= regular => {
                let ordinal = index - regular;
                let origin = self
                    .remainder
                    .as_ref()
                    .and_then(|placement| placement.position(ordinal))
                    .ok_or_else(|| {
                        DeckError::config(format!("no remainder position for grid item {index}"))
                    })?;
                Ok(GridSlot {
                    index,
                    kind: SlotKind::Remainder { ordinal },
                    frame: Rect::new(origin, size),
                })
            }
            _ => {
                let origin = self.cell_origin(index)?;
                Ok(GridSlot {
                    index,
                    kind: SlotKind::Regular {
                        row: index / self.columns,
                        col: index % self.columns,
                    },
                    frame: Rect::new(origin, size),
                })
            }
        }
    }

    /// Slots for `count` items, in item order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the grid cannot place `count` items.
    pub fn slots(&self, count: usize) -> DeckResult<Vec<GridSlot>> {
        self.validate(count)?;
        (0..count).map(|index| self.slot(index)).collect()
    }
}

/// Place `items` on a grid, calling `render` once per item in item order.
///
/// The whole grid is validated before anything is drawn.
///
/// # Errors
///
/// Returns the first validation or placement error.
pub fn place_grid<S, T, F>(
    surface: &mut S,
    spec: &GridSpec,
    items: &[T],
    mut render: F,
) -> DeckResult<Vec<GridSlot>>
where
    S: Surface + ?Sized,
    F: FnMut(&mut S, &GridSlot, &T) -> DeckResult<()>,
{
    let slots = spec.slots(items.len())?;
    for (slot, item) in slots.iter().zip(items) {
        render(surface, slot, item)?;
    }
    tracing::debug!("Placed {} grid items", slots.len());
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, ShapeSpec, SlideBuilder};
    use crate::element::ShapeKind;
    use crate::theme::{Role, Theme};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_row_major_rule() {
        let spec = GridSpec::new(Point::new(0.5, 2.0), 4, Size::new(2.3, 0.9));
        let slot = spec.slot(5).unwrap();
        assert_eq!(slot.kind, SlotKind::Regular { row: 1, col: 1 });
        assert!(close(slot.frame.x(), 2.8));
        assert!(close(slot.frame.y(), 2.9));
    }

    #[test]
    fn test_item_size_subtracts_spacing() {
        let spec = GridSpec::new(Point::new(0.5, 2.0), 4, Size::new(2.3, 0.9))
            .with_spacing(Size::new(0.2, 0.2));
        let size = spec.item_size();
        assert!(close(size.width, 2.1));
        assert!(close(size.height, 0.7));
    }

    #[test]
    fn test_explicit_item_size_is_exact() {
        let spec = GridSpec::new(Point::new(0.5, 2.0), 4, Size::new(2.3, 0.9))
            .with_item_size(Size::new(2.1, 0.7));
        let slot = spec.slot(5).unwrap();
        assert_eq!(slot.frame.size, Size::new(2.1, 0.7));
        assert!(close(slot.frame.x(), 2.8));

        let oversized = GridSpec::new(Point::ZERO, 4, Size::new(2.3, 0.9))
            .with_item_size(Size::new(2.5, 0.7));
        assert!(matches!(oversized.validate(1), Err(DeckError::Configuration(_))));
    }

    #[test]
    fn test_remainder_row() {
        let spec = GridSpec::new(Point::new(0.5, 1.8), 4, Size::new(2.3, 0.75))
            .with_spacing(Size::new(0.2, 0.15))
            .with_remainder(
                8,
                RemainderPlacement::Row {
                    origin: Point::new(1.9, 4.3),
                    stride: 2.3,
                },
            );
        let slots = spec.slots(11).unwrap();

        assert!(!slots[7].is_remainder());
        assert!(close(slots[7].frame.x(), 0.5 + 3.0 * 2.3));
        assert!(close(slots[7].frame.y(), 1.8 + 0.75));

        let xs: Vec<f64> = slots[8..].iter().map(|s| s.frame.x()).collect();
        assert!(close(xs[0], 1.9));
        assert!(close(xs[1], 4.2));
        assert!(close(xs[2], 6.5));
        assert!(slots[8..].iter().all(|s| close(s.frame.y(), 4.3)));
        assert_eq!(slots[10].kind, SlotKind::Remainder { ordinal: 2 });
    }

    #[test]
    fn test_remainder_positions() {
        let spec = GridSpec::new(Point::new(0.0, 0.0), 2, Size::new(1.0, 1.0)).with_remainder(
            2,
            RemainderPlacement::Positions {
                positions: vec![Point::new(0.5, 3.0)],
            },
        );
        let slots = spec.slots(3).unwrap();
        assert!(close(slots[2].frame.x(), 0.5));
        assert!(close(slots[2].frame.y(), 3.0));

        assert!(matches!(spec.slots(4), Err(DeckError::Configuration(_))));
    }

    #[test]
    fn test_missing_remainder_is_configuration_error() {
        let mut spec = GridSpec::new(Point::ZERO, 4, Size::new(1.0, 1.0));
        spec.regular_count = Some(8);
        assert!(spec.slots(8).is_ok());
        assert!(matches!(spec.slots(11), Err(DeckError::Configuration(_))));
    }

    #[test]
    fn test_without_regular_count_everything_is_row_major() {
        let spec = GridSpec::new(Point::ZERO, 3, Size::new(1.0, 1.0));
        let slots = spec.slots(7).unwrap();
        assert_eq!(slots[6].kind, SlotKind::Regular { row: 2, col: 0 });
    }

    #[test]
    fn test_invalid_specs() {
        let zero = GridSpec::new(Point::ZERO, 0, Size::new(1.0, 1.0));
        assert!(matches!(zero.slots(1), Err(DeckError::Configuration(_))));

        let cramped = GridSpec::new(Point::ZERO, 2, Size::new(1.0, 1.0))
            .with_spacing(Size::new(1.5, 0.0));
        assert!(matches!(cramped.slots(1), Err(DeckError::Configuration(_))));
    }

    #[test]
    fn test_place_grid_draws_in_item_order() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let spec = GridSpec::new(Point::new(0.5, 2.0), 4, Size::new(2.3, 0.9))
            .with_spacing(Size::new(0.2, 0.2));
        let items = ["a", "b", "c", "d", "e"];

        let slots = place_grid(&mut slide, &spec, &items, |surface, slot, _item| {
            surface
                .place_shape(&ShapeSpec::new(
                    ShapeKind::RoundedRectangle,
                    slot.frame,
                    Role::Accent,
                ))
                .map(|_| ())
        })
        .unwrap();

        assert_eq!(slots.len(), 5);
        assert_eq!(slide.len(), 5);
        assert!(close(slide.elements()[4].frame().y(), 2.9));
    }

    #[test]
    fn test_place_grid_validates_before_drawing() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let mut spec = GridSpec::new(Point::ZERO, 2, Size::new(1.0, 1.0));
        spec.regular_count = Some(1);

        let result = place_grid(&mut slide, &spec, &[1, 2], |surface, slot, _| {
            surface
                .place_shape(&ShapeSpec::new(ShapeKind::Rectangle, slot.frame, Role::Muted))
                .map(|_| ())
        });
        assert!(result.is_err());
        assert!(slide.is_empty());
    }
}
