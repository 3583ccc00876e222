//! Proportional bar layout.
//!
//! A vertical stack of horizontal bars sharing one fixed-width track. Each
//! bar's fill is `track_width * percent / 100`, measured against its own
//! track only; sibling rows never influence each other, and the layout does
//! not care whether the percentages add up to 100.

use serde::{Deserialize, Serialize};

use crate::canvas::{ShapeSpec, Surface, TextSpec, TextStyle};
use crate::element::{HAlign, ShapeKind};
use crate::geometry::Rect;
use crate::theme::Role;
use crate::{DeckError, DeckResult};

/// Geometry and typography of a bar stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartSpec {
    /// Left edge of every track.
    pub track_x: f64,
    /// Full track width.
    pub track_width: f64,
    /// Top of the first row.
    pub y_start: f64,
    /// Bar height.
    pub row_height: f64,
    /// Distance between row tops. Must be at least `row_height`.
    pub row_stride: f64,
    /// Shape used for track and fill.
    pub kind: ShapeKind,
    /// Track color.
    pub track_role: Role,
    /// Width of the category label box left of the track.
    pub label_width: f64,
    /// Gap between the category label box and the track.
    pub label_gap: f64,
    /// Height of the category label box, centered on the row.
    pub label_height: f64,
    /// Width of the percentage and amount boxes.
    pub value_width: f64,
    /// Height of the percentage and amount boxes, centered on the row.
    pub value_height: f64,
    /// Inset of the percentage box from the track's left edge.
    pub percent_inset: f64,
    /// Inset of the amount box's right edge from the track's right edge.
    pub amount_inset: f64,
    /// Category label typography.
    pub label_style: TextStyle,
    /// Percentage typography.
    pub percent_style: TextStyle,
    /// Amount typography. Its role is replaced by the row's role.
    pub amount_style: TextStyle,
}

impl Default for BarChartSpec {
    fn default() -> Self {
        Self {
            track_x: 2.5,
            track_width: 6.5,
            y_start: 2.2,
            row_height: 0.7,
            row_stride: 0.9,
            kind: ShapeKind::RoundedRectangle,
            track_role: Role::Muted,
            label_width: 1.8,
            label_gap: 0.2,
            label_height: 0.5,
            value_width: 1.0,
            value_height: 0.4,
            percent_inset: 0.1,
            amount_inset: 0.2,
            label_style: TextStyle::bold(14.0, Role::OnDark),
            percent_style: TextStyle::bold(18.0, Role::OnDark),
            amount_style: TextStyle::bold(16.0, Role::OnDark),
        }
    }
}

/// One bar: a category, its percentage, and a display amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    /// Label drawn left of the track.
    pub category: String,
    /// Fill percentage in `[0, 100]`.
    pub percent: f64,
    /// Text drawn at the track end.
    pub amount: String,
    /// Fill and amount color.
    pub role: Role,
}

impl BarRow {
    /// Create a row.
    pub fn new(
        category: impl Into<String>,
        percent: f64,
        amount: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            category: category.into(),
            percent,
            amount: amount.into(),
            role,
        }
    }
}

/// Computed frames for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Full-width background track.
    pub track: Rect,
    /// Filled portion, left-aligned with the track.
    pub fill: Rect,
}

/// Filled width for `percent` of a track.
#[must_use]
pub fn filled_width(track_width: f64, percent: f64) -> f64 {
    track_width * percent / 100.0
}

impl BarChartSpec {
    /// Frames for row `index` at `percent`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn row_geometry(&self, index: usize, percent: f64) -> BarGeometry {
        let y = self.y_start + index as f64 * self.row_stride;
        BarGeometry {
            track: Rect::from_xywh(self.track_x, y, self.track_width, self.row_height),
            fill: Rect::from_xywh(
                self.track_x,
                y,
                filled_width(self.track_width, percent),
                self.row_height,
            ),
        }
    }

    /// Check geometry and every row's percentage.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-positive track, a stride
    /// shorter than the bar, or a percentage outside `[0, 100]`.
    pub fn validate(&self, rows: &[BarRow]) -> DeckResult<()> {
        if !(self.track_width.is_finite() && self.track_width > 0.0) {
            return Err(DeckError::config(format!(
                "bar track width must be positive, got {}",
                self.track_width
            )));
        }
        if !(self.row_height > 0.0 && self.row_stride >= self.row_height) {
            return Err(DeckError::config(format!(
                "bar row stride {} must be at least the row height {}",
                self.row_stride, self.row_height
            )));
        }
        for row in rows {
            if !(row.percent.is_finite() && (0.0..=100.0).contains(&row.percent)) {
                return Err(DeckError::config(format!(
                    "bar {:?} has percentage {} outside [0, 100]",
                    row.category, row.percent
                )));
            }
        }
        Ok(())
    }
}

/// Place a stack of proportional bars.
///
/// Per row, in z-order: track, fill (skipped at 0%), category label,
/// percentage label, amount.
///
/// # Errors
///
/// Returns a configuration error for invalid specs and propagates placement
/// errors.
pub fn place_bars<S>(surface: &mut S, spec: &BarChartSpec, rows: &[BarRow]) -> DeckResult<Vec<BarGeometry>>
where
    S: Surface + ?Sized,
{
    spec.validate(rows)?;

    let mut placed = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let geometry = spec.row_geometry(index, row.percent);
        let y = geometry.track.y();

        surface.place_shape(&ShapeSpec::new(spec.kind, geometry.track, spec.track_role))?;
        if geometry.fill.width() > 0.0 {
            surface.place_shape(&ShapeSpec::new(spec.kind, geometry.fill, row.role))?;
        }

        let label_y = y + (spec.row_height - spec.label_height) / 2.0;
        let label_frame = Rect::from_xywh(
            spec.track_x - spec.label_gap - spec.label_width,
            label_y,
            spec.label_width,
            spec.label_height,
        );
        surface.place_text(
            &TextSpec::single(label_frame, row.category.clone(), spec.label_style)
                .align(HAlign::Right)
                .middle(),
        )?;

        let value_y = y + (spec.row_height - spec.value_height) / 2.0;
        let percent_frame = Rect::from_xywh(
            spec.track_x + spec.percent_inset,
            value_y,
            spec.value_width,
            spec.value_height,
        );
        surface.place_text(
            &TextSpec::single(percent_frame, format!("{}%", row.percent), spec.percent_style)
                .middle(),
        )?;

        let amount_frame = Rect::from_xywh(
            geometry.track.right() - spec.amount_inset - spec.value_width,
            value_y,
            spec.value_width,
            spec.value_height,
        );
        surface.place_text(
            &TextSpec::single(
                amount_frame,
                row.amount.clone(),
                spec.amount_style.with_role(row.role),
            )
            .align(HAlign::Right)
            .middle(),
        )?;

        placed.push(geometry);
    }

    tracing::debug!("Placed {} proportional bars", placed.len());
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, SlideBuilder};
    use crate::element::Element;
    use crate::theme::Theme;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn allocations() -> Vec<BarRow> {
        vec![
            BarRow::new("Product Development", 40.0, "$2.0M", Role::Primary),
            BarRow::new("Sales & Marketing", 35.0, "$1.75M", Role::Secondary),
            BarRow::new("AI Infrastructure", 15.0, "$750K", Role::Accent),
            BarRow::new("Operations & Legal", 10.0, "$500K", Role::Muted),
        ]
    }

    #[test]
    fn test_filled_widths_are_proportional() {
        let spec = BarChartSpec::default();
        let widths: Vec<f64> = allocations()
            .iter()
            .enumerate()
            .map(|(i, row)| spec.row_geometry(i, row.percent).fill.width())
            .collect();
        let expected = [2.6, 2.275, 0.975, 0.65];
        for (got, want) in widths.iter().zip(expected) {
            assert!(close(*got, want), "{got} != {want}");
        }
    }

    #[test]
    fn test_rows_are_independent_of_siblings() {
        let spec = BarChartSpec::default();
        let alone = spec.row_geometry(0, 40.0);
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let rows = vec![
            BarRow::new("A", 40.0, "x", Role::Primary),
            BarRow::new("B", 90.0, "y", Role::Accent),
        ];
        let placed = place_bars(&mut slide, &spec, &rows).unwrap();
        assert_eq!(placed[0], alone);
        assert!(close(placed[1].track.y(), 2.2 + 0.9));
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        let spec = BarChartSpec::default();
        let rows = vec![
            BarRow::new("A", 80.0, "x", Role::Primary),
            BarRow::new("B", 70.0, "y", Role::Secondary),
        ];
        assert!(spec.validate(&rows).is_ok());
    }

    #[test]
    fn test_out_of_range_percent_is_rejected() {
        let spec = BarChartSpec::default();
        for percent in [-1.0, 100.5, f64::NAN] {
            let rows = vec![BarRow::new("A", percent, "x", Role::Primary)];
            assert!(matches!(
                spec.validate(&rows),
                Err(DeckError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_stride_shorter_than_bar_is_rejected() {
        let spec = BarChartSpec {
            row_stride: 0.5,
            ..BarChartSpec::default()
        };
        assert!(spec.validate(&[]).is_err());
    }

    #[test]
    fn test_place_bars_element_order_and_text() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        place_bars(&mut slide, &BarChartSpec::default(), &allocations()).unwrap();

        // track, fill, label, percent, amount per row
        assert_eq!(slide.len(), 20);
        let elements = slide.elements();
        assert!(matches!(elements[0], Element::Shape(_)));
        assert!(matches!(elements[1], Element::Shape(_)));

        let label = elements[2].as_text().unwrap();
        assert_eq!(label.text(), "Product Development");
        assert_eq!(label.align, HAlign::Right);
        assert!(close(label.frame.x(), 0.5));
        assert!(close(label.frame.y(), 2.3));
        assert!(close(label.frame.right(), 2.3));

        assert_eq!(elements[3].as_text().unwrap().text(), "40%");

        let amount = elements[4].as_text().unwrap();
        assert_eq!(amount.text(), "$2.0M");
        assert!(close(amount.frame.x(), 7.8));
        assert!(close(amount.frame.y(), 2.35));
        assert_eq!(amount.runs[0].color, theme.resolve(Role::Primary).unwrap());
    }

    #[test]
    fn test_amount_anchors_to_track_end_not_fill() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let rows = vec![
            BarRow::new("A", 10.0, "small", Role::Primary),
            BarRow::new("B", 100.0, "large", Role::Primary),
        ];
        place_bars(&mut slide, &BarChartSpec::default(), &rows).unwrap();
        let amounts: Vec<f64> = slide
            .elements()
            .iter()
            .filter_map(Element::as_text)
            .filter(|t| t.align == HAlign::Right && t.runs[0].size_pt > 15.0)
            .map(|t| t.frame.right())
            .collect();
        assert_eq!(amounts.len(), 2);
        assert!(close(amounts[0], amounts[1]));
    }

    #[test]
    fn test_zero_percent_skips_fill() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let rows = vec![BarRow::new("Nothing", 0.0, "$0", Role::Accent)];
        place_bars(&mut slide, &BarChartSpec::default(), &rows).unwrap();
        assert_eq!(slide.len(), 4);
    }
}
