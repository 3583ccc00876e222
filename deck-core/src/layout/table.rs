//! Tabular layout: a header row over body rows with independent column widths.
//!
//! Column `i` starts at `x_start + sum(widths[..i])`; body row `r` starts at
//! `y_start + header_height + r * body_row_height`. Cell colors come from a
//! [`RuleSet`], by default [`RuleSet::comparison_table`].

use serde::{Deserialize, Serialize};

use crate::canvas::{BorderSpec, ShapeSpec, Surface, TextSpec, TextStyle};
use crate::element::{HAlign, ShapeKind};
use crate::geometry::{Point, Rect, Size};
use crate::style::{CellContext, RuleSet, Section, StyleTarget};
use crate::{DeckError, DeckResult};

/// Table geometry and styling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Top-left corner of the header row.
    pub origin: Point,
    /// Width of each column, left to right.
    pub column_widths: Vec<f64>,
    /// Header row height.
    #[serde(default = "TableSpec::default_header_height")]
    pub header_height: f64,
    /// Height of every body row.
    #[serde(default = "TableSpec::default_body_row_height")]
    pub body_row_height: f64,
    /// Column drawn with the distinguished style.
    #[serde(default)]
    pub highlight_column: Option<usize>,
    /// Cell value that gets the content-value text override.
    #[serde(default)]
    pub positive_marker: Option<String>,
    /// Text inset inside each cell.
    #[serde(default = "TableSpec::default_cell_inset")]
    pub cell_inset: Size,
    /// Header font size in points (bold).
    #[serde(default = "TableSpec::default_header_size")]
    pub header_size_pt: f64,
    /// Body font size in points.
    #[serde(default = "TableSpec::default_body_size")]
    pub body_size_pt: f64,
    /// Outline width of body cells in points.
    #[serde(default = "TableSpec::default_border_width")]
    pub body_border_pt: f64,
    /// Style rules. `None` uses the comparison-table rules.
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

/// Header labels plus body rows of cell text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableContent {
    /// One label per column.
    pub headers: Vec<String>,
    /// One entry per column in every row.
    pub rows: Vec<Vec<String>>,
}

impl TableContent {
    /// Build content from string slices.
    #[must_use]
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }
}

/// Computed table geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGeometry {
    /// Left edge of every column.
    pub column_x: Vec<f64>,
    /// Top edge of every body row.
    pub row_y: Vec<f64>,
    /// Outer bounds of the table.
    pub bounds: Rect,
}

/// Left edges of columns laid side by side from `x_start`.
#[must_use]
pub fn column_origins(x_start: f64, widths: &[f64]) -> Vec<f64> {
    widths
        .iter()
        .scan(x_start, |x, width| {
            let origin = *x;
            *x += width;
            Some(origin)
        })
        .collect()
}

impl TableSpec {
    fn default_header_height() -> f64 {
        0.5
    }

    fn default_body_row_height() -> f64 {
        0.4
    }

    fn default_cell_inset() -> Size {
        Size::new(0.1, 0.05)
    }

    fn default_header_size() -> f64 {
        12.0
    }

    fn default_body_size() -> f64 {
        11.0
    }

    fn default_border_width() -> f64 {
        0.5
    }

    /// A table with default row heights, insets and typography.
    #[must_use]
    pub fn new(origin: Point, column_widths: Vec<f64>) -> Self {
        Self {
            origin,
            column_widths,
            header_height: Self::default_header_height(),
            body_row_height: Self::default_body_row_height(),
            highlight_column: None,
            positive_marker: None,
            cell_inset: Self::default_cell_inset(),
            header_size_pt: Self::default_header_size(),
            body_size_pt: Self::default_body_size(),
            body_border_pt: Self::default_border_width(),
            rules: None,
        }
    }

    /// Highlight a column, optionally with a positive marker value.
    #[must_use]
    pub fn with_highlight(mut self, column: usize, positive_marker: Option<&str>) -> Self {
        self.highlight_column = Some(column);
        self.positive_marker = positive_marker.map(str::to_string);
        self
    }

    /// Replace the default rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Left edge of every column.
    #[must_use]
    pub fn column_origins(&self) -> Vec<f64> {
        column_origins(self.origin.x, &self.column_widths)
    }

    /// Top edge of body row `row`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn body_row_y(&self, row: usize) -> f64 {
        self.origin.y + self.header_height + row as f64 * self.body_row_height
    }

    /// The rules in effect.
    #[must_use]
    pub fn effective_rules(&self) -> RuleSet {
        self.rules.clone().unwrap_or_else(|| {
            RuleSet::comparison_table(self.highlight_column, self.positive_marker.as_deref())
        })
    }

    /// Check that the content matches the column layout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for empty or negative column widths,
    /// header/row lengths that differ from the column count, non-positive row
    /// heights, or a highlight column out of range.
    pub fn validate(&self, content: &TableContent) -> DeckResult<()> {
        let columns = self.column_widths.len();
        if columns == 0 {
            return Err(DeckError::config("table needs at least one column"));
        }
        if let Some(width) = self
            .column_widths
            .iter()
            .find(|w| !(w.is_finite() && **w > 0.0))
        {
            return Err(DeckError::config(format!(
                "table column width must be positive, got {width}"
            )));
        }
        if !(self.header_height > 0.0 && self.body_row_height > 0.0) {
            return Err(DeckError::config("table row heights must be positive"));
        }
        if content.headers.len() != columns {
            return Err(DeckError::config(format!(
                "table has {columns} column widths but {} headers",
                content.headers.len()
            )));
        }
        if let Some((index, row)) = content
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(DeckError::config(format!(
                "table row {index} has {} cells, expected {columns}",
                row.len()
            )));
        }
        if let Some(highlight) = self.highlight_column {
            if highlight >= columns {
                return Err(DeckError::config(format!(
                    "highlight column {highlight} out of range for {columns} columns"
                )));
            }
        }
        Ok(())
    }

    fn cell_text_frame(&self, cell: Rect) -> Rect {
        cell.inset(self.cell_inset.width, self.cell_inset.height)
    }
}

/// Place a table.
///
/// Header cells are placed left to right (shape then text), then each body
/// row in order. Header text is centered; body text is left-aligned in
/// column 0 and centered elsewhere.
///
/// # Errors
///
/// Returns configuration errors from [`TableSpec::validate`], style rule
/// conflicts, and placement errors.
#[allow(clippy::cast_precision_loss)]
pub fn place_table<S>(surface: &mut S, spec: &TableSpec, content: &TableContent) -> DeckResult<TableGeometry>
where
    S: Surface + ?Sized,
{
    spec.validate(content)?;
    let rules = spec.effective_rules();
    let column_x = spec.column_origins();

    for (col, header) in content.headers.iter().enumerate() {
        let cell = CellContext {
            section: Section::Header,
            row: None,
            col,
            content: header,
        };
        let frame = Rect::from_xywh(
            column_x[col],
            spec.origin.y,
            spec.column_widths[col],
            spec.header_height,
        );
        place_cell(surface, spec, &rules, &cell, frame, HAlign::Center, spec.header_size_pt, true)?;
    }

    let mut row_y = Vec::with_capacity(content.rows.len());
    for (row, cells) in content.rows.iter().enumerate() {
        let y = spec.body_row_y(row);
        row_y.push(y);
        for (col, text) in cells.iter().enumerate() {
            let cell = CellContext {
                section: Section::Body,
                row: Some(row),
                col,
                content: text,
            };
            let frame = Rect::from_xywh(column_x[col], y, spec.column_widths[col], spec.body_row_height);
            let align = if col == 0 { HAlign::Left } else { HAlign::Center };
            place_cell(surface, spec, &rules, &cell, frame, align, spec.body_size_pt, false)?;
        }
    }

    let width: f64 = spec.column_widths.iter().sum();
    let height = spec.header_height + content.rows.len() as f64 * spec.body_row_height;
    tracing::debug!(
        "Placed table with {} columns and {} rows",
        column_x.len(),
        content.rows.len()
    );
    Ok(TableGeometry {
        column_x,
        row_y,
        bounds: Rect::new(spec.origin, Size::new(width, height)),
    })
}

#[allow(clippy::too_many_arguments)]
fn place_cell<S>(
    surface: &mut S,
    spec: &TableSpec,
    rules: &RuleSet,
    cell: &CellContext<'_>,
    frame: Rect,
    align: HAlign,
    size_pt: f64,
    bold: bool,
) -> DeckResult<()>
where
    S: Surface + ?Sized,
{
    let fill = rules.require(StyleTarget::Fill, cell)?;
    let text_role = rules.require(StyleTarget::Text, cell)?;
    let border = rules
        .resolve(StyleTarget::Border, cell)?
        .map(|role| BorderSpec::new(role, spec.body_border_pt));

    let mut shape = ShapeSpec::new(ShapeKind::Rectangle, frame, fill);
    shape.border = border;
    surface.place_shape(&shape)?;

    let style = if bold {
        TextStyle::bold(size_pt, text_role)
    } else {
        TextStyle::new(size_pt, text_role)
    };
    surface.place_text(
        &TextSpec::single(spec.cell_text_frame(frame), cell.content, style)
            .align(align)
            .middle(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, SlideBuilder};
    use crate::element::Element;
    use crate::slide::{Chrome, DeckBuilder, SlideKind};
    use crate::style::{Condition, StyleRule};
    use crate::theme::{Role, Theme};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn comparison() -> TableContent {
        TableContent::from_strs(
            &["Feature", "Ours", "Theirs", "Other"],
            &[
                &["Multi-AI", "✓", "✗", "✗"],
                &["SERP Analysis", "✓", "✗", "✓"],
                &["Languages", "✗", "Limited", "✗"],
            ],
        )
    }

    #[test]
    fn test_column_origins_are_prefix_sums() {
        let xs = column_origins(0.5, &[2.5, 1.5, 1.5, 1.5]);
        let expected = [0.5, 3.0, 4.5, 6.0];
        assert_eq!(xs.len(), 4);
        for (got, want) in xs.iter().zip(expected) {
            assert!(close(*got, want));
        }
        assert!(column_origins(1.0, &[]).is_empty());
    }

    #[test]
    fn test_body_row_offsets() {
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![2.5, 1.5]);
        assert!(close(spec.body_row_y(0), 1.8));
        assert!(close(spec.body_row_y(2), 2.6));
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![2.5, 1.5, 1.5]);
        let content = TableContent::from_strs(&["A", "B", "C"], &[&["1", "2"]]);
        assert!(matches!(
            spec.validate(&content),
            Err(DeckError::Configuration(_))
        ));

        let headers = TableContent::from_strs(&["A", "B"], &[]);
        assert!(spec.validate(&headers).is_err());

        let highlight = TableSpec::new(Point::ZERO, vec![1.0]).with_highlight(3, None);
        assert!(highlight
            .validate(&TableContent::from_strs(&["A"], &[]))
            .is_err());
    }

    #[test]
    fn test_place_table_styles() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![2.5, 1.5, 1.5, 1.5])
            .with_highlight(1, Some("✓"));
        let geometry = place_table(&mut slide, &spec, &comparison()).unwrap();

        assert_eq!(geometry.row_y.len(), 3);
        assert!(close(geometry.bounds.width(), 7.0));
        assert!(close(geometry.bounds.height(), 0.5 + 3.0 * 0.4));
        // (4 header + 12 body cells) x (shape + text)
        assert_eq!(slide.len(), 32);

        let color = |role| theme.resolve(role).unwrap();
        let elements = slide.elements();

        let highlighted_header = elements[2].as_shape().unwrap();
        assert_eq!(highlighted_header.fill, color(Role::Primary));
        assert!(highlighted_header.border.is_none());
        let highlighted_label = elements[3].as_text().unwrap();
        assert_eq!(highlighted_label.runs[0].color, color(Role::PrimaryForeground));
        assert!(highlighted_label.runs[0].bold);

        // Body row 0 starts at element 8.
        let first_label = elements[9].as_text().unwrap();
        assert_eq!(first_label.align, HAlign::Left);
        assert!(close(first_label.frame.x(), 0.6));
        assert!(close(first_label.frame.y(), 1.85));

        let check = elements[11].as_text().unwrap();
        assert_eq!(check.text(), "✓");
        assert_eq!(check.align, HAlign::Center);
        assert_eq!(check.runs[0].color, color(Role::Primary));
        let check_cell = elements[10].as_shape().unwrap();
        assert_eq!(check_cell.border.unwrap().color, color(Role::Primary));

        // Row 1, column 3 holds a check outside the highlighted column.
        let other_check = elements[8 + 8 + 7].as_text().unwrap();
        assert_eq!(other_check.text(), "✓");
        assert_eq!(other_check.runs[0].color, color(Role::OnDark));
    }

    #[test]
    fn test_zebra_fill_ignores_widths_and_content() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![3.0, 1.0, 2.0, 1.0])
            .with_highlight(1, Some("✓"));
        place_table(&mut slide, &spec, &comparison()).unwrap();

        let muted = theme.resolve(Role::Muted).unwrap();
        let surface = theme.resolve(Role::Surface).unwrap();
        let body_fills: Vec<_> = slide.elements()[8..]
            .iter()
            .filter_map(Element::as_shape)
            .map(|shape| shape.fill)
            .collect();
        assert_eq!(body_fills.len(), 12);
        assert!(body_fills[0..4].iter().all(|fill| *fill == muted));
        assert!(body_fills[4..8].iter().all(|fill| *fill == surface));
        assert!(body_fills[8..12].iter().all(|fill| *fill == muted));
    }

    #[test]
    fn test_conflicting_custom_rules_abort_the_slide() {
        let marker = |role| {
            StyleRule::new(
                StyleTarget::Text,
                role,
                vec![Condition::ContentEquals {
                    value: "✗".to_string(),
                }],
            )
        };
        let rules = RuleSet::comparison_table(Some(1), Some("✓"))
            .with_rule(marker(Role::Accent))
            .with_rule(marker(Role::Secondary));
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![2.5, 1.5, 1.5, 1.5])
            .with_highlight(1, Some("✓"))
            .with_rules(rules);

        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        assert!(matches!(
            place_table(&mut slide, &spec, &comparison()),
            Err(DeckError::StyleRuleConflict { .. })
        ));

        let mut deck = DeckBuilder::new(&theme, Canvas::WIDESCREEN, Chrome::default());
        let result = deck.slide(SlideKind::Content, |surface| {
            place_table(surface, &spec, &comparison()).map(|_| ())
        });
        assert!(matches!(result, Err(DeckError::StyleRuleConflict { .. })));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_table_overflowing_canvas_fails() {
        let theme = Theme::retro_futuristic();
        let mut slide = SlideBuilder::new(&theme, Canvas::WIDESCREEN);
        let spec = TableSpec::new(Point::new(0.5, 1.3), vec![4.0, 4.0, 4.0]);
        let content = TableContent::from_strs(&["A", "B", "C"], &[]);
        assert!(matches!(
            place_table(&mut slide, &spec, &content),
            Err(DeckError::LayoutBounds { .. })
        ));
    }
}
