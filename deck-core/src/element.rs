//! Slide elements - the resolved shapes and text blocks a slide is made of.
//!
//! Everything here is already committed geometry with concrete colors; the
//! role-based requests that produce these live in [`crate::canvas`].

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::theme::Color;

/// Position of an element within its slide. Equal to its z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometric primitive a shape is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Plain rectangle.
    #[default]
    Rectangle,
    /// Rectangle with rounded corners.
    RoundedRectangle,
    /// Ellipse inscribed in the frame.
    Oval,
}

/// Resolved outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Line color.
    pub color: Color,
    /// Line width in points.
    pub width_pt: f64,
}

/// A placed, filled shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Primitive kind.
    pub kind: ShapeKind,
    /// Absolute position and size.
    pub frame: Rect,
    /// Fill color.
    pub fill: Color,
    /// Outline, or `None` for no line.
    pub border: Option<Border>,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VAlign {
    /// Anchored at the top of the frame.
    #[default]
    Top,
    /// Centered vertically.
    Middle,
}

/// A run of uniformly styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Text content. May contain `\n` line breaks.
    pub text: String,
    /// Font size in points.
    pub size_pt: f64,
    /// Bold weight.
    pub bold: bool,
    /// Text color.
    pub color: Color,
}

/// A placed block of text made of one paragraph of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Absolute position and size.
    pub frame: Rect,
    /// Horizontal alignment.
    pub align: HAlign,
    /// Vertical anchoring.
    pub vertical: VAlign,
    /// Whether the text wraps at the frame width.
    pub word_wrap: bool,
    /// Runs in reading order.
    pub runs: Vec<TextRun>,
}

impl TextBlock {
    /// Concatenated text of all runs.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A slide element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Element {
    /// A filled shape.
    Shape(Shape),
    /// A text block.
    Text(TextBlock),
}

impl Element {
    /// Frame of the element.
    #[must_use]
    pub fn frame(&self) -> Rect {
        match self {
            Element::Shape(shape) => shape.frame,
            Element::Text(text) => text.frame,
        }
    }

    /// The shape, if this element is one.
    #[must_use]
    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Element::Shape(shape) => Some(shape),
            Element::Text(_) => None,
        }
    }

    /// The text block, if this element is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Element::Text(text) => Some(text),
            Element::Shape(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color::rgb(255, 255, 255)
    }

    #[test]
    fn test_text_concatenates_runs() {
        let block = TextBlock {
            frame: Rect::from_xywh(0.0, 0.0, 2.0, 1.0),
            align: HAlign::Center,
            vertical: VAlign::Middle,
            word_wrap: false,
            runs: vec![
                TextRun {
                    text: "$299".to_string(),
                    size_pt: 36.0,
                    bold: true,
                    color: white(),
                },
                TextRun {
                    text: "/mo".to_string(),
                    size_pt: 14.0,
                    bold: false,
                    color: white(),
                },
            ],
        };
        assert_eq!(block.text(), "$299/mo");
    }

    #[test]
    fn test_element_accessors() {
        let shape = Element::Shape(Shape {
            kind: ShapeKind::Oval,
            frame: Rect::from_xywh(1.0, 1.5, 2.5, 2.5),
            fill: white(),
            border: None,
        });
        assert!(shape.as_shape().is_some());
        assert!(shape.as_text().is_none());
        assert!((shape.frame().right() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_element_serializes_tagged() {
        let shape = Element::Shape(Shape {
            kind: ShapeKind::RoundedRectangle,
            frame: Rect::from_xywh(0.0, 0.0, 1.0, 1.0),
            fill: Color::rgb(26, 40, 71),
            border: None,
        });
        let json = serde_json::to_value(&shape).expect("should serialize");
        assert_eq!(json["type"], "shape");
        assert_eq!(json["data"]["kind"], "rounded-rectangle");
        assert_eq!(json["data"]["fill"], "#1a2847");
    }
}
