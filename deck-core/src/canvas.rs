//! Canvas primitives: the placement contract every layout goes through.
//!
//! Layouts describe what they want with role-based requests ([`ShapeSpec`],
//! [`TextSpec`]) and hand them to a [`Surface`]. The surface checks the frame
//! against the canvas, resolves roles through the theme, and appends the
//! element. Append order is z-order, so the order of calls is part of the
//! visible output.

use serde::{Deserialize, Serialize};

use crate::element::{Border, Element, ElementId, HAlign, Shape, ShapeKind, TextBlock, TextRun, VAlign};
use crate::geometry::{Point, Rect, Size};
use crate::theme::{Role, Theme};
use crate::{DeckError, DeckResult};

/// Fixed drawing area shared by every slide of a deck, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl Canvas {
    /// 16:9 slide, 10 x 5.625 inches.
    pub const WIDESCREEN: Self = Self {
        width: 10.0,
        height: 5.625,
    };

    /// Create a canvas.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas extent as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The full-canvas rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(Point::ZERO, self.size())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Outline request: a role and a width in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderSpec {
    /// Line color role.
    pub role: Role,
    /// Line width in points.
    pub width_pt: f64,
}

impl BorderSpec {
    /// Create a border request.
    #[must_use]
    pub const fn new(role: Role, width_pt: f64) -> Self {
        Self { role, width_pt }
    }
}

/// Shape placement request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    /// Primitive kind.
    #[serde(default)]
    pub kind: ShapeKind,
    /// Absolute frame.
    pub frame: Rect,
    /// Fill role.
    pub fill: Role,
    /// Optional outline.
    #[serde(default)]
    pub border: Option<BorderSpec>,
}

impl ShapeSpec {
    /// A borderless shape.
    #[must_use]
    pub const fn new(kind: ShapeKind, frame: Rect, fill: Role) -> Self {
        Self {
            kind,
            frame,
            fill,
            border: None,
        }
    }

    /// Add an outline.
    #[must_use]
    pub fn with_border(mut self, role: Role, width_pt: f64) -> Self {
        self.border = Some(BorderSpec::new(role, width_pt));
        self
    }
}

/// Typography of a run, with its color expressed as a role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size_pt: f64,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Text color role.
    pub role: Role,
}

impl TextStyle {
    /// Regular-weight style.
    #[must_use]
    pub const fn new(size_pt: f64, role: Role) -> Self {
        Self {
            size_pt,
            bold: false,
            role,
        }
    }

    /// Bold-weight style.
    #[must_use]
    pub const fn bold(size_pt: f64, role: Role) -> Self {
        Self {
            size_pt,
            bold: true,
            role,
        }
    }

    /// Same style with a different color role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Run request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Text content.
    pub text: String,
    /// Typography.
    pub style: TextStyle,
}

impl RunSpec {
    /// Create a run request.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Text block placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    /// Absolute frame.
    pub frame: Rect,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: HAlign,
    /// Vertical anchoring.
    #[serde(default)]
    pub vertical: VAlign,
    /// Word wrap.
    #[serde(default)]
    pub word_wrap: bool,
    /// Runs in reading order.
    pub runs: Vec<RunSpec>,
}

impl TextSpec {
    /// Left/top aligned, unwrapped text.
    #[must_use]
    pub fn new(frame: Rect, runs: Vec<RunSpec>) -> Self {
        Self {
            frame,
            align: HAlign::Left,
            vertical: VAlign::Top,
            word_wrap: false,
            runs,
        }
    }

    /// Single-run text block.
    pub fn single(frame: Rect, text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(frame, vec![RunSpec::new(text, style)])
    }

    /// Set horizontal alignment.
    #[must_use]
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Anchor text in the vertical middle.
    #[must_use]
    pub fn middle(mut self) -> Self {
        self.vertical = VAlign::Middle;
        self
    }

    /// Enable word wrap.
    #[must_use]
    pub fn wrap(mut self) -> Self {
        self.word_wrap = true;
        self
    }
}

/// The placement capability layouts draw through.
pub trait Surface {
    /// Theme roles are resolved against.
    fn theme(&self) -> &Theme;

    /// Canvas that bounds every placement.
    fn canvas(&self) -> Canvas;

    /// Place a shape on top of everything placed so far.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::LayoutBounds`] if the frame leaves the canvas and
    /// [`DeckError::Configuration`] if a role cannot be resolved.
    fn place_shape(&mut self, spec: &ShapeSpec) -> DeckResult<ElementId>;

    /// Place a text block on top of everything placed so far.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::LayoutBounds`] if the frame leaves the canvas and
    /// [`DeckError::Configuration`] for unresolvable roles, empty run lists or
    /// non-positive font sizes.
    fn place_text(&mut self, spec: &TextSpec) -> DeckResult<ElementId>;
}

/// In-memory [`Surface`] collecting the elements of one slide.
#[derive(Debug)]
pub struct SlideBuilder<'t> {
    theme: &'t Theme,
    canvas: Canvas,
    elements: Vec<Element>,
}

impl<'t> SlideBuilder<'t> {
    /// Create an empty slide surface.
    #[must_use]
    pub fn new(theme: &'t Theme, canvas: Canvas) -> Self {
        Self {
            theme,
            canvas,
            elements: Vec::new(),
        }
    }

    /// Elements placed so far, in z-order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements placed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume the builder, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    fn check_bounds(&self, frame: Rect) -> DeckResult<()> {
        if frame.fits_within(self.canvas.size()) {
            Ok(())
        } else {
            Err(DeckError::LayoutBounds {
                frame,
                canvas: self.canvas.size(),
            })
        }
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        tracing::trace!("Placed element {id} at {}", element.frame());
        self.elements.push(element);
        id
    }
}

impl Surface for SlideBuilder<'_> {
    fn theme(&self) -> &Theme {
        self.theme
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn place_shape(&mut self, spec: &ShapeSpec) -> DeckResult<ElementId> {
        self.check_bounds(spec.frame)?;
        let fill = self.theme.resolve(spec.fill)?;
        let border = spec
            .border
            .map(|b| {
                self.theme.resolve(b.role).map(|color| Border {
                    color,
                    width_pt: b.width_pt,
                })
            })
            .transpose()?;

        Ok(self.push(Element::Shape(Shape {
            kind: spec.kind,
            frame: spec.frame,
            fill,
            border,
        })))
    }

    fn place_text(&mut self, spec: &TextSpec) -> DeckResult<ElementId> {
        self.check_bounds(spec.frame)?;
        if spec.runs.is_empty() {
            return Err(DeckError::config(format!(
                "text block at {} has no runs",
                spec.frame
            )));
        }

        let mut runs = Vec::with_capacity(spec.runs.len());
        for run in &spec.runs {
            if !(run.style.size_pt.is_finite() && run.style.size_pt > 0.0) {
                return Err(DeckError::config(format!(
                    "run {:?} has invalid font size {}",
                    run.text, run.style.size_pt
                )));
            }
            runs.push(TextRun {
                text: run.text.clone(),
                size_pt: run.style.size_pt,
                bold: run.style.bold,
                color: self.theme.resolve(run.style.role)?,
            });
        }

        Ok(self.push(Element::Text(TextBlock {
            frame: spec.frame,
            align: spec.align,
            vertical: spec.vertical,
            word_wrap: spec.word_wrap,
            runs,
        })))
    }
}
