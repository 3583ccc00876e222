//! Composite cards built from named archetype templates.
//!
//! A [`CardTemplate`] is a fixed list of placements relative to the card's
//! origin: an optional background, optional decorative shapes, then text
//! slots. Offsets never depend on content length. Content is supplied per
//! card as a map from slot names to text.
//!
//! ```text
//! origin ┌──────────────────────────┐
//!        │ background               │
//!        │   ┌──────────────────┐   │
//!        │   │ slot "stat"      │   │  offset (0.2, 0.3), size 2.3 x 1.0
//!        │   └──────────────────┘   │
//!        │   ┌──────────────────┐   │
//!        │   │ slot "caption"   │   │  offset (0.2, 1.5), size 2.3 x 1.2
//!        │   └──────────────────┘   │
//!        └──────────────────────────┘
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::canvas::{BorderSpec, RunSpec, ShapeSpec, Surface, TextSpec, TextStyle};
use crate::element::{HAlign, ShapeKind, VAlign};
use crate::geometry::{Point, Rect, Size};
use crate::layout::grid::{place_grid, GridSlot, GridSpec};
use crate::theme::Role;
use crate::{DeckError, DeckResult};

/// Card background shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardBackground {
    /// Primitive kind.
    #[serde(default)]
    pub kind: ShapeKind,
    /// Default fill; a card's content may override it.
    pub fill: Role,
    /// Optional outline.
    #[serde(default)]
    pub border: Option<BorderSpec>,
}

/// A decorative shape inside the card, drawn over the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePlacement {
    /// Primitive kind.
    #[serde(default)]
    pub kind: ShapeKind,
    /// Offset from the card origin.
    pub offset: Point,
    /// Shape size.
    pub size: Size,
    /// Fill role.
    pub fill: Role,
}

/// One run inside a slot, filled from a named content field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTemplate {
    /// Content field the run's text comes from.
    pub field: String,
    /// Typography.
    pub style: TextStyle,
    /// Skip the run when the field is absent instead of failing.
    #[serde(default)]
    pub optional: bool,
    /// Append a line break after the text.
    #[serde(default)]
    pub line_break: bool,
}

impl RunTemplate {
    /// A required run.
    pub fn new(field: impl Into<String>, style: TextStyle) -> Self {
        Self {
            field: field.into(),
            style,
            optional: false,
            line_break: false,
        }
    }

    /// Mark the run optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// End the run with a line break.
    #[must_use]
    pub fn line_break(mut self) -> Self {
        self.line_break = true;
        self
    }
}

/// A text block at a fixed offset from the card origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPlacement {
    /// Offset from the card origin.
    pub offset: Point,
    /// Text box size.
    pub size: Size,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: HAlign,
    /// Vertical anchoring.
    #[serde(default)]
    pub vertical: VAlign,
    /// Word wrap.
    #[serde(default)]
    pub word_wrap: bool,
    /// Runs, in order, sharing one paragraph.
    pub runs: Vec<RunTemplate>,
}

impl SlotPlacement {
    /// A centered single-run slot.
    pub fn centered(offset: Point, size: Size, field: &str, style: TextStyle) -> Self {
        Self {
            offset,
            size,
            align: HAlign::Center,
            vertical: VAlign::Top,
            word_wrap: false,
            runs: vec![RunTemplate::new(field, style)],
        }
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

    /// Set horizontal alignment.
    #[must_use]
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    fn frame(&self, origin: Point) -> Rect {
        Rect::new(origin.offset(self.offset.x, self.offset.y), self.size)
    }
}

/// Fixed layout of a card archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Card extent. Every placement must stay inside it.
    pub size: Size,
    /// Background shape covering the whole card.
    #[serde(default)]
    pub background: Option<CardBackground>,
    /// Decorative shapes, drawn after the background.
    #[serde(default)]
    pub shapes: Vec<ShapePlacement>,
    /// Text slots, drawn last.
    pub slots: Vec<SlotPlacement>,
}

impl CardTemplate {
    /// An empty template of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            shapes: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Set the background.
    #[must_use]
    pub fn with_background(mut self, kind: ShapeKind, fill: Role, border: Option<BorderSpec>) -> Self {
        self.background = Some(CardBackground { kind, fill, border });
        self
    }

    /// Add a decorative shape.
    #[must_use]
    pub fn with_shape(mut self, shape: ShapePlacement) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Add a text slot.
    #[must_use]
    pub fn with_slot(mut self, slot: SlotPlacement) -> Self {
        self.slots.push(slot);
        self
    }

    /// Content fields the template reads.
    #[must_use]
    pub fn fields(&self) -> BTreeSet<&str> {
        self.slots
            .iter()
            .flat_map(|slot| slot.runs.iter().map(|run| run.field.as_str()))
            .collect()
    }

    /// Check the template on its own, independent of any call site.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid card size, a slot with no
    /// runs, or a placement that escapes the card.
    pub fn validate(&self) -> DeckResult<()> {
        if !(self.size.is_valid() && self.size.width > 0.0 && self.size.height > 0.0) {
            return Err(DeckError::config(format!("card size {} is invalid", self.size)));
        }
        let card = Rect::new(Point::ZERO, self.size);
        let shapes = self
            .shapes
            .iter()
            .map(|shape| Rect::new(shape.offset, shape.size));
        let slots = self.slots.iter().map(|slot| slot.frame(Point::ZERO));
        if let Some(frame) = shapes.chain(slots).find(|frame| !frame.contained_in(&card)) {
            return Err(DeckError::config(format!(
                "card placement {frame} escapes card {}",
                self.size
            )));
        }
        if let Some(index) = self.slots.iter().position(|slot| slot.runs.is_empty()) {
            return Err(DeckError::config(format!("card slot {index} has no runs")));
        }
        Ok(())
    }
}

/// Text fields of one card, plus an optional background fill override.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardContent {
    /// Field name to text.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Replaces the template's background fill.
    #[serde(default)]
    pub fill: Option<Role>,
}

impl CardContent {
    /// Empty content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    #[must_use]
    pub fn with(mut self, field: &str, text: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), text.into());
        self
    }

    /// Override the background fill.
    #[must_use]
    pub fn with_fill(mut self, role: Role) -> Self {
        self.fill = Some(role);
        self
    }

    /// Content with a single `label` field, for tiles.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new().with("label", text)
    }
}

/// Named card templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRegistry {
    archetypes: BTreeMap<String, CardTemplate>,
}

impl ArchetypeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns the template's validation error.
    pub fn insert(&mut self, name: impl Into<String>, template: CardTemplate) -> DeckResult<()> {
        let name = name.into();
        template
            .validate()
            .map_err(|e| DeckError::config(format!("archetype {name}: {e}")))?;
        tracing::debug!("Registered card archetype {name}");
        self.archetypes.insert(name, template);
        Ok(())
    }

    /// Look up a template.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown name.
    pub fn get(&self, name: &str) -> DeckResult<&CardTemplate> {
        self.archetypes
            .get(name)
            .ok_or_else(|| DeckError::config(format!("unknown card archetype: {name}")))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }

    /// Number of registered archetypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// The built-in archetypes.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn standard() -> Self {
        let mut archetypes = BTreeMap::new();

        archetypes.insert(
            "stat-card".to_string(),
            CardTemplate::new(Size::new(2.7, 3.0))
                .with_background(
                    ShapeKind::RoundedRectangle,
                    Role::Muted,
                    Some(BorderSpec::new(Role::Primary, 2.0)),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 0.3),
                        Size::new(2.3, 1.0),
                        "stat",
                        TextStyle::bold(56.0, Role::Secondary),
                    )
                    .middle(),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 1.5),
                        Size::new(2.3, 1.2),
                        "caption",
                        TextStyle::new(16.0, Role::OnDark),
                    )
                    .wrap(),
                ),
        );

        archetypes.insert(
            "metric-card".to_string(),
            CardTemplate::new(Size::new(2.8, 1.2))
                .with_background(
                    ShapeKind::RoundedRectangle,
                    Role::Muted,
                    Some(BorderSpec::new(Role::Primary, 2.0)),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 0.1),
                        Size::new(2.4, 0.6),
                        "stat",
                        TextStyle::bold(40.0, Role::Primary),
                    )
                    .middle(),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 0.7),
                        Size::new(2.4, 0.4),
                        "label",
                        TextStyle::new(14.0, Role::OnDark),
                    )
                    .middle(),
                ),
        );

        archetypes.insert(
            "pricing-card".to_string(),
            CardTemplate::new(Size::new(2.7, 2.5))
                .with_background(ShapeKind::RoundedRectangle, Role::Muted, None)
                .with_slot(SlotPlacement::centered(
                    Point::new(0.2, 0.2),
                    Size::new(2.3, 0.4),
                    "name",
                    TextStyle::bold(20.0, Role::OnDark),
                ))
                .with_slot(SlotPlacement {
                    offset: Point::new(0.2, 0.7),
                    size: Size::new(2.3, 0.6),
                    align: HAlign::Center,
                    vertical: VAlign::Top,
                    word_wrap: false,
                    runs: vec![
                        RunTemplate::new("price", TextStyle::bold(36.0, Role::OnDark)),
                        RunTemplate::new("unit", TextStyle::new(14.0, Role::OnDark)).optional(),
                    ],
                })
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 1.5),
                        Size::new(2.3, 0.8),
                        "features",
                        TextStyle::new(12.0, Role::OnDark),
                    )
                    .wrap(),
                ),
        );

        archetypes.insert(
            "profile-card".to_string(),
            CardTemplate::new(Size::new(6.0, 3.5))
                .with_background(
                    ShapeKind::RoundedRectangle,
                    Role::Muted,
                    Some(BorderSpec::new(Role::Primary, 3.0)),
                )
                .with_shape(ShapePlacement {
                    kind: ShapeKind::Oval,
                    offset: Point::new(2.25, 0.3),
                    size: Size::new(1.5, 1.5),
                    fill: Role::Secondary,
                })
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(2.25, 0.6),
                        Size::new(1.5, 0.9),
                        "initials",
                        TextStyle::bold(48.0, Role::OnDark),
                    )
                    .middle(),
                )
                .with_slot(SlotPlacement::centered(
                    Point::new(0.5, 2.0),
                    Size::new(5.0, 0.5),
                    "name",
                    TextStyle::bold(32.0, Role::OnDark),
                ))
                .with_slot(SlotPlacement::centered(
                    Point::new(0.5, 2.6),
                    Size::new(5.0, 0.4),
                    "role",
                    TextStyle::new(20.0, Role::Secondary),
                ))
                .with_slot(SlotPlacement::centered(
                    Point::new(0.5, 3.1),
                    Size::new(5.0, 0.3),
                    "bio",
                    TextStyle::new(14.0, Role::MutedForeground),
                )),
        );

        archetypes.insert(
            "metric-chip".to_string(),
            CardTemplate::new(Size::new(2.0, 1.0)).with_slot(SlotPlacement {
                offset: Point::ZERO,
                size: Size::new(2.0, 1.0),
                align: HAlign::Center,
                vertical: VAlign::Middle,
                word_wrap: false,
                runs: vec![
                    RunTemplate::new("label", TextStyle::new(14.0, Role::MutedForeground)).line_break(),
                    RunTemplate::new("value", TextStyle::bold(28.0, Role::Primary)),
                ],
            }),
        );

        archetypes.insert(
            "market-circle".to_string(),
            CardTemplate::new(Size::new(2.5, 2.5))
                .with_background(ShapeKind::Oval, Role::Accent, None)
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.3, 0.5),
                        Size::new(1.9, 0.4),
                        "label",
                        TextStyle::bold(18.0, Role::OnDark),
                    )
                    .middle(),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.3, 1.0),
                        Size::new(1.9, 0.6),
                        "value",
                        TextStyle::bold(32.0, Role::OnDark),
                    )
                    .middle(),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.1, 1.7),
                        Size::new(2.3, 0.6),
                        "caption",
                        TextStyle::new(12.0, Role::OnDark),
                    )
                    .middle()
                    .wrap(),
                ),
        );

        archetypes.insert(
            "reason-card".to_string(),
            CardTemplate::new(Size::new(4.4, 1.5))
                .with_background(ShapeKind::RoundedRectangle, Role::Muted, None)
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 0.15),
                        Size::new(4.0, 0.4),
                        "title",
                        TextStyle::bold(20.0, Role::OnDark),
                    )
                    .align(HAlign::Left),
                )
                .with_slot(
                    SlotPlacement::centered(
                        Point::new(0.2, 0.6),
                        Size::new(4.0, 0.8),
                        "body",
                        TextStyle::new(13.0, Role::OnDark),
                    )
                    .align(HAlign::Left)
                    .wrap(),
                ),
        );

        let tile = |size: Size, label: Size, label_pt: f64| {
            CardTemplate::new(size).with_slot(
                SlotPlacement::centered(
                    Point::new(0.1, 0.1),
                    label,
                    "label",
                    TextStyle::bold(label_pt, Role::OnDark),
                )
                .middle(),
            )
        };
        archetypes.insert(
            "step-tile".to_string(),
            tile(Size::new(2.1, 0.7), Size::new(1.9, 0.5), 14.0).with_background(
                ShapeKind::RoundedRectangle,
                Role::Accent,
                None,
            ),
        );
        archetypes.insert(
            "feature-tile".to_string(),
            tile(Size::new(2.1, 0.6), Size::new(1.9, 0.4), 13.0).with_background(
                ShapeKind::RoundedRectangle,
                Role::Muted,
                Some(BorderSpec::new(Role::Primary, 1.5)),
            ),
        );
        archetypes.insert(
            "highlight-tile".to_string(),
            tile(Size::new(2.1, 0.6), Size::new(1.9, 0.4), 13.0).with_background(
                ShapeKind::RoundedRectangle,
                Role::Secondary,
                None,
            ),
        );

        Self { archetypes }
    }
}

/// Place one card with its top-left corner at `origin`.
///
/// Z-order: background, decorative shapes, then slots in template order.
/// Content fields the template never reads are logged and ignored.
///
/// # Errors
///
/// Returns a configuration error when a required field is missing or a slot
/// ends up with no runs, and propagates placement errors.
pub fn place_card<S>(
    surface: &mut S,
    template: &CardTemplate,
    origin: Point,
    content: &CardContent,
) -> DeckResult<Rect>
where
    S: Surface + ?Sized,
{
    let bounds = Rect::new(origin, template.size);

    if let Some(background) = template.background {
        surface.place_shape(&ShapeSpec {
            kind: background.kind,
            frame: bounds,
            fill: content.fill.unwrap_or(background.fill),
            border: background.border,
        })?;
    }

    for shape in &template.shapes {
        surface.place_shape(&ShapeSpec::new(
            shape.kind,
            Rect::new(origin.offset(shape.offset.x, shape.offset.y), shape.size),
            shape.fill,
        ))?;
    }

    for slot in &template.slots {
        let mut runs = Vec::with_capacity(slot.runs.len());
        for run in &slot.runs {
            match content.fields.get(&run.field) {
                Some(text) if run.line_break => {
                    runs.push(RunSpec::new(format!("{text}\n"), run.style));
                }
                Some(text) => runs.push(RunSpec::new(text.clone(), run.style)),
                None if run.optional => {}
                None => {
                    return Err(DeckError::config(format!(
                        "card content is missing field {:?}",
                        run.field
                    )));
                }
            }
        }
        surface.place_text(&TextSpec {
            frame: slot.frame(origin),
            align: slot.align,
            vertical: slot.vertical,
            word_wrap: slot.word_wrap,
            runs,
        })?;
    }

    let fields = template.fields();
    for unused in content
        .fields
        .keys()
        .filter(|key| !fields.contains(key.as_str()))
    {
        tracing::warn!("Card field {unused:?} is not used by its template");
    }

    Ok(bounds)
}

/// Place cards on a grid, one per content item.
///
/// Remainder items use `remainder_archetype` when given, otherwise
/// `archetype`. Each card must fit inside its grid item box.
///
/// # Errors
///
/// Returns a configuration error for unknown archetypes, cards larger than
/// the grid item box, or invalid grids, and propagates placement errors.
pub fn place_cards_in_grid<S>(
    surface: &mut S,
    grid: &GridSpec,
    registry: &ArchetypeRegistry,
    archetype: &str,
    remainder_archetype: Option<&str>,
    items: &[CardContent],
) -> DeckResult<Vec<GridSlot>>
where
    S: Surface + ?Sized,
{
    let regular = registry.get(archetype)?;
    let remainder = remainder_archetype
        .map(|name| registry.get(name))
        .transpose()?
        .unwrap_or(regular);

    let item = grid.item_size();
    for template in [regular, remainder] {
        if template.size.width > item.width + crate::geometry::EPSILON
            || template.size.height > item.height + crate::geometry::EPSILON
        {
            return Err(DeckError::config(format!(
                "card {} does not fit grid item {item}",
                template.size
            )));
        }
    }

    place_grid(surface, grid, items, |surface, slot, content| {
        let template = if slot.is_remainder() { remainder } else { regular };
        place_card(surface, template, slot.frame.origin, content).map(|_| ())
    })
}
