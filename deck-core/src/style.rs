//! Conditional cell styling.
//!
//! A [`RuleSet`] is an ordered list of [`StyleRule`]s. Each rule targets one
//! style property of a cell and fires when all of its conditions hold. When
//! several rules fire for the same property, the one with the highest
//! [`Precedence`] wins:
//!
//! ```text
//! content value  >  column identity  >  row parity  >  base
//! ```
//!
//! A rule's precedence is the highest precedence among its conditions, so a
//! new rule slots into this order without touching existing ones. Rules of
//! equal top precedence that pick different roles are a conflict.

use serde::{Deserialize, Serialize};

use crate::theme::Role;
use crate::{DeckError, DeckResult};

/// Part of a table a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// The header row.
    Header,
    /// Any body row.
    Body,
}

/// Even or odd body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Parity {
    /// Rows 0, 2, 4, ...
    Even,
    /// Rows 1, 3, 5, ...
    Odd,
}

impl Parity {
    /// Parity of a zero-based row index.
    #[must_use]
    pub const fn of(row: usize) -> Self {
        if row % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Style property a rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTarget {
    /// Cell background.
    Fill,
    /// Cell outline.
    Border,
    /// Cell text.
    Text,
}

impl std::fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StyleTarget::Fill => "fill",
            StyleTarget::Border => "border",
            StyleTarget::Text => "text",
        })
    }
}

/// Fixed ordering between rule kinds. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// Unconditional or section-only rules.
    Base,
    /// Zebra striping.
    RowParity,
    /// A specific column.
    ColumnIdentity,
    /// A specific cell value.
    ContentValue,
}

/// A single predicate on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "kebab-case")]
pub enum Condition {
    /// Cell is in the given section.
    Section {
        /// Required section.
        section: Section,
    },
    /// Cell is in a body row of the given parity.
    RowParity {
        /// Required parity.
        parity: Parity,
    },
    /// Cell is in the given column.
    Column {
        /// Zero-based column index.
        index: usize,
    },
    /// Cell text equals the given value exactly.
    ContentEquals {
        /// Value to compare against.
        value: String,
    },
}

/// What a rule is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    /// Header or body.
    pub section: Section,
    /// Zero-based body row, `None` for header cells.
    pub row: Option<usize>,
    /// Zero-based column.
    pub col: usize,
    /// Cell text.
    pub content: &'a str,
}

impl Condition {
    /// Precedence this condition contributes to its rule.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match self {
            Condition::Section { .. } => Precedence::Base,
            Condition::RowParity { .. } => Precedence::RowParity,
            Condition::Column { .. } => Precedence::ColumnIdentity,
            Condition::ContentEquals { .. } => Precedence::ContentValue,
        }
    }

    /// Whether the condition holds for `cell`.
    #[must_use]
    pub fn matches(&self, cell: &CellContext<'_>) -> bool {
        match self {
            Condition::Section { section } => cell.section == *section,
            Condition::RowParity { parity } => cell.row.is_some_and(|row| Parity::of(row) == *parity),
            Condition::Column { index } => cell.col == *index,
            Condition::ContentEquals { value } => cell.content == value.as_str(),
        }
    }
}

/// Set `target` to `role` when every condition in `when` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Property the rule sets.
    pub target: StyleTarget,
    /// Role the property resolves to.
    pub role: Role,
    /// Conditions, all of which must hold.
    #[serde(default)]
    pub when: Vec<Condition>,
}

impl StyleRule {
    /// Create a rule.
    #[must_use]
    pub fn new(target: StyleTarget, role: Role, when: Vec<Condition>) -> Self {
        Self { target, role, when }
    }

    /// Highest precedence among the rule's conditions.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        self.when
            .iter()
            .map(Condition::precedence)
            .max()
            .unwrap_or(Precedence::Base)
    }

    /// Whether the rule fires for `cell`.
    #[must_use]
    pub fn matches(&self, cell: &CellContext<'_>) -> bool {
        self.when.iter().all(|condition| condition.matches(cell))
    }
}

/// Ordered collection of style rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<StyleRule>,
}

impl RuleSet {
    /// Create a rule set.
    #[must_use]
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// The comparison-table rules: neutral header with one highlighted
    /// column, zebra body rows, and a content-value override for the
    /// positive marker inside the highlighted column only.
    #[must_use]
    pub fn comparison_table(highlight: Option<usize>, positive_marker: Option<&str>) -> Self {
        let header = || Condition::Section {
            section: Section::Header,
        };
        let body = || Condition::Section {
            section: Section::Body,
        };

        let mut rules = vec![
            StyleRule::new(StyleTarget::Fill, Role::Muted, vec![header()]),
            StyleRule::new(StyleTarget::Text, Role::OnDark, vec![header()]),
            StyleRule::new(
                StyleTarget::Fill,
                Role::Muted,
                vec![
                    body(),
                    Condition::RowParity {
                        parity: Parity::Even,
                    },
                ],
            ),
            StyleRule::new(
                StyleTarget::Fill,
                Role::Surface,
                vec![
                    body(),
                    Condition::RowParity {
                        parity: Parity::Odd,
                    },
                ],
            ),
            StyleRule::new(StyleTarget::Border, Role::Muted, vec![body()]),
            StyleRule::new(StyleTarget::Text, Role::OnDark, vec![body()]),
        ];

        if let Some(index) = highlight {
            let column = Condition::Column { index };
            rules.push(StyleRule::new(
                StyleTarget::Fill,
                Role::Primary,
                vec![header(), column.clone()],
            ));
            rules.push(StyleRule::new(
                StyleTarget::Text,
                Role::PrimaryForeground,
                vec![header(), column.clone()],
            ));
            rules.push(StyleRule::new(
                StyleTarget::Border,
                Role::Primary,
                vec![body(), column.clone()],
            ));
            if let Some(marker) = positive_marker {
                rules.push(StyleRule::new(
                    StyleTarget::Text,
                    Role::Primary,
                    vec![
                        body(),
                        column,
                        Condition::ContentEquals {
                            value: marker.to_string(),
                        },
                    ],
                ));
            }
        }

        Self::new(rules)
    }

    /// Resolve `target` for `cell`.
    ///
    /// Returns `Ok(None)` when no rule fires.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::StyleRuleConflict`] when the winning precedence is
    /// shared by rules that pick different roles.
    pub fn resolve(&self, target: StyleTarget, cell: &CellContext<'_>) -> DeckResult<Option<Role>> {
        let matching: Vec<&StyleRule> = self
            .rules
            .iter()
            .filter(|rule| rule.target == target && rule.matches(cell))
            .collect();
        let Some(top) = matching.iter().map(|rule| rule.precedence()).max() else {
            return Ok(None);
        };

        let mut winners = matching.into_iter().filter(|rule| rule.precedence() == top);
        let Some(first) = winners.next() else {
            return Ok(None);
        };
        if let Some(other) = winners.find(|rule| rule.role != first.role) {
            return Err(DeckError::StyleRuleConflict {
                target: format!(
                    "{target} of {:?} cell ({:?}, {})",
                    cell.section, cell.row, cell.col
                ),
                first: first.role.to_string(),
                second: other.role.to_string(),
            });
        }
        Ok(Some(first.role))
    }

    /// Resolve `target`, failing if no rule fires.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when nothing matches, or a conflict
    /// error as in [`RuleSet::resolve`].
    pub fn require(&self, target: StyleTarget, cell: &CellContext<'_>) -> DeckResult<Role> {
        self.resolve(target, cell)?.ok_or_else(|| {
            DeckError::config(format!(
                "no {target} rule for {:?} cell ({:?}, {})",
                cell.section, cell.row, cell.col
            ))
        })
    }
}
