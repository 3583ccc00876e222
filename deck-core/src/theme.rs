//! Semantic color roles and the palette that resolves them.
//!
//! Layouts never carry concrete colors; they name a [`Role`] and the
//! [`Theme`] passed into the layout call turns it into a [`Color`]. A theme is
//! built once and only ever borrowed immutably afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DeckError, DeckResult};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is not six hex digits.
    pub fn from_hex(hex: &str) -> DeckResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DeckError::config(format!("invalid hex color: {hex:?}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| DeckError::config(format!("invalid hex color {hex:?}: {e}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = DeckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Semantic color roles a layout may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Slide background.
    Surface,
    /// Brand color for headings and highlights.
    Primary,
    /// Text drawn on top of a primary fill.
    PrimaryForeground,
    /// Secondary brand color.
    Secondary,
    /// Accent color.
    Accent,
    /// Low-emphasis fill (cards, tracks, zebra rows).
    Muted,
    /// Low-emphasis text.
    MutedForeground,
    /// Text drawn on light fills.
    OnLight,
    /// Text drawn on dark fills.
    OnDark,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 9] = [
        Role::Surface,
        Role::Primary,
        Role::PrimaryForeground,
        Role::Secondary,
        Role::Accent,
        Role::Muted,
        Role::MutedForeground,
        Role::OnLight,
        Role::OnDark,
    ];

    /// The kebab-case name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Surface => "surface",
            Role::Primary => "primary",
            Role::PrimaryForeground => "primary-foreground",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Muted => "muted",
            Role::MutedForeground => "muted-foreground",
            Role::OnLight => "on-light",
            Role::OnDark => "on-dark",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| DeckError::config(format!("unrecognized theme role: {s:?}")))
    }
}

/// Theme as it appears in configuration: role names mapped to hex strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeDocument {
    /// Display name of the theme.
    #[serde(default)]
    pub name: String,
    /// Role name to `#rrggbb`.
    pub roles: BTreeMap<String, String>,
}

/// An immutable role-to-color palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    name: String,
    roles: BTreeMap<Role, Color>,
}

impl Theme {
    /// Create an empty theme. Add roles with [`Theme::with_role`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeMap::new(),
        }
    }

    /// Set the color for a role.
    #[must_use]
    pub fn with_role(mut self, role: Role, color: Color) -> Self {
        self.roles.insert(role, color);
        self
    }

    /// The dark navy palette with electric blue, orange and purple accents.
    #[must_use]
    pub fn retro_futuristic() -> Self {
        Self::new("retro-futuristic")
            .with_role(Role::Surface, Color::rgb(10, 17, 40))
            .with_role(Role::Primary, Color::rgb(0, 212, 255))
            .with_role(Role::PrimaryForeground, Color::rgb(10, 17, 40))
            .with_role(Role::Secondary, Color::rgb(255, 107, 53))
            .with_role(Role::Accent, Color::rgb(124, 58, 237))
            .with_role(Role::Muted, Color::rgb(26, 40, 71))
            .with_role(Role::MutedForeground, Color::rgb(148, 163, 184))
            .with_role(Role::OnLight, Color::rgb(10, 17, 40))
            .with_role(Role::OnDark, Color::rgb(255, 255, 255))
    }

    /// Build a theme from its configuration document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown role names or bad hex values.
    pub fn from_document(doc: &ThemeDocument) -> DeckResult<Self> {
        let mut theme = Self::new(doc.name.clone());
        for (name, hex) in &doc.roles {
            let role: Role = name.parse()?;
            theme.roles.insert(role, Color::from_hex(hex)?);
        }
        Ok(theme)
    }

    /// Parse a [`ThemeDocument`] from JSON and build the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the document is invalid.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let doc: ThemeDocument = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    /// Theme name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roles this theme does not define.
    #[must_use]
    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| !self.roles.contains_key(role))
            .collect()
    }

    /// Resolve a role to its color.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the theme does not define the role.
    pub fn resolve(&self, role: Role) -> DeckResult<Color> {
        self.roles
            .get(&role)
            .copied()
            .ok_or_else(|| DeckError::config(format!("theme {:?} has no role {role}", self.name)))
    }

    /// Resolve a role given by its configuration name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unrecognized or undefined roles.
    pub fn resolve_named(&self, name: &str) -> DeckResult<Color> {
        self.resolve(name.parse()?)
    }

    /// Resolve one of two roles depending on `predicate`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the chosen role is undefined.
    pub fn resolve_conditional(
        &self,
        predicate: bool,
        if_true: Role,
        if_false: Role,
    ) -> DeckResult<Color> {
        self.resolve(if predicate { if_true } else { if_false })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::retro_futuristic()
    }
}
