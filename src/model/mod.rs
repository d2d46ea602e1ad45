//! Palette data model
//!
//! [`Color`] and [`Palette`] are plain values that serialize with the
//! camelCase field names the palette store persists. Edit operations live
//! in [`ops`] and always return a new value.

pub mod ops;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::color::HexColor;
use crate::naming::get_color_name;
use crate::PaletteError;

/// Semantic role of a color within a palette; unique per palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Foreground,
    Muted,
    Card,
}

impl ColorRole {
    pub const ALL: [Self; 7] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Background,
        Self::Foreground,
        Self::Muted,
        Self::Card,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Muted => "muted",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| PaletteError::invalid_parameter("role", s))
    }
}

/// A palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    pub hex: HexColor,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ColorRole>,
}

impl Color {
    /// New unlocked color with a fresh id and a derived name
    pub fn new(hex: HexColor) -> Self {
        Self {
            id: new_id(),
            name: Some(get_color_name(&hex)),
            hex,
            locked: false,
            role: None,
        }
    }

    /// Builder-style role assignment, for constructing palettes
    pub fn with_role(mut self, role: ColorRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Builder-style lock, for constructing palettes
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// An ordered collection of 1 to 16 colors with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: Vec<Color>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub favorite_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Palette {
    /// Same palette with `updated_at` moved to now, never backwards
    pub(crate) fn touched(mut self) -> Self {
        self.updated_at = Utc::now().max(self.updated_at);
        self
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::normalize_hex;

    #[test]
    fn test_role_names() {
        for role in ColorRole::ALL {
            assert_eq!(role.as_str().parse::<ColorRole>().unwrap(), role);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
        assert!("highlight".parse::<ColorRole>().is_err());
    }

    #[test]
    fn test_new_color_is_named() {
        let color = Color::new(normalize_hex("#ff0000").unwrap());
        assert_eq!(color.name.as_deref(), Some("Red"));
        assert!(!color.locked);
        assert!(Uuid::parse_str(&color.id).is_ok());
    }

    #[test]
    fn test_color_json_field_names() {
        let color = Color::new(normalize_hex("#3B82F6").unwrap()).with_role(ColorRole::Primary);
        let value = serde_json::to_value(&color).unwrap();
        assert_eq!(value["hex"], "#3B82F6");
        assert_eq!(value["role"], "primary");
        assert_eq!(value["locked"], false);

        let bare: Color = serde_json::from_str(r##"{"id":"a","hex":"f00"}"##).unwrap();
        assert_eq!(bare.hex, "#FF0000");
        assert!(bare.name.is_none());
        assert!(bare.role.is_none());
        assert!(serde_json::from_str::<Color>(r#"{"id":"a","hex":"nope"}"#).is_err());
    }
}
