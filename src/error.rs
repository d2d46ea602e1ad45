//! Error types for the swatchcraft library

use thiserror::Error;

use crate::model::ColorRole;

/// Result type alias for swatchcraft operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Error types for color, palette and extraction operations
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Input is not a 3- or 6-digit hex color
    #[error("Invalid color: {input:?} is not a 3- or 6-digit hex color")]
    InvalidColor { input: String },

    /// Role is already assigned to another color in the palette
    #[error("Role conflict: {role} is already held by color {holder}")]
    RoleConflict { role: ColorRole, holder: String },

    /// Palette already holds the maximum number of colors
    #[error("Palette is full: at most {max} colors allowed")]
    PaletteFull { max: usize },

    /// Removing a color would leave the palette empty
    #[error("Palette must keep at least {min} color(s)")]
    PaletteTooSmall { min: usize },

    /// Locked colors cannot be removed
    #[error("Color {id} is locked")]
    ColorLocked { id: String },

    /// No color with the given id exists in the palette
    #[error("Color {id} not found in palette")]
    ColorNotFound { id: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration file could not be read or written
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("Configuration format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaletteError {
    /// Create an invalid color error for the given input
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.into(),
        }
    }

    /// Create an invalid parameter error with context
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error is a rejected edit that leaves the palette usable
    ///
    /// Batch operations in the palette store can skip these and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaletteError::RoleConflict { .. }
                | PaletteError::PaletteFull { .. }
                | PaletteError::PaletteTooSmall { .. }
                | PaletteError::ColorLocked { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidColor { input } => {
                format!("\"{}\" is not a valid hex color. Use a format like #3B82F6 or #F00.", input)
            }
            PaletteError::RoleConflict { role, .. } => {
                format!("Another color is already the {} color. Remove that role first.", role)
            }
            PaletteError::PaletteFull { max } => {
                format!("A palette can hold at most {} colors.", max)
            }
            PaletteError::PaletteTooSmall { .. } => {
                "A palette needs at least one color.".to_string()
            }
            PaletteError::ColorLocked { .. } => {
                "This color is locked. Unlock it before removing it.".to_string()
            }
            _ => "The palette operation failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let conflict = PaletteError::RoleConflict {
            role: ColorRole::Primary,
            holder: "abc".to_string(),
        };
        assert!(conflict.is_recoverable());
        assert!(PaletteError::PaletteFull { max: 16 }.is_recoverable());
        assert!(!PaletteError::invalid_color("#GG").is_recoverable());
    }

    #[test]
    fn test_user_message_mentions_input() {
        let err = PaletteError::invalid_color("zzz");
        assert!(err.user_message().contains("zzz"));
        assert!(err.to_string().contains("zzz"));
    }
}
