//! Palette edit operations
//!
//! Every operation borrows the current palette and returns a new one, so a
//! rejected edit leaves the caller's value untouched.

use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use super::{new_id, Color, ColorRole, Palette};
use crate::color::{normalize_hex, HexColor};
use crate::constants::palette_limits::{MAX_PALETTE_COLORS, MIN_PALETTE_COLORS};
use crate::harmony::{HarmonyPreset, PaletteGenerator};
use crate::naming::get_color_name;
use crate::{PaletteError, Result};

impl Palette {
    /// Create a palette from colors
    ///
    /// # Errors
    ///
    /// Fails when the color count is outside 1..=16 or two colors share a role
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self> {
        let now = Utc::now();
        let palette = Self {
            id: new_id(),
            name: name.into(),
            description: None,
            colors,
            tags: Vec::new(),
            is_public: false,
            is_favorite: false,
            favorite_count: 0,
            created_at: now,
            updated_at: now,
        };
        palette.validate()?;
        Ok(palette)
    }

    /// Create a palette from hex strings in any accepted form
    pub fn from_hex_list<I, S>(name: impl Into<String>, hexes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = hexes
            .into_iter()
            .map(|hex| normalize_hex(hex.as_ref()).map(Color::new))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, colors)
    }

    /// Create a palette from extraction output, keeping at most 16 colors
    pub fn from_extracted(name: impl Into<String>, extracted: &[HexColor]) -> Result<Self> {
        let colors = extracted
            .iter()
            .take(MAX_PALETTE_COLORS)
            .cloned()
            .map(Color::new)
            .collect();
        Self::new(name, colors)
    }

    /// Check size bounds and role uniqueness
    pub fn validate(&self) -> Result<()> {
        if self.colors.len() < MIN_PALETTE_COLORS {
            return Err(PaletteError::PaletteTooSmall {
                min: MIN_PALETTE_COLORS,
            });
        }
        if self.colors.len() > MAX_PALETTE_COLORS {
            return Err(PaletteError::PaletteFull {
                max: MAX_PALETTE_COLORS,
            });
        }

        let mut seen = HashSet::new();
        for color in &self.colors {
            if let Some(role) = color.role {
                if !seen.insert(role) {
                    return Err(PaletteError::RoleConflict {
                        role,
                        holder: color.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn color(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Color currently holding `role`, if any
    pub fn role_holder(&self, role: ColorRole) -> Option<&Color> {
        self.colors.iter().find(|c| c.role == Some(role))
    }

    pub fn locked_colors(&self) -> Vec<&Color> {
        self.colors.iter().filter(|c| c.locked).collect()
    }

    pub fn hexes(&self) -> Vec<HexColor> {
        self.colors.iter().map(|c| c.hex.clone()).collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.colors
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PaletteError::ColorNotFound { id: id.to_string() })
    }

    /// Append a new color
    ///
    /// # Errors
    ///
    /// `PaletteError::PaletteFull` when the palette already has 16 colors
    pub fn add_color(&self, hex: HexColor) -> Result<Self> {
        if self.colors.len() >= MAX_PALETTE_COLORS {
            return Err(PaletteError::PaletteFull {
                max: MAX_PALETTE_COLORS,
            });
        }
        let mut next = self.clone();
        next.colors.push(Color::new(hex));
        Ok(next.touched())
    }

    /// Remove a color by id
    ///
    /// # Errors
    ///
    /// `ColorNotFound`, `ColorLocked` for a locked color, and
    /// `PaletteTooSmall` when it is the last color
    pub fn remove_color(&self, id: &str) -> Result<Self> {
        let index = self.position(id)?;
        if self.colors[index].locked {
            return Err(PaletteError::ColorLocked { id: id.to_string() });
        }
        if self.colors.len() <= MIN_PALETTE_COLORS {
            return Err(PaletteError::PaletteTooSmall {
                min: MIN_PALETTE_COLORS,
            });
        }
        let mut next = self.clone();
        next.colors.remove(index);
        Ok(next.touched())
    }

    /// Replace a color's hex, re-deriving its name
    pub fn update_color(&self, id: &str, hex: HexColor) -> Result<Self> {
        let index = self.position(id)?;
        let mut next = self.clone();
        let color = &mut next.colors[index];
        color.name = Some(get_color_name(&hex));
        color.hex = hex;
        Ok(next.touched())
    }

    pub fn toggle_lock(&self, id: &str) -> Result<Self> {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.colors[index].locked = !next.colors[index].locked;
        Ok(next.touched())
    }

    /// Move the color at `from` to index `to`
    pub fn reorder(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.colors.len();
        if from >= len {
            return Err(PaletteError::invalid_parameter("from", from));
        }
        if to >= len {
            return Err(PaletteError::invalid_parameter("to", to));
        }
        let mut next = self.clone();
        let color = next.colors.remove(from);
        next.colors.insert(to, color);
        Ok(next.touched())
    }

    /// Give `role` to a color, replacing any role it had
    ///
    /// # Errors
    ///
    /// `PaletteError::RoleConflict` if a different color already holds the role
    pub fn assign_role(&self, id: &str, role: ColorRole) -> Result<Self> {
        let index = self.position(id)?;
        if let Some(holder) = self.role_holder(role) {
            if holder.id != id {
                return Err(PaletteError::RoleConflict {
                    role,
                    holder: holder.id.clone(),
                });
            }
        }
        let mut next = self.clone();
        next.colors[index].role = Some(role);
        Ok(next.touched())
    }

    /// Give `role` to a color, taking it from the current holder
    pub fn transfer_role(&self, id: &str, role: ColorRole) -> Result<Self> {
        let index = self.position(id)?;
        let mut next = self.clone();
        for color in next.colors.iter_mut().filter(|c| c.role == Some(role)) {
            color.role = None;
        }
        next.colors[index].role = Some(role);
        Ok(next.touched())
    }

    pub fn clear_role(&self, id: &str) -> Result<Self> {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.colors[index].role = None;
        Ok(next.touched())
    }

    /// Resize to `count` colors
    ///
    /// The target is clamped to `[max(1, locked), 16]`. Shrinking drops
    /// unlocked colors from the end; growing appends colors derived from
    /// the existing ones by hue rotation. Locked colors are never dropped,
    /// so a palette holding more than 16 of them keeps them all.
    pub fn resize<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Self {
        let locked = self.colors.iter().filter(|c| c.locked).count();
        let floor = locked.max(MIN_PALETTE_COLORS).min(MAX_PALETTE_COLORS);
        let target = count.clamp(floor, MAX_PALETTE_COLORS);
        let current = self.colors.len();

        if target == current {
            return self.clone();
        }

        let mut next = self.clone();
        if target < current {
            let mut excess = current - target;
            let mut index = next.colors.len();
            while excess > 0 && index > 0 {
                index -= 1;
                if !next.colors[index].locked {
                    next.colors.remove(index);
                    excess -= 1;
                }
            }
        } else {
            let generated = PaletteGenerator::new().extend(&self.hexes(), target - current, rng);
            next.colors.extend(generated.colors.into_iter().map(Color::new));
        }

        debug!(from = current, to = next.colors.len(), requested = count, "resized palette");
        next.touched()
    }

    /// Replace every unlocked color with a fresh harmonious one
    pub fn regenerate_unlocked<R: Rng + ?Sized>(&self, preset: HarmonyPreset, rng: &mut R) -> Self {
        PaletteGenerator::new().regenerate_unlocked(self, preset, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Palette {
        Palette::from_hex_list("Sample", ["#3B82F6", "#10B981", "#F59E0B", "#EF4444"]).unwrap()
    }

    fn hex(input: &str) -> HexColor {
        normalize_hex(input).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert!(matches!(
            Palette::new("Empty", Vec::new()),
            Err(PaletteError::PaletteTooSmall { .. })
        ));
        let seventeen: Vec<String> = (0..17).map(|i| format!("#0000{:02X}", i)).collect();
        assert!(matches!(
            Palette::from_hex_list("Big", &seventeen),
            Err(PaletteError::PaletteFull { .. })
        ));
        assert!(matches!(
            Palette::from_hex_list("Bad", ["#GGGGGG"]),
            Err(PaletteError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_from_extracted_truncates() {
        let extracted: Vec<HexColor> = (0..20u8).map(|i| HexColor::from_rgb(i, i, i)).collect();
        let palette = Palette::from_extracted("Photo", &extracted).unwrap();
        assert_eq!(palette.colors.len(), MAX_PALETTE_COLORS);
        assert_eq!(palette.colors[0].hex, extracted[0]);
    }

    #[test]
    fn test_add_and_remove() {
        let palette = sample();
        let added = palette.add_color(hex("#000")).unwrap();
        assert_eq!(added.colors.len(), 5);
        assert_eq!(added.colors[4].name.as_deref(), Some("Black"));
        assert_eq!(palette.colors.len(), 4);

        let removed = added.remove_color(&added.colors[0].id).unwrap();
        assert_eq!(removed.colors.len(), 4);
        assert_eq!(removed.colors[0].hex, "#10B981");
        assert!(removed.updated_at >= palette.updated_at);
    }

    #[test]
    fn test_add_to_full_palette_fails() {
        let hexes: Vec<String> = (0..16).map(|i| format!("#1020{:02X}", i)).collect();
        let full = Palette::from_hex_list("Full", &hexes).unwrap();
        assert!(matches!(full.add_color(hex("#FFF")), Err(PaletteError::PaletteFull { max: 16 })));
    }

    #[test]
    fn test_remove_guards() {
        let single = Palette::from_hex_list("One", ["#123456"]).unwrap();
        assert!(matches!(
            single.remove_color(&single.colors[0].id),
            Err(PaletteError::PaletteTooSmall { .. })
        ));

        let palette = sample();
        let locked = palette.toggle_lock(&palette.colors[2].id).unwrap();
        assert!(matches!(
            locked.remove_color(&locked.colors[2].id),
            Err(PaletteError::ColorLocked { .. })
        ));
        assert!(matches!(palette.remove_color("missing"), Err(PaletteError::ColorNotFound { .. })));
    }

    #[test]
    fn test_update_color_renames() {
        let palette = sample();
        let id = palette.colors[1].id.clone();
        let updated = palette.update_color(&id, hex("#FF0000")).unwrap();
        assert_eq!(updated.colors[1].hex, "#FF0000");
        assert_eq!(updated.colors[1].name.as_deref(), Some("Red"));
        assert_eq!(updated.colors[1].id, id);
    }

    #[test]
    fn test_reorder() {
        let palette = sample();
        let moved = palette.reorder(0, 3).unwrap();
        assert_eq!(moved.colors[3].hex, "#3B82F6");
        assert_eq!(moved.colors[0].hex, "#10B981");
        assert!(palette.reorder(4, 0).is_err());
        assert!(palette.reorder(0, 4).is_err());
    }

    #[test]
    fn test_role_conflict_is_a_no_op() {
        let palette = sample();
        let first = palette.colors[0].id.clone();
        let second = palette.colors[1].id.clone();

        let with_primary = palette.assign_role(&first, ColorRole::Primary).unwrap();
        let result = with_primary.assign_role(&second, ColorRole::Primary);
        match result {
            Err(PaletteError::RoleConflict { role, holder }) => {
                assert_eq!(role, ColorRole::Primary);
                assert_eq!(holder, first);
            }
            other => panic!("expected role conflict, got {other:?}"),
        }
        assert_eq!(with_primary.role_holder(ColorRole::Primary).map(|c| c.id.as_str()), Some(first.as_str()));

        // Reassigning to the current holder is fine
        assert!(with_primary.assign_role(&first, ColorRole::Primary).is_ok());
    }

    #[test]
    fn test_transfer_and_clear_role() {
        let palette = sample();
        let first = palette.colors[0].id.clone();
        let second = palette.colors[1].id.clone();

        let transferred = palette
            .assign_role(&first, ColorRole::Accent)
            .unwrap()
            .transfer_role(&second, ColorRole::Accent)
            .unwrap();
        assert_eq!(transferred.colors[0].role, None);
        assert_eq!(transferred.colors[1].role, Some(ColorRole::Accent));
        assert!(transferred.validate().is_ok());

        let cleared = transferred.clear_role(&second).unwrap();
        assert!(cleared.role_holder(ColorRole::Accent).is_none());
    }

    #[test]
    fn test_validate_detects_duplicate_roles() {
        let mut palette = sample();
        palette.colors[0].role = Some(ColorRole::Card);
        palette.colors[3].role = Some(ColorRole::Card);
        assert!(matches!(palette.validate(), Err(PaletteError::RoleConflict { .. })));
    }

    #[test]
    fn test_resize_shrinks_around_locked_colors() {
        let mut rng = StdRng::seed_from_u64(1);
        let palette = sample();
        let palette = palette.toggle_lock(&palette.colors[3].id).unwrap();

        let shrunk = palette.resize(2, &mut rng);
        assert_eq!(shrunk.colors.len(), 2);
        assert_eq!(shrunk.colors[0].hex, "#3B82F6");
        assert_eq!(shrunk.colors[1].hex, "#EF4444");
        assert!(shrunk.colors[1].locked);

        let all_locked = palette.toggle_lock(&palette.colors[0].id).unwrap();
        let floor = all_locked.resize(0, &mut rng);
        assert_eq!(floor.colors.len(), 2);
        assert_eq!(floor.locked_colors().len(), 2);
    }

    #[test]
    fn test_resize_with_oversized_locked_palette() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut palette = sample();
        palette.colors = (0..=MAX_PALETTE_COLORS as u8)
            .map(|i| Color::new(HexColor::from_rgb(i * 10, 0, 0)).locked())
            .collect();
        let json = serde_json::to_string(&palette).unwrap();
        let loaded: Palette = serde_json::from_str(&json).unwrap();
        assert!(matches!(loaded.validate(), Err(PaletteError::PaletteFull { .. })));

        for count in [0, 4, MAX_PALETTE_COLORS, 40] {
            let resized = loaded.resize(count, &mut rng);
            assert_eq!(resized.colors, loaded.colors);
        }
    }

    #[test]
    fn test_resize_grows_with_unique_colors() {
        let mut rng = StdRng::seed_from_u64(2);
        let palette = sample();
        let grown = palette.resize(10, &mut rng);
        assert_eq!(grown.colors.len(), 10);
        assert_eq!(&grown.colors[..4], &palette.colors[..]);
        let unique: HashSet<&HexColor> = grown.colors.iter().map(|c| &c.hex).collect();
        assert_eq!(unique.len(), 10);
        assert!(grown.colors.iter().all(|c| c.name.is_some()));

        assert_eq!(palette.resize(40, &mut rng).colors.len(), MAX_PALETTE_COLORS);
    }

    #[test]
    fn test_palette_json_round_trip() {
        let mut palette = sample();
        palette.tags = vec!["brand".to_string()];
        palette.description = Some("Launch colors".to_string());
        let palette = palette.assign_role(&palette.colors[0].id.clone(), ColorRole::Primary).unwrap();

        let json = serde_json::to_value(&palette).unwrap();
        for field in ["id", "name", "colors", "tags", "isPublic", "isFavorite", "favoriteCount", "createdAt", "updatedAt"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }

        let back: Palette = serde_json::from_value(json).unwrap();
        assert_eq!(back, palette);
    }
}
