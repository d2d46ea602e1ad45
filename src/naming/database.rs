//! Named color table
//!
//! The CSS Color Module Level 4 named colors, with display names in title
//! case. Where two CSS keywords share a value (aqua/cyan, fuchsia/magenta,
//! gray/grey) only the first spelling below is kept.

use crate::color::Rgb;

/// A named reference color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: Rgb,
}

const fn named(name: &'static str, r: u8, g: u8, b: u8) -> NamedColor {
    NamedColor {
        name,
        rgb: Rgb::new(r, g, b),
    }
}

pub static NAMED_COLORS: [NamedColor; 139] = [
    named("Black", 0, 0, 0),
    named("White", 255, 255, 255),
    named("Red", 255, 0, 0),
    named("Lime", 0, 255, 0),
    named("Blue", 0, 0, 255),
    named("Yellow", 255, 255, 0),
    named("Cyan", 0, 255, 255),
    named("Magenta", 255, 0, 255),
    named("Gray", 128, 128, 128),
    named("Silver", 192, 192, 192),
    named("Maroon", 128, 0, 0),
    named("Olive", 128, 128, 0),
    named("Green", 0, 128, 0),
    named("Purple", 128, 0, 128),
    named("Teal", 0, 128, 128),
    named("Navy", 0, 0, 128),
    named("Alice Blue", 240, 248, 255),
    named("Antique White", 250, 235, 215),
    named("Aquamarine", 127, 255, 212),
    named("Azure", 240, 255, 255),
    named("Beige", 245, 245, 220),
    named("Bisque", 255, 228, 196),
    named("Blanched Almond", 255, 235, 205),
    named("Blue Violet", 138, 43, 226),
    named("Brown", 165, 42, 42),
    named("Burly Wood", 222, 184, 135),
    named("Cadet Blue", 95, 158, 160),
    named("Chartreuse", 127, 255, 0),
    named("Chocolate", 210, 105, 30),
    named("Coral", 255, 127, 80),
    named("Cornflower Blue", 100, 149, 237),
    named("Cornsilk", 255, 248, 220),
    named("Crimson", 220, 20, 60),
    named("Dark Blue", 0, 0, 139),
    named("Dark Cyan", 0, 139, 139),
    named("Dark Goldenrod", 184, 134, 11),
    named("Dark Gray", 169, 169, 169),
    named("Dark Green", 0, 100, 0),
    named("Dark Khaki", 189, 183, 107),
    named("Dark Magenta", 139, 0, 139),
    named("Dark Olive Green", 85, 107, 47),
    named("Dark Orange", 255, 140, 0),
    named("Dark Orchid", 153, 50, 204),
    named("Dark Red", 139, 0, 0),
    named("Dark Salmon", 233, 150, 122),
    named("Dark Sea Green", 143, 188, 143),
    named("Dark Slate Blue", 72, 61, 139),
    named("Dark Slate Gray", 47, 79, 79),
    named("Dark Turquoise", 0, 206, 209),
    named("Dark Violet", 148, 0, 211),
    named("Deep Pink", 255, 20, 147),
    named("Deep Sky Blue", 0, 191, 255),
    named("Dim Gray", 105, 105, 105),
    named("Dodger Blue", 30, 144, 255),
    named("Firebrick", 178, 34, 34),
    named("Floral White", 255, 250, 240),
    named("Forest Green", 34, 139, 34),
    named("Gainsboro", 220, 220, 220),
    named("Ghost White", 248, 248, 255),
    named("Gold", 255, 215, 0),
    named("Goldenrod", 218, 165, 32),
    named("Green Yellow", 173, 255, 47),
    named("Honeydew", 240, 255, 240),
    named("Hot Pink", 255, 105, 180),
    named("Indian Red", 205, 92, 92),
    named("Indigo", 75, 0, 130),
    named("Ivory", 255, 255, 240),
    named("Khaki", 240, 230, 140),
    named("Lavender", 230, 230, 250),
    named("Lavender Blush", 255, 240, 245),
    named("Lawn Green", 124, 252, 0),
    named("Lemon Chiffon", 255, 250, 205),
    named("Light Blue", 173, 216, 230),
    named("Light Coral", 240, 128, 128),
    named("Light Cyan", 224, 255, 255),
    named("Light Goldenrod Yellow", 250, 250, 210),
    named("Light Gray", 211, 211, 211),
    named("Light Green", 144, 238, 144),
    named("Light Pink", 255, 182, 193),
    named("Light Salmon", 255, 160, 122),
    named("Light Sea Green", 32, 178, 170),
    named("Light Sky Blue", 135, 206, 250),
    named("Light Slate Gray", 119, 136, 153),
    named("Light Steel Blue", 176, 196, 222),
    named("Light Yellow", 255, 255, 224),
    named("Lime Green", 50, 205, 50),
    named("Linen", 250, 240, 230),
    named("Medium Aquamarine", 102, 205, 170),
    named("Medium Blue", 0, 0, 205),
    named("Medium Orchid", 186, 85, 211),
    named("Medium Purple", 147, 112, 219),
    named("Medium Sea Green", 60, 179, 113),
    named("Medium Slate Blue", 123, 104, 238),
    named("Medium Spring Green", 0, 250, 154),
    named("Medium Turquoise", 72, 209, 204),
    named("Medium Violet Red", 199, 21, 133),
    named("Midnight Blue", 25, 25, 112),
    named("Mint Cream", 245, 255, 250),
    named("Misty Rose", 255, 228, 225),
    named("Moccasin", 255, 228, 181),
    named("Navajo White", 255, 222, 173),
    named("Old Lace", 253, 245, 230),
    named("Olive Drab", 107, 142, 35),
    named("Orange", 255, 165, 0),
    named("Orange Red", 255, 69, 0),
    named("Orchid", 218, 112, 214),
    named("Pale Goldenrod", 238, 232, 170),
    named("Pale Green", 152, 251, 152),
    named("Pale Turquoise", 175, 238, 238),
    named("Pale Violet Red", 219, 112, 147),
    named("Papaya Whip", 255, 239, 213),
    named("Peach Puff", 255, 218, 185),
    named("Peru", 205, 133, 63),
    named("Pink", 255, 192, 203),
    named("Plum", 221, 160, 221),
    named("Powder Blue", 176, 224, 230),
    named("Rebecca Purple", 102, 51, 153),
    named("Rosy Brown", 188, 143, 143),
    named("Royal Blue", 65, 105, 225),
    named("Saddle Brown", 139, 69, 19),
    named("Salmon", 250, 128, 114),
    named("Sandy Brown", 244, 164, 96),
    named("Sea Green", 46, 139, 87),
    named("Seashell", 255, 245, 238),
    named("Sienna", 160, 82, 45),
    named("Sky Blue", 135, 206, 235),
    named("Slate Blue", 106, 90, 205),
    named("Slate Gray", 112, 128, 144),
    named("Snow", 255, 250, 250),
    named("Spring Green", 0, 255, 127),
    named("Steel Blue", 70, 130, 180),
    named("Tan", 210, 180, 140),
    named("Thistle", 216, 191, 216),
    named("Tomato", 255, 99, 71),
    named("Turquoise", 64, 224, 208),
    named("Violet", 238, 130, 238),
    named("Wheat", 245, 222, 179),
    named("White Smoke", 245, 245, 245),
    named("Yellow Green", 154, 205, 50),
];

/// Look up a named color by exact RGB value
pub fn find_exact(rgb: Rgb) -> Option<&'static NamedColor> {
    NAMED_COLORS.iter().find(|entry| entry.rgb == rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_values_are_unique() {
        let values: HashSet<Rgb> = NAMED_COLORS.iter().map(|c| c.rgb).collect();
        assert_eq!(values.len(), NAMED_COLORS.len());
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = NAMED_COLORS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), NAMED_COLORS.len());
    }

    #[test]
    fn test_find_exact() {
        assert_eq!(find_exact(Rgb::new(255, 0, 0)).map(|c| c.name), Some("Red"));
        assert_eq!(find_exact(Rgb::new(102, 51, 153)).map(|c| c.name), Some("Rebecca Purple"));
        assert!(find_exact(Rgb::new(1, 2, 3)).is_none());
    }
}
