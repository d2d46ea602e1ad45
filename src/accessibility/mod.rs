//! Accessibility analysis: WCAG contrast checks and color vision
//! deficiency simulation.

pub mod contrast;
pub mod simulation;

pub use contrast::{
    best_text_color, contrast_matrix, contrast_ratio, get_accessibility_level, meets_wcag_contrast,
    relative_luminance, AccessibilityLevel, ContrastPair, WcagLevel,
};
pub use simulation::{
    simulate_all_types, simulate_color_blindness, simulate_palette, ColorBlindnessType, CvdCategory,
    SimulationMatrix,
};
