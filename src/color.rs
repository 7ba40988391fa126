use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Status → Color32
// ---------------------------------------------------------------------------

/// Maps each order status to a stable, distinct colour, so the same status
/// keeps its colour in the side panel and the distribution chart regardless
/// of the current filter.
#[derive(Debug, Clone)]
pub struct StatusColors {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl StatusColors {
    /// Build the mapping from the dataset's statuses (first-seen order).
    pub fn new(statuses: &[String]) -> Self {
        let mapping = statuses
            .iter()
            .cloned()
            .zip(generate_palette(statuses.len()))
            .collect();

        StatusColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, status: &str) -> Color32 {
        self.mapping
            .get(status)
            .copied()
            .unwrap_or(self.default_color)
    }
}
