use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::YearCounts;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` bar colours with evenly spaced hues at fixed saturation and lightness.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
        })
        .collect()
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Year bucket → Color32
// ---------------------------------------------------------------------------

/// Assigns each year of a timeline its own bar colour.
#[derive(Debug, Clone)]
pub struct BucketColors {
    mapping: BTreeMap<i32, Color32>,
    default_color: Color32,
}

impl BucketColors {
    pub fn new(counts: &YearCounts) -> Self {
        let palette = generate_palette(counts.len());
        let mapping = counts
            .iter()
            .map(|(year, _)| year)
            .zip(palette)
            .collect();

        BucketColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, year: i32) -> Color32 {
        self.mapping
            .get(&year)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_entries() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn channel_rounds_and_clamps() {
        assert_eq!(channel(0.5), 128);
        assert_eq!(channel(1.2), 255);
        assert_eq!(channel(-0.1), 0);
    }

    #[test]
    fn unknown_year_gets_default_color() {
        let counts: YearCounts = [(2023, 1), (2024, 3)].into_iter().collect();
        let colors = BucketColors::new(&counts);
        assert_ne!(colors.color_for(2023), colors.color_for(2024));
        assert_eq!(colors.color_for(1999), Color32::GRAY);
    }
}
