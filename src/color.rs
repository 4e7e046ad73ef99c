use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Bars that are not selected.
pub const MUTED: Color32 = Color32::from_rgb(0xEA, 0xEB, 0xF8);
/// Selected continent bar.
pub const CONTINENT_HIGHLIGHT: Color32 = Color32::from_rgb(0x62, 0x56, 0xF1);
/// Selected cause, yearly lines and their labels.
pub const ACCENT: Color32 = Color32::from_rgb(0x38, 0x67, 0xD6);
/// Secondary header text.
pub const SUBTLE_TEXT: Color32 = Color32::from_rgb(0x9B, 0x9D, 0xBF);
/// Headline totals.
pub const HEADLINE: Color32 = Color32::from_rgb(0x22, 0x32, 0x54);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
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

/// One colour per series name (continents in the trend view).
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(Color32::GRAY)
    }
}

/// Highlight colour when `key` is the selected one.
pub fn highlight(key: &str, selected: Option<&str>, accent: Color32) -> Color32 {
    if selected == Some(key) {
        accent
    } else {
        MUTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_series_colors_fallback() {
        let colors = SeriesColors::new(["Europa", "África"]);
        assert_ne!(colors.color_for("Europa"), colors.color_for("África"));
        assert_eq!(colors.color_for("Atlantis"), Color32::GRAY);
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("AVC", Some("AVC"), ACCENT), ACCENT);
        assert_eq!(highlight("AVC", Some("Câncer"), ACCENT), MUTED);
        assert_eq!(highlight("AVC", None, ACCENT), MUTED);
    }
}
