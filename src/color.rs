use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Genre colours: one stable colour per genre across every chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
}

impl GenreColors {
    pub const DEFAULT: Color32 = Color32::GRAY;

    pub fn new(genres: &BTreeSet<String>) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(generate_palette(genres.len()))
            .collect();
        GenreColors { mapping }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(Self::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the heatmap (cool blue → neutral → warm red)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct DivergingScale {
    min: f64,
    max: f64,
}

impl DivergingScale {
    const COOL: (u8, u8, u8) = (59, 76, 192);
    const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
    const WARM: (u8, u8, u8) = (180, 4, 38);

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale spanning the given values; `None` when there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(s) => Some(Self::new(s.min.min(v), s.max.max(v))),
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inverse of [`position`](Self::position).
    pub fn value_at(&self, t: f32) -> f64 {
        self.min + (self.max - self.min) * f64::from(t)
    }

    /// Position of `value` in `[0, 1]`; a degenerate range maps to the middle.
    pub fn position(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        (((value - self.min) / range).clamp(0.0, 1.0)) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        let (from, to, local) = if t < 0.5 {
            (Self::COOL, Self::NEUTRAL, t * 2.0)
        } else {
            (Self::NEUTRAL, Self::WARM, (t - 0.5) * 2.0)
        };
        let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
            Srgb::new(r, g, b).into_format::<f32>().into_linear()
        };
        to_color32(Srgb::from_linear(linear(from).mix(linear(to), local)))
    }

    /// Black or white, whichever reads better on the cell colour.
    pub fn text_color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        if (0.2..=0.8).contains(&t) {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}
