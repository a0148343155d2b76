use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Neutral grey for values missing from a [`ColorMap`].
pub const DEFAULT_COLOR: Srgb<u8> = Srgb::new(128, 128, 128);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#rrggbb`, the form Plotly and CSS accept.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps the labels of one categorical column to distinct colours.
///
/// Colours are assigned in the order the labels are given, so building the
/// map from the full dataset keeps a label's colour stable while filters
/// change which labels are visible.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Srgb<u8>>,
    order: Vec<String>,
}

impl ColorMap {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !order.contains(&label) {
                order.push(label);
            }
        }
        let palette = generate_palette(order.len());
        let mapping = order.iter().cloned().zip(palette).collect();
        ColorMap { mapping, order }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Srgb<u8> {
        self.mapping.get(label).copied().unwrap_or(DEFAULT_COLOR)
    }

    pub fn hex_for(&self, label: &str) -> String {
        to_hex(self.color_for(label))
    }

    /// Return the legend entries (label → colour) in assignment order.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        self.order
            .iter()
            .map(|label| (label.clone(), self.color_for(label)))
            .collect()
    }
}
