//! Perceptual color conversion used for matching
//!
//! All matching happens in CIE LAB (D65), where Euclidean distance tracks perceived
//! color difference. LAB values never reach the output image.

use image::Rgb;
use palette::{FromColor, Lab, Srgb};

/// A color in CIE LAB as `[L, a, b]`
pub type LabColor = [f64; 3];

/// Convert an 8-bit sRGB pixel to LAB
pub fn srgb_to_lab(pixel: Rgb<u8>) -> LabColor {
    let [r, g, b] = pixel.0;
    let srgb = Srgb::new(r, g, b).into_format::<f32>();
    let lab: Lab = Lab::from_color(srgb);
    [f64::from(lab.l), f64::from(lab.a), f64::from(lab.b)]
}

/// Squared Euclidean distance between two LAB colors
pub fn squared_distance(a: &LabColor, b: &LabColor) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean distance between two LAB colors
pub fn distance(a: &LabColor, b: &LabColor) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Per-channel mean of a set of LAB colors, `None` when empty
pub fn mean(colors: impl IntoIterator<Item = LabColor>) -> Option<LabColor> {
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for color in colors {
        for (acc, value) in sum.iter_mut().zip(color) {
            *acc += value;
        }
        count += 1;
    }
    (count > 0).then(|| sum.map(|channel| channel / count as f64))
}
