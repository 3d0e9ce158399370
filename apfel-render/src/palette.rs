use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::RenderBuffer;
use crate::frame::EscapeFrame;

const LUT_SIZE: usize = 256;

/// Hue, in degrees, that a normalized value of `1.0` maps to on the hue ramp.
const HUE_RAMP_END_DEGREES: f64 = 255.0;

// ---------------------------------------------------------------------------
// Color map seam
// ---------------------------------------------------------------------------

/// Maps a normalized escape value in `[0, 1]` to an opaque RGBA color.
pub trait ColorMap {
    fn color(&self, value: f64) -> [u8; 4];
}

/// Color every pixel of `frame` with `map`.
///
/// Pure per-pixel work over immutable data, so it is spread across the
/// Rayon pool.
pub fn colorize<C: ColorMap + Sync>(map: &C, frame: &EscapeFrame) -> RenderBuffer {
    let mut pixels = vec![0u8; frame.data.len() * 4];
    pixels
        .par_chunks_mut(4)
        .zip(frame.data.par_iter())
        .for_each(|(pixel, &iterations)| {
            pixel.copy_from_slice(&map.color(frame.normalize(iterations)));
        });

    RenderBuffer {
        width: frame.width,
        height: frame.height,
        pixels,
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A color ramp backed by a lookup table.
///
/// `0.0` maps to the first entry and `1.0` to the last; values in between
/// are linearly interpolated between adjacent entries.
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: &'static str,
    colors: Vec<[u8; 4]>,
}

impl Palette {
    pub fn new(name: &'static str, colors: Vec<[u8; 4]>) -> Self {
        assert!(!colors.is_empty());
        Self { name, colors }
    }
}

impl ColorMap for Palette {
    fn color(&self, value: f64) -> [u8; 4] {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let pos = value * (self.colors.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(self.colors.len() - 1);
        lerp_color(self.colors[lo], self.colors[hi], pos - lo as f64)
    }
}

impl Default for Palette {
    fn default() -> Self {
        hue_ramp()
    }
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let inv = 1.0 - t;
    [
        (a[0] as f64 * inv + b[0] as f64 * t) as u8,
        (a[1] as f64 * inv + b[1] as f64 * t) as u8,
        (a[2] as f64 * inv + b[2] as f64 * t) as u8,
        255,
    ]
}

// ---------------------------------------------------------------------------
// Palette selection
// ---------------------------------------------------------------------------

/// Built-in palettes, selectable from the preferences file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteKind {
    /// Full-saturation HSB hue sweep from 0° to 255°.
    #[default]
    HueRamp,
    Classic,
    Fire,
    Ocean,
    Grayscale,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 5] = [
        PaletteKind::HueRamp,
        PaletteKind::Classic,
        PaletteKind::Fire,
        PaletteKind::Ocean,
        PaletteKind::Grayscale,
    ];

    pub fn palette(self) -> Palette {
        match self {
            PaletteKind::HueRamp => hue_ramp(),
            PaletteKind::Classic => classic(),
            PaletteKind::Fire => fire(),
            PaletteKind::Ocean => ocean(),
            PaletteKind::Grayscale => grayscale(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

/// Convert HSB (hue in degrees, saturation and brightness in `[0, 1]`) to RGBA.
pub fn hsb_to_rgba(hue: f64, saturation: f64, brightness: f64) -> [u8; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let v = brightness;
    let p = v * (1.0 - saturation);
    let q = v * (1.0 - saturation * f);
    let t = v * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(r), to_u8(g), to_u8(b), 255]
}

fn hue_ramp() -> Palette {
    let last = (LUT_SIZE - 1) as f64;
    let colors = (0..LUT_SIZE)
        .map(|i| hsb_to_rgba(i as f64 / last * HUE_RAMP_END_DEGREES, 1.0, 1.0))
        .collect();
    Palette::new("Hue ramp", colors)
}

/// Build a LUT by interpolating between color stops at positions in `[0, 1]`.
fn gradient_lut(stops: &[(f64, [u8; 3])]) -> Vec<[u8; 4]> {
    let last = (LUT_SIZE - 1) as f64;
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / last;
            let lo = stops.iter().rposition(|&(pos, _)| pos <= t).unwrap_or(0);
            let hi = (lo + 1).min(stops.len() - 1);
            let (lo_t, lo_c) = stops[lo];
            let (hi_t, hi_c) = stops[hi];
            let frac = if (hi_t - lo_t).abs() < 1e-10 {
                0.0
            } else {
                ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
            };
            lerp_color([lo_c[0], lo_c[1], lo_c[2], 255], [hi_c[0], hi_c[1], hi_c[2], 255], frac)
        })
        .collect()
}

fn classic() -> Palette {
    let stops = &[
        (0.0, [0, 7, 100]),
        (0.16, [32, 107, 203]),
        (0.42, [237, 255, 255]),
        (0.6425, [255, 170, 0]),
        (0.8575, [0, 2, 0]),
        (1.0, [0, 0, 0]),
    ];
    Palette::new("Classic", gradient_lut(stops))
}

fn fire() -> Palette {
    let stops = &[
        (0.0, [0, 0, 0]),
        (0.25, [128, 0, 0]),
        (0.5, [255, 128, 0]),
        (0.75, [255, 255, 0]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("Fire", gradient_lut(stops))
}

fn ocean() -> Palette {
    let stops = &[
        (0.0, [0, 0, 30]),
        (0.3, [0, 50, 120]),
        (0.6, [0, 150, 200]),
        (0.8, [100, 220, 255]),
        (1.0, [240, 255, 255]),
    ];
    Palette::new("Ocean", gradient_lut(stops))
}

fn grayscale() -> Palette {
    let stops = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];
    Palette::new("Grayscale", gradient_lut(stops))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
