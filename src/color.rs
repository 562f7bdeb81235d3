use rand::Rng;
use serde::Serialize;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// RGBA fill with straight (non-premultiplied) alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Saturated, mid-lightness color: hue [0, 360), sat [70, 100], light [40, 60].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            h: rng.random::<f32>() * 360.0,
            s: 70.0 + rng.random::<f32>() * 30.0,
            l: 40.0 + rng.random::<f32>() * 20.0,
        }
    }

    /// CSS `hsl()` to sRGB.
    pub fn to_rgb(&self) -> [u8; 3] {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }

}

impl Fill {
    /// Alpha is clamped to [0, 1]; NaN becomes fully transparent.
    pub fn new(rgb: [u8; 3], alpha: f32) -> Self {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { rgb, alpha }
    }
}
