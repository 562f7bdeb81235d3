use rayon::prelude::*;

use crate::color::Fill;

/// A drawable 2D raster. Generators only ever clear it and fill circles.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Overwrite every pixel with `background` (no blending).
    fn clear(&mut self, background: [u8; 4]);

    /// Fill a circle centered at (`x`, `y`) in pixel units. Parts outside the
    /// surface are dropped.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill);
}

/// Row-major RGBA8 buffer. Zero-sized surfaces are valid and hold no pixels.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    pub data: Vec<u8>,
    pub w: usize,
    pub h: usize,
}

impl PixelSurface {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![0u8; w * h * 4],
            w,
            h,
        }
    }

    /// Reallocate to new logical dimensions. Content resets to transparent.
    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.data.clear();
        self.data.resize(w * h * 4, 0);
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        (y * self.w + x) * 4
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Source-over blend of `fill` into the pixel at (x, y), with `coverage`
    /// scaling the fill alpha.
    #[inline]
    fn blend(&mut self, x: usize, y: usize, fill: Fill, coverage: f32) {
        let sa = (fill.alpha * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = self.idx(x, y);
        let px = &mut self.data[i..i + 4];
        let da = px[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let s = fill.rgb[c] as f32;
            let d = px[c] as f32;
            let v = (s * sa + d * da * (1.0 - sa)) / out_a;
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Canvas for PixelSurface {
    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn clear(&mut self, background: [u8; 4]) {
        if self.data.is_empty() {
            return;
        }
        self.data.par_chunks_mut(self.w * 4).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&background);
            }
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill) {
        if self.w == 0 || self.h == 0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        let r = radius;
        if r.is_nan() || r <= 0.0 {
            return;
        }
        let x0 = (x - r).floor().max(0.0) as i64;
        let y0 = (y - r).floor().max(0.0) as i64;
        let x1 = ((x + r).ceil() as i64).min(self.w as i64 - 1);
        let y1 = ((y + r).ceil() as i64).min(self.h as i64 - 1);

        let r2 = r * r;
        let mut hits = 0usize;
        for py in y0..=y1 {
            let dy = py as f32 + 0.5 - y;
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px as usize, py as usize, fill, 1.0);
                    hits += 1;
                }
            }
        }

        // Sub-pixel dot: deposit its area on the pixel under the center.
        if hits == 0 && x >= 0.0 && y >= 0.0 {
            let (cx, cy) = (x as usize, y as usize);
            if cx < self.w && cy < self.h {
                let coverage = (std::f32::consts::PI * r2).min(1.0);
                self.blend(cx, cy, fill, coverage);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Canvas;
    use crate::color::Fill;

    #[derive(Clone, Copy, Debug)]
    pub struct Dot {
        pub x: f32,
        pub y: f32,
        pub radius: f32,
        pub fill: Fill,
    }

    /// Canvas double that keeps every draw call instead of rasterizing.
    pub struct RecordingCanvas {
        pub w: usize,
        pub h: usize,
        pub clears: usize,
        pub dots: Vec<Dot>,
    }

    impl RecordingCanvas {
        pub fn new(w: usize, h: usize) -> Self {
            Self { w, h, clears: 0, dots: Vec::new() }
        }
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> usize {
            self.w
        }

        fn height(&self) -> usize {
            self.h
        }

        fn clear(&mut self, _background: [u8; 4]) {
            self.clears += 1;
            self.dots.clear();
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, fill: Fill) {
            self.dots.push(Dot { x, y, radius, fill });
        }
    }
}
