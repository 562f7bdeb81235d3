pub mod elliptical;
pub mod irregular;
pub mod spiral;

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::color::Hsl;
use crate::config::Params;
use crate::surface::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Spiral,
    Elliptical,
    Irregular,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternKind::Spiral => "spiral",
            PatternKind::Elliptical => "elliptical",
            PatternKind::Irregular => "irregular",
        })
    }
}

/// Pattern-specific shape, sampled once per generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Spiral { arms: u32 },
    Elliptical { eccentricity: f32 },
    Irregular { centers: Vec<[f32; 2]>, radius: f32 },
}

/// Parameters behind one generated image. Holds no pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Galaxy {
    pub primary: Hsl,
    pub secondary: Hsl,
    pub shape: Shape,
}

impl Galaxy {
    pub fn kind(&self) -> PatternKind {
        match self.shape {
            Shape::Spiral { .. } => PatternKind::Spiral,
            Shape::Elliptical { .. } => PatternKind::Elliptical,
            Shape::Irregular { .. } => PatternKind::Irregular,
        }
    }

    /// Pick a kind (each 1/3), then both colors, then the shape.
    pub fn sample<R: Rng + ?Sized>(w: usize, h: usize, rng: &mut R, params: &Params) -> Self {
        let kind = match rng.random_range(0..3u32) {
            0 => PatternKind::Spiral,
            1 => PatternKind::Elliptical,
            _ => PatternKind::Irregular,
        };
        Self::sample_kind(kind, w, h, rng, params)
    }

    pub fn sample_kind<R: Rng + ?Sized>(
        kind: PatternKind,
        w: usize,
        h: usize,
        rng: &mut R,
        params: &Params,
    ) -> Self {
        let primary = Hsl::random(rng);
        let secondary = Hsl::random(rng);
        let shape = match kind {
            PatternKind::Spiral => Shape::Spiral {
                arms: spiral::sample_arms(rng, params),
            },
            PatternKind::Elliptical => Shape::Elliptical {
                eccentricity: elliptical::sample_eccentricity(rng, params),
            },
            PatternKind::Irregular => Shape::Irregular {
                centers: irregular::sample_centers(w, h, rng, params),
                radius: irregular::cluster_radius(w, h, params),
            },
        };
        Self {
            primary,
            secondary,
            shape,
        }
    }
}

/// Clear `canvas` and render a freshly sampled galaxy onto it.
///
/// Runs to completion on the calling thread. Nothing survives from a previous
/// call: the surface is cleared to `params.background` before any particle is
/// drawn. Surfaces without area are cleared and parameters are still sampled,
/// but nothing is drawn.
pub fn generate<C, R>(canvas: &mut C, rng: &mut R, params: &Params) -> Galaxy
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    canvas.clear(params.background);
    let (w, h) = (canvas.width(), canvas.height());
    let galaxy = Galaxy::sample(w, h, rng, params);
    log::debug!("{} galaxy on {}x{} surface", galaxy.kind(), w, h);
    draw(canvas, rng, &galaxy, params);
    galaxy
}

/// Rasterize an already sampled galaxy. Does not clear.
pub fn draw<C, R>(canvas: &mut C, rng: &mut R, galaxy: &Galaxy, params: &Params)
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    if canvas.width() == 0 || canvas.height() == 0 {
        log::debug!("skipping particles on empty surface");
        return;
    }
    let primary = galaxy.primary.to_rgb();
    let secondary = galaxy.secondary.to_rgb();
    match &galaxy.shape {
        Shape::Spiral { arms } => spiral::draw(canvas, rng, *arms, primary, secondary, params),
        Shape::Elliptical { eccentricity } => {
            elliptical::draw(canvas, rng, *eccentricity, primary, params)
        }
        Shape::Irregular { centers, radius } => {
            irregular::draw(canvas, rng, centers, *radius, primary, secondary, params)
        }
    }
}

/// Center of the surface in pixel units.
#[inline]
pub fn center(w: usize, h: usize) -> [f32; 2] {
    [w as f32 / 2.0, h as f32 / 2.0]
}

/// Disk radius for spiral and elliptical patterns.
#[inline]
pub fn max_radius(w: usize, h: usize, params: &Params) -> f32 {
    params.radius_fraction * w.min(h) as f32
}

/// Linear fade from `peak` at the center to transparent at `edge`.
#[inline]
pub fn falloff_alpha(r: f32, edge: f32, peak: f32) -> f32 {
    if edge <= 0.0 {
        return 0.0;
    }
    ((1.0 - r / edge) * peak).max(0.0)
}

/// Uniform draw in [lo, hi], tolerant of swapped bounds.
#[inline]
pub(crate) fn range_f32<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Inclusive integer draw, tolerant of swapped bounds.
#[inline]
pub(crate) fn range_u32<R: Rng + ?Sized>(rng: &mut R, a: u32, b: u32) -> u32 {
    rng.random_range(a.min(b)..=a.max(b))
}

#[inline]
pub(crate) fn pick<R: Rng + ?Sized>(
    rng: &mut R,
    chance: f64,
    primary: [u8; 3],
    secondary: [u8; 3],
) -> [u8; 3] {
    // Non-finite chances fall back to an even split.
    let p = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.5 };
    if rng.random_bool(p) {
        primary
    } else {
        secondary
    }
}
