use std::f32::consts::TAU;

use rand::Rng;

use super::{center, falloff_alpha, max_radius, range_f32};
use crate::color::Fill;
use crate::config::Params;
use crate::surface::Canvas;

pub fn sample_eccentricity<R: Rng + ?Sized>(rng: &mut R, params: &Params) -> f32 {
    range_f32(rng, params.min_eccentricity, params.max_eccentricity)
}

/// Eccentricity squeezes x only.
#[inline]
pub fn place(c: [f32; 2], radius: f32, angle: f32, eccentricity: f32) -> [f32; 2] {
    [
        c[0] + angle.cos() * radius * eccentricity,
        c[1] + angle.sin() * radius,
    ]
}

/// Single-color flattened disk of `params.elliptical_particles` particles.
pub fn draw<C, R>(canvas: &mut C, rng: &mut R, eccentricity: f32, primary: [u8; 3], params: &Params)
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let (w, h) = (canvas.width(), canvas.height());
    let c = center(w, h);
    let max_r = max_radius(w, h, params);

    for _ in 0..params.elliptical_particles {
        let radius = rng.random::<f32>() * max_r;
        let angle = rng.random::<f32>() * TAU;
        let [x, y] = place(c, radius, angle, eccentricity);
        let size = rng.random::<f32>() * params.max_particle_size;
        let alpha = falloff_alpha(radius, max_r, params.peak_alpha);
        canvas.fill_circle(x, y, size, Fill::new(primary, alpha));
    }
}
