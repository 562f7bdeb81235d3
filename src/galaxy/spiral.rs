use std::f32::consts::TAU;

use rand::Rng;

use super::{center, falloff_alpha, max_radius, pick, range_u32};
use crate::color::Fill;
use crate::config::Params;
use crate::surface::Canvas;

pub fn sample_arms<R: Rng + ?Sized>(rng: &mut R, params: &Params) -> u32 {
    range_u32(rng, params.min_arms, params.max_arms).max(1)
}

/// Base angle for a sample: uniform draw `u` in [0, 1) spread over a full turn,
/// plus `twist` radians per pixel of radius. The twist is what winds the arms.
#[inline]
pub fn base_angle(u: f32, radius: f32, twist: f32) -> f32 {
    u * TAU + twist * radius
}

/// Position of one sample on arm `arm` of `arms`, rotated evenly around `c`.
#[inline]
pub fn place(c: [f32; 2], radius: f32, base_angle: f32, arm: u32, arms: u32) -> [f32; 2] {
    let angle = base_angle + arm as f32 * (TAU / arms as f32);
    [c[0] + angle.cos() * radius, c[1] + angle.sin() * radius]
}

/// Every sample is plotted once per arm, so the arms stay rotationally
/// symmetric. Draws `params.spiral_particles * arms` particles.
pub fn draw<C, R>(
    canvas: &mut C,
    rng: &mut R,
    arms: u32,
    primary: [u8; 3],
    secondary: [u8; 3],
    params: &Params,
) where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let (w, h) = (canvas.width(), canvas.height());
    let c = center(w, h);
    let max_r = max_radius(w, h, params);

    for _ in 0..params.spiral_particles {
        let radius = rng.random::<f32>() * max_r;
        let angle = base_angle(rng.random::<f32>(), radius, params.twist);
        let alpha = falloff_alpha(radius, max_r, params.peak_alpha);

        for arm in 0..arms {
            let [x, y] = place(c, radius, angle, arm, arms);
            let size = rng.random::<f32>() * params.max_particle_size;
            let rgb = pick(rng, params.spiral_primary_chance, primary, secondary);
            canvas.fill_circle(x, y, size, Fill::new(rgb, alpha));
        }
    }
}
