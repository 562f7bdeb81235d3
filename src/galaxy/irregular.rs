use std::f32::consts::TAU;

use rand::Rng;

use super::{center, falloff_alpha, pick, range_u32};
use crate::color::Fill;
use crate::config::Params;
use crate::surface::Canvas;

pub fn cluster_radius(w: usize, h: usize, params: &Params) -> f32 {
    params.cluster_radius_fraction * w.min(h) as f32
}

/// Cluster centers scattered around the surface center, each axis offset by
/// up to `cluster_spread` of that dimension. Centers near the edge are kept;
/// their clusters simply run off the surface.
pub fn sample_centers<R: Rng + ?Sized>(
    w: usize,
    h: usize,
    rng: &mut R,
    params: &Params,
) -> Vec<[f32; 2]> {
    let count = range_u32(rng, params.min_clusters, params.max_clusters);
    let c = center(w, h);
    let span = 2.0 * params.cluster_spread;
    (0..count)
        .map(|_| {
            let x = c[0] + (rng.random::<f32>() - 0.5) * span * w as f32;
            let y = c[1] + (rng.random::<f32>() - 0.5) * span * h as f32;
            [x, y]
        })
        .collect()
}

#[inline]
pub fn place(cluster: [f32; 2], radius: f32, angle: f32) -> [f32; 2] {
    [
        cluster[0] + angle.cos() * radius,
        cluster[1] + angle.sin() * radius,
    ]
}

/// `params.cluster_particles` per cluster, fading toward each cluster's rim.
pub fn draw<C, R>(
    canvas: &mut C,
    rng: &mut R,
    centers: &[[f32; 2]],
    radius: f32,
    primary: [u8; 3],
    secondary: [u8; 3],
    params: &Params,
) where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    for &cluster in centers {
        for _ in 0..params.cluster_particles {
            let r = rng.random::<f32>() * radius;
            let angle = rng.random::<f32>() * TAU;
            let [x, y] = place(cluster, r, angle);
            let size = rng.random::<f32>() * params.max_particle_size;
            let alpha = falloff_alpha(r, radius, params.peak_alpha);
            let rgb = pick(rng, params.irregular_primary_chance, primary, secondary);
            canvas.fill_circle(x, y, size, Fill::new(rgb, alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{Galaxy, Shape};
    use crate::rng::Rng as SplitMix;
    use crate::surface::PixelSurface;
    use crate::surface::recording::RecordingCanvas;

    #[test]
    fn centers_within_spread() {
        let params = Params::default();
        let mut rng = SplitMix::new(10);
        for _ in 0..200 {
            let centers = sample_centers(500, 300, &mut rng, &params);
            assert!((3..=6).contains(&centers.len()));
            for [x, y] in centers {
                assert!((x - 250.0).abs() <= 100.0);
                assert!((y - 150.0).abs() <= 60.0);
            }
        }
    }

    #[test]
    fn cluster_radius_uses_short_side() {
        let params = Params::default();
        assert!((cluster_radius(400, 200, &params) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn particles_per_cluster() {
        let params = Params::default();
        let centers = vec![[50.0, 50.0], [60.0, 40.0], [30.0, 70.0], [45.0, 45.0]];
        let mut canvas = RecordingCanvas::new(100, 100);
        draw(&mut canvas, &mut SplitMix::new(5), &centers, 15.0, [1, 0, 0], [0, 0, 1], &params);
        assert_eq!(canvas.dots.len(), 4 * 2_000);
        let primary = canvas.dots.iter().filter(|d| d.fill.rgb == [1, 0, 0]).count();
        let share = primary as f32 / canvas.dots.len() as f32;
        assert!((0.55..0.65).contains(&share), "primary share {share}");
    }

    #[test]
    fn alpha_fades_from_cluster_center() {
        let params = Params {
            cluster_particles: 1_000,
            ..Params::default()
        };
        let mut canvas = RecordingCanvas::new(100, 100);
        draw(&mut canvas, &mut SplitMix::new(7), &[[20.0, 30.0]], 10.0, [1, 1, 1], [2, 2, 2], &params);
        for d in &canvas.dots {
            let r = ((d.x - 20.0).powi(2) + (d.y - 30.0).powi(2)).sqrt();
            assert!(r <= 10.0 + 1e-3);
            assert!((d.fill.alpha - (1.0 - r / 10.0) * 0.8).abs() < 1e-3);
        }
    }

    #[test]
    fn clusters_may_run_off_canvas() {
        let params = Params {
            cluster_particles: 500,
            ..Params::default()
        };
        let galaxy = Galaxy {
            primary: crate::color::Hsl::new(30.0, 90.0, 50.0),
            secondary: crate::color::Hsl::new(210.0, 90.0, 50.0),
            shape: Shape::Irregular {
                centers: vec![[0.0, 0.0], [64.0, 32.0]],
                radius: 12.0,
            },
        };

        // Positions are not pulled back inside the bounds.
        let mut canvas = RecordingCanvas::new(64, 32);
        crate::galaxy::draw(&mut canvas, &mut SplitMix::new(1), &galaxy, &params);
        assert_eq!(canvas.dots.len(), 1_000);
        assert!(canvas.dots.iter().any(|d| d.x < 0.0 || d.y < 0.0));
        assert!(canvas.dots.iter().any(|d| d.x > 64.0 || d.y > 32.0));

        // And a real raster takes them without complaint.
        let mut surface = PixelSurface::new(64, 32);
        crate::galaxy::draw(&mut surface, &mut SplitMix::new(1), &galaxy, &params);
        assert_ne!(surface.get(0, 0)[3], 0);
    }
}
