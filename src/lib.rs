pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod galaxy;
pub mod rng;
pub mod surface;

use std::time::Instant;

use rayon::prelude::*;

use config::Params;
pub use error::{Error, Result};
pub use galaxy::{Galaxy, PatternKind, Shape, generate};
use rng::Rng;
pub use surface::{Canvas, PixelSurface};

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Allocate a `w` x `h` surface and render one seeded galaxy onto it.
pub fn render(seed: u64, w: usize, h: usize, params: &Params) -> (PixelSurface, Galaxy, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let mut surface = PixelSurface::new(w, h);
    timings.push(Timing {
        name: "allocate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let mut rng = Rng::new(seed);
    let galaxy = generate(&mut surface, &mut rng, params);
    timings.push(Timing {
        name: "generate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    (surface, galaxy, timings)
}

/// Render `count` independent galaxies in parallel. Image `i` is seeded with
/// `rng::derive_seed(seed, i)` and drawn start to finish on a single thread.
pub fn render_gallery(
    seed: u64,
    count: usize,
    w: usize,
    h: usize,
    params: &Params,
) -> Vec<(PixelSurface, Galaxy)> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut surface = PixelSurface::new(w, h);
            let mut rng = Rng::new(rng::derive_seed(seed, i as u64));
            let galaxy = generate(&mut surface, &mut rng, params);
            (surface, galaxy)
        })
        .collect()
}
