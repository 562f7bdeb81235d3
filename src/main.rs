use std::path::PathBuf;

use anyhow::Context;
use galaxygen::config::Params;
use galaxygen::export;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(800);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(600);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let count: usize = args.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let params = Params::load();

    log::info!(
        "Generating {} galaxy image(s) at {}x{} with seed={}",
        count, width, height, seed
    );

    let t = std::time::Instant::now();
    let gallery = galaxygen::render_gallery(seed, count, width, height, &params);
    log::info!("Rendered in {:.1} ms", t.elapsed().as_secs_f64() * 1000.0);
    for (i, (surface, galaxy)) in gallery.iter().enumerate() {
        let path = out_dir.join(format!("galaxy_{i}.png"));
        export::save_png(surface, &path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        log::info!("Saved {} ({} galaxy: {:?})", path.display(), galaxy.kind(), galaxy.shape);
    }

    Ok(())
}
