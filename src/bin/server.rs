use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use galaxygen::color::Hsl;
use galaxygen::config::Params;
use galaxygen::{PatternKind, Shape, export};

const MAX_SIDE: usize = 4096;
/// Per-pattern budget cap. A spiral plots up to five points per sample.
const MAX_PARTICLES: usize = 200_000;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    spiral_particles: Option<usize>,
    elliptical_particles: Option<usize>,
    cluster_particles: Option<usize>,
}

#[derive(Serialize)]
struct GenerateResponse {
    seed: u64,
    pattern: PatternKind,
    primary: Hsl,
    secondary: Hsl,
    shape: Shape,
    data_url: String,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

struct Job {
    seed: u64,
    width: usize,
    height: usize,
    params: Params,
}

impl GenerateRequest {
    /// Fill gaps from `params` and cap everything that scales the work.
    fn into_job(self, mut params: Params) -> Job {
        if let Some(n) = self.spiral_particles {
            params.spiral_particles = n;
        }
        if let Some(n) = self.elliptical_particles {
            params.elliptical_particles = n;
        }
        if let Some(n) = self.cluster_particles {
            params.cluster_particles = n;
        }
        params.spiral_particles = params.spiral_particles.min(MAX_PARTICLES);
        params.elliptical_particles = params.elliptical_particles.min(MAX_PARTICLES);
        params.cluster_particles = params.cluster_particles.min(MAX_PARTICLES);

        Job {
            seed: self.seed.unwrap_or_else(rand::random),
            width: self.width.unwrap_or(800).min(MAX_SIDE),
            height: self.height.unwrap_or(600).min(MAX_SIDE),
            params,
        }
    }
}

fn run_job(job: Job) -> galaxygen::Result<GenerateResponse> {
    let Job {
        seed,
        width,
        height,
        params,
    } = job;
    let (surface, galaxy, timings) = galaxygen::render(seed, width, height, &params);
    log::info!("seed={} {}x{} -> {} galaxy", seed, width, height, galaxy.kind());

    Ok(GenerateResponse {
        seed,
        pattern: galaxy.kind(),
        primary: galaxy.primary,
        secondary: galaxy.secondary,
        data_url: export::to_data_url(&surface)?,
        shape: galaxy.shape,
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
        width,
        height,
    })
}

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("generate failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", self.0)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let job = req.into_job(Params::load());
    let response = tokio::task::spawn_blocking(move || run_job(job)).await??;
    Ok(Json(response))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("galaxygen server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
