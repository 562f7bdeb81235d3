use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "galaxygen.toml";

/// All tunable parameters. Loaded from `galaxygen.toml`; missing keys keep
/// their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Particle budgets
    pub spiral_particles: usize,
    pub elliptical_particles: usize,
    pub cluster_particles: usize,

    // Shape ranges (inclusive)
    pub min_arms: u32,
    pub max_arms: u32,
    pub min_clusters: u32,
    pub max_clusters: u32,
    pub min_eccentricity: f32,
    pub max_eccentricity: f32,

    // Geometry, as fractions of the surface
    pub radius_fraction: f32,
    pub cluster_radius_fraction: f32,
    pub cluster_spread: f32,
    /// Radians of extra rotation per pixel of radius.
    pub twist: f32,

    // Particle look
    pub peak_alpha: f32,
    pub max_particle_size: f32,
    pub spiral_primary_chance: f64,
    pub irregular_primary_chance: f64,

    pub background: [u8; 4],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            spiral_particles: 10_000,
            elliptical_particles: 8_000,
            cluster_particles: 2_000,
            min_arms: 2,
            max_arms: 5,
            min_clusters: 3,
            max_clusters: 6,
            min_eccentricity: 0.5,
            max_eccentricity: 1.0,
            radius_fraction: 0.4,
            cluster_radius_fraction: 0.15,
            cluster_spread: 0.2,
            twist: 0.01,
            peak_alpha: 0.8,
            max_particle_size: 2.0,
            spiral_primary_chance: 0.5,
            irregular_primary_chance: 0.6,
            background: [0, 0, 0, 255],
        }
    }
}

impl Params {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// `galaxygen.toml` from the working directory, or defaults when absent.
    /// A file that exists but fails to parse is reported and ignored.
    pub fn load_or_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(params) => params,
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Environment variables override file values for the particle budgets.
    pub fn merge_with_env(&mut self) {
        let budgets = [
            ("GALAXYGEN_SPIRAL_PARTICLES", &mut self.spiral_particles),
            ("GALAXYGEN_ELLIPTICAL_PARTICLES", &mut self.elliptical_particles),
            ("GALAXYGEN_CLUSTER_PARTICLES", &mut self.cluster_particles),
        ];
        for (key, slot) in budgets {
            if let Ok(val) = std::env::var(key) {
                match val.parse::<usize>() {
                    Ok(n) => *slot = n,
                    Err(_) => log::warn!("{key}={val:?} is not a particle count, keeping {slot}"),
                }
            }
        }
    }

    pub fn load() -> Self {
        let mut params = Self::load_or_default();
        params.merge_with_env();
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_budgets() {
        let p = Params::default();
        assert_eq!(p.spiral_particles, 10_000);
        assert_eq!(p.elliptical_particles, 8_000);
        assert_eq!(p.cluster_particles, 2_000);
        assert_eq!((p.min_arms, p.max_arms), (2, 5));
        assert_eq!((p.min_clusters, p.max_clusters), (3, 6));
    }

    #[test]
    fn toml_round_trip() {
        let p = Params::default();
        let s = toml::to_string_pretty(&p).unwrap();
        assert_eq!(Params::from_toml_str(&s).unwrap(), p);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let p = Params::from_toml_str("spiral_particles = 50\nbackground = [10, 20, 30, 0]\n").unwrap();
        assert_eq!(p.spiral_particles, 50);
        assert_eq!(p.background, [10, 20, 30, 0]);
        assert_eq!(p.elliptical_particles, 8_000);
        assert_eq!(p.twist, 0.01);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Params::from_toml_str("spiral_particles = \"many\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Params::load_from_file("/definitely/not/here/galaxygen.toml").is_err());
    }
}
