//! Errors from the I/O edges (config files, image export). Rendering itself
//! cannot fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// PNG has no representation for a surface without pixels.
    #[error("cannot export a {0}x{1} surface")]
    EmptySurface(usize, usize),
}
