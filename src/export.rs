use std::path::Path;

use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::{Error, Result};
use crate::surface::PixelSurface;

fn check_size(surface: &PixelSurface) -> Result<()> {
    if surface.w == 0 || surface.h == 0 {
        return Err(Error::EmptySurface(surface.w, surface.h));
    }
    Ok(())
}

/// Snapshot the surface as PNG bytes.
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>> {
    check_size(surface)?;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        surface.as_raw(),
        surface.w as u32,
        surface.h as u32,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

pub fn to_data_url(surface: &PixelSurface) -> Result<String> {
    let png = encode_png(surface)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", b64))
}

pub fn save_png<P: AsRef<Path>>(surface: &PixelSurface, path: P) -> Result<()> {
    check_size(surface)?;
    image::save_buffer(
        path.as_ref(),
        surface.as_raw(),
        surface.w as u32,
        surface.h as u32,
        image::ColorType::Rgba8,
    )?;
    Ok(())
}
