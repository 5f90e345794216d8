use std::fs;
use std::io;
use std::path::Path;

use image::ImageError;
use lib_palgif::{ChannelOrder, EncodingError};
use log::{debug, info};
use thiserror::Error;

use crate::Dimensions;

#[derive(Error, Debug)]
pub enum ImageHandlingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("GIF encoding error: {0}")]
    EncodingError(#[from] EncodingError),
}

/// Pixels ready to hand to the encoder.
pub struct PixelFile {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub order: ChannelOrder,
}

/// Loads `path` either as a raw interleaved buffer (when `raw` gives its
/// dimensions) or through the `image` decoders as RGBA.
pub fn load_pixels(
    path: &Path,
    raw: Option<Dimensions>,
    order: ChannelOrder,
) -> Result<PixelFile, ImageHandlingError> {
    if let Some(Dimensions { width, height }) = raw {
        let data = fs::read(path)?;
        debug!(
            "Read {} raw bytes from {} as {}x{} {}",
            data.len(),
            path.display(),
            width,
            height,
            order
        );
        return Ok(PixelFile {
            data,
            width,
            height,
            order,
        });
    }

    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    info!("Decoded {} ({}x{})", path.display(), width, height);

    Ok(PixelFile {
        data: rgba.into_raw(),
        width,
        height,
        order: ChannelOrder::Rgba,
    })
}

pub fn save_gif(path: &Path, encoded: &[u8]) -> Result<(), ImageHandlingError> {
    fs::write(path, encoded)?;
    info!("Wrote {} bytes to {}", encoded.len(), path.display());
    Ok(())
}
