pub mod bits;
pub mod lzw;
pub mod palette;
pub mod pixels;
pub mod transparency;

use log::{debug, info};
use lzw::{LzwCompressionError, LzwStream};
use palette::{Palette, Rgb};
use pixels::PixelSource;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompressionError {
    #[error("LZW compression failed")]
    LzwCompressionFailed(#[from] LzwCompressionError),
}

#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub palette: Palette,
    pub transparent_index: Option<u8>,
    pub lzw: LzwStream,
}

/// Quantizes the pixels, resolves the transparency key and LZW-compresses the
/// resulting index buffer.
pub fn compress(
    pixels: &PixelSource<'_>,
    transparency: Option<Rgb>,
) -> Result<CompressionResult, CompressionError> {
    info!("Starting compression");
    debug!(
        "Input: {}x{} pixels, {} order",
        pixels.width(),
        pixels.height(),
        pixels.order()
    );

    // Step 1: Palette quantization and transparency
    let quantized = palette::quantize(pixels.iter(), transparency);
    debug!(
        "Palette quantized: {} colors, {} indices, {} approximated",
        quantized.palette.len(),
        quantized.indices.len(),
        quantized.approximated
    );

    // Step 2: LZW Compression
    let lzw = lzw::lzw_compression(&quantized.indices, quantized.palette.len())?;
    debug!(
        "LZW compression: {} bytes at minimum code size {}",
        lzw.data.len(),
        lzw.min_code_size
    );

    if !quantized.indices.is_empty() {
        info!(
            "Compression completed successfully: {:.1}% of one byte per pixel",
            lzw.data.len() as f32 / quantized.indices.len() as f32 * 100.0
        );
    }

    Ok(CompressionResult {
        palette: quantized.palette,
        transparent_index: quantized.transparent_index,
        lzw,
    })
}
