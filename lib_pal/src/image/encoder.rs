use log::{debug, error, info};
use thiserror::Error;

use super::format::GifImage;
use crate::compression::palette::Rgb;
use crate::compression::pixels::{ChannelOrder, PixelSource, PixelSourceError};
use crate::compression::{compress, CompressionError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid pixel data: {0}")]
    InvalidPixelData(#[from] PixelSourceError),
    #[error("Image dimensions {width}x{height} exceed the GIF limit of 65535x65535")]
    DimensionTooLarge { width: u32, height: u32 },
    #[error("Failed to compress image data")]
    CompressionFailed(#[from] CompressionError),
}

/// Single-image GIF89a encoder over a borrowed pixel buffer.
///
/// All argument checks happen in [`GifEncoder::new`]; once constructed, the
/// encoder can only fail on an internal invariant violation.
#[derive(Debug, Clone)]
pub struct GifEncoder<'a> {
    pixels: PixelSource<'a>,
    width: u16,
    height: u16,
    transparency: Option<Rgb>,
}

impl<'a> GifEncoder<'a> {
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        order: ChannelOrder,
    ) -> Result<Self, EncodingError> {
        let dimensions = (u16::try_from(width), u16::try_from(height));
        let (Ok(gif_width), Ok(gif_height)) = dimensions else {
            error!("Image dimensions {}x{} do not fit GIF fields", width, height);
            return Err(EncodingError::DimensionTooLarge { width, height });
        };

        let pixels = PixelSource::new(data, width, height, order).map_err(|e| {
            error!("Rejected pixel buffer: {}", e);
            e
        })?;

        Ok(Self {
            pixels,
            width: gif_width,
            height: gif_height,
            transparency: None,
        })
    }

    /// Sets the chroma-key color used by the next [`encode`](Self::encode).
    pub fn set_transparency_color(&mut self, r: u8, g: u8, b: u8) {
        self.transparency = Some(Rgb::new(r, g, b));
    }

    pub fn clear_transparency_color(&mut self) {
        self.transparency = None;
    }

    pub fn transparency_color(&self) -> Option<Rgb> {
        self.transparency
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Produces the complete GIF89a file.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        info!("Starting encoding");
        debug!(
            "Header: {}x{}, transparency {:?}",
            self.width, self.height, self.transparency
        );

        let compressed = compress(&self.pixels, self.transparency)?;
        debug!(
            "Image data compressed successfully with palette size: {}",
            compressed.palette.len()
        );

        let image = GifImage::new(
            self.width,
            self.height,
            &compressed.palette,
            compressed.transparent_index,
            compressed.lzw,
        );
        debug!(
            "Color table of {} entries (size class {}), graphic control {:?}",
            image.color_table.len(),
            image.color_table.size_class(),
            image.graphic_control
        );

        let encoded = image.to_bytes();
        info!("Encoding process completed successfully: {} bytes", encoded.len());
        Ok(encoded)
    }
}

/// One-shot helper: validates, encodes and returns the GIF bytes.
pub fn encode(
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: &[u8],
    transparency: Option<Rgb>,
) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = GifEncoder::new(data, width, height, order)?;
    if let Some(Rgb { r, g, b }) = transparency {
        encoder.set_transparency_color(r, g, b);
    }
    encoder.encode()
}
