use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::palette::Rgb;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PixelSourceError {
    #[error("Invalid channel order '{0}': expected 'rgb', 'bgr', 'rgba' or 'bgra'")]
    InvalidChannelOrder(String),
    #[error("Insufficient pixel data: expected at least {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
    #[error("Image dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: u32, height: u32 },
}

/// Memory layout of one pixel in the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
    Rgba,
    Bgra,
}

impl ChannelOrder {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelOrder::Rgb | ChannelOrder::Bgr => 3,
            ChannelOrder::Rgba | ChannelOrder::Bgra => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb",
            ChannelOrder::Bgr => "bgr",
            ChannelOrder::Rgba => "rgba",
            ChannelOrder::Bgra => "bgra",
        }
    }

    /// Reorders a single pixel into RGB. Alpha is dropped.
    #[inline]
    pub fn to_rgb(self, pixel: &[u8]) -> Rgb {
        match self {
            ChannelOrder::Rgb | ChannelOrder::Rgba => Rgb::new(pixel[0], pixel[1], pixel[2]),
            ChannelOrder::Bgr | ChannelOrder::Bgra => Rgb::new(pixel[2], pixel[1], pixel[0]),
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = PixelSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(ChannelOrder::Rgb),
            "bgr" => Ok(ChannelOrder::Bgr),
            "rgba" => Ok(ChannelOrder::Rgba),
            "bgra" => Ok(ChannelOrder::Bgra),
            other => Err(PixelSourceError::InvalidChannelOrder(other.to_string())),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of the caller's pixel buffer that yields RGB triplets in
/// row-major order, whatever the source layout.
#[derive(Debug, Clone, Copy)]
pub struct PixelSource<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl<'a> PixelSource<'a> {
    /// Validates that `data` covers `width * height` pixels. Extra trailing
    /// bytes are allowed and never read.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        order: ChannelOrder,
    ) -> Result<Self, PixelSourceError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(order.bytes_per_pixel()))
            .ok_or(PixelSourceError::DimensionOverflow { width, height })?;

        if data.len() < expected {
            return Err(PixelSourceError::InsufficientData {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            order,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel `index` in raster order.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn pixel(&self, index: usize) -> Rgb {
        assert!(index < self.len(), "pixel {} out of {}", index, self.len());
        let bpp = self.order.bytes_per_pixel();
        let start = index * bpp;
        self.order.to_rgb(&self.data[start..start + bpp])
    }

    /// Pixel at column `x` of row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates lie outside the image.
    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds",
            x,
            y
        );
        self.pixel(y as usize * self.width as usize + x as usize)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Rgb> + 'a {
        let order = self.order;
        let data: &'a [u8] = self.data;
        data[..self.len() * order.bytes_per_pixel()]
            .chunks_exact(order.bytes_per_pixel())
            .map(move |pixel| order.to_rgb(pixel))
    }
}
