use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transparency::resolve_transparency;
use crate::constants::MAX_PALETTE_SIZE;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Invalid palette index: {0} exceeds palette size of {1}")]
    InvalidPaletteIndex(usize, usize),
}

/// An exact 8-bit RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance over the three channels.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

/// Ordered set of at most 256 distinct colors. Index order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    lookup: HashMap<Rgb, u8>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= MAX_PALETTE_SIZE
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// Index of an exact match, if any.
    #[inline]
    pub fn find(&self, color: Rgb) -> Option<u8> {
        self.lookup.get(&color).copied()
    }

    /// Returns the index of `color`, appending it when it is new and the
    /// palette still has room. `None` means the palette is full and the color
    /// is not in it.
    pub fn index_or_insert(&mut self, color: Rgb) -> Option<u8> {
        if let Some(index) = self.find(color) {
            return Some(index);
        }
        if self.is_full() {
            return None;
        }

        let index = self.colors.len() as u8;
        self.colors.push(color);
        self.lookup.insert(color, index);
        Some(index)
    }

    /// Entry closest to `color`; the lowest index wins among equal distances.
    /// Returns 0 for an empty palette.
    pub fn nearest(&self, color: Rgb) -> u8 {
        let mut best_index = 0;
        let mut best_distance = u32::MAX;

        for (index, &candidate) in self.colors.iter().enumerate() {
            let distance = color.distance_squared(candidate);
            if distance < best_distance {
                best_index = index;
                best_distance = distance;
                if distance == 0 {
                    break;
                }
            }
        }

        best_index as u8
    }

    /// Expands palette indices back into colors.
    ///
    /// # Errors
    /// - Returns `PaletteError::InvalidPaletteIndex` if any index exceeds the palette size
    pub fn expand(&self, indices: &[u8]) -> Result<Vec<Rgb>, PaletteError> {
        let invalid = |index: u8| PaletteError::InvalidPaletteIndex(index as usize, self.len());
        indices
            .iter()
            .map(|&index| self.get(index).ok_or_else(|| invalid(index)))
            .collect()
    }
}

/// Result of quantizing one image.
#[derive(Debug, Clone)]
pub struct Quantized {
    pub palette: Palette,
    pub indices: Vec<u8>,
    pub transparent_index: Option<u8>,
    /// Pixel mappings that fell back to the nearest palette entry.
    pub approximated: usize,
}

/// Incremental "first 256 distinct colors, then nearest neighbour" quantizer.
///
/// Colors are fed once in raster order. Until the palette saturates every new
/// color gets its own entry; afterwards unknown colors map to the nearest
/// existing entry. Output depends only on the input order, so identical input
/// always yields identical bytes.
#[derive(Debug, Default)]
pub struct Quantizer {
    palette: Palette,
    indices: Vec<u8>,
    approximations: HashMap<Rgb, u8>,
    approximated: usize,
}

impl Quantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(pixels: usize) -> Self {
        Self {
            indices: Vec::with_capacity(pixels),
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Maps one pixel and records its index.
    pub fn push(&mut self, color: Rgb) -> u8 {
        let index = match self.palette.index_or_insert(color) {
            Some(index) => index,
            None => self.approximate(color),
        };
        self.indices.push(index);
        index
    }

    fn approximate(&mut self, color: Rgb) -> u8 {
        self.approximated += 1;
        // A full palette never changes again, so cached answers stay valid.
        let palette = &self.palette;
        *self
            .approximations
            .entry(color)
            .or_insert_with(|| palette.nearest(color))
    }

    /// Closes the palette. The transparency key, when given, is resolved
    /// against the palette before it is frozen; pixels already mapped keep
    /// their indices.
    pub fn finish(mut self, transparency: Option<Rgb>) -> Quantized {
        let transparent_index = transparency.map(|key| {
            let resolution = resolve_transparency(&mut self.palette, key);
            debug!("Transparency {:?} resolved as {:?}", key, resolution);
            resolution.index()
        });

        if self.approximated > 0 {
            warn!(
                "Palette saturated: {} pixels ({} distinct colors) mapped to nearest entry",
                self.approximated,
                self.approximations.len()
            );
        }

        Quantized {
            palette: self.palette,
            indices: self.indices,
            transparent_index,
            approximated: self.approximated,
        }
    }
}

/// Quantizes a pixel stream in one pass.
pub fn quantize<I>(pixels: I, transparency: Option<Rgb>) -> Quantized
where
    I: IntoIterator<Item = Rgb>,
{
    let pixels = pixels.into_iter();
    let mut quantizer = Quantizer::with_capacity(pixels.size_hint().0);
    for color in pixels {
        quantizer.push(color);
    }
    quantizer.finish(transparency)
}
