use crate::compression::lzw::LzwStream;
use crate::compression::palette::{Palette, Rgb};
use crate::constants::{
    BLOCK_TERMINATOR, EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, IMAGE_SEPARATOR,
    MAX_SUB_BLOCK_SIZE, MIN_COLOR_TABLE_SIZE, SIGNATURE, TRAILER,
};

/// Global color table, padded with black up to a power of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<Rgb>,
}

impl ColorTable {
    pub fn from_palette(palette: &Palette) -> Self {
        let mut size = MIN_COLOR_TABLE_SIZE;
        while size < palette.len() {
            size *= 2;
        }

        let mut colors = palette.colors().to_vec();
        colors.resize(size, Rgb::BLACK);
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The 3-bit field `n` with `len == 2^(n+1)`.
    pub fn size_class(&self) -> u8 {
        (self.colors.len().trailing_zeros() - 1) as u8
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        for color in &self.colors {
            out.extend_from_slice(&color.to_bytes());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub size_class: u8,
    pub background_index: u8,
    pub aspect_ratio: u8,
}

impl LogicalScreenDescriptor {
    pub const SIZE: usize = 7;
    const GLOBAL_TABLE_FLAG: u8 = 0x80;

    pub fn new(width: u16, height: u16, color_table: &ColorTable) -> Self {
        Self {
            width,
            height,
            size_class: color_table.size_class(),
            background_index: 0,
            aspect_ratio: 0,
        }
    }

    /// Global table present, color resolution and table size both `n`,
    /// not sorted.
    pub fn packed(&self) -> u8 {
        Self::GLOBAL_TABLE_FLAG | (self.size_class << 4) | self.size_class
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.packed());
        out.push(self.background_index);
        out.push(self.aspect_ratio);
    }
}

/// Graphic Control Extension carrying the transparent color index. Disposal
/// method and delay are left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicControlExtension {
    pub transparent_index: u8,
}

impl GraphicControlExtension {
    pub const SIZE: usize = 8;
    const BLOCK_SIZE: u8 = 4;
    const TRANSPARENT_FLAG: u8 = 0x01;

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(EXTENSION_INTRODUCER);
        out.push(GRAPHIC_CONTROL_LABEL);
        out.push(Self::BLOCK_SIZE);
        out.push(Self::TRANSPARENT_FLAG);
        out.extend_from_slice(&0u16.to_le_bytes()); // Delay
        out.push(self.transparent_index);
        out.push(BLOCK_TERMINATOR);
    }
}

/// Image Descriptor for a full-canvas, non-interlaced image without a local
/// color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u16,
    pub height: u16,
}

impl ImageDescriptor {
    pub const SIZE: usize = 10;

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(IMAGE_SEPARATOR);
        out.extend_from_slice(&0u16.to_le_bytes()); // Left
        out.extend_from_slice(&0u16.to_le_bytes()); // Top
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(0);
    }
}

/// Splits `data` into length-prefixed sub-blocks of at most 255 bytes and
/// closes them with a zero-length block.
pub fn write_sub_blocks(out: &mut Vec<u8>, data: &[u8]) {
    for block in data.chunks(MAX_SUB_BLOCK_SIZE) {
        out.push(block.len() as u8);
        out.extend_from_slice(block);
    }
    out.push(BLOCK_TERMINATOR);
}

/// Everything needed to lay out one single-image GIF89a file.
#[derive(Debug, Clone)]
pub struct GifImage {
    pub screen: LogicalScreenDescriptor,
    pub color_table: ColorTable,
    pub graphic_control: Option<GraphicControlExtension>,
    pub descriptor: ImageDescriptor,
    pub lzw: LzwStream,
}

impl GifImage {
    pub fn new(
        width: u16,
        height: u16,
        palette: &Palette,
        transparent_index: Option<u8>,
        lzw: LzwStream,
    ) -> Self {
        let color_table = ColorTable::from_palette(palette);
        Self {
            screen: LogicalScreenDescriptor::new(width, height, &color_table),
            color_table,
            graphic_control: transparent_index
                .map(|transparent_index| GraphicControlExtension { transparent_index }),
            descriptor: ImageDescriptor { width, height },
            lzw,
        }
    }

    /// Exact size of the serialized file.
    pub fn encoded_len(&self) -> usize {
        let data = self.lzw.data.len();
        let sub_blocks = data + data.div_ceil(MAX_SUB_BLOCK_SIZE) + 1;

        SIGNATURE.len()
            + LogicalScreenDescriptor::SIZE
            + self.color_table.len() * 3
            + self.graphic_control.map_or(0, |_| GraphicControlExtension::SIZE)
            + ImageDescriptor::SIZE
            + 1
            + sub_blocks
            + 1
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());

        out.extend_from_slice(&SIGNATURE);
        self.screen.write_to(&mut out);
        self.color_table.write_to(&mut out);
        if let Some(graphic_control) = &self.graphic_control {
            graphic_control.write_to(&mut out);
        }
        self.descriptor.write_to(&mut out);
        out.push(self.lzw.min_code_size);
        write_sub_blocks(&mut out, &self.lzw.data);
        out.push(TRAILER);

        out
    }
}
