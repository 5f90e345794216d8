#![allow(dead_code)]

use std::io::Cursor;

/// 4x4 RGB image using three colors.
#[rustfmt::skip]
pub const RANDOM_RGB: [u8; 48] = [
    255, 0, 0,   0, 255, 0,   0, 0, 255,   255, 0, 0,
    0, 255, 0,   0, 255, 0,   255, 0, 0,   0, 0, 255,
    0, 0, 255,   255, 0, 0,   0, 255, 0,   0, 255, 0,
    255, 0, 0,   255, 0, 0,   255, 0, 0,   0, 0, 255,
];

/// 2x2 RGB image: red, green, blue, white.
#[rustfmt::skip]
pub const FOUR_COLORS: [u8; 12] = [
    255, 0, 0,   0, 255, 0,
    0, 0, 255,   255, 255, 255,
];

/// RGB image with exactly `colors` distinct values, each used at least once,
/// repeated to fill `width * height` pixels.
pub fn distinct_colors(width: usize, height: usize, colors: usize) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let c = i % colors;
            [(c % 256) as u8, (c / 256) as u8 * 50, 9]
        })
        .collect()
}

/// Smooth RGB gradient with far more than 256 distinct colors.
pub fn gradient(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8,
            ]);
        }
    }
    data
}

/// Adds an alpha byte after every RGB triplet.
pub fn with_alpha(rgb: &[u8], alpha: u8) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], alpha])
        .collect()
}

/// Swaps RGB triplets to BGR.
pub fn to_bgr(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0]]).collect()
}

pub struct DecodedGif {
    pub width: u16,
    pub height: u16,
    pub palette: Vec<u8>,
    pub indices: Vec<u8>,
    pub transparent: Option<u8>,
}

impl DecodedGif {
    /// RGB triplets of every pixel, looked up in the global palette.
    pub fn rgb(&self) -> Vec<u8> {
        self.indices
            .iter()
            .flat_map(|&i| {
                let i = i as usize * 3;
                [self.palette[i], self.palette[i + 1], self.palette[i + 2]]
            })
            .collect()
    }
}

/// Reads a single-image GIF with an independent decoder.
pub fn decode_gif(bytes: &[u8]) -> DecodedGif {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(bytes)).unwrap();

    let width = decoder.width();
    let height = decoder.height();
    let palette = decoder.global_palette().unwrap().to_vec();
    let frame = decoder.read_next_frame().unwrap().unwrap();

    DecodedGif {
        width,
        height,
        palette,
        indices: frame.buffer.to_vec(),
        transparent: frame.transparent,
    }
}

/// Walks the data sub-blocks starting at `offset` and returns their sizes,
/// terminator excluded, along with the offset just past the terminator.
pub fn sub_block_sizes(bytes: &[u8], mut offset: usize) -> (Vec<usize>, usize) {
    let mut sizes = Vec::new();
    loop {
        let size = bytes[offset] as usize;
        offset += 1;
        if size == 0 {
            return (sizes, offset);
        }
        sizes.push(size);
        offset += size;
    }
}
