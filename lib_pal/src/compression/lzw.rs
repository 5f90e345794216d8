use log::{debug, error};
use thiserror::Error;

use super::bits::BitWriter;
use crate::constants::{MAX_CODES, MAX_CODE_WIDTH, MIN_LZW_CODE_SIZE};

const NO_CODE: u16 = u16::MAX;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LzwCompressionError {
    #[error("index {index} at position {position} is outside the palette of {palette_len} colors")]
    IndexOutOfRange {
        position: usize,
        index: u8,
        palette_len: usize,
    },
}

/// Packed GIF-LZW image data, ready to be split into sub-blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzwStream {
    pub min_code_size: u8,
    pub data: Vec<u8>,
}

/// LZW minimum code size for a palette: the bit width of its color table,
/// never below 2.
pub fn min_code_size(palette_len: usize) -> u8 {
    let mut bits = 1;
    while (1usize << bits) < palette_len {
        bits += 1;
    }
    bits.max(MIN_LZW_CODE_SIZE)
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    first_child: u16,
    next_sibling: u16,
    suffix: u8,
}

const EMPTY_SLOT: Slot = Slot {
    first_child: NO_CODE,
    next_sibling: NO_CODE,
    suffix: 0,
};

/// Dictionary of index strings as a fixed arena of 4096 slots. Each code is a
/// (prefix code, suffix index) pair; the children of a code form a singly
/// linked list threaded through `first_child` / `next_sibling`.
#[derive(Debug)]
struct CodeTable {
    slots: Box<[Slot; MAX_CODES]>,
    first_free: u16,
    next_code: u16,
}

impl CodeTable {
    fn new(min_code_size: u8) -> Self {
        let clear_code = 1u16 << min_code_size;
        Self {
            slots: Box::new([EMPTY_SLOT; MAX_CODES]),
            first_free: clear_code + 2,
            next_code: clear_code + 2,
        }
    }

    /// Forgets every multi-index string. Root codes keep their slots.
    fn reset(&mut self) {
        for slot in &mut self.slots[..self.first_free as usize] {
            slot.first_child = NO_CODE;
        }
        self.next_code = self.first_free;
    }

    fn is_full(&self) -> bool {
        self.next_code as usize >= MAX_CODES
    }

    fn find(&self, prefix: u16, suffix: u8) -> Option<u16> {
        let mut code = self.slots[prefix as usize].first_child;
        while code != NO_CODE {
            let slot = &self.slots[code as usize];
            if slot.suffix == suffix {
                return Some(code);
            }
            code = slot.next_sibling;
        }
        None
    }

    /// Assigns the next code to `prefix + suffix`, or `None` when all codes
    /// are taken.
    fn insert(&mut self, prefix: u16, suffix: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }

        let code = self.next_code;
        self.slots[code as usize] = Slot {
            first_child: NO_CODE,
            next_sibling: self.slots[prefix as usize].first_child,
            suffix,
        };
        self.slots[prefix as usize].first_child = code;
        self.next_code += 1;
        Some(code)
    }
}

/// Streaming GIF-LZW encoder over palette indices.
#[derive(Debug)]
pub struct LzwEncoder {
    table: CodeTable,
    writer: BitWriter,
    min_code_size: u8,
    clear_code: u16,
    end_code: u16,
    code_width: u8,
    current: Option<u16>,
    clears: usize,
}

impl LzwEncoder {
    pub fn new(min_code_size: u8) -> Self {
        debug_assert!((MIN_LZW_CODE_SIZE..MAX_CODE_WIDTH).contains(&min_code_size));

        let clear_code = 1u16 << min_code_size;
        let mut encoder = Self {
            table: CodeTable::new(min_code_size),
            writer: BitWriter::new(),
            min_code_size,
            clear_code,
            end_code: clear_code + 1,
            code_width: min_code_size + 1,
            current: None,
            clears: 0,
        };
        encoder.emit(clear_code);
        encoder
    }

    #[inline]
    fn emit(&mut self, code: u16) {
        self.writer.write_bits(code, self.code_width);
    }

    /// Feeds one palette index. The caller guarantees `index < 2^min_code_size`.
    pub fn push(&mut self, index: u8) {
        let prefix = match self.current {
            None => {
                self.current = Some(u16::from(index));
                return;
            }
            Some(prefix) => prefix,
        };

        if let Some(code) = self.table.find(prefix, index) {
            self.current = Some(code);
            return;
        }

        self.emit(prefix);
        match self.table.insert(prefix, index) {
            Some(code) => {
                // The decoder lags one entry behind; widen once `code` itself
                // no longer fits.
                if code == 1 << self.code_width && self.code_width < MAX_CODE_WIDTH {
                    self.code_width += 1;
                }
            }
            None => {
                self.emit(self.clear_code);
                self.table.reset();
                self.code_width = self.min_code_size + 1;
                self.clears += 1;
            }
        }
        self.current = Some(u16::from(index));
    }

    pub fn finish(mut self) -> LzwStream {
        if let Some(code) = self.current.take() {
            self.emit(code);
        }
        self.emit(self.end_code);

        debug!(
            "LZW stream closed: {} table resets, {} codes in use, final width {}",
            self.clears, self.table.next_code, self.code_width
        );

        LzwStream {
            min_code_size: self.min_code_size,
            data: self.writer.finish(),
        }
    }
}

/// Compresses palette indices into a GIF-LZW code stream.
///
/// # Errors
/// - Returns `LzwCompressionError::IndexOutOfRange` for an index that does not
///   name a palette entry. Nothing is returned in that case.
pub fn lzw_compression(
    indices: &[u8],
    palette_len: usize,
) -> Result<LzwStream, LzwCompressionError> {
    let mut encoder = LzwEncoder::new(min_code_size(palette_len));

    for (position, &index) in indices.iter().enumerate() {
        if index as usize >= palette_len {
            error!(
                "Palette index {} at position {} outside palette of {} colors",
                index, position, palette_len
            );
            return Err(LzwCompressionError::IndexOutOfRange {
                position,
                index,
                palette_len,
            });
        }
        encoder.push(index);
    }

    Ok(encoder.finish())
}
