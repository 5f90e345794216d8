//! Bit-level output for the LZW code stream.

/// Packs variable-width codes into bytes, least significant bit first, with
/// no alignment between codes.
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    accumulator: u32,
    pending_bits: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Appends the low `num_bits` bits of `value` (1-16).
    #[inline]
    pub fn write_bits(&mut self, value: u16, num_bits: u8) {
        debug_assert!((1..=16).contains(&num_bits));
        debug_assert!(u32::from(value) < 1 << num_bits);

        self.accumulator |= u32::from(value) << self.pending_bits;
        self.pending_bits += num_bits;

        while self.pending_bits >= 8 {
            self.buffer.push(self.accumulator as u8);
            self.accumulator >>= 8;
            self.pending_bits -= 8;
        }
    }

    /// Bytes completed so far, not counting a partial byte.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.pending_bits == 0
    }

    /// Flushes a trailing partial byte, padded with zero bits.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_bits > 0 {
            self.buffer.push(self.accumulator as u8);
        }
        self.buffer
    }
}
