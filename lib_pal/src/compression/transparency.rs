use super::palette::{Palette, Rgb};

/// How a chroma-key color found its palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The key was already a palette color.
    Existing(u8),
    /// The key was appended to a palette that still had room.
    Inserted(u8),
    /// The palette was full; the nearest entry stands in for the key.
    Approximated(u8),
}

impl Resolution {
    pub fn index(self) -> u8 {
        match self {
            Resolution::Existing(index)
            | Resolution::Inserted(index)
            | Resolution::Approximated(index) => index,
        }
    }
}

/// Finds or reserves the palette slot for the transparency key.
///
/// Pixels that were mapped before the key was inserted are left alone, so an
/// inserted slot is only ever used by the transparency flag itself.
pub fn resolve_transparency(palette: &mut Palette, key: Rgb) -> Resolution {
    if let Some(index) = palette.find(key) {
        return Resolution::Existing(index);
    }
    match palette.index_or_insert(key) {
        Some(index) => Resolution::Inserted(index),
        None => Resolution::Approximated(palette.nearest(key)),
    }
}
