pub const FORMAT_NAME: &str = "GIF89a image";
pub const FILE_EXT: &str = "gif";

/// Signature and version, the first six bytes of every file we write.
pub const SIGNATURE: [u8; 6] = *b"GIF89a";

pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const BLOCK_TERMINATOR: u8 = 0x00;
pub const TRAILER: u8 = 0x3B;

/// Largest palette a GIF color table can hold.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Smallest color table the format allows (size class 0).
pub const MIN_COLOR_TABLE_SIZE: usize = 2;

/// Largest payload of a single data sub-block.
pub const MAX_SUB_BLOCK_SIZE: usize = 255;

pub const MIN_LZW_CODE_SIZE: u8 = 2;
pub const MAX_CODE_WIDTH: u8 = 12;

/// Number of codes the LZW table can hold, control codes included.
pub const MAX_CODES: usize = 1 << MAX_CODE_WIDTH;
