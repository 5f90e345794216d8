pub mod encoder;
pub mod format;

pub use encoder::{encode, EncodingError, GifEncoder};
