pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::compression::palette::Rgb;
pub use crate::compression::pixels::ChannelOrder;
pub use crate::image::{encode, EncodingError, GifEncoder};

/// Routes `log` output of the library (and of `extra_target`, if any) to
/// stderr at `level`. Calling it again after a logger is installed is a no-op.
pub fn init_logging(level: LevelFilter, extra_target: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_palgif"), level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    if let Some(target) = extra_target {
        builder.filter(Some(target), level);
    }

    if builder.try_init().is_err() {
        debug!("Logger already initialized");
    }
}
