//! palgif - encode images or raw pixel buffers as single-image GIF89a files.

mod filemanager;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use lib_palgif::constants::FILE_EXT;
use lib_palgif::{ChannelOrder, GifEncoder, Rgb};
use log::LevelFilter;

use filemanager::ImageHandlingError;

/// Convert an image into a GIF89a file with an optional chroma-key color.
///
/// Inputs are decoded with the `image` crate unless `--raw` is given, in which
/// case the file is read as interleaved pixels in `--order` layout.
#[derive(Parser, Debug)]
#[command(name = "palgif")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image (PNG, JPEG, BMP, ...) or raw pixel file with --raw
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (defaults to INPUT with a .gif extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Treat INPUT as raw pixels of the given size, e.g. 640x480
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    raw: Option<Dimensions>,

    /// Channel order of raw input: rgb, bgr, rgba or bgra
    #[arg(long, default_value = "rgb")]
    order: ChannelOrder,

    /// Color rendered transparent, as RRGGBB hex
    #[arg(short, long, value_name = "RRGGBB", value_parser = parse_color)]
    transparent: Option<Rgb>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width = width
            .parse()
            .map_err(|e| format!("invalid width '{}': {}", width, e))?;
        let height = height
            .parse()
            .map_err(|e| format!("invalid height '{}': {}", height, e))?;
        Ok(Dimensions { width, height })
    }
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got '{}'", s));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid color '{}': {}", s, e))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn run(args: &Args) -> Result<PathBuf, ImageHandlingError> {
    let pixels = filemanager::load_pixels(&args.input, args.raw, args.order)?;

    let mut encoder = GifEncoder::new(&pixels.data, pixels.width, pixels.height, pixels.order)?;
    if let Some(Rgb { r, g, b }) = args.transparent {
        encoder.set_transparency_color(r, g, b);
    }
    let encoded = encoder.encode()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(FILE_EXT));
    filemanager::save_gif(&output, &encoded)?;
    Ok(output)
}

fn main() -> ExitCode {
    let args = Args::parse();
    lib_palgif::init_logging(log_level(args.verbose), Some("palgif"));

    match run(&args) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("palgif: {}", e);
            ExitCode::FAILURE
        }
    }
}
