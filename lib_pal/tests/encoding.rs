mod common;

use common::{
    decode_gif, distinct_colors, gradient, sub_block_sizes, to_bgr, with_alpha, FOUR_COLORS,
    RANDOM_RGB,
};
use lib_palgif::{encode, ChannelOrder, EncodingError, GifEncoder, Rgb};

/// Offset of the byte after the global color table.
fn after_color_table(bytes: &[u8]) -> usize {
    let size_class = bytes[10] & 0x07;
    13 + 3 * (1usize << (size_class + 1))
}

#[test]
fn test_encode_four_colors() {
    let encoded = encode(2, 2, ChannelOrder::Rgb, &FOUR_COLORS, None).unwrap();

    #[rustfmt::skip]
    let expected_head: [u8; 25] = [
        b'G', b'I', b'F', b'8', b'9', b'a',
        2, 0, 2, 0, 0x91, 0, 0,
        255, 0, 0,   0, 255, 0,   0, 0, 255,   255, 255, 255,
    ];
    assert_eq!(&encoded[..25], &expected_head);

    // No graphic control extension: the image descriptor follows the table
    assert_eq!(after_color_table(&encoded), 25);
    assert_eq!(&encoded[25..35], &[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0]);
    assert_eq!(encoded[35], 2); // LZW minimum code size
    assert_eq!(encoded.last(), Some(&0x3B));

    let decoded = decode_gif(&encoded);
    assert_eq!((decoded.width, decoded.height), (2, 2));
    assert_eq!(decoded.indices, vec![0, 1, 2, 3]);
    assert_eq!(decoded.transparent, None);
}

#[test]
fn test_encode_four_colors_transparent() {
    let mut encoder = GifEncoder::new(&FOUR_COLORS, 2, 2, ChannelOrder::Rgb).unwrap();
    encoder.set_transparency_color(255, 0, 0);
    let encoded = encoder.encode().unwrap();

    assert_eq!(
        &encoded[25..33],
        &[0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(encoded[33], 0x2C);

    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.transparent, Some(0));
    assert_eq!(decoded.indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_encode_bgra_single_pixel() {
    let encoded = encode(1, 1, ChannelOrder::Bgra, &[0, 0, 255, 255], None).unwrap();
    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.rgb(), vec![255, 0, 0]);
    assert_eq!(decoded.palette.len(), 2 * 3);
}

#[test]
fn test_encode_channel_orders_match() {
    let rgb = distinct_colors(13, 7, 20);
    let reference = encode(13, 7, ChannelOrder::Rgb, &rgb, None).unwrap();

    let bgr = to_bgr(&rgb);
    let rgba = with_alpha(&rgb, 128);
    let bgra = with_alpha(&bgr, 0);

    for (data, order) in [
        (&bgr, ChannelOrder::Bgr),
        (&rgba, ChannelOrder::Rgba),
        (&bgra, ChannelOrder::Bgra),
    ] {
        let encoded = encode(13, 7, order, data, None).unwrap();
        assert_eq!(encoded, reference, "{}", order);
    }
}

#[test]
fn test_encode_decode_rgb() {
    let encoded = encode(4, 4, ChannelOrder::Rgb, &RANDOM_RGB, None).unwrap();
    assert!(encoded.starts_with(b"GIF89a"));
    assert_eq!(encoded.last(), Some(&0x3B));

    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.rgb(), RANDOM_RGB.to_vec());
    assert_eq!(decoded.palette.len(), 4 * 3);
    assert_eq!(&decoded.palette[9..], &[0, 0, 0]);
}

#[test]
fn test_encode_256_colors_lossless() {
    let data = distinct_colors(64, 64, 256);
    let encoded = encode(64, 64, ChannelOrder::Rgb, &data, None).unwrap();

    assert_eq!(encoded[10] & 0x07, 7);
    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.palette.len(), 256 * 3);
    assert_eq!(decoded.rgb(), data);
}

#[test]
fn test_encode_257_colors_one_approximation() {
    // 257 distinct colors, each used once
    let data = distinct_colors(257, 1, 257);
    let encoded = encode(257, 1, ChannelOrder::Rgb, &data, None).unwrap();
    let decoded = decode_gif(&encoded);

    let rgb = decoded.rgb();
    let mismatched = rgb
        .chunks_exact(3)
        .zip(data.chunks_exact(3))
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(mismatched, 1);
    // The 257th color (0, 50, 9) is closest to (0, 0, 9)
    assert_eq!(decoded.indices[256], 0);
}

#[test]
fn test_encode_full_palette_transparency_approximated() {
    let data = distinct_colors(16, 16, 256);
    let mut encoder = GifEncoder::new(&data, 16, 16, ChannelOrder::Rgb).unwrap();
    encoder.set_transparency_color(100, 1, 9);
    let encoded = encoder.encode().unwrap();

    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.transparent, Some(100));
    assert_eq!(decoded.palette.len(), 256 * 3);
}

#[test]
fn test_encode_transparency_inserted() {
    let data = distinct_colors(3, 3, 4);
    let mut encoder = GifEncoder::new(&data, 3, 3, ChannelOrder::Rgb).unwrap();
    encoder.set_transparency_color(1, 2, 3);
    let encoded = encoder.encode().unwrap();

    // Palette grew from 4 to 5 entries, so the table doubles to 8
    assert_eq!(encoded[10] & 0x07, 2);
    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.transparent, Some(4));
    assert_eq!(&decoded.palette[12..15], &[1, 2, 3]);
    assert!(decoded.indices.iter().all(|&i| i < 4));
}

#[test]
fn test_encode_large_gradient() {
    let (width, height) = (400, 300);
    let data = gradient(width, height);
    let (width_u32, height_u32) = (width as u32, height as u32);
    let encoded = encode(width_u32, height_u32, ChannelOrder::Rgb, &data, None).unwrap();

    // Sub-blocks never exceed 255 bytes and are followed by the trailer
    let data_start = after_color_table(&encoded) + 10 + 1;
    let (sizes, end) = sub_block_sizes(&encoded, data_start);
    assert!(sizes.len() > 1);
    assert!(sizes.iter().all(|&size| size <= 255));
    assert!(sizes[..sizes.len() - 1].iter().all(|&size| size == 255));
    assert_eq!(end, encoded.len() - 1);

    let decoded = decode_gif(&encoded);
    assert_eq!(decoded.indices.len(), width * height);
}

#[test]
fn test_table_size_class_property() {
    for colors in [1, 2, 3, 4, 5, 8, 9, 16, 17, 32, 33, 64, 65, 128, 129, 256] {
        let data = distinct_colors(colors, 2, colors);
        let encoded = encode(colors as u32, 2, ChannelOrder::Rgb, &data, None).unwrap();
        let n = encoded[10] & 0x07;
        let table_len = 1usize << (n + 1);
        assert!(table_len >= colors.max(2));
        assert!(table_len / 2 < colors.max(2));
        assert_eq!(decode_gif(&encoded).palette.len(), table_len * 3);
    }
}

#[test]
fn test_encode_rejects_short_buffer() {
    let result = encode(4, 4, ChannelOrder::Rgb, &RANDOM_RGB[..47], None);
    assert!(matches!(result, Err(EncodingError::InvalidPixelData(_))));
}

#[test]
fn test_encode_one_shot_matches_encoder() {
    let mut encoder = GifEncoder::new(&RANDOM_RGB, 4, 4, ChannelOrder::Rgb).unwrap();
    encoder.set_transparency_color(0, 255, 0);
    let key = Some(Rgb::new(0, 255, 0));
    let one_shot = encode(4, 4, ChannelOrder::Rgb, &RANDOM_RGB, key);
    assert_eq!(encoder.encode().unwrap(), one_shot.unwrap());
}
