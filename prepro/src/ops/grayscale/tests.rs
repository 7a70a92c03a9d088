use super::*;
use crate::prelude::*;

fn rgb_u8(width: u32, height: u32, px: [u8; 3]) -> Image {
    let samples: Vec<u8> = (0..width * height).flat_map(|_| px).collect();
    Image::from_samples(ImageDesc::new(width, height, ColorFormat::RGB_U8), &samples).unwrap()
}

#[test]
fn weights_sum_to_unity() {
    assert_eq!(WEIGHT_R + WEIGHT_G + WEIGHT_B, 1 << SHIFT);
}

#[test]
fn rgb_to_gray_uses_luma_weights() {
    let cases = [
        ([255, 0, 0], 76),
        ([0, 255, 0], 150),
        ([0, 0, 255], 29),
        ([255, 255, 255], 255),
        ([0, 0, 0], 0),
        ([10, 200, 30], 124),
    ];

    for (px, expected) in cases {
        let gray = Grayscale.apply(&rgb_u8(3, 2, px)).unwrap();
        assert_eq!(gray.desc().color_format, ColorFormat::L_U8);
        assert_eq!(gray.width(), 3);
        assert_eq!(gray.height(), 2);
        assert!(
            gray.bytes().iter().all(|&v| v == expected),
            "{:?} -> {:?}, expected {}",
            px,
            gray.bytes(),
            expected
        );
    }
}

#[test]
fn rgba_drops_alpha() {
    let samples: Vec<u8> = [[0, 255, 0, 0], [0, 255, 0, 255]].concat();
    let image = Image::from_samples(ImageDesc::new(2, 1, ColorFormat::RGBA_U8), &samples).unwrap();

    let gray = Grayscale.apply(&image).unwrap();
    assert_eq!(gray.bytes(), &[150, 150]);
}

#[test]
fn gray_input_passes_through() {
    let samples: Vec<u8> = (0..12).collect();
    let image = Image::from_samples(ImageDesc::new(4, 3, ColorFormat::L_U8), &samples).unwrap();

    let gray = Grayscale.apply(&image).unwrap();
    assert_eq!(gray, image);
}

#[test]
fn rgb_u16_keeps_bit_depth() {
    let samples: Vec<u16> = [65535u16, 65535, 65535, 1000, 1000, 1000].to_vec();
    let image = Image::from_samples(ImageDesc::new(2, 1, ColorFormat::RGB_U16), &samples).unwrap();

    let gray = Grayscale.apply(&image).unwrap();
    assert_eq!(gray.desc().color_format, ColorFormat::L_U16);
    assert_eq!(gray.samples::<u16>(), vec![65535, 1000]);
}

#[test]
fn gray_alpha_is_channel_mismatch() {
    let image = Image::from_samples(ImageDesc::new(1, 1, ColorFormat::LA_U8), &[1u8, 2]).unwrap();

    let result = Grayscale.apply(&image);
    assert!(matches!(
        result,
        Err(Error::ChannelMismatch { actual: 2, .. })
    ));
}

#[test]
fn float_input_is_unsupported() {
    let samples = [0.5f32; 3];
    let image = Image::from_samples(ImageDesc::new(1, 1, ColorFormat::RGB_F32), &samples).unwrap();

    let result = Grayscale.apply(&image);
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}
