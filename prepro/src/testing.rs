//! Shared helpers for unit tests.

use crate::common::ColorFormat;
use crate::image::{Image, ImageDesc, Plane};

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    ::common::log_setup::init_test_tracing();
}

/// 8-bit gray image with every pixel produced by `f(x, y)`.
pub fn gray_image_u8(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Image {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    Image::new_with_data(ImageDesc::new(width, height, ColorFormat::L_U8), pixels).unwrap()
}

/// 8-bit RGB image with every pixel produced by `f(x, y)`.
pub fn rgb_image_u8(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Image {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| f(x, y))
        .collect();
    Image::new_with_data(ImageDesc::new(width, height, ColorFormat::RGB_U8), pixels).unwrap()
}

/// Deterministic pseudo-random plane (64-bit LCG).
pub fn noise_plane_u8(width: usize, height: usize, seed: u64) -> Plane<u8> {
    let mut state = seed;
    let pixels = (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect();
    Plane::new(width, height, pixels)
}
