//! Separable Gaussian blur.
//!
//! Rows are convolved first into an `f32` buffer, then columns, so the cost is
//! O(n×k) instead of O(n×k²). Borders mirror without repeating the edge sample.

use rayon::prelude::*;

use crate::common::Sample;
use crate::common::border::reflect_101;
use crate::image::Plane;

/// Standard deviation conventionally derived from a kernel size.
#[inline]
pub(crate) fn sigma_for_kernel_size(kernel_size: usize) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian kernel of exactly `kernel_size` taps.
pub(crate) fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    assert!(kernel_size % 2 == 1, "Kernel size must be odd");

    let sigma = sigma_for_kernel_size(kernel_size);
    let radius = (kernel_size / 2) as f32;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - radius;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

pub(crate) fn gaussian_blur<T: Sample>(plane: &Plane<T>, kernel_size: usize) -> Plane<T> {
    if kernel_size <= 1 {
        return plane.clone();
    }

    let width = plane.width();
    let height = plane.height();
    let kernel = gaussian_kernel_1d(kernel_size);
    let radius = (kernel_size / 2) as isize;

    // Horizontal pass
    let mut temp = vec![0.0f32; width * height];
    temp.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            let in_row = plane.row(y);
            for (x, out) in out_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (k, &kval) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - radius, width);
                    sum += in_row[sx].to_f32() * kval;
                }
                *out = sum;
            }
        });

    // Vertical pass
    let mut output = vec![T::default(); width * height];
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            let rows: Vec<usize> = (0..kernel.len())
                .map(|k| reflect_101(y as isize + k as isize - radius, height))
                .collect();

            for (x, out) in out_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (&sy, &kval) in rows.iter().zip(&kernel) {
                    sum += temp[sy * width + x] * kval;
                }
                *out = T::from_f32(sum);
            }
        });

    Plane::new(width, height, output)
}
