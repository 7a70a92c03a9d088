//! Area-averaging resample.
//!
//! Every destination pixel covers a `src_len / dst_len` span of the source
//! and takes the coverage-weighted mean of the samples under it. The filter
//! is separable: rows first into an `f32` buffer, then columns.

use rayon::prelude::*;

use crate::common::Sample;
use crate::image::Plane;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Tap {
    pub index: usize,
    pub weight: f32,
}

/// Source taps for each destination index along one axis. Weights of each
/// destination index sum to one.
pub(super) fn area_taps(src_len: usize, dst_len: usize) -> Vec<Vec<Tap>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);

            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then(|| Tap {
                        index: s,
                        weight: (overlap / (end - start)) as f32,
                    })
                })
                .collect()
        })
        .collect()
}

pub(super) fn resize_area<T: Sample>(plane: &Plane<T>, width: usize, height: usize) -> Plane<T> {
    if width == plane.width() && height == plane.height() {
        return plane.clone();
    }

    let src_width = plane.width();
    let x_taps = area_taps(src_width, width);
    let y_taps = area_taps(plane.height(), height);

    // Horizontal pass over every source row
    let mut temp = vec![0.0f32; width * plane.height()];
    temp.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            let in_row = plane.row(y);
            for (out, taps) in out_row.iter_mut().zip(&x_taps) {
                *out = taps
                    .iter()
                    .map(|tap| in_row[tap.index].to_f32() * tap.weight)
                    .sum();
            }
        });

    // Vertical pass
    let mut output = vec![T::default(); width * height];
    output
        .par_chunks_mut(width)
        .zip(y_taps.par_iter())
        .for_each(|(out_row, taps)| {
            for (x, out) in out_row.iter_mut().enumerate() {
                let sum: f32 = taps
                    .iter()
                    .map(|tap| temp[tap.index * width + x] * tap.weight)
                    .sum();
                *out = T::from_f32(sum);
            }
        });

    Plane::new(width, height, output)
}
