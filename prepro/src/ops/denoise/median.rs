//! Square median filter with replicated borders.
//!
//! Each row slides a two-level histogram (coarse buckets over fine bins) along
//! x: one column leaves and one enters per step, and the median is found by
//! walking the coarse buckets first. Cost per pixel is O(k) plus the bucket
//! walk, which keeps large background kernels (51×51) affordable.

use rayon::prelude::*;

use crate::common::Sample;
use crate::common::border::replicate;
use crate::image::Plane;

pub(crate) struct SlidingHistogram {
    fine: Vec<u32>,
    coarse: Vec<u32>,
    shift: u32,
}

impl SlidingHistogram {
    pub(crate) fn new(levels: usize) -> Self {
        let shift = if levels > 256 { 8 } else { 4 };
        Self {
            fine: vec![0; levels],
            coarse: vec![0; levels >> shift],
            shift,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.fine.fill(0);
        self.coarse.fill(0);
    }

    #[inline]
    pub(crate) fn add(&mut self, value: usize) {
        self.fine[value] += 1;
        self.coarse[value >> self.shift] += 1;
    }

    #[inline]
    pub(crate) fn remove(&mut self, value: usize) {
        debug_assert!(self.fine[value] > 0);
        self.fine[value] -= 1;
        self.coarse[value >> self.shift] -= 1;
    }

    /// Value at zero-based `rank` in sorted order.
    pub(crate) fn nth(&self, rank: u32) -> usize {
        let bucket_len = 1usize << self.shift;
        let mut seen = 0u32;

        for (bucket, &count) in self.coarse.iter().enumerate() {
            if seen + count > rank {
                let start = bucket * bucket_len;
                for value in start..start + bucket_len {
                    seen += self.fine[value];
                    if seen > rank {
                        return value;
                    }
                }
            }
            seen += count;
        }

        self.fine.len() - 1
    }
}

pub(crate) fn median_filter<T: Sample>(plane: &Plane<T>, kernel_size: usize) -> Plane<T> {
    if kernel_size <= 1 {
        return plane.clone();
    }

    let width = plane.width();
    let height = plane.height();
    let radius = (kernel_size / 2) as isize;
    let rank = (kernel_size * kernel_size / 2) as u32;
    let src = plane.pixels();

    let mut output = vec![T::default(); width * height];
    output.par_chunks_mut(width).enumerate().for_each_init(
        || SlidingHistogram::new(T::LEVELS),
        |hist, (y, out_row)| {
            hist.clear();

            let rows: Vec<usize> = (-radius..=radius)
                .map(|d| replicate(y as isize + d, height))
                .collect();
            let column = |x: isize| replicate(x, width);

            for dx in -radius..=radius {
                let sx = column(dx);
                for &sy in &rows {
                    hist.add(src[sy * width + sx].to_u32() as usize);
                }
            }
            out_row[0] = T::from_u32_saturating(hist.nth(rank) as u32);

            for x in 1..width as isize {
                let leaving = column(x - radius - 1);
                let entering = column(x + radius);
                for &sy in &rows {
                    hist.remove(src[sy * width + leaving].to_u32() as usize);
                    hist.add(src[sy * width + entering].to_u32() as usize);
                }
                out_row[x as usize] = T::from_u32_saturating(hist.nth(rank) as u32);
            }
        },
    );

    Plane::new(width, height, output)
}
