#[cfg(test)]
mod tests;

use rayon::prelude::*;
use tracing::debug;

use crate::common::{ChannelCount, ChannelSize, Error, Result, Sample};
use crate::image::{Image, Plane};

/// BT.601 luma weights in 14-bit fixed point, R/G/B order. Sum is 1 << 14.
const WEIGHT_R: u32 = 4899;
const WEIGHT_G: u32 = 9617;
const WEIGHT_B: u32 = 1868;
const SHIFT: u32 = 14;

/// Collapses a multi-channel image to single-channel intensity.
///
/// Already-gray images pass through unchanged. RGBA input drops the alpha
/// channel before weighting. Gray+alpha input is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grayscale;

impl Grayscale {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, input: &Image) -> Result<Image> {
        let format = input.desc().color_format;
        if !format.is_processable() {
            return Err(Error::UnsupportedFormat(format));
        }

        let stride = match format.channel_count {
            ChannelCount::L => return Ok(input.clone()),
            ChannelCount::Rgb => 3,
            ChannelCount::Rgba => 4,
            ChannelCount::LA => {
                return Err(Error::ChannelMismatch {
                    expected: "1, 3 or 4",
                    actual: format.channel_count.channel_count(),
                });
            }
        };

        debug!(desc = %input.desc(), "grayscale");

        let output = match format.channel_size {
            ChannelSize::_8bit => Image::from_plane(luma_typed::<u8>(input, stride)),
            ChannelSize::_16bit => Image::from_plane(luma_typed::<u16>(input, stride)),
            ChannelSize::_32bit => return Err(Error::UnsupportedFormat(format)),
        };

        Ok(output)
    }
}

fn luma_typed<T: Sample>(input: &Image, stride: usize) -> Plane<T> {
    let width = input.width() as usize;
    let height = input.height() as usize;
    let src: Vec<T> = input.samples();
    let mut dst = vec![T::default(); width * height];

    dst.par_chunks_mut(width)
        .zip(src.par_chunks(width * stride))
        .for_each(|(dst_row, src_row)| {
            for (out, px) in dst_row.iter_mut().zip(src_row.chunks_exact(stride)) {
                let sum = px[0].to_u32() * WEIGHT_R
                    + px[1].to_u32() * WEIGHT_G
                    + px[2].to_u32() * WEIGHT_B;
                *out = T::from_u32_saturating((sum + (1 << (SHIFT - 1))) >> SHIFT);
            }
        });

    Plane::new(width, height, dst)
}
