
use tracing::debug;

use super::denoise::median::median_filter;
use super::{PlaneOp, apply_plane_op, validate_kernel_size};
use crate::common::{Result, Sample};
use crate::image::{Image, Plane};

pub const DEFAULT_BLUR_SIZE: u32 = 51;

/// Removes slow illumination variation.
///
/// The background is estimated with a large median filter and subtracted from
/// the input; negative differences saturate at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundSubtraction {
    /// Odd median kernel edge length in pixels.
    pub blur_size: u32,
}

impl Default for BackgroundSubtraction {
    fn default() -> Self {
        Self {
            blur_size: DEFAULT_BLUR_SIZE,
        }
    }
}

impl BackgroundSubtraction {
    pub fn new(blur_size: u32) -> Self {
        Self { blur_size }
    }

    pub fn validate(&self) -> Result<()> {
        validate_kernel_size("background", self.blur_size)
    }

    pub fn apply(&self, input: &Image) -> Result<Image> {
        self.validate()?;
        debug!(blur_size = self.blur_size, "background subtraction");
        apply_plane_op(self, input)
    }
}

impl PlaneOp for BackgroundSubtraction {
    fn run<T: Sample>(&self, plane: &Plane<T>) -> Result<Plane<T>> {
        let background = median_filter(plane, self.blur_size as usize);

        let pixels = plane
            .pixels()
            .iter()
            .zip(background.pixels())
            .map(|(&value, &bg)| T::from_u32_saturating(value.to_u32().saturating_sub(bg.to_u32())))
            .collect();

        Ok(Plane::new(plane.width(), plane.height(), pixels))
    }
}
