//! Aspect-preserving resize into a fixed canvas.
//!
//! The source is scaled to fit inside the target, resampled with area
//! averaging and centred; leftover rows and columns are filled with a constant.
//! When padding on an axis is odd the extra pixel goes to the bottom or right.

mod resample;


use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PlaneOp, apply_plane_op};
use crate::common::{Error, Result, Sample};
use crate::image::{Image, Plane};

pub const DEFAULT_TARGET_SIZE: (u32, u32) = (512, 512);

/// Fill value for the padded border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadValue {
    /// Middle of the sample range (128 for 8-bit, 32768 for 16-bit).
    #[default]
    MidGray,
    /// Explicit sample value; must fit the image's sample type.
    Sample(u16),
}

impl PadValue {
    pub(crate) fn resolve<T: Sample>(&self) -> Result<T> {
        match *self {
            PadValue::MidGray => Ok(T::MID),
            PadValue::Sample(value) if value as u32 <= T::max_u32() => {
                Ok(T::from_u32_saturating(value as u32))
            }
            PadValue::Sample(value) => Err(Error::invalid(
                "letterbox",
                format!(
                    "pad value {} exceeds sample maximum {}",
                    value,
                    T::max_u32()
                ),
            )),
        }
    }
}

/// Placement of the scaled image inside the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterboxLayout {
    pub scaled_width: usize,
    pub scaled_height: usize,
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl LetterboxLayout {
    /// Scale factor is `min(target_w / src_w, target_h / src_h)` and scaled
    /// sizes are floored, computed exactly in integers.
    pub fn compute(
        src_width: usize,
        src_height: usize,
        target_width: usize,
        target_height: usize,
    ) -> Result<Self> {
        if src_width == 0 || src_height == 0 {
            return Err(Error::invalid(
                "letterbox",
                format!("zero-area source {}x{}", src_width, src_height),
            ));
        }
        if target_width == 0 || target_height == 0 {
            return Err(Error::invalid(
                "letterbox",
                format!("zero-area target {}x{}", target_width, target_height),
            ));
        }

        let (sw, sh) = (src_width as u64, src_height as u64);
        let (tw, th) = (target_width as u64, target_height as u64);

        // Width binds when tw / sw <= th / sh.
        let (scaled_width, scaled_height) = if tw * sh <= th * sw {
            (tw, sh * tw / sw)
        } else {
            (sw * th / sh, th)
        };

        if scaled_width == 0 || scaled_height == 0 {
            return Err(Error::invalid(
                "letterbox",
                format!(
                    "{}x{} scaled into {}x{} rounds to {}x{}",
                    src_width, src_height, target_width, target_height, scaled_width, scaled_height
                ),
            ));
        }

        let (scaled_width, scaled_height) = (scaled_width as usize, scaled_height as usize);
        let pad_width = target_width - scaled_width;
        let pad_height = target_height - scaled_height;

        Ok(Self {
            scaled_width,
            scaled_height,
            top: pad_height / 2,
            bottom: pad_height - pad_height / 2,
            left: pad_width / 2,
            right: pad_width - pad_width / 2,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letterbox {
    pub width: u32,
    pub height: u32,
    pub pad_value: PadValue,
}

impl Default for Letterbox {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SIZE.0, DEFAULT_TARGET_SIZE.1)
    }
}

impl Letterbox {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pad_value: PadValue::default(),
        }
    }

    /// Builder method to set the pad value.
    pub fn pad_value(mut self, pad_value: PadValue) -> Self {
        self.pad_value = pad_value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(
                "letterbox",
                format!(
                    "target size must be positive, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        Ok(())
    }

    pub fn layout(&self, src_width: u32, src_height: u32) -> Result<LetterboxLayout> {
        LetterboxLayout::compute(
            src_width as usize,
            src_height as usize,
            self.width as usize,
            self.height as usize,
        )
    }

    pub fn apply(&self, input: &Image) -> Result<Image> {
        self.validate()?;
        debug!(
            source = %input.desc(),
            width = self.width,
            height = self.height,
            "letterbox"
        );
        apply_plane_op(self, input)
    }
}

impl PlaneOp for Letterbox {
    fn run<T: Sample>(&self, plane: &Plane<T>) -> Result<Plane<T>> {
        let pad = self.pad_value.resolve::<T>()?;
        let layout = LetterboxLayout::compute(
            plane.width(),
            plane.height(),
            self.width as usize,
            self.height as usize,
        )?;

        let scaled = resample::resize_area(plane, layout.scaled_width, layout.scaled_height);

        let mut canvas = Plane::new_filled(self.width as usize, self.height as usize, pad);
        let canvas_width = canvas.width();
        for (y, src_row) in scaled.pixels().chunks_exact(layout.scaled_width).enumerate() {
            let start = (layout.top + y) * canvas_width + layout.left;
            canvas.pixels_mut()[start..start + layout.scaled_width].copy_from_slice(src_row);
        }

        Ok(canvas)
    }
}
