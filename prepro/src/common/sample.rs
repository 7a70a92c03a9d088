use bytemuck::Pod;
use num_traits::{AsPrimitive, Bounded};

use crate::common::color_format::ColorFormat;

/// Unsigned integer sample type the processing stages run on.
pub(crate) trait Sample:
    Pod + Default + Ord + Bounded + AsPrimitive<u32> + AsPrimitive<f32> + Send + Sync
{
    /// Single-channel format carrying this sample type.
    const GRAY: ColorFormat;
    /// Number of distinct values (histogram bin count).
    const LEVELS: usize;
    /// Mid-gray value, rounded up.
    const MID: Self;

    fn to_u32(self) -> u32 {
        AsPrimitive::<u32>::as_(self)
    }

    fn to_f32(self) -> f32 {
        AsPrimitive::<f32>::as_(self)
    }

    fn max_u32() -> u32 {
        Self::max_value().to_u32()
    }

    fn from_u32_saturating(value: u32) -> Self;

    /// Rounds to nearest and saturates into range.
    fn from_f32(value: f32) -> Self;
}

macro_rules! impl_sample {
    ($t:ty, $gray:expr) => {
        impl Sample for $t {
            const GRAY: ColorFormat = $gray;
            const LEVELS: usize = <$t>::MAX as usize + 1;
            const MID: Self = <$t>::MAX / 2 + 1;

            #[inline]
            fn from_u32_saturating(value: u32) -> Self {
                value.min(<$t>::MAX as u32) as $t
            }

            #[inline]
            fn from_f32(value: f32) -> Self {
                value.round().clamp(0.0, <$t>::MAX as f32) as $t
            }
        }
    };
}

impl_sample!(u8, ColorFormat::L_U8);
impl_sample!(u16, ColorFormat::L_U16);
