pub mod background;
pub mod clahe;
pub mod denoise;
pub mod grayscale;
pub mod letterbox;

pub use background::BackgroundSubtraction;
pub use clahe::Clahe;
pub use denoise::{Denoise, DenoiseMethod};
pub use grayscale::Grayscale;
pub use letterbox::{Letterbox, LetterboxLayout, PadValue};

use crate::common::{ChannelCount, ChannelSize, ChannelType, Error, Result, Sample};
use crate::image::{Image, Plane};

/// A stage that works on one intensity plane, generic over the sample type.
pub(crate) trait PlaneOp {
    fn run<T: Sample>(&self, plane: &Plane<T>) -> Result<Plane<T>>;
}

/// Dispatches `op` on the sample type carried by a single-channel image.
pub(crate) fn apply_plane_op<O: PlaneOp>(op: &O, input: &Image) -> Result<Image> {
    let format = input.desc().color_format;

    if format.channel_count != ChannelCount::L {
        return Err(Error::ChannelMismatch {
            expected: "1",
            actual: format.channel_count.channel_count(),
        });
    }

    match (format.channel_size, format.channel_type) {
        (ChannelSize::_8bit, ChannelType::UInt) => {
            Ok(Image::from_plane(op.run(&input.to_plane::<u8>())?))
        }
        (ChannelSize::_16bit, ChannelType::UInt) => {
            Ok(Image::from_plane(op.run(&input.to_plane::<u16>())?))
        }
        _ => Err(Error::UnsupportedFormat(format)),
    }
}

/// Kernel sizes must be odd and at least 1.
pub(crate) fn validate_kernel_size(stage: &'static str, kernel_size: u32) -> Result<()> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(Error::invalid(
            stage,
            format!("kernel size must be odd and >= 1, got {}", kernel_size),
        ));
    }
    Ok(())
}
