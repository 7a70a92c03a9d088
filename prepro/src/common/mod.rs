pub(crate) mod border;
pub(crate) mod color_format;
pub(crate) mod error;
pub(crate) mod sample;

pub use color_format::{ChannelCount, ChannelSize, ChannelType, ColorFormat};
pub use error::{Error, Result};
pub(crate) use sample::Sample;
