//! Convenient re-exports of the commonly used types.
//!
//! ```rust,ignore
//! use prepro::prelude::*;
//! ```

pub use crate::common::{ChannelCount, ChannelSize, ChannelType, ColorFormat, Error, Result};
pub use crate::image::{Image, ImageDesc, Plane};
pub use crate::ops::{
    BackgroundSubtraction, Clahe, Denoise, DenoiseMethod, Grayscale, Letterbox, LetterboxLayout,
    PadValue,
};
pub use crate::pipeline::{Batch, BatchItem, Pipeline, PipelineConfig};
