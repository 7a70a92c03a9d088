//! Prepro - Image preprocessing for vision model input.
//!
//! Every image goes through the same fixed stage order:
//! - Grayscale conversion (BT.601 luma)
//! - Denoising (Gaussian or median)
//! - Optional background subtraction
//! - Contrast-limited adaptive histogram equalization
//! - Aspect-preserving resize onto a padded canvas
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use prepro::{PipelineConfig, load_folder, process_batch};
//!
//! let batch = load_folder("data/testdata")?;
//! let images: Vec<_> = batch.images().cloned().collect();
//! let config = PipelineConfig::default().with_target_size(512, 512);
//! let processed = process_batch(&images, &config)?;
//! ```

pub(crate) mod common;
pub mod image;
pub mod ops;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude;

// ============================================================================
// Core types
// ============================================================================

pub use crate::common::{ChannelCount, ChannelSize, ChannelType, ColorFormat, Error, Result};
pub use crate::image::{Image, ImageDesc, Plane};

// ============================================================================
// Stages
// ============================================================================

pub use crate::ops::{
    BackgroundSubtraction, Clahe, Denoise, DenoiseMethod, Grayscale, Letterbox, LetterboxLayout,
    PadValue,
};

// ============================================================================
// Pipeline
// ============================================================================

pub use crate::pipeline::{
    Batch, BatchItem, Pipeline, PipelineConfig, load_folder, output_path, process, process_batch,
    save_batch,
};
