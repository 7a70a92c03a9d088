//! Fixed-order preprocessing pipeline and batch execution.
//!
//! Stage order: grayscale, denoise, optional background subtraction, CLAHE,
//! letterbox.

mod batch;
mod config;


pub use batch::{Batch, BatchItem, load_folder, output_path, save_batch};
pub use config::PipelineConfig;

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::image::Image;
use crate::ops::{BackgroundSubtraction, Clahe, Denoise, Grayscale, Letterbox};

/// Validated, immutable stage list.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    grayscale: Grayscale,
    denoise: Denoise,
    background: Option<BackgroundSubtraction>,
    clahe: Clahe,
    letterbox: Letterbox,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grayscale: Grayscale::new(),
            denoise: config.denoise(),
            background: config
                .do_bg_subtract
                .then(BackgroundSubtraction::default),
            clahe: config.clahe(),
            letterbox: config.letterbox(),
        })
    }

    pub fn background(&self) -> Option<&BackgroundSubtraction> {
        self.background.as_ref()
    }

    pub fn process(&self, image: &Image) -> Result<Image> {
        let gray = self.grayscale.apply(image)?;
        let mut current = self.denoise.apply(&gray)?;
        if let Some(background) = &self.background {
            current = background.apply(&current)?;
        }
        let equalized = self.clahe.apply(&current)?;
        let output = self.letterbox.apply(&equalized)?;

        debug!(input = %image.desc(), output = %output.desc(), "processed image");

        Ok(output)
    }

    /// Processes images in parallel; output order matches input order.
    ///
    /// Failures are reported for the lowest failing index, identified by its
    /// position.
    pub fn process_images(&self, images: &[Image]) -> Result<Vec<Image>> {
        let images: Vec<&Image> = images.iter().collect();
        self.run_all(&images, |index| format!("#{}", index))
    }

    /// Processes every item of `batch`, keeping the source paths.
    pub fn process_batch(&self, batch: &Batch) -> Result<Batch> {
        let images: Vec<&Image> = batch.images().collect();
        let outputs = self.run_all(&images, |index| batch.items[index].source_id())?;

        let items = batch
            .iter()
            .zip(outputs)
            .map(|(item, image)| BatchItem::new(item.source.clone(), image))
            .collect();

        Ok(Batch::new(items))
    }

    fn run_all<F>(&self, images: &[&Image], source_id: F) -> Result<Vec<Image>>
    where
        F: Fn(usize) -> String,
    {
        let start = Instant::now();

        let results: Vec<Result<Image>> = images
            .par_iter()
            .map(|image| self.process(image))
            .collect();

        let outputs = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                result.map_err(|error| Error::BatchItemFailed {
                    index,
                    source_id: source_id(index),
                    error: Box::new(error),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            count = outputs.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "processed batch"
        );

        Ok(outputs)
    }
}

/// Runs the full pipeline on one image.
pub fn process(image: &Image, config: &PipelineConfig) -> Result<Image> {
    Pipeline::new(config)?.process(image)
}

/// Runs the full pipeline on every image, preserving order.
pub fn process_batch(images: &[Image], config: &PipelineConfig) -> Result<Vec<Image>> {
    Pipeline::new(config)?.process_images(images)
}
