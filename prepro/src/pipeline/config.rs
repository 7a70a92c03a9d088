use std::path::Path;

use ::common::file_format::{self, FileFormat};
use ::common::FileFormatError;
use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::ops::{
    clahe::{DEFAULT_CLIP_LIMIT, DEFAULT_GRID},
    letterbox::DEFAULT_TARGET_SIZE,
    Clahe, Denoise, DenoiseMethod, Letterbox, PadValue,
};

/// Parameters for one pipeline run.
///
/// Built once per batch and shared read-only by every worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub denoise_method: DenoiseMethod,
    pub do_bg_subtract: bool,
    pub clahe_clip: f32,
    /// Tile grid as (columns, rows).
    pub clahe_grid: (u32, u32),
    /// Output canvas as (width, height).
    pub target_size: (u32, u32),
    pub pad_value: PadValue,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            denoise_method: DenoiseMethod::default(),
            do_bg_subtract: false,
            clahe_clip: DEFAULT_CLIP_LIMIT,
            clahe_grid: DEFAULT_GRID,
            target_size: DEFAULT_TARGET_SIZE,
            pad_value: PadValue::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads a YAML or JSON config, picking the format from the extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path).map_err(FileFormatError::from)?;
        let text = std::fs::read_to_string(path)?;

        let config: PipelineConfig = file_format::deserialize(&text, format)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.denoise().validate()?;
        self.clahe().validate()?;
        self.letterbox().validate()?;
        Ok(())
    }

    pub fn with_denoise(mut self, method: DenoiseMethod) -> Self {
        self.denoise_method = method;
        self
    }

    pub fn with_background_subtraction(mut self, enabled: bool) -> Self {
        self.do_bg_subtract = enabled;
        self
    }

    pub fn with_clahe(mut self, clip_limit: f32, grid: (u32, u32)) -> Self {
        self.clahe_clip = clip_limit;
        self.clahe_grid = grid;
        self
    }

    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = (width, height);
        self
    }

    pub fn with_pad_value(mut self, pad_value: PadValue) -> Self {
        self.pad_value = pad_value;
        self
    }

    pub(crate) fn denoise(&self) -> Denoise {
        Denoise::new(self.denoise_method)
    }

    pub(crate) fn clahe(&self) -> Clahe {
        Clahe::new(self.clahe_clip, self.clahe_grid)
    }

    pub(crate) fn letterbox(&self) -> Letterbox {
        Letterbox::new(self.target_size.0, self.target_size.1).pad_value(self.pad_value)
    }
}
