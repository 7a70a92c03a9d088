pub(crate) mod gaussian;
pub(crate) mod median;


use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;

use super::{PlaneOp, apply_plane_op, validate_kernel_size};
use crate::common::{Error, Result, Sample};
use crate::image::{Image, Plane};

pub const DEFAULT_KERNEL_SIZE: u32 = 5;

/// Smoothing filter used by the denoise stage.
#[derive(
    Debug,
    Display,
    EnumIter,
    ValueEnum,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DenoiseMethod {
    /// Separable Gaussian blur, sigma derived from the kernel size.
    #[default]
    Gaussian,
    /// Square median filter.
    Median,
}

impl FromStr for DenoiseMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::iter()
            .find(|method| method.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<String> = Self::iter().map(|m| m.to_string()).collect();
                Error::invalid(
                    "denoise",
                    format!("unknown method '{}', expected one of {}", s, known.join(", ")),
                )
            })
    }
}

/// Intensity smoothing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denoise {
    pub method: DenoiseMethod,
    /// Odd kernel edge length in pixels.
    pub kernel_size: u32,
}

impl Default for Denoise {
    fn default() -> Self {
        Self::new(DenoiseMethod::default())
    }
}

impl Denoise {
    pub fn new(method: DenoiseMethod) -> Self {
        Self {
            method,
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }

    /// Builder method to set the kernel size.
    pub fn kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_kernel_size("denoise", self.kernel_size)
    }

    pub fn apply(&self, input: &Image) -> Result<Image> {
        self.validate()?;
        debug!(method = %self.method, kernel_size = self.kernel_size, "denoise");
        apply_plane_op(self, input)
    }
}

impl PlaneOp for Denoise {
    fn run<T: Sample>(&self, plane: &Plane<T>) -> Result<Plane<T>> {
        let kernel_size = self.kernel_size as usize;
        Ok(match self.method {
            DenoiseMethod::Gaussian => gaussian::gaussian_blur(plane, kernel_size),
            DenoiseMethod::Median => median::median_filter(plane, kernel_size),
        })
    }
}
