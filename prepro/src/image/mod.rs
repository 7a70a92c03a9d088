mod io;
mod plane;


use std::mem::size_of;
use std::path::Path;

pub use plane::Plane;

use crate::common::{ColorFormat, Error, Result, Sample};

/// Supported image file extensions for reading.
pub const SUPPORTED_EXTENSIONS: &[&str] = ::common::IMAGE_EXTENSIONS;

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
    pub color_format: ColorFormat,
}

/// Owned, tightly packed pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    desc: ImageDesc,
    bytes: Vec<u8>,
}

impl Image {
    /// Returns the image descriptor.
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    /// Returns the image bytes as a slice.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn new_with_data(desc: ImageDesc, bytes: Vec<u8>) -> Result<Image> {
        desc.validate()?;

        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::invalid(
                "image",
                format!(
                    "bytes length {} does not match expected size {} for {}",
                    bytes.len(),
                    desc.size_in_bytes(),
                    desc
                ),
            ));
        }

        Ok(Image { desc, bytes })
    }

    /// Builds an image from typed samples (interleaved when multi-channel).
    pub fn from_samples<T: bytemuck::Pod>(desc: ImageDesc, samples: &[T]) -> Result<Image> {
        Image::new_with_data(desc, bytemuck::cast_slice(samples).to_vec())
    }

    /// Copies the samples out as `T`.
    ///
    /// # Panics
    /// Panics if `T` does not match the channel size.
    pub fn samples<T: bytemuck::Pod>(&self) -> Vec<T> {
        assert_eq!(
            self.desc.color_format.channel_size.byte_count() as usize,
            size_of::<T>(),
            "sample type does not match {}",
            self.desc.color_format
        );
        bytemuck::pod_collect_to_vec(&self.bytes)
    }

    pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Image> {
        io::load_png_jpeg(filename.as_ref())
    }

    pub fn save_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let filename = filename.as_ref();
        let extension = filename
            .extension()
            .and_then(|os_str| os_str.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => io::save_png(self, filename),
            "jpeg" | "jpg" => io::save_jpg(self, filename),

            _ => Err(Error::ImageEncodeFailed {
                path: filename.to_path_buf(),
                reason: format!("unsupported extension '{}'", extension),
            }),
        }
    }

    /// Single-channel view of a gray image.
    pub(crate) fn to_plane<T: Sample>(&self) -> Plane<T> {
        debug_assert_eq!(self.desc.color_format, T::GRAY);
        Plane::new(
            self.desc.width as usize,
            self.desc.height as usize,
            self.samples(),
        )
    }

    pub(crate) fn from_plane<T: Sample>(plane: Plane<T>) -> Image {
        let desc = ImageDesc::new(plane.width() as u32, plane.height() as u32, T::GRAY);
        let bytes = bytemuck::cast_slice(plane.pixels()).to_vec();
        Image { desc, bytes }
    }
}

impl ImageDesc {
    pub fn new(width: u32, height: u32, color_format: ColorFormat) -> Self {
        Self {
            width,
            height,
            color_format,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.height as usize * self.row_bytes()
    }

    /// Returns the number of bytes per row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.color_format.byte_count() as usize
    }

    /// Rejects zero-area images.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(
                "image",
                format!("zero-area image {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for ImageDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.color_format)
    }
}
