pub mod file_format;
pub mod file_utils;
pub mod log_setup;

pub use file_format::{FileExtensionError, FileFormat, FileFormatError};
pub use file_utils::{IMAGE_EXTENSIONS, files_with_extensions, has_extension};
