use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::color_format::ColorFormat;

/// Errors produced while loading, processing or writing images.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Folder not found: '{}'", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Failed to load image '{}': {reason}", path.display())]
    ImageDecodeFailed { path: PathBuf, reason: String },

    #[error("Failed to write image '{}': {reason}", path.display())]
    ImageEncodeFailed { path: PathBuf, reason: String },

    #[error(
        "Output '{}' would be written for both '{}' and '{}'",
        path.display(),
        first.display(),
        second.display()
    )]
    OutputCollision {
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid {stage} parameter: {detail}")]
    InvalidParameter { stage: &'static str, detail: String },

    #[error("Channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: &'static str, actual: u8 },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(ColorFormat),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ::common::FileFormatError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image {index} ('{source_id}') failed: {error}")]
    BatchItemFailed {
        index: usize,
        source_id: String,
        #[source]
        error: Box<Error>,
    },
}

impl Error {
    pub(crate) fn invalid(stage: &'static str, detail: impl Into<String>) -> Self {
        Error::InvalidParameter {
            stage,
            detail: detail.into(),
        }
    }

    /// Returns the innermost error, unwrapping batch context.
    pub fn root(&self) -> &Error {
        match self {
            Error::BatchItemFailed { error, .. } => error.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_stage() {
        let err = Error::invalid("clahe", "clip limit must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid clahe parameter: clip limit must be positive, got 0"
        );
    }

    #[test]
    fn decode_failure_names_path() {
        let err = Error::ImageDecodeFailed {
            path: PathBuf::from("/data/broken.png"),
            reason: "truncated".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/broken.png"));
        assert!(msg.contains("truncated"));
    }

    #[test]
    fn output_collision_names_both_sources() {
        let err = Error::OutputCollision {
            path: PathBuf::from("out/scan.png"),
            first: PathBuf::from("in/scan.png"),
            second: PathBuf::from("in/scan.jpg"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/scan.png"));
        assert!(msg.contains("in/scan.png"));
        assert!(msg.contains("in/scan.jpg"));
    }

    #[test]
    fn batch_failure_carries_position_and_source() {
        use std::error::Error as StdError;

        let err = Error::BatchItemFailed {
            index: 3,
            source_id: "img_003.png".to_string(),
            error: Box::new(Error::ChannelMismatch {
                expected: "1, 3 or 4",
                actual: 2,
            }),
        };

        let msg = err.to_string();
        assert!(msg.contains("3"));
        assert!(msg.contains("img_003.png"));
        assert!(err.source().is_some());
        assert!(matches!(err.root(), Error::ChannelMismatch { actual: 2, .. }));
    }
}
