use std::path::PathBuf;
use thiserror::Error;

/// Reasons an image could not be turned into a [`RasterImage`](crate::RasterImage)
///
/// A failed load never produces a partially populated image: the caller
/// either gets a fully prepared image or one of these.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened or was shorter than its header claims
    #[error("cannot read image '{}': {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header describes a pixel layout this crate does not implement
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The compressed-image decoder reported corruption or an internal failure
    #[error("failed to decode image: {0}")]
    DecodeError(String),
}

impl LoadError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::UnreadableFile {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
