use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a render from producing its output file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse generated SVG: {0}")]
    Svg(String),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no usable font face found for `{family}`")]
    MissingFont { family: String },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
