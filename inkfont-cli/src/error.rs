use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest '{path}': {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not decode image '{path}': {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid timestamp {0}")]
    Timestamp(i64),

    #[error(transparent)]
    Build(#[from] inkfont::BuildError),

    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
