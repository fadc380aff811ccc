use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to decode image {path}: {source}")]
    AssetDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] std::io::Error),
}
