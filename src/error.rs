use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the widget, its assets and the host binaries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid widget size {width}x{height}: both dimensions must be > 0")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config value for '{key}': {reason}")]
    ConfigValue { key: &'static str, reason: String },

    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cube texture face '{path}' is {width}x{height}, expected a square matching the first face")]
    CubeFaceSize {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("renderer has been disposed")]
    RendererDisposed,

    #[error("window error: {0}")]
    Gui(String),

    #[error("failed to write snapshot '{path}': {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
