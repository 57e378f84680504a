use std::io;
use std::path::PathBuf;

use glam::UVec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("viewport must be at least 1x1, got {}x{}", size.x, size.y)]
    InvalidViewport { size: UVec2 },

    #[error("couldn't allocate texture `{label}` ({}x{})", size.x, size.y)]
    OutOfMemory { label: &'static str, size: UVec2 },

    #[error("couldn't access settings at `{}`", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse settings at `{}`", path.display())]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("couldn't export image")]
    Image(#[from] image::ImageError),
}
