// License: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pixmap allocation failed ({width}x{height})")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("png error: {0}")]
    Png(String),

    #[error("invalid colour \"{input}\": {reason}")]
    InvalidColour { input: String, reason: &'static str },
}
