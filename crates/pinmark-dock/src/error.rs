// License: MIT

use thiserror::Error;

/// Process exit status when a bundled image cannot be decoded.
pub const EXIT_RESOURCE_LOAD: i32 = 3;

#[derive(Debug, Error)]
pub enum DockError {
    #[error("failed to load image resource {name}: {reason}")]
    ResourceLoad { name: &'static str, reason: String },

    #[error("view {view}: {reason}")]
    View { view: &'static str, reason: String },

    #[error(transparent)]
    Core(#[from] pinmark_core::CoreError),
}
