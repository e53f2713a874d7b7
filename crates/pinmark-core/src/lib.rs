// License: MIT

pub mod colour;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod palette;
pub mod prefs;
pub mod surface;
pub mod tool;

pub use colour::Colour;
pub use error::CoreError;
pub use geometry::{Point, Rect};
pub use overlay::{Overlay, OverlayKind};
pub use prefs::{JsonPrefs, MemoryPrefs, PrefStore};
pub use surface::EditingSurface;
pub use tool::{Tool, ToolBox, ToolContext};
