// License: MIT

pub mod assets;
pub mod click;
pub mod context;
pub mod dock;
pub mod edge;
pub mod error;
pub mod layout;
pub mod machine;
pub mod paint;
pub mod placement;

pub use assets::DockAssets;
pub use context::{AppContext, TargetListListener, View, ViewAnchor, ViewFactory, ViewKind};
pub use dock::Dock;
pub use edge::{DockPosition, Edge, ScreenSize};
pub use error::{DockError, EXIT_RESOURCE_LOAD};
pub use layout::{Control, ControlSize, LayoutTable};
pub use machine::{DockEvent, DockState, Effect, Phase};
