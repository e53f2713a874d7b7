// License: MIT

pub mod run;
mod app;
mod margin;
mod pixels;
mod render;
mod shm;

pub use app::FALLBACK_SCREEN;
pub use run::run_dock;
