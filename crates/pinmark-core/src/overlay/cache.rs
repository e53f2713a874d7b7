// License: MIT

use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::geometry::Point;

/// Rasterized overlay plus the dirty flag every geometry or colour change
/// must raise. `raster` is `None` when the last render had nothing to draw.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderCache {
    raster: Option<(Point, Pixmap)>,
    dirty: bool,
}

impl RenderCache {
    pub(crate) fn new() -> Self {
        Self {
            raster: None,
            dirty: true,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn store(&mut self, raster: Option<(Point, Pixmap)>) {
        self.raster = raster;
        self.dirty = false;
    }

    pub(crate) fn blit(&self, target: &mut Pixmap) {
        if let Some((origin, pixmap)) = &self.raster {
            target.draw_pixmap(
                origin.x,
                origin.y,
                pixmap.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }
}
