// License: MIT

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::DockError;
use crate::layout::{Control, ControlSize, WIDGET_H, WIDGET_W};

// Embedded relative to this module file (src/)
const STAR_ONLY_SVG: &[u8] = include_bytes!("assets/star-only.svg");
const STAR_RAYS_SVG: &[u8] = include_bytes!("assets/star-rays.svg");
const CAPTURE_SVG: &[u8] = include_bytes!("assets/capture.svg");
const HISTORY_SVG: &[u8] = include_bytes!("assets/history.svg");
const MORE_SVG: &[u8] = include_bytes!("assets/more.svg");

/// Every image the dock paints, rasterised once at start-up.
pub struct DockAssets {
    pub star_only: Pixmap,
    pub star_rays: Pixmap,
    /// `[control][size]`
    icons: [[Pixmap; 3]; 3],
}

impl DockAssets {
    pub fn load() -> Result<Self, DockError> {
        let widget = (WIDGET_W as u32, WIDGET_H as u32);
        let star_only = rasterize("star-only", STAR_ONLY_SVG, widget)?;
        let star_rays = rasterize("star-rays", STAR_RAYS_SVG, widget)?;

        let icons = [
            icon_set("capture", CAPTURE_SVG)?,
            icon_set("history", HISTORY_SVG)?,
            icon_set("more", MORE_SVG)?,
        ];

        Ok(Self { star_only, star_rays, icons })
    }

    pub fn icon(&self, control: Control, size: ControlSize) -> &Pixmap {
        &self.icons[control.index()][size.index()]
    }
}

fn icon_set(name: &'static str, svg: &[u8]) -> Result<[Pixmap; 3], DockError> {
    let at = |size: ControlSize| {
        let px = size.pixels() as u32;
        rasterize(name, svg, (px, px))
    };
    Ok([at(ControlSize::Large)?, at(ControlSize::Medium)?, at(ControlSize::Small)?])
}

fn rasterize(name: &'static str, svg: &[u8], (w, h): (u32, u32)) -> Result<Pixmap, DockError> {
    let fail = |reason: String| DockError::ResourceLoad { name, reason };

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg, &opt).map_err(|e| fail(format!("usvg parse: {e:?}")))?;

    let mut pixmap = Pixmap::new(w, h).ok_or_else(|| fail("tiny-skia pixmap alloc failed".into()))?;

    // Scale SVG -> w x h
    let size = tree.size();
    let transform = Transform::from_scale(w as f32 / size.width(), h as f32 / size.height());
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_assets_load_at_every_size() {
        let assets = DockAssets::load().unwrap();
        assert_eq!(assets.star_only.width(), 150);
        assert_eq!(assets.star_rays.height(), 150);
        for control in Control::ALL {
            for size in ControlSize::ALL {
                let icon = assets.icon(control, size);
                assert_eq!(icon.width() as i32, size.pixels());
                assert_eq!(icon.height() as i32, size.pixels());
            }
        }
    }

    #[test]
    fn icons_are_not_blank() {
        let assets = DockAssets::load().unwrap();
        let centre = assets.icon(Control::History, ControlSize::Large).pixel(20, 20).unwrap();
        assert!(centre.alpha() > 0);
        let star = assets.star_only.pixel(75, 75).unwrap();
        assert_eq!(star.alpha(), 255);
    }

    #[test]
    fn broken_svg_is_a_resource_error() {
        let err = rasterize("broken", b"<svg", (10, 10)).unwrap_err();
        assert!(matches!(err, DockError::ResourceLoad { name: "broken", .. }));
    }
}
