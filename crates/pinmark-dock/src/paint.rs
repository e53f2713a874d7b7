// License: MIT
//
// Composes one frame of the dock widget. Pure lookup into the layout
// table; no geometry is computed here.

use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::assets::DockAssets;
use crate::error::DockError;
use crate::layout::{Control, ControlSize, WIDGET_H, WIDGET_W};
use crate::machine::DockState;

pub const RETRACTED_OPACITY: f32 = 0.5;
pub const DEPLOYED_OPACITY: f32 = 1.0;

/// Alpha of the deployed background. Non-zero so the compositor keeps
/// delivering pointer motion over the whole rectangle.
pub const DEPLOYED_BACKGROUND_ALPHA: u8 = 1;

/// Display size of `control` given the current highlight.
pub fn size_for(control: Control, highlighted: Option<Control>) -> ControlSize {
    match highlighted {
        None => ControlSize::Medium,
        Some(h) if h == control => ControlSize::Large,
        Some(_) => ControlSize::Small,
    }
}

/// Fully transparent frame, also what a hidden dock shows.
pub fn blank() -> Result<Pixmap, DockError> {
    Pixmap::new(WIDGET_W as u32, WIDGET_H as u32).ok_or_else(|| {
        DockError::Core(pinmark_core::CoreError::PixmapAlloc {
            width: WIDGET_W as u32,
            height: WIDGET_H as u32,
        })
    })
}

pub fn paint(state: &DockState, assets: &DockAssets) -> Result<Pixmap, DockError> {
    let mut frame = blank()?;

    if !state.is_deployed() {
        let paint = PixmapPaint {
            opacity: RETRACTED_OPACITY,
            ..PixmapPaint::default()
        };
        frame.draw_pixmap(0, 0, assets.star_only.as_ref(), &paint, Transform::identity(), None);
        return Ok(frame);
    }

    frame.fill(Color::from_rgba8(0, 0, 0, DEPLOYED_BACKGROUND_ALPHA));

    let paint = PixmapPaint {
        opacity: DEPLOYED_OPACITY,
        ..PixmapPaint::default()
    };
    frame.draw_pixmap(0, 0, assets.star_rays.as_ref(), &paint, Transform::identity(), None);

    if !state.is_dragging() {
        for control in Control::ALL {
            let size = size_for(control, state.highlighted);
            let at = state.layout.offset(control, size);
            frame.draw_pixmap(
                at.x,
                at.y,
                assets.icon(control, size).as_ref(),
                &paint,
                Transform::identity(),
                None,
            );
        }
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{DockPosition, Edge, ScreenSize};
    use crate::machine::{DockEvent, Phase};
    use pinmark_core::Point;

    fn state() -> DockState {
        DockState::new(
            DockPosition { edge: Edge::Top, offset: 500 },
            ScreenSize::new(1000, 800),
        )
    }

    #[test]
    fn highlight_picks_sizes() {
        assert_eq!(size_for(Control::History, None), ControlSize::Medium);
        assert_eq!(size_for(Control::History, Some(Control::History)), ControlSize::Large);
        assert_eq!(size_for(Control::Capture, Some(Control::History)), ControlSize::Small);
    }

    #[test]
    fn retracted_frame_is_half_transparent_and_empty_at_corners() {
        let assets = DockAssets::load().unwrap();
        let frame = paint(&state(), &assets).unwrap();
        assert_eq!(frame.pixel(0, 0).unwrap().alpha(), 0);
        let centre = frame.pixel(75, 75).unwrap().alpha();
        assert!((126..=129).contains(&centre), "alpha {centre}");
    }

    #[test]
    fn deployed_frame_covers_the_whole_rect() {
        let assets = DockAssets::load().unwrap();
        let (s, _) = state().step(DockEvent::Enter);
        assert_eq!(s.phase, Phase::Deployed);
        let frame = paint(&s, &assets).unwrap();
        assert!(frame.pixel(0, 149).unwrap().alpha() >= DEPLOYED_BACKGROUND_ALPHA);

        // Medium history icon centre on a top dock.
        let icon = s.layout.offset(Control::History, ControlSize::Medium).offset(15, 15);
        assert_eq!(frame.pixel(icon.x as u32, icon.y as u32).unwrap().alpha(), 255);
    }

    #[test]
    fn dragging_hides_controls() {
        let assets = DockAssets::load().unwrap();
        let s = state();
        let (s, _) = s.step(DockEvent::Press(s.origin + Point::new(75, 75)));
        assert!(s.is_dragging());
        let frame = paint(&s, &assets).unwrap();

        let icon = s.layout.offset(Control::History, ControlSize::Medium).offset(15, 15);
        assert!(frame.pixel(icon.x as u32, icon.y as u32).unwrap().alpha() < 255);
    }
}
