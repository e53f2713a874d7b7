// License: MIT
//
// Turns press/release pairs into clicks, tolerating a little pointer jitter.

use pinmark_core::Point;

/// Max distance in either axis between press and release for a click.
pub const CLICK_SLOP: i32 = 5;

#[derive(Debug, Default)]
pub struct ClickFilter {
    pressed_at: Option<Point>,
    suppressed: bool,
}

impl ClickFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, at: Point) {
        self.pressed_at = Some(at);
        self.suppressed = false;
    }

    /// The press turned into something else (a drag); no click for it.
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    /// Returns the click position if this release completes one.
    pub fn release(&mut self, at: Point) -> Option<Point> {
        let pressed = self.pressed_at.take()?;
        if std::mem::take(&mut self.suppressed) {
            return None;
        }
        let d = at - pressed;
        (d.x.abs() <= CLICK_SLOP && d.y.abs() <= CLICK_SLOP).then_some(pressed)
    }

    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.suppressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_within_slop_still_clicks() {
        let mut f = ClickFilter::new();
        f.press(Point::new(10, 10));
        assert_eq!(f.release(Point::new(14, 7)), Some(Point::new(10, 10)));
    }

    #[test]
    fn movement_beyond_slop_is_not_a_click() {
        let mut f = ClickFilter::new();
        f.press(Point::new(10, 10));
        assert_eq!(f.release(Point::new(16, 10)), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut f = ClickFilter::new();
        assert_eq!(f.release(Point::new(0, 0)), None);
    }

    #[test]
    fn suppressed_press_yields_nothing_once() {
        let mut f = ClickFilter::new();
        f.press(Point::new(0, 0));
        f.suppress();
        assert_eq!(f.release(Point::new(0, 0)), None);

        f.press(Point::new(0, 0));
        assert_eq!(f.release(Point::new(1, 1)), Some(Point::new(0, 0)));
    }
}
