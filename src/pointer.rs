//! Sensor-to-display coordinate mapping with cursor motion smoothing.
//!
//! Hand positions arrive in 640x480 sensor space. The mapper scales them to
//! display coordinates (mirrored on X, so moving the hand right moves the
//! cursor right) and low-pass filters the cursor: each frame the cursor
//! covers only a fraction of the remaining distance to its target instead of
//! jumping there.

use crate::constants::{SENSOR_HEIGHT, SENSOR_WIDTH};

/// Maps stabilized hand positions to absolute display coordinates
#[derive(Debug, Clone)]
pub struct PointerMapper {
    screen_width: i32,
    screen_height: i32,
    scale: f64,
    smoothing_divisor: i32,
    pos_x: i32,
    pos_y: i32,
}

impl PointerMapper {
    /// Create a mapper for the given display, with the cursor seeded at the
    /// display center
    #[must_use]
    pub fn new(screen_width: u16, screen_height: u16, scale: f64, smoothing_divisor: i32) -> Self {
        let screen_width = i32::from(screen_width);
        let screen_height = i32::from(screen_height);
        Self {
            screen_width,
            screen_height,
            scale,
            smoothing_divisor: smoothing_divisor.max(1),
            pos_x: screen_width / 2,
            pos_y: screen_height / 2,
        }
    }

    /// Advance the cursor one smoothing step toward the display position of
    /// a sensor-space point, returning the new cursor position
    pub fn step(&mut self, x: i32, y: i32) -> (i32, i32) {
        let (target_x, target_y) = self.target(x, y);

        let divisor = f64::from(self.smoothing_divisor);
        self.pos_x += ((target_x - f64::from(self.pos_x)) / divisor).round() as i32;
        self.pos_y += ((target_y - f64::from(self.pos_y)) / divisor).round() as i32;

        (self.pos_x, self.pos_y)
    }

    /// Display-space target for a sensor-space point, before smoothing
    fn target(&self, x: i32, y: i32) -> (f64, f64) {
        let rel_x = f64::from(self.screen_width)
            - f64::from(x) * f64::from(self.screen_width) / SENSOR_WIDTH as f64 * self.scale;
        let rel_y = f64::from(y) * f64::from(self.screen_height) / SENSOR_HEIGHT as f64 * self.scale;
        (rel_x, rel_y)
    }

    /// Current smoothed cursor position
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.pos_x, self.pos_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SCREEN_SCALE, DEFAULT_SMOOTHING_DIVISOR};

    fn mapper() -> PointerMapper {
        PointerMapper::new(1920, 1080, DEFAULT_SCREEN_SCALE, DEFAULT_SMOOTHING_DIVISOR)
    }

    #[test]
    fn test_starts_at_center() {
        assert_eq!(mapper().position(), (960, 540));
    }

    #[test]
    fn test_step_moves_fraction_of_residual() {
        let mut m = mapper();
        let (x0, y0) = m.position();
        let (x1, y1) = m.step(0, 0);

        // Sensor origin maps near the top-right of a mirrored display;
        // one step covers an eighth of the distance there.
        let (target_x, target_y) = (1920.0, 0.0);
        let expected_x = x0 + (((target_x - f64::from(x0)) / 8.0).round() as i32);
        let expected_y = y0 + (((target_y - f64::from(y0)) / 8.0).round() as i32);
        assert_eq!((x1, y1), (expected_x, expected_y));
    }

    #[test]
    fn test_converges_to_target() {
        let mut m = mapper();
        for _ in 0..200 {
            m.step(320, 240);
        }
        // Sensor center maps to (1920 - 960*1.1, 540*1.1) = (864, 594).
        // round(residual/8) is 0 once the residual drops to 3 pixels, so
        // the cursor settles within that dead zone of the target.
        let (x, y) = m.position();
        assert!((x - 864).abs() <= 3, "x converged to {x}");
        assert!((y - 594).abs() <= 3, "y converged to {y}");
    }

    #[test]
    fn test_settled_cursor_stops_stepping() {
        let mut m = mapper();
        for _ in 0..200 {
            m.step(320, 240);
        }
        let settled = m.position();
        assert_eq!(m.step(320, 240), settled);
    }

    #[test]
    fn test_x_axis_mirrored() {
        let mut left = mapper();
        let mut right = mapper();
        for _ in 0..100 {
            left.step(100, 240);
            right.step(540, 240);
        }
        // A hand on the sensor's left lands on the display's right
        assert!(left.position().0 > right.position().0);
    }
}
