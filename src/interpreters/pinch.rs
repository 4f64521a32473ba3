//! Pinch gesture: spreading or closing both hands scrolls (zooms) the
//! focused window.

use super::GestureInterpreter;
use crate::constants::{
    BUTTON_SCROLL_DOWN, BUTTON_SCROLL_UP, DEFAULT_PINCH_ACTIVATE_DISTANCE, XK_CONTROL_L,
};
use crate::error::Result;
use crate::input::{InputSink, Keysym};
use crate::stabilizer::StabilizedPoint;
use log::debug;

/// Two-hand pinch interpreter
pub struct PinchInterpreter {
    activate_distance: i32,
    modifier_key: Keysym,
    baseline: Option<i32>,
}

impl PinchInterpreter {
    /// Create a pinch interpreter with the given activation distance and
    /// scroll modifier key
    #[must_use]
    pub fn new(activate_distance: i32, modifier_key: Keysym) -> Self {
        Self {
            activate_distance,
            modifier_key,
            baseline: None,
        }
    }
}

impl Default for PinchInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_ACTIVATE_DISTANCE, XK_CONTROL_L)
    }
}

impl GestureInterpreter for PinchInterpreter {
    fn interpret(
        &mut self,
        left: &StabilizedPoint,
        right: &StabilizedPoint,
        sink: &mut dyn InputSink,
    ) -> Result<()> {
        let distance = left.distance_to(right);

        let Some(baseline) = self.baseline else {
            // First invocation since reset only establishes the baseline
            self.baseline = Some(distance);
            return Ok(());
        };

        if (baseline - distance).abs() > self.activate_distance {
            sink.key_down(self.modifier_key)?;
            if baseline < distance {
                debug!("pinch: scroll up");
                sink.click(BUTTON_SCROLL_UP)?;
            } else {
                debug!("pinch: scroll down");
                sink.click(BUTTON_SCROLL_DOWN)?;
            }
            sink.key_up(self.modifier_key)?;
            // Edge-triggered: the reference point moves to the new distance
            self.baseline = Some(distance);
        }

        Ok(())
    }

    fn release(&mut self, _sink: &mut dyn InputSink) -> Result<()> {
        // The modifier is only held inside a single interpret call
        Ok(())
    }

    fn reset(&mut self) {
        self.baseline = None;
    }

    fn name(&self) -> &str {
        "PinchInterpreter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, RecordingSink};

    fn point(x: i32, y: i32) -> StabilizedPoint {
        StabilizedPoint { x, y, z: 800 }
    }

    #[test]
    fn test_first_call_only_records_baseline() {
        let mut pinch = PinchInterpreter::default();
        let mut sink = RecordingSink::new();

        pinch.interpret(&point(0, 0), &point(100, 0), &mut sink).unwrap();
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_spread_scrolls_up_once() {
        let mut pinch = PinchInterpreter::default();
        let mut sink = RecordingSink::new();

        pinch.interpret(&point(0, 0), &point(100, 0), &mut sink).unwrap();
        pinch.interpret(&point(0, 0), &point(176, 0), &mut sink).unwrap();

        assert_eq!(
            sink.events,
            vec![
                InputEvent::KeyDown(XK_CONTROL_L),
                InputEvent::Click(BUTTON_SCROLL_UP),
                InputEvent::KeyUp(XK_CONTROL_L),
            ]
        );

        // Same distance again: delta is now zero, nothing fires
        sink.clear();
        pinch.interpret(&point(0, 0), &point(176, 0), &mut sink).unwrap();
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_close_scrolls_down() {
        let mut pinch = PinchInterpreter::default();
        let mut sink = RecordingSink::new();

        pinch.interpret(&point(0, 0), &point(300, 0), &mut sink).unwrap();
        pinch.interpret(&point(0, 0), &point(100, 0), &mut sink).unwrap();

        assert_eq!(sink.count(|e| *e == InputEvent::Click(BUTTON_SCROLL_DOWN)), 1);
    }

    #[test]
    fn test_delta_at_threshold_does_not_fire() {
        let mut pinch = PinchInterpreter::default();
        let mut sink = RecordingSink::new();

        pinch.interpret(&point(0, 0), &point(100, 0), &mut sink).unwrap();
        pinch.interpret(&point(0, 0), &point(175, 0), &mut sink).unwrap();
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_reset_forgets_baseline() {
        let mut pinch = PinchInterpreter::default();
        let mut sink = RecordingSink::new();

        pinch.interpret(&point(0, 0), &point(100, 0), &mut sink).unwrap();
        pinch.reset();

        // After reset the next call re-baselines instead of firing
        pinch.interpret(&point(0, 0), &point(300, 0), &mut sink).unwrap();
        assert!(sink.events.is_empty());
    }
}
