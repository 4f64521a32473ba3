//! Steering-wheel gesture: two hands held like a wheel steer with direction
//! keys while a constant accelerate key is held.

use super::GestureInterpreter;
use crate::constants::{DEFAULT_WHEEL_TURN_ACTIVATE_DISTANCE, XK_LEFT, XK_RIGHT, XK_UP};
use crate::error::Result;
use crate::input::{InputSink, Keysym};
use crate::stabilizer::StabilizedPoint;
use log::debug;

/// Two-hand steering-wheel interpreter
pub struct WheelInterpreter {
    turn_activate_distance: i32,
    turn_left_key: Keysym,
    turn_right_key: Keysym,
    accelerate_key: Keysym,
    held_turn_key: Option<Keysym>,
    accelerating: bool,
}

impl WheelInterpreter {
    /// Create a wheel interpreter with the given key bindings
    #[must_use]
    pub fn new(
        turn_activate_distance: i32,
        turn_left_key: Keysym,
        turn_right_key: Keysym,
        accelerate_key: Keysym,
    ) -> Self {
        Self {
            turn_activate_distance: turn_activate_distance.max(1),
            turn_left_key,
            turn_right_key,
            accelerate_key,
            held_turn_key: None,
            accelerating: false,
        }
    }
}

impl Default for WheelInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_TURN_ACTIVATE_DISTANCE, XK_LEFT, XK_RIGHT, XK_UP)
    }
}

impl GestureInterpreter for WheelInterpreter {
    fn interpret(
        &mut self,
        left: &StabilizedPoint,
        right: &StabilizedPoint,
        sink: &mut dyn InputSink,
    ) -> Result<()> {
        // The higher hand steers toward the opposite side, like tilting a
        // physical wheel.
        let key = if left.y < right.y {
            debug!("wheel: turn right");
            self.turn_right_key
        } else {
            debug!("wheel: turn left");
            self.turn_left_key
        };

        // Never hold both direction keys at once
        if let Some(held) = self.held_turn_key {
            if held != key {
                sink.key_up(held)?;
                self.held_turn_key = None;
            }
        }

        let dy = (left.y - right.y).abs();
        if dy / self.turn_activate_distance != 0 {
            sink.key_down(key)?;
            self.held_turn_key = Some(key);
        } else {
            // Tilt below one activation unit: keep the gesture engaged but
            // steer straight.
            sink.key_up(key)?;
            self.held_turn_key = None;
        }

        sink.key_down(self.accelerate_key)?;
        self.accelerating = true;
        Ok(())
    }

    fn release(&mut self, sink: &mut dyn InputSink) -> Result<()> {
        if let Some(held) = self.held_turn_key.take() {
            sink.key_up(held)?;
        }
        if self.accelerating {
            sink.key_up(self.accelerate_key)?;
            self.accelerating = false;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.held_turn_key = None;
        self.accelerating = false;
    }

    fn name(&self) -> &str {
        "WheelInterpreter"
    }
}
