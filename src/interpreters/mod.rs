//! Compound gesture interpreters for two-hand gestures.
//!
//! When both hands are engaged, the state machine hands the pair of
//! stabilized points to one of these interpreters each frame. Interpreters
//! keep a small amount of persistent state (a held key, a distance baseline)
//! that survives until both hands leave.

/// Steering-wheel interpreter mapping hand tilt to direction keys
pub mod wheel;

/// Pinch interpreter mapping inter-hand distance changes to scroll clicks
pub mod pinch;

use crate::error::Result;
use crate::input::InputSink;
use crate::stabilizer::StabilizedPoint;

/// Trait for all two-hand gesture interpreters
pub trait GestureInterpreter: Send {
    /// Interpret one frame's pair of stabilized points.
    ///
    /// By convention `left` and `right` are the left and right hand; the
    /// interpreter does not re-verify this.
    fn interpret(
        &mut self,
        left: &StabilizedPoint,
        right: &StabilizedPoint,
        sink: &mut dyn InputSink,
    ) -> Result<()>;

    /// Release any key the interpreter is holding down.
    ///
    /// Called when the gesture loses a hand; must be idempotent.
    fn release(&mut self, sink: &mut dyn InputSink) -> Result<()>;

    /// Forget persisted state (baselines). Called when both hands leave.
    fn reset(&mut self);

    /// Get interpreter name
    fn name(&self) -> &str;
}

/// Create a gesture interpreter by mode name
pub fn create_interpreter(mode: &str) -> Result<Box<dyn GestureInterpreter>> {
    match mode.to_lowercase().as_str() {
        "wheel" => Ok(Box::new(wheel::WheelInterpreter::default())),
        "pinch" => Ok(Box::new(pinch::PinchInterpreter::default())),
        _ => Err(crate::Error::Config(format!(
            "Unknown interpreter mode: {mode}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_interpreter() {
        assert!(create_interpreter("wheel").is_ok());
        assert!(create_interpreter("Pinch").is_ok());
        assert!(create_interpreter("swipe").is_err());
    }
}
