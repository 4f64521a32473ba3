//! Configuration management for the gesture control application

use crate::constants::{
    DEFAULT_DIMENSION_FACTOR, DEFAULT_GESTURE_THRESHOLD, DEFAULT_GESTURE_TIMEOUT_MS,
    DEFAULT_PINCH_ACTIVATE_DISTANCE, DEFAULT_SCREEN_SCALE, DEFAULT_SMOOTHING_DIVISOR,
    DEFAULT_THRESHOLD_BEGIN, DEFAULT_THRESHOLD_END, DEFAULT_WHEEL_TURN_ACTIVATE_DISTANCE,
    MAX_THRESHOLD_END, MIN_THRESHOLD_SPAN, XK_CONTROL_L, XK_LEFT, XK_RIGHT, XK_UP,
};
use crate::input::Keysym;
use crate::interpreters::{pinch::PinchInterpreter, wheel::WheelInterpreter, GestureInterpreter};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture state machine configuration
    pub gesture: GestureConfig,

    /// Frame preprocessing configuration
    pub preprocessing: PreprocessingConfig,

    /// Compound gesture interpreter configuration
    pub interpreters: InterpreterConfig,

    /// Key bindings (X11 keysyms)
    pub keys: KeyConfig,

    /// Display mapping configuration
    pub screen: ScreenConfig,
}

/// Gesture state machine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum head/hand depth gap for a hand to count as active
    pub gesture_threshold: i32,

    /// Debounce before a pending hand enter is honored, in milliseconds
    pub gesture_timeout_ms: u64,
}

/// Frame preprocessing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Near edge of the valid depth band
    pub threshold_begin: u16,

    /// Far edge of the valid depth band
    pub threshold_end: u16,

    /// Spatial downsampling factor handed to the skeleton tracker
    pub dimension_factor: usize,
}

/// Compound gesture interpreter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Steering-wheel mode when true, pinch mode when false
    pub double_hand_wheel_mode: bool,

    /// Divisor for wheel tilt activation
    pub wheel_turn_activate_distance: i32,

    /// Minimum distance delta to trigger a pinch scroll
    pub pinch_activate_distance: i32,
}

/// X11 keysym bindings for gesture keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Key held when the wheel tilts left
    pub turn_left: Keysym,

    /// Key held when the wheel tilts right
    pub turn_right: Keysym,

    /// Key held for the whole duration of a wheel gesture
    pub accelerate: Keysym,

    /// Modifier bracketing pinch scroll clicks
    pub modifier: Keysym,
}

/// Display mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Sensor-to-display scale factor
    pub scale: f64,

    /// Cursor smoothing divisor (fraction of the residual covered per frame)
    pub smoothing_divisor: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            preprocessing: PreprocessingConfig::default(),
            interpreters: InterpreterConfig::default(),
            keys: KeyConfig::default(),
            screen: ScreenConfig::default(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            gesture_threshold: DEFAULT_GESTURE_THRESHOLD,
            gesture_timeout_ms: DEFAULT_GESTURE_TIMEOUT_MS,
        }
    }
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            threshold_begin: DEFAULT_THRESHOLD_BEGIN,
            threshold_end: DEFAULT_THRESHOLD_END,
            dimension_factor: DEFAULT_DIMENSION_FACTOR,
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            double_hand_wheel_mode: true,
            wheel_turn_activate_distance: DEFAULT_WHEEL_TURN_ACTIVATE_DISTANCE,
            pinch_activate_distance: DEFAULT_PINCH_ACTIVATE_DISTANCE,
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            turn_left: XK_LEFT,
            turn_right: XK_RIGHT,
            accelerate: XK_UP,
            modifier: XK_CONTROL_L,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCREEN_SCALE,
            smoothing_divisor: DEFAULT_SMOOTHING_DIVISOR,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Enter debounce as a [`Duration`]
    #[must_use]
    pub const fn gesture_timeout(&self) -> Duration {
        Duration::from_millis(self.gesture.gesture_timeout_ms)
    }

    /// Create the compound gesture interpreter selected by
    /// `double_hand_wheel_mode`
    #[must_use]
    pub fn create_interpreter(&self) -> Box<dyn GestureInterpreter> {
        if self.interpreters.double_hand_wheel_mode {
            Box::new(WheelInterpreter::new(
                self.interpreters.wheel_turn_activate_distance,
                self.keys.turn_left,
                self.keys.turn_right,
                self.keys.accelerate,
            ))
        } else {
            Box::new(PinchInterpreter::new(
                self.interpreters.pinch_activate_distance,
                self.keys.modifier,
            ))
        }
    }

    /// Shift the far depth threshold, clamped to the sensor's useful range
    pub fn adjust_threshold_end(&mut self, difference: i32) {
        let new_threshold = i32::from(self.preprocessing.threshold_end) + difference;
        let min = i32::from(self.preprocessing.threshold_begin) + i32::from(MIN_THRESHOLD_SPAN);
        if new_threshold >= min && new_threshold <= i32::from(MAX_THRESHOLD_END) {
            self.preprocessing.threshold_end = new_threshold as u16;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gesture.gesture_threshold <= 0 {
            return Err(Error::Config(
                "Gesture threshold must be greater than 0".to_string(),
            ));
        }
        if self.preprocessing.dimension_factor == 0 {
            return Err(Error::Config(
                "Dimension factor must be greater than 0".to_string(),
            ));
        }
        if self.preprocessing.threshold_begin >= self.preprocessing.threshold_end {
            return Err(Error::Config(
                "Depth threshold band must not be empty".to_string(),
            ));
        }
        if self.preprocessing.threshold_end > MAX_THRESHOLD_END {
            return Err(Error::Config(format!(
                "Far depth threshold must not exceed {MAX_THRESHOLD_END}"
            )));
        }
        if self.interpreters.wheel_turn_activate_distance <= 0 {
            return Err(Error::Config(
                "Wheel activation distance must be greater than 0".to_string(),
            ));
        }
        if self.interpreters.pinch_activate_distance <= 0 {
            return Err(Error::Config(
                "Pinch activation distance must be greater than 0".to_string(),
            ));
        }
        if self.screen.smoothing_divisor <= 0 {
            return Err(Error::Config(
                "Smoothing divisor must be greater than 0".to_string(),
            ));
        }
        if self.screen.scale <= 0.0 {
            return Err(Error::Config("Screen scale must be positive".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r"# Hand Gesture Control Configuration

# Gesture state machine
gesture:
  gesture_threshold: 250
  gesture_timeout_ms: 300

# Frame preprocessing
preprocessing:
  threshold_begin: 500
  threshold_end: 1500
  dimension_factor: 8

# Two-hand gesture interpretation
interpreters:
  double_hand_wheel_mode: true
  wheel_turn_activate_distance: 35
  pinch_activate_distance: 75

# Key bindings (X11 keysyms, decimal):
# XK_Left, XK_Right, XK_Up, XK_Control_L
keys:
  turn_left: 65361
  turn_right: 65363
  accelerate: 65362
  modifier: 65507

# Display mapping
screen:
  scale: 1.1
  smoothing_divisor: 8
";
