//! Constants used throughout the application

/// Depth sensor frame width in pixels
pub const SENSOR_WIDTH: usize = 640;

/// Depth sensor frame height in pixels
pub const SENSOR_HEIGHT: usize = 480;

/// Minimum head/hand depth gap (in depth units) for a hand to count as active
pub const DEFAULT_GESTURE_THRESHOLD: i32 = 250;

/// Debounce before a pending hand enter is honored, in milliseconds
pub const DEFAULT_GESTURE_TIMEOUT_MS: u64 = 300;

/// Default valid depth band for frame preprocessing
pub const DEFAULT_THRESHOLD_BEGIN: u16 = 500;
pub const DEFAULT_THRESHOLD_END: u16 = 1500;

/// Far threshold hard limits: at least this far above `threshold_begin`,
/// and never beyond the sensor's useful range
pub const MIN_THRESHOLD_SPAN: u16 = 300;
pub const MAX_THRESHOLD_END: u16 = 4000;

/// Default spatial downsampling factor handed to the skeleton tracker
pub const DEFAULT_DIMENSION_FACTOR: usize = 8;

/// Divisor applied to the vertical hand separation before the wheel
/// gesture presses a direction key
pub const DEFAULT_WHEEL_TURN_ACTIVATE_DISTANCE: i32 = 35;

/// Minimum inter-hand distance change to trigger a pinch scroll
pub const DEFAULT_PINCH_ACTIVATE_DISTANCE: i32 = 75;

/// Half-width of the square neighborhood scanned by the point stabilizer
pub const STABILIZE_RADIUS: i32 = 16;

/// Neighbors more than this much closer than the joint are rejected as
/// foreground noise by the point stabilizer
pub const STABILIZE_DEPTH_BAND: i32 = 50;

/// Sensor-to-display mapping scale factor
pub const DEFAULT_SCREEN_SCALE: f64 = 1.1;

/// Each frame the cursor covers 1/divisor of the remaining distance to
/// its target position
pub const DEFAULT_SMOOTHING_DIVISOR: i32 = 8;

/// X11 keysyms for the default gesture key bindings
pub const XK_LEFT: u32 = 0xff51;
pub const XK_UP: u32 = 0xff52;
pub const XK_RIGHT: u32 = 0xff53;
pub const XK_CONTROL_L: u32 = 0xffe3;

/// Core pointer button numbering (X11 convention)
pub const BUTTON_PRIMARY: u8 = 1;
pub const BUTTON_SCROLL_UP: u8 = 4;
pub const BUTTON_SCROLL_DOWN: u8 = 5;
