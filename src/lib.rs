//! Hand gesture control library for touchless desktop input.
//!
//! This library turns a stream of depth frames and skeleton joints into
//! emulated pointer and keyboard events:
//! - Frame preprocessing thresholds and downsamples raw depth frames for the
//!   external skeleton tracker
//! - Point stabilization averages each hand joint with its closer depth
//!   neighbors to damp per-frame jitter
//! - A gesture state machine resolves no-hand, single-hand and two-hand
//!   frames across time with enter debouncing
//! - Compound gesture interpreters map two-hand gestures (steering wheel,
//!   pinch) to key holds and scroll clicks
//! - Input events are injected through the X11 XTest extension
//!
//! Skeleton fitting itself is an external collaborator behind the
//! [`joints::SkeletonTracker`] trait; any tracker producing head and hand
//! joints can drive the pipeline.
//!
//! # Examples
//!
//! ## Driving the pipeline from a recorded joint stream
//!
//! ```no_run
//! use hand_gesture_control::{
//!     app::GestureApp, config::Config, input::LoggingSink, replay::JointRecording,
//! };
//! use std::sync::atomic::AtomicBool;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recording = JointRecording::from_file("session.yaml")?;
//! let (mut source, tracker) = recording.into_pipeline(None);
//!
//! let mut app = GestureApp::new(
//!     Config::default(),
//!     Box::new(tracker),
//!     Box::new(LoggingSink),
//!     (1920, 1080),
//! )?;
//!
//! let running = AtomicBool::new(true);
//! app.run(&mut source, &running)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the gesture session directly
//!
//! ```
//! use hand_gesture_control::{
//!     gesture::GestureSession,
//!     input::RecordingSink,
//!     interpreters::wheel::WheelInterpreter,
//!     joints::{Joint, JointId, JointSet},
//!     pointer::PointerMapper,
//! };
//! use std::time::{Duration, Instant};
//!
//! let mut session = GestureSession::new(
//!     250,
//!     Duration::from_millis(300),
//!     Box::new(WheelInterpreter::default()),
//!     PointerMapper::new(1920, 1080, 1.1, 8),
//! );
//!
//! let mut joints = JointSet::new();
//! joints.insert(Joint::new(JointId::Head, 320, 100, 1200));
//! joints.insert(Joint::new(JointId::RightHand, 400, 240, 900));
//!
//! let buffer = vec![1200u16; 640 * 480];
//! let mut sink = RecordingSink::new();
//! session
//!     .process_frame(Some(&joints), &buffer, 640, 480, &mut sink, Instant::now())
//!     .unwrap();
//! ```

/// Frame preprocessing: depth thresholding and downsampling
pub mod preprocess;

/// Point stabilization against depth-neighborhood jitter
pub mod stabilizer;

/// Activity classification for extended hands
pub mod activity;

/// The gesture-interpretation state machine
pub mod gesture;

/// Compound two-hand gesture interpreters
pub mod interpreters;

/// Joint data model and skeleton tracker interface
pub mod joints;

/// Input event injection (X11 XTest, logging, recording)
pub mod input;

/// Sensor-to-display pointer mapping and smoothing
pub mod pointer;

/// Per-frame pipeline driver
pub mod app;

/// Recorded joint-stream replay
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
