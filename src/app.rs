//! Per-frame pipeline driver.
//!
//! [`GestureApp`] wires the depth source, preprocessor, skeleton tracker and
//! gesture session together: each frame is thresholded and downsampled, the
//! tracker fits joints to the reduced buffer, and the session turns the
//! joints into input events. Holding the whole pipeline behind `&mut self`
//! serializes frame processing; the session state is never touched by two
//! frames concurrently.

use crate::{
    config::Config,
    error::Result,
    gesture::GestureSession,
    input::InputSink,
    joints::{JointSet, SkeletonTracker},
    pointer::PointerMapper,
    preprocess::reduce_frame,
};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// One raw depth frame as delivered by the sensor
#[derive(Debug, Clone)]
pub struct DepthFrame {
    /// Row-major unsigned 16-bit distance samples
    pub data: Vec<u16>,
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
}

/// Source of raw depth frames, one per tick
pub trait DepthSource {
    /// Produce the next frame, or `None` when the stream has ended
    fn next_frame(&mut self) -> Result<Option<DepthFrame>>;
}

/// The assembled gesture control pipeline
pub struct GestureApp {
    config: Config,
    tracker: Box<dyn SkeletonTracker>,
    sink: Box<dyn InputSink>,
    session: GestureSession,
    last_joints: Option<JointSet>,
    frame_count: u64,
}

impl GestureApp {
    /// Assemble the pipeline for a display of the given size.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the configuration fails validation.
    pub fn new(
        config: Config,
        tracker: Box<dyn SkeletonTracker>,
        sink: Box<dyn InputSink>,
        screen_size: (u16, u16),
    ) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing gesture control for a {}x{} display ({} mode)",
            screen_size.0,
            screen_size.1,
            if config.interpreters.double_hand_wheel_mode {
                "steering wheel"
            } else {
                "pinch"
            }
        );

        let mapper = PointerMapper::new(
            screen_size.0,
            screen_size.1,
            config.screen.scale,
            config.screen.smoothing_divisor,
        );
        let session = GestureSession::new(
            config.gesture.gesture_threshold,
            config.gesture_timeout(),
            config.create_interpreter(),
            mapper,
        );

        Ok(Self {
            config,
            tracker,
            sink,
            session,
            last_joints: None,
            frame_count: 0,
        })
    }

    /// Process one raw depth frame end to end.
    ///
    /// A tracking failure is downgraded to "no joints this frame": the
    /// session sees an absent frame and the loop continues.
    pub fn process_frame(&mut self, frame: &DepthFrame) -> Result<()> {
        let reduced = reduce_frame(
            &frame.data,
            frame.width,
            frame.height,
            self.config.preprocessing.dimension_factor,
            self.config.preprocessing.threshold_begin,
            self.config.preprocessing.threshold_end,
        )?;

        let joints = match self
            .tracker
            .track_joints(reduced.data(), reduced.width(), reduced.height())
        {
            Ok(joints) => Some(joints),
            Err(e) => {
                debug!("tracking failed ({e}), treating frame as hand-absent");
                None
            }
        };

        self.session.process_frame(
            joints.as_ref(),
            &frame.data,
            frame.width,
            frame.height,
            self.sink.as_mut(),
            Instant::now(),
        )?;

        self.last_joints = joints;
        self.frame_count += 1;
        Ok(())
    }

    /// Drive the pipeline until the source ends or `running` is cleared
    pub fn run(&mut self, source: &mut dyn DepthSource, running: &AtomicBool) -> Result<()> {
        info!("Starting gesture control loop");

        while running.load(Ordering::SeqCst) {
            let Some(frame) = source.next_frame()? else {
                break;
            };
            self.process_frame(&frame)?;
        }

        info!("Gesture control loop stopped after {} frames", self.frame_count);
        Ok(())
    }

    /// Joints resolved for the most recent frame, for visualization
    #[must_use]
    pub fn last_joints(&self) -> Option<&JointSet> {
        self.last_joints.as_ref()
    }

    /// The gesture session, exposing slot phases and stabilized points
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Number of frames processed so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
