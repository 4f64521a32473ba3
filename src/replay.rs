//! Joint-stream replay for development and testing.
//!
//! A recording is a YAML file holding one joint list per frame. Replaying it
//! through a [`ReplayTracker`] paired with a [`SyntheticDepthSource`] drives
//! the full pipeline without a depth sensor attached, which is how gesture
//! sequences are exercised end to end (typically with a dry-run sink).

use crate::app::{DepthFrame, DepthSource};
use crate::error::{Error, Result};
use crate::joints::{Joint, JointId, JointSet, SkeletonTracker};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

/// A recorded joint stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointRecording {
    /// Frame width the joints were tracked at
    pub width: usize,
    /// Frame height the joints were tracked at
    pub height: usize,
    /// Depth value filling the synthetic frames
    pub fill_depth: u16,
    /// Per-frame joint lists, in playback order
    pub frames: Vec<FrameRecord>,
}

/// Joints resolved for one recorded frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Joints present in this frame (absent joints are simply omitted)
    pub joints: Vec<JointRecord>,
}

/// One recorded joint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointRecord {
    /// Joint identity
    pub id: JointId,
    /// Horizontal position in pixels
    pub x: i32,
    /// Vertical position in pixels
    pub y: i32,
    /// Depth in sensor units
    pub z: i32,
}

impl JointRecording {
    /// Load a recording from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let recording: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Replay(format!("Failed to parse recording: {e}")))?;

        if recording.width == 0 || recording.height == 0 {
            return Err(Error::Replay("Recording has empty dimensions".to_string()));
        }

        info!(
            "Loaded recording: {} frames at {}x{}",
            recording.frames.len(),
            recording.width,
            recording.height
        );
        Ok(recording)
    }

    /// Split the recording into a depth source and a tracker that replay it
    /// in lockstep through the normal pipeline
    #[must_use]
    pub fn into_pipeline(self, frame_interval: Option<Duration>) -> (SyntheticDepthSource, ReplayTracker) {
        let source = SyntheticDepthSource {
            width: self.width,
            height: self.height,
            fill_depth: self.fill_depth,
            remaining: self.frames.len(),
            frame_interval,
        };
        let tracker = ReplayTracker {
            frames: self.frames.into(),
        };
        (source, tracker)
    }
}

/// Depth source producing uniform synthetic frames, one per recorded frame
#[derive(Debug)]
pub struct SyntheticDepthSource {
    width: usize,
    height: usize,
    fill_depth: u16,
    remaining: usize,
    frame_interval: Option<Duration>,
}

impl DepthSource for SyntheticDepthSource {
    fn next_frame(&mut self) -> Result<Option<DepthFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        if let Some(interval) = self.frame_interval {
            std::thread::sleep(interval);
        }

        Ok(Some(DepthFrame {
            data: vec![self.fill_depth; self.width * self.height],
            width: self.width,
            height: self.height,
        }))
    }
}

/// Tracker that replays recorded joints instead of fitting a skeleton
#[derive(Debug)]
pub struct ReplayTracker {
    frames: VecDeque<FrameRecord>,
}

impl SkeletonTracker for ReplayTracker {
    fn track_joints(&mut self, _buffer: &[u16], _width: usize, _height: usize) -> Result<JointSet> {
        let Some(record) = self.frames.pop_front() else {
            return Ok(JointSet::new());
        };

        let mut set = JointSet::new();
        for joint in record.joints {
            set.insert(Joint::new(joint.id, joint.x, joint.y, joint.z));
        }
        Ok(set)
    }
}
