//! Joint data model and the skeleton tracker interface.
//!
//! The skeleton-fitting algorithm itself is an external collaborator: this
//! module only defines the shape of its per-frame output and the trait the
//! pipeline drives it through.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identity of a tracked body landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    Head,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftHand,
    RightHand,
}

impl JointId {
    /// Number of distinct joint identities
    pub const COUNT: usize = 7;

    const fn index(self) -> usize {
        match self {
            Self::Head => 0,
            Self::LeftShoulder => 1,
            Self::RightShoulder => 2,
            Self::LeftElbow => 3,
            Self::RightElbow => 4,
            Self::LeftHand => 5,
            Self::RightHand => 6,
        }
    }
}

/// One tracked landmark's screen position and depth for one frame.
///
/// Produced fresh each frame by the tracker; never retained across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joint {
    /// Which landmark this is
    pub id: JointId,
    /// Horizontal position in pixels of the tracked frame
    pub screen_x: i32,
    /// Vertical position in pixels of the tracked frame
    pub screen_y: i32,
    /// Distance from the sensor in depth units
    pub z: i32,
}

impl Joint {
    /// Create a joint at the given screen position and depth
    #[must_use]
    pub const fn new(id: JointId, screen_x: i32, screen_y: i32, z: i32) -> Self {
        Self {
            id,
            screen_x,
            screen_y,
            z,
        }
    }
}

/// The set of joints the tracker resolved for one frame.
///
/// Any joint may be absent when the tracker could not locate it.
#[derive(Debug, Clone, Default)]
pub struct JointSet {
    joints: [Option<Joint>; JointId::COUNT],
}

impl JointSet {
    /// Create an empty joint set (tracker found nothing)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a joint, replacing any previous one with the same identity
    pub fn insert(&mut self, joint: Joint) {
        self.joints[joint.id.index()] = Some(joint);
    }

    /// Look up a joint by identity
    #[must_use]
    pub fn get(&self, id: JointId) -> Option<&Joint> {
        self.joints[id.index()].as_ref()
    }

    /// True when no joint was resolved this frame
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }
}

/// Interface to the external skeleton-fitting stage.
///
/// Accepts a (typically downsampled) depth buffer and returns the joints it
/// found. A tracking error and an empty joint set are treated identically by
/// the pipeline: that frame contributes no input events.
pub trait SkeletonTracker {
    /// Fit a skeleton to one depth buffer and return the resolved joints
    fn track_joints(&mut self, buffer: &[u16], width: usize, height: usize) -> Result<JointSet>;
}
