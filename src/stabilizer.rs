//! Point stabilization: anti-jitter spatial averaging of joint estimates.
//!
//! Raw per-frame joint positions jitter by several pixels. Nearer depth
//! samples around a hand joint are more likely to belong to the hand itself
//! than to the background, so averaging the joint position with its closer
//! neighbors damps the jitter without dragging the point toward the body.

use crate::constants::{STABILIZE_DEPTH_BAND, STABILIZE_RADIUS};
use crate::joints::Joint;

/// A spatially averaged joint position for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizedPoint {
    /// Horizontal position in pixels of the tracked frame
    pub x: i32,
    /// Vertical position in pixels of the tracked frame
    pub y: i32,
    /// Depth of the originating joint, passed through unchanged
    pub z: i32,
}

impl StabilizedPoint {
    /// 2D Euclidean distance to another point, ignoring depth
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> i32 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy) as i32
    }
}

/// Stabilize one joint against the full-resolution depth buffer.
///
/// Scans a square neighborhood of half-width [`STABILIZE_RADIUS`] around the
/// joint, sampling every second pixel in each axis and skipping the center.
/// Neighbors whose depth lies in `[z - STABILIZE_DEPTH_BAND, z)` (closer than
/// the joint, but within the foreground band) contribute their coordinates to
/// a running average seeded with the joint's own position. Depth is not
/// filtered; the joint's own `z` is returned.
///
/// Returns `None` when the joint is absent or its coordinates fall outside
/// the buffer.
#[must_use]
pub fn stabilize(
    buffer: &[u16],
    width: usize,
    height: usize,
    joint: Option<&Joint>,
) -> Option<StabilizedPoint> {
    let joint = joint?;
    let x = joint.screen_x;
    let y = joint.screen_y;
    let w = i32::try_from(width).ok()?;
    let h = i32::try_from(height).ok()?;

    if x < 0 || y < 0 || x >= w || y >= h {
        return None;
    }

    let z = joint.z;
    let min_depth = z - STABILIZE_DEPTH_BAND;
    let mut sum_x = x;
    let mut sum_y = y;
    let mut count = 1;

    for i in (x - STABILIZE_RADIUS..x + STABILIZE_RADIUS).step_by(2) {
        if i < 0 || i >= w {
            continue;
        }
        for j in (y - STABILIZE_RADIUS..y + STABILIZE_RADIUS).step_by(2) {
            if j < 0 || j >= h || (i == x && j == y) {
                continue;
            }
            let current = i32::from(buffer[j as usize * width + i as usize]);
            if current < z && current >= min_depth {
                sum_x += i;
                sum_y += j;
                count += 1;
            }
        }
    }

    Some(StabilizedPoint {
        x: sum_x / count,
        y: sum_y / count,
        z,
    })
}
