//! Activity classification: deciding when a hand is extended toward the
//! sensor.
//!
//! A hand only drives input when its depth differs from the head's by more
//! than a threshold, signaling deliberate extension away from the body.

use crate::joints::Joint;

/// True when the hand is present and extended toward the sensor.
///
/// The caller is expected to skip classification entirely (and produce no
/// input events) for frames where the head joint is missing.
#[must_use]
pub fn hand_is_active(head: &Joint, hand: Option<&Joint>, threshold: i32) -> bool {
    hand.is_some_and(|hand| (head.z - hand.z).abs() > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_GESTURE_THRESHOLD;
    use crate::joints::JointId;

    fn head() -> Joint {
        Joint::new(JointId::Head, 320, 100, 1200)
    }

    #[test]
    fn test_missing_hand_inactive() {
        assert!(!hand_is_active(&head(), None, DEFAULT_GESTURE_THRESHOLD));
    }

    #[test]
    fn test_extended_hand_active() {
        let hand = Joint::new(JointId::LeftHand, 200, 240, 900);
        assert!(hand_is_active(&head(), Some(&hand), DEFAULT_GESTURE_THRESHOLD));
    }

    #[test]
    fn test_resting_hand_inactive() {
        let hand = Joint::new(JointId::LeftHand, 200, 240, 1100);
        assert!(!hand_is_active(&head(), Some(&hand), DEFAULT_GESTURE_THRESHOLD));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // A gap of exactly the threshold does not activate
        let hand = Joint::new(JointId::RightHand, 200, 240, 1200 - DEFAULT_GESTURE_THRESHOLD);
        assert!(!hand_is_active(&head(), Some(&hand), DEFAULT_GESTURE_THRESHOLD));

        let hand = Joint::new(JointId::RightHand, 200, 240, 1200 - DEFAULT_GESTURE_THRESHOLD - 1);
        assert!(hand_is_active(&head(), Some(&hand), DEFAULT_GESTURE_THRESHOLD));
    }

    #[test]
    fn test_hand_behind_head_active() {
        // The gap is absolute: a hand much farther than the head also counts
        let hand = Joint::new(JointId::LeftHand, 200, 240, 1500);
        assert!(hand_is_active(&head(), Some(&hand), DEFAULT_GESTURE_THRESHOLD));
    }
}
