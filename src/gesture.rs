//! The gesture-interpretation state machine.
//!
//! [`GestureSession`] holds all state that survives between frames: the two
//! pointer slot phases, the enter-debounce timestamp, the previous frame's
//! stabilized hand points, which hand is driving the cursor, and the active
//! compound-gesture interpreter. It is driven exactly once per tracked frame
//! and emits input through an [`InputSink`].
//!
//! Per-frame resolution:
//! - one active hand moves the cursor (after an enter debounce),
//! - a second hand joining a moving cursor presses the primary button after
//!   the same debounce (hold-and-drag),
//! - two hands together engage the compound interpreter (wheel or pinch),
//! - all hands leaving releases every held key and button unconditionally.

use crate::activity::hand_is_active;
use crate::constants::BUTTON_PRIMARY;
use crate::error::Result;
use crate::input::InputSink;
use crate::interpreters::GestureInterpreter;
use crate::joints::{JointId, JointSet};
use crate::pointer::PointerMapper;
use crate::stabilizer::{stabilize, StabilizedPoint};
use log::debug;
use std::time::{Duration, Instant};

/// Lifecycle phase of one virtual pointer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// No hand is assigned to the slot
    Idle,
    /// A hand appeared and is waiting out the enter debounce
    Entering,
    /// The hand drives cursor motion
    Active,
    /// Both hands are engaged in a compound gesture
    Scrolling,
    /// The secondary hand is holding the primary button down
    Pressed,
}

/// Which physical hand a point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// Cross-frame gesture state and per-frame resolution logic
pub struct GestureSession {
    gesture_threshold: i32,
    gesture_timeout: Duration,
    slot1: SlotPhase,
    slot2: SlotPhase,
    pointer_enter_time: Option<Instant>,
    primary_hand: Option<Hand>,
    last_left_point: Option<StabilizedPoint>,
    last_right_point: Option<StabilizedPoint>,
    interpreter: Box<dyn GestureInterpreter>,
    mapper: PointerMapper,
}

impl GestureSession {
    /// Create a session with the given activity threshold, enter debounce,
    /// compound interpreter and display mapper
    #[must_use]
    pub fn new(
        gesture_threshold: i32,
        gesture_timeout: Duration,
        interpreter: Box<dyn GestureInterpreter>,
        mapper: PointerMapper,
    ) -> Self {
        Self {
            gesture_threshold,
            gesture_timeout,
            slot1: SlotPhase::Idle,
            slot2: SlotPhase::Idle,
            pointer_enter_time: None,
            primary_hand: None,
            last_left_point: None,
            last_right_point: None,
            interpreter,
            mapper,
        }
    }

    /// Process one frame's joints against the full-resolution depth buffer.
    ///
    /// `joints` is `None` when tracking failed; that frame (like a frame
    /// without a head joint) is skipped without touching any state, so a
    /// single bad frame never drops held keys or buttons.
    pub fn process_frame(
        &mut self,
        joints: Option<&JointSet>,
        buffer: &[u16],
        width: usize,
        height: usize,
        sink: &mut dyn InputSink,
        now: Instant,
    ) -> Result<()> {
        let Some(joints) = joints else {
            return Ok(());
        };
        let Some(head) = joints.get(JointId::Head) else {
            debug!("no head joint this frame, skipping gesture interpretation");
            return Ok(());
        };

        let left_point = if hand_is_active(head, joints.get(JointId::LeftHand), self.gesture_threshold)
        {
            stabilize(buffer, width, height, joints.get(JointId::LeftHand))
        } else {
            None
        };
        let right_point =
            if hand_is_active(head, joints.get(JointId::RightHand), self.gesture_threshold) {
                stabilize(buffer, width, height, joints.get(JointId::RightHand))
            } else {
                None
            };

        match (left_point, right_point) {
            (Some(point), None) => self.on_single_hand(Hand::Left, point, sink, now)?,
            (None, Some(point)) => self.on_single_hand(Hand::Right, point, sink, now)?,
            (Some(left), Some(right)) => self.on_two_hands(left, right, sink, now)?,
            (None, None) => {
                if self.last_left_point.is_some() || self.last_right_point.is_some() {
                    self.on_hands_left(sink)?;
                }
            }
        }

        // Retained points roll over exactly once per processed frame
        self.last_left_point = left_point;
        self.last_right_point = right_point;
        Ok(())
    }

    /// One hand is active: drive the cursor, unwinding any two-hand state
    fn on_single_hand(
        &mut self,
        hand: Hand,
        point: StabilizedPoint,
        sink: &mut dyn InputSink,
        now: Instant,
    ) -> Result<()> {
        // A wheel gesture may still be holding keys down
        self.interpreter.release(sink)?;

        if self.slot1 == SlotPhase::Scrolling {
            // The compound gesture lost a hand; cursor control resumes
            self.slot1 = SlotPhase::Idle;
        } else if self.slot2 == SlotPhase::Pressed {
            sink.button_up(BUTTON_PRIMARY)?;
            self.slot2 = SlotPhase::Idle;
        } else if self.slot2 == SlotPhase::Entering {
            if !self.timeout_elapsed(now) {
                // The second hand is still settling; suppress motion so the
                // cursor does not jump while the gesture resolves.
                return Ok(());
            }
            self.slot2 = SlotPhase::Idle;
        }

        match self.slot1 {
            SlotPhase::Idle => {
                self.pointer_enter_time = Some(now);
                self.slot1 = SlotPhase::Entering;
                self.primary_hand = Some(hand);
            }
            SlotPhase::Active => {
                self.primary_hand = Some(hand);
                self.move_cursor(point, sink)?;
            }
            SlotPhase::Entering if self.timeout_elapsed(now) => {
                self.slot1 = SlotPhase::Active;
                self.slot2 = SlotPhase::Idle;
                self.primary_hand = Some(hand);
                self.move_cursor(point, sink)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Both hands are active: hold-and-drag when one was already moving the
    /// cursor, compound gesture otherwise
    fn on_two_hands(
        &mut self,
        left: StabilizedPoint,
        right: StabilizedPoint,
        sink: &mut dyn InputSink,
        now: Instant,
    ) -> Result<()> {
        if self.slot1 == SlotPhase::Active {
            // A second hand joined while the first drives the cursor
            match self.slot2 {
                SlotPhase::Idle => {
                    self.pointer_enter_time = Some(now);
                    self.slot2 = SlotPhase::Entering;
                }
                SlotPhase::Entering if self.timeout_elapsed(now) => {
                    self.slot2 = SlotPhase::Pressed;
                    sink.button_down(BUTTON_PRIMARY)?;
                }
                _ => {}
            }

            // The hand that was driving the cursor keeps driving it
            let point = match self.primary_hand {
                Some(Hand::Left) => left,
                Some(Hand::Right) => right,
                None => return Ok(()),
            };
            self.move_cursor(point, sink)?;
        } else {
            self.slot1 = SlotPhase::Scrolling;
            self.slot2 = SlotPhase::Scrolling;

            // Skip the first frame where both hands appear together; the
            // initial pair is not stable yet.
            if self.last_left_point.is_some() && self.last_right_point.is_some() {
                self.interpreter.interpret(&left, &right, sink)?;
            }
        }
        Ok(())
    }

    /// All hands left this frame: release everything, unconditionally
    fn on_hands_left(&mut self, sink: &mut dyn InputSink) -> Result<()> {
        debug!("hands left, releasing all input state");
        sink.button_up(BUTTON_PRIMARY)?;
        self.interpreter.release(sink)?;
        self.interpreter.reset();
        self.slot1 = SlotPhase::Idle;
        self.slot2 = SlotPhase::Idle;
        self.pointer_enter_time = None;
        self.primary_hand = None;
        Ok(())
    }

    fn move_cursor(&mut self, point: StabilizedPoint, sink: &mut dyn InputSink) -> Result<()> {
        let (x, y) = self.mapper.step(point.x, point.y);
        sink.move_cursor(x, y)
    }

    fn timeout_elapsed(&self, now: Instant) -> bool {
        self.pointer_enter_time
            .is_some_and(|enter| now.duration_since(enter) > self.gesture_timeout)
    }

    /// Phase of the primary pointer slot
    #[must_use]
    pub fn slot1_phase(&self) -> SlotPhase {
        self.slot1
    }

    /// Phase of the secondary pointer slot
    #[must_use]
    pub fn slot2_phase(&self) -> SlotPhase {
        self.slot2
    }

    /// Previous frame's stabilized left-hand point, for visualization
    #[must_use]
    pub fn last_left_point(&self) -> Option<&StabilizedPoint> {
        self.last_left_point.as_ref()
    }

    /// Previous frame's stabilized right-hand point, for visualization
    #[must_use]
    pub fn last_right_point(&self) -> Option<&StabilizedPoint> {
        self.last_right_point.as_ref()
    }

    /// Current smoothed cursor position
    #[must_use]
    pub fn cursor_position(&self) -> (i32, i32) {
        self.mapper.position()
    }
}
