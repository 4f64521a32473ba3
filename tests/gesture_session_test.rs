//! Scenario tests for the gesture state machine: debouncing, mode
//! transitions and the no-stuck-input guarantee.

use hand_gesture_control::config::Config;
use hand_gesture_control::constants::{BUTTON_PRIMARY, XK_RIGHT, XK_UP};
use hand_gesture_control::gesture::{GestureSession, SlotPhase};
use hand_gesture_control::input::{InputEvent, RecordingSink};
use hand_gesture_control::joints::{Joint, JointId, JointSet};
use hand_gesture_control::pointer::PointerMapper;
use std::time::{Duration, Instant};

const W: usize = 640;
const H: usize = 480;

/// Enough time for the enter debounce to elapse between frames
const STEP: Duration = Duration::from_millis(400);

fn session(config: &Config) -> GestureSession {
    GestureSession::new(
        config.gesture.gesture_threshold,
        config.gesture_timeout(),
        config.create_interpreter(),
        PointerMapper::new(1920, 1080, config.screen.scale, config.screen.smoothing_divisor),
    )
}

fn wheel_session() -> GestureSession {
    session(&Config::default())
}

fn pinch_session() -> GestureSession {
    let mut config = Config::default();
    config.interpreters.double_hand_wheel_mode = false;
    session(&config)
}

fn buffer() -> Vec<u16> {
    vec![1200u16; W * H]
}

/// Head plus the given hand positions, all hands extended (z = 900 against
/// a head at z = 1200)
fn joints(left: Option<(i32, i32)>, right: Option<(i32, i32)>) -> JointSet {
    let mut set = JointSet::new();
    set.insert(Joint::new(JointId::Head, 320, 100, 1200));
    if let Some((x, y)) = left {
        set.insert(Joint::new(JointId::LeftHand, x, y, 900));
    }
    if let Some((x, y)) = right {
        set.insert(Joint::new(JointId::RightHand, x, y, 900));
    }
    set
}

fn run_frame(
    session: &mut GestureSession,
    set: &JointSet,
    sink: &mut RecordingSink,
    at: Instant,
) {
    let buffer = buffer();
    session
        .process_frame(Some(set), &buffer, W, H, sink, at)
        .unwrap();
}

#[test]
fn test_hands_left_releases_everything() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    // Engage the wheel: first co-occurrence frame, then an interpreted one
    // with enough tilt to hold a direction key.
    let both = joints(Some((150, 100)), Some((450, 200)));
    run_frame(&mut session, &both, &mut sink, t0);
    run_frame(&mut session, &both, &mut sink, t0 + STEP);
    assert!(sink.events.contains(&InputEvent::KeyDown(XK_RIGHT)));
    assert!(sink.events.contains(&InputEvent::KeyDown(XK_UP)));

    // Both hands disappear: every held key and the button come up
    sink.clear();
    run_frame(&mut session, &joints(None, None), &mut sink, t0 + 2 * STEP);

    assert!(sink.events.contains(&InputEvent::ButtonUp(BUTTON_PRIMARY)));
    assert!(sink.events.contains(&InputEvent::KeyUp(XK_RIGHT)));
    assert!(sink.events.contains(&InputEvent::KeyUp(XK_UP)));
    assert_eq!(session.slot1_phase(), SlotPhase::Idle);
    assert_eq!(session.slot2_phase(), SlotPhase::Idle);
}

#[test]
fn test_no_hands_twice_is_idempotent() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    let single = joints(Some((200, 240)), None);
    run_frame(&mut session, &single, &mut sink, t0);

    // First empty frame releases state
    run_frame(&mut session, &joints(None, None), &mut sink, t0 + STEP);
    assert!(!sink.events.is_empty());

    // Second empty frame is a no-op
    sink.clear();
    run_frame(&mut session, &joints(None, None), &mut sink, t0 + 2 * STEP);
    assert!(sink.events.is_empty());
}

#[test]
fn test_first_co_occurrence_is_suppressed() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    let both = joints(Some((150, 100)), Some((450, 200)));
    run_frame(&mut session, &both, &mut sink, t0);

    // Both slots engage but the interpreter does not run yet
    assert_eq!(session.slot1_phase(), SlotPhase::Scrolling);
    assert_eq!(session.slot2_phase(), SlotPhase::Scrolling);
    assert!(sink.events.is_empty());

    // On the following frame exactly one interpretation happens
    run_frame(&mut session, &both, &mut sink, t0 + STEP);
    assert_eq!(sink.count(|e| *e == InputEvent::KeyDown(XK_UP)), 1);
}

#[test]
fn test_hold_and_drag() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    // One hand enters and starts driving the cursor
    let single = joints(Some((200, 240)), None);
    run_frame(&mut session, &single, &mut sink, t0);
    run_frame(&mut session, &single, &mut sink, t0 + STEP);
    assert_eq!(session.slot1_phase(), SlotPhase::Active);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);

    // The second hand joins: no press yet, cursor keeps moving
    sink.clear();
    let both = joints(Some((200, 240)), Some((450, 240)));
    run_frame(&mut session, &both, &mut sink, t0 + 2 * STEP);
    assert_eq!(session.slot2_phase(), SlotPhase::Entering);
    assert!(!sink.events.contains(&InputEvent::ButtonDown(BUTTON_PRIMARY)));
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);

    // After the debounce the sustained second hand presses the button
    sink.clear();
    run_frame(&mut session, &both, &mut sink, t0 + 3 * STEP);
    assert_eq!(session.slot2_phase(), SlotPhase::Pressed);
    assert!(sink.events.contains(&InputEvent::ButtonDown(BUTTON_PRIMARY)));

    // Dragging continues while both hands stay
    sink.clear();
    run_frame(&mut session, &both, &mut sink, t0 + 4 * STEP);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::ButtonDown(_))), 0);

    // The second hand retracts: the button is released, motion resumes
    sink.clear();
    run_frame(&mut session, &single, &mut sink, t0 + 5 * STEP);
    assert!(sink.events.contains(&InputEvent::ButtonUp(BUTTON_PRIMARY)));
    assert_eq!(session.slot2_phase(), SlotPhase::Idle);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);
}

#[test]
fn test_drag_released_when_both_hands_leave() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    let single = joints(Some((200, 240)), None);
    let both = joints(Some((200, 240)), Some((450, 240)));
    run_frame(&mut session, &single, &mut sink, t0);
    run_frame(&mut session, &single, &mut sink, t0 + STEP);
    run_frame(&mut session, &both, &mut sink, t0 + 2 * STEP);
    run_frame(&mut session, &both, &mut sink, t0 + 3 * STEP);
    assert_eq!(session.slot2_phase(), SlotPhase::Pressed);

    sink.clear();
    run_frame(&mut session, &joints(None, None), &mut sink, t0 + 4 * STEP);
    assert!(sink.events.contains(&InputEvent::ButtonUp(BUTTON_PRIMARY)));
}

#[test]
fn test_pinch_baseline_resets_when_hands_leave() {
    let mut session = pinch_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    // Establish a baseline at distance 300, then spread to fire one scroll
    let narrow = joints(Some((150, 240)), Some((450, 240)));
    let wide = joints(Some((100, 240)), Some((500, 240)));
    run_frame(&mut session, &narrow, &mut sink, t0); // co-occurrence skip
    run_frame(&mut session, &narrow, &mut sink, t0 + STEP); // baseline
    run_frame(&mut session, &wide, &mut sink, t0 + 2 * STEP);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::Click(_))), 1);

    // All hands leave: the baseline is forgotten
    run_frame(&mut session, &joints(None, None), &mut sink, t0 + 3 * STEP);

    // Re-entering at the narrow distance must re-baseline, not scroll,
    // even though it differs from the last distance by more than the
    // activation threshold.
    sink.clear();
    run_frame(&mut session, &narrow, &mut sink, t0 + 4 * STEP); // skip
    run_frame(&mut session, &narrow, &mut sink, t0 + 5 * STEP); // baseline
    run_frame(&mut session, &narrow, &mut sink, t0 + 6 * STEP);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::Click(_))), 0);
}

#[test]
fn test_scroll_to_single_hand_resumes_cursor() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    let both = joints(Some((150, 100)), Some((450, 200)));
    run_frame(&mut session, &both, &mut sink, t0);
    run_frame(&mut session, &both, &mut sink, t0 + STEP);
    assert_eq!(session.slot1_phase(), SlotPhase::Scrolling);

    // One hand retracts: wheel keys come up, slot 1 re-enters
    sink.clear();
    let single = joints(Some((150, 100)), None);
    run_frame(&mut session, &single, &mut sink, t0 + 2 * STEP);
    assert!(sink.events.contains(&InputEvent::KeyUp(XK_UP)));
    assert_eq!(session.slot1_phase(), SlotPhase::Entering);
    assert!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))) == 0);

    // After the debounce the remaining hand drives the cursor again
    sink.clear();
    run_frame(&mut session, &single, &mut sink, t0 + 3 * STEP);
    assert_eq!(session.slot1_phase(), SlotPhase::Active);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);
}

#[test]
fn test_single_hand_switch_keeps_driving() {
    let mut session = wheel_session();
    let mut sink = RecordingSink::new();
    let t0 = Instant::now();

    // The right hand drives, then the left joins
    let right_only = joints(None, Some((450, 240)));
    run_frame(&mut session, &right_only, &mut sink, t0);
    run_frame(&mut session, &right_only, &mut sink, t0 + STEP);
    assert_eq!(session.slot1_phase(), SlotPhase::Active);

    // The right hand keeps the cursor while the left waits out its debounce
    sink.clear();
    let both = joints(Some((150, 240)), Some((460, 240)));
    run_frame(&mut session, &both, &mut sink, t0 + 2 * STEP);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::MoveCursor(_, _))), 1);
    assert_eq!(session.slot1_phase(), SlotPhase::Active);
    assert_eq!(session.slot2_phase(), SlotPhase::Entering);
}
