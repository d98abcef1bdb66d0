//! Tests for the wake pulse timing
//!
//! Exercises the SendBreak/ClearBreak handling and the millisecond
//! countdown through the full bridge, observing the mock wake line.
//! Run with: cargo test --no-default-features --features std --test pulse_tests

mod common;

use common::new_bridge;
use flash_bridge_firmware::bridge::dispatch::ControlEvent;
use flash_bridge_firmware::config::HANDSHAKE_PULSE_MS;

// ============================================================================
// Pulse Start Tests
// ============================================================================

#[test]
fn send_break_asserts_line_and_break() {
    let mut bridge = new_bridge();

    bridge.dispatch(ControlEvent::SendBreak);

    assert!(bridge.handshake().asserted);
    assert!(bridge.uart().break_set);
    assert!(bridge.pulse().is_running());
}

// ============================================================================
// Countdown Tests
// ============================================================================

#[test]
fn line_holds_through_the_penultimate_tick() {
    let mut bridge = new_bridge();
    bridge.dispatch(ControlEvent::SendBreak);

    for _ in 0..HANDSHAKE_PULSE_MS - 1 {
        bridge.tick();
        assert!(bridge.handshake().asserted);
        assert!(bridge.pulse().is_running());
    }
}

#[test]
fn final_tick_releases_the_line() {
    let mut bridge = new_bridge();
    bridge.dispatch(ControlEvent::SendBreak);

    for _ in 0..HANDSHAKE_PULSE_MS - 1 {
        bridge.tick();
    }
    assert!(bridge.handshake().asserted);

    bridge.tick();
    assert!(!bridge.handshake().asserted);
    assert!(!bridge.pulse().is_running());
    assert!(!bridge.uart().break_set);
}

#[test]
fn ticks_after_expiry_change_nothing() {
    let mut bridge = new_bridge();
    bridge.dispatch(ControlEvent::SendBreak);

    for _ in 0..HANDSHAKE_PULSE_MS + 50 {
        bridge.tick();
    }

    assert!(!bridge.handshake().asserted);
    assert!(!bridge.pulse().is_running());
}

// ============================================================================
// Cancel Tests
// ============================================================================

#[test]
fn clear_break_while_idle_is_idempotent() {
    let mut bridge = new_bridge();

    bridge.dispatch(ControlEvent::ClearBreak);

    assert!(!bridge.handshake().asserted);
    assert!(!bridge.uart().break_set);
    assert!(!bridge.pulse().is_running());
}

#[test]
fn clear_before_first_tick_leaves_no_residual_pulse() {
    let mut bridge = new_bridge();

    bridge.dispatch(ControlEvent::SendBreak);
    bridge.dispatch(ControlEvent::ClearBreak);

    assert!(!bridge.handshake().asserted);
    assert!(!bridge.pulse().is_running());

    // Later ticks must not replay any of the cancelled countdown
    for _ in 0..2 * HANDSHAKE_PULSE_MS {
        bridge.tick();
        assert!(!bridge.handshake().asserted);
    }
}

#[test]
fn clear_mid_pulse_releases_immediately() {
    let mut bridge = new_bridge();
    bridge.dispatch(ControlEvent::SendBreak);

    for _ in 0..HANDSHAKE_PULSE_MS / 2 {
        bridge.tick();
    }
    bridge.dispatch(ControlEvent::ClearBreak);

    assert!(!bridge.handshake().asserted);
    assert!(!bridge.uart().break_set);
    assert!(!bridge.pulse().is_running());
}

// ============================================================================
// Final State Convergence Tests
// ============================================================================

#[test]
fn timeout_and_explicit_clear_end_in_the_same_state() {
    let mut timed_out = new_bridge();
    timed_out.dispatch(ControlEvent::SendBreak);
    for _ in 0..HANDSHAKE_PULSE_MS {
        timed_out.tick();
    }

    let mut cleared = new_bridge();
    cleared.dispatch(ControlEvent::SendBreak);
    cleared.dispatch(ControlEvent::ClearBreak);

    let timed_out_state = (
        timed_out.handshake().asserted,
        timed_out.uart().break_set,
        timed_out.pulse().is_running(),
    );
    let cleared_state = (
        cleared.handshake().asserted,
        cleared.uart().break_set,
        cleared.pulse().is_running(),
    );

    assert_eq!(timed_out_state, cleared_state);
    assert_eq!(timed_out_state, (false, false, false));
}

#[test]
fn repeated_break_restarts_the_countdown() {
    let mut bridge = new_bridge();
    bridge.dispatch(ControlEvent::SendBreak);

    for _ in 0..HANDSHAKE_PULSE_MS - 1 {
        bridge.tick();
    }
    bridge.dispatch(ControlEvent::SendBreak);

    // A full pulse worth of ticks is needed again
    for _ in 0..HANDSHAKE_PULSE_MS - 1 {
        bridge.tick();
        assert!(bridge.handshake().asserted);
    }
    bridge.tick();
    assert!(!bridge.handshake().asserted);
}
