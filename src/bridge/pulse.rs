//! Handshake Pulse Timer
//!
//! Millisecond countdown behind the wake pulse on the module's
//! hibernate line. The timer itself is pure state; the dispatcher owns it
//! and drives the line and the UART break condition from its transitions,
//! which keeps the timing behavior testable on the host.
//!
//! Two contexts advance this state at run time: the USB control handler
//! (arm/cancel) and the periodic tick task (countdown). The dispatcher
//! serializes them behind a critical-section mutex, so every transition
//! here is observed whole.

/// Countdown state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PulseState {
    /// No pulse in progress, line released
    #[default]
    Idle,
    /// Line asserted, counting down to release
    Asserting {
        /// Milliseconds until the line is released
        remaining_ms: u32,
    },
}

/// Millisecond countdown for the wake pulse
#[derive(Clone, Copy, Debug, Default)]
pub struct PulseTimer {
    state: PulseState,
}

impl PulseTimer {
    /// Create an idle timer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PulseState::Idle,
        }
    }

    /// Arm the countdown
    ///
    /// A second start while already asserting restarts the count, matching
    /// a host that re-issues the break request.
    pub fn start(&mut self, duration_ms: u32) {
        self.state = PulseState::Asserting {
            remaining_ms: duration_ms,
        };
    }

    /// Stop the countdown without waiting for expiry
    ///
    /// Idempotent: cancelling an idle timer is a no-op.
    pub fn cancel(&mut self) {
        self.state = PulseState::Idle;
    }

    /// Advance the countdown by one millisecond
    ///
    /// Returns true exactly once per pulse, on the tick that exhausts the
    /// count; the caller releases the line on that edge.
    pub fn tick(&mut self) -> bool {
        match self.state {
            PulseState::Idle => false,
            PulseState::Asserting { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(1);
                if remaining_ms == 0 {
                    self.state = PulseState::Idle;
                    true
                } else {
                    self.state = PulseState::Asserting { remaining_ms };
                    false
                }
            }
        }
    }

    /// Check whether a pulse is in progress
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, PulseState::Asserting { .. })
    }

    /// Get the current state
    #[must_use]
    pub const fn state(&self) -> PulseState {
        self.state
    }
}
