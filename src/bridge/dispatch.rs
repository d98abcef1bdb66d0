//! Event Dispatcher
//!
//! Routes decoded control-channel events to the translator, the modem
//! control mapping, and the handshake pulse, and answers the two queries
//! the host stack polls (current line coding, transmitter busy). The
//! dispatcher keeps no state of its own beyond the pulse timer; it is the
//! routing table between the USB wire layer and the port capabilities.

use crate::bridge::coding;
use crate::bridge::port::{HandshakeLine, StatusIndicator, UartPort};
use crate::bridge::pulse::PulseTimer;
use crate::config::HANDSHAKE_PULSE_MS;
use crate::types::{ControlLines, LineCoding};

/// A decoded control-channel event
///
/// Produced by the USB wire layer ([`crate::usb::cdc`]); the enum is
/// closed, so undecodable notifications never reach the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Host connected (device configured)
    Connected,
    /// Host gone (device unconfigured)
    Disconnected,
    /// Bus suspended; ignored
    Suspend,
    /// Bus resumed; ignored
    Resume,
    /// Host requests a new serial format
    SetLineCoding(LineCoding),
    /// Host changed the modem control lines
    SetControlLineState(ControlLines),
    /// Host asserted break: start the wake pulse
    SendBreak,
    /// Host cleared break: end the wake pulse
    ClearBreak,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControlEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Connected => defmt::write!(f, "Connected"),
            Self::Disconnected => defmt::write!(f, "Disconnected"),
            Self::Suspend => defmt::write!(f, "Suspend"),
            Self::Resume => defmt::write!(f, "Resume"),
            Self::SetLineCoding(coding) => defmt::write!(f, "SetLineCoding({})", coding),
            Self::SetControlLineState(lines) => defmt::write!(f, "SetControlLineState({})", lines),
            Self::SendBreak => defmt::write!(f, "SendBreak"),
            Self::ClearBreak => defmt::write!(f, "ClearBreak"),
        }
    }
}

/// The control-channel bridge
///
/// Owns the UART port, the module's wake line, the connection indicator,
/// and the pulse timer. Only [`dispatch`](Self::dispatch) and
/// [`tick`](Self::tick) mutate the pulse timer and the wake line; callers
/// running in different execution contexts must serialize access (the
/// firmware shares the bridge through a critical-section mutex).
pub struct Bridge<U, H, S> {
    uart: U,
    handshake: H,
    indicator: S,
    pulse: PulseTimer,
}

impl<U, H, S> Bridge<U, H, S>
where
    U: UartPort,
    H: HandshakeLine,
    S: StatusIndicator,
{
    /// Create a bridge over the given ports
    ///
    /// The wake line is expected to start released and the indicator off;
    /// the pulse timer starts idle to match.
    #[must_use]
    pub const fn new(uart: U, handshake: H, indicator: S) -> Self {
        Self {
            uart,
            handshake,
            indicator,
            pulse: PulseTimer::new(),
        }
    }

    /// Route one control-channel event
    pub fn dispatch(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Connected => self.indicator.set_connected(true),
            ControlEvent::Disconnected => self.indicator.set_connected(false),
            ControlEvent::Suspend | ControlEvent::Resume => {}
            ControlEvent::SetLineCoding(requested) => {
                if let Err(_invalid) = coding::apply_coding(&mut self.uart, &requested) {
                    // No error path back to the host; keep the previous
                    // configuration.
                    #[cfg(feature = "embedded")]
                    defmt::warn!("rejected line coding: {}", _invalid);
                }
            }
            ControlEvent::SetControlLineState(lines) => {
                coding::set_control_lines(&mut self.uart, lines);
            }
            ControlEvent::SendBreak => {
                self.uart.set_break(true);
                self.handshake.assert();
                self.pulse.start(HANDSHAKE_PULSE_MS);
            }
            ControlEvent::ClearBreak => {
                self.uart.set_break(false);
                self.handshake.release();
                self.pulse.cancel();
            }
        }
    }

    /// Advance the pulse countdown by one millisecond
    ///
    /// Called from the periodic tick task. On expiry the wake line is
    /// released and the break condition cleared, leaving the same final
    /// state as an explicit [`ControlEvent::ClearBreak`].
    pub fn tick(&mut self) {
        if self.pulse.tick() {
            self.handshake.release();
            self.uart.set_break(false);
        }
    }

    /// Read the current serial format for GET_LINE_CODING
    #[must_use]
    pub fn current_coding(&self) -> LineCoding {
        coding::read_coding(&self.uart)
    }

    /// Answer the host stack's unprocessed-data query
    ///
    /// Returns 1 while the UART transmitter is busy, 0 once everything
    /// handed to us has gone out; the host only cares whether, not how
    /// much.
    #[must_use]
    pub fn pending_tx(&self) -> u32 {
        u32::from(self.uart.is_transmitting())
    }

    /// Get the pulse timer state
    #[must_use]
    pub const fn pulse(&self) -> &PulseTimer {
        &self.pulse
    }

    /// Get the UART port
    #[must_use]
    pub const fn uart(&self) -> &U {
        &self.uart
    }

    /// Get the wake line
    #[must_use]
    pub const fn handshake(&self) -> &H {
        &self.handshake
    }

    /// Get the connection indicator
    #[must_use]
    pub const fn indicator(&self) -> &S {
        &self.indicator
    }
}

/// Bridge shared between the USB control handler and the tick task
#[cfg(feature = "embedded")]
pub type SharedBridge<U, H, S> = embassy_sync::blocking_mutex::Mutex<
    embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
    core::cell::RefCell<Bridge<U, H, S>>,
>;
