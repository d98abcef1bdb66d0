//! GPIO Abstractions
//!
//! Type-safe wrappers for the bridge's two GPIO outputs: the module's
//! wake/hibernate line and the connection status LED.

use embassy_rp::gpio::Output;

use crate::bridge::port::{HandshakeLine, StatusIndicator};

/// The module's wake/hibernate line
///
/// Active low: driving the pin low holds the module in its wake state,
/// releasing it high lets the module run. The line starts released so the
/// module boots normally.
pub struct HandshakePin<'d> {
    pin: Output<'d>,
}

impl<'d> HandshakePin<'d> {
    /// Wrap the wake line output (drives it to the released level)
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_high();
        Self { pin }
    }
}

impl HandshakeLine for HandshakePin<'_> {
    fn assert(&mut self) {
        self.pin.set_low();
    }

    fn release(&mut self) {
        self.pin.set_high();
    }
}

/// Connection status LED
pub struct ConnectionLed<'d> {
    pin: Output<'d>,
    lit: bool,
}

impl<'d> ConnectionLed<'d> {
    /// Create the LED driver (initially off)
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self { pin, lit: false }
    }

    /// Check whether the LED is lit
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.lit
    }
}

impl StatusIndicator for ConnectionLed<'_> {
    fn set_connected(&mut self, connected: bool) {
        if connected {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        self.lit = connected;
    }
}
