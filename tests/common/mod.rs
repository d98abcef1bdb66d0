//! Shared mock hardware for the integration tests.
//!
//! Plain-struct implementations of the bridge port capabilities, exposing
//! their state as public fields so tests can observe every hardware effect.

#![allow(dead_code)]

use flash_bridge_firmware::bridge::dispatch::Bridge;
use flash_bridge_firmware::bridge::port::{
    format, HandshakeLine, StatusIndicator, UartConfig, UartPort,
};

/// UART port backed by plain fields
pub struct MockUart {
    pub config: UartConfig,
    pub break_set: bool,
    pub rts: bool,
    pub busy: bool,
    pub config_writes: usize,
}

impl MockUart {
    /// Power-up state: 115200 8-N-1, break clear, RTS deasserted
    pub fn new() -> Self {
        Self {
            config: UartConfig {
                baud_rate: 115_200,
                format: format::WLEN_8 | format::PAR_NONE | format::STOP_ONE,
            },
            break_set: false,
            rts: false,
            busy: false,
            config_writes: 0,
        }
    }
}

impl UartPort for MockUart {
    fn apply_config(&mut self, config: UartConfig) {
        self.config = config;
        self.config_writes += 1;
    }

    fn current_config(&self) -> UartConfig {
        self.config
    }

    fn set_break(&mut self, enabled: bool) {
        self.break_set = enabled;
    }

    fn set_rts(&mut self, asserted: bool) {
        self.rts = asserted;
    }

    fn is_transmitting(&self) -> bool {
        self.busy
    }
}

/// Wake line level recorder (starts released)
pub struct MockLine {
    pub asserted: bool,
}

impl MockLine {
    pub fn new() -> Self {
        Self { asserted: false }
    }
}

impl HandshakeLine for MockLine {
    fn assert(&mut self) {
        self.asserted = true;
    }

    fn release(&mut self) {
        self.asserted = false;
    }
}

/// Connection indicator recorder (starts off)
pub struct MockIndicator {
    pub connected: bool,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self { connected: false }
    }
}

impl StatusIndicator for MockIndicator {
    fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

/// A bridge over fresh mocks in the power-up state
pub fn new_bridge() -> Bridge<MockUart, MockLine, MockIndicator> {
    Bridge::new(MockUart::new(), MockLine::new(), MockIndicator::new())
}
