//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the flash bridge hardware.
//! All pin mappings, clock frequencies, and timing parameters are centralized here.

/// UART reference clock (RP2040 `clk_peri` at the default 125 MHz)
pub const UART_CLOCK_HZ: u32 = 125_000_000;

/// UART configuration at power-up, before the host changes anything
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How long the module wake line is held low after a break request
///
/// The CC31xx bootloader samples the line on the rising edge, so the
/// release after this interval is what starts the flashing conversation.
pub const HANDSHAKE_PULSE_MS: u32 = 100;

/// Period of the countdown tick that times the wake pulse
pub const TICK_PERIOD_MS: u64 = 1;

/// USB VID (use test VID for development)
pub const USB_VID: u16 = 0x1209;

/// USB PID (get from pid.codes for production)
pub const USB_PID: u16 = 0x0002;

/// USB CDC ACM packet size
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// EP0 control transfer buffer size
pub const USB_CONTROL_BUF_SIZE: usize = 64;

/// Buffer size for each direction of the UART relay
pub const UART_BUFFER_SIZE: usize = 256;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the board wiring

    /// UART0 TX to the module's bootloader RX
    pub const UART_TX: &str = "GP0";

    /// UART0 RX from the module's bootloader TX
    pub const UART_RX: &str = "GP1";

    /// UART0 CTS input (TX flow control from the module)
    pub const UART_CTS: &str = "GP2";

    /// UART0 RTS output (driven from the CDC control line state)
    pub const UART_RTS: &str = "GP3";

    /// Module wake/hibernate line (active low)
    pub const MODULE_WAKE: &str = "GP6";

    /// Connection status LED (on-board LED)
    pub const LED_CONNECTED: &str = "GP25";
}
