//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --no-default-features --features std --test config_tests

use flash_bridge_firmware::config::*;
use flash_bridge_firmware::types::LineCoding;

// =============================================================================
// Clock and Timing Tests
// =============================================================================

#[test]
fn uart_clock_matches_default_clk_peri() {
    // RP2040 clk_peri runs at the 125 MHz system clock by default
    assert_eq!(UART_CLOCK_HZ, 125_000_000);
}

#[test]
fn wake_pulse_is_one_hundred_milliseconds() {
    // The module bootloader needs the line held for the full interval
    assert_eq!(HANDSHAKE_PULSE_MS, 100);
}

#[test]
fn tick_resolves_the_pulse() {
    // The countdown is specified in milliseconds
    assert_eq!(TICK_PERIOD_MS, 1);
    assert!(u64::from(HANDSHAKE_PULSE_MS) % TICK_PERIOD_MS == 0);
}

#[test]
fn default_baud_is_reachable() {
    // Divisor must fit the 16-bit integer part at the UART clock
    let divisor = UART_CLOCK_HZ / (16 * DEFAULT_BAUD_RATE);
    assert!(divisor >= 1);
    assert!(divisor <= 0xFFFF);
}

// =============================================================================
// USB Configuration Tests
// =============================================================================

#[test]
fn usb_ids_are_set() {
    assert_eq!(USB_VID, 0x1209);
    assert_ne!(USB_PID, 0);
}

#[test]
fn cdc_packet_size_is_full_speed_bulk() {
    assert_eq!(USB_CDC_PACKET_SIZE, 64);
}

#[test]
fn control_buffer_holds_a_line_coding() {
    assert!(USB_CONTROL_BUF_SIZE >= LineCoding::WIRE_LEN);
}

#[test]
fn relay_buffers_hold_whole_packets() {
    assert!(UART_BUFFER_SIZE % usize::from(USB_CDC_PACKET_SIZE) == 0);
}

// =============================================================================
// Default Format Tests
// =============================================================================

#[test]
fn default_coding_is_115200_8n1() {
    let coding = LineCoding::default();
    assert_eq!(coding.baud_rate, DEFAULT_BAUD_RATE);
    assert_eq!(coding.data_bits, 8);
    assert_eq!(coding.parity, 0);
    assert_eq!(coding.stop_bits, 0);
}
