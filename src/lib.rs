//! USB Flash Bridge Firmware Library
//!
//! This library provides the core functionality for an RP2040-based
//! USB-to-serial bridge that lets a desktop flashing tool program a
//! CC31xx/CC32xx radio module over its UART bootloader interface. The
//! module's bootloader is entered by pulsing its wake/hibernate line,
//! which the bridge drives in response to the CDC break request.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CONTROL-CHANNEL CORE                      │
//! │  Event Dispatcher │ Line-Coding Translator │ Pulse Timer     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     USB WIRE LAYER                           │
//! │  CDC class requests → control events │ line-coding codec     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  PL011 UART port │ wake line │ status LED │ USB device       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Capability interfaces**: The core drives hardware only through the
//!   port traits in [`bridge::port`], so every state machine runs on the
//!   host under test
//! - **Type-driven design**: Serial format fields decode into closed enums
//!   before they ever reach a register
//! - **No unsafe in application code**: All hardware access goes through
//!   the PAC/HAL layers
//! - **Explicit error handling**: Host requests that fail validation return
//!   `Result`; contract violations halt the firmware

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_rp;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Control-Channel Bridge Core
///
/// The event dispatcher, line-coding translator, and handshake pulse
/// timer, written against abstract port capabilities.
pub mod bridge;

/// System configuration and constants
pub mod config;

/// Unrecoverable-fault handling
pub mod fault;

/// Hardware Abstraction Layer
///
/// Concrete port implementations over the RP2040 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Shared types used across modules
pub mod types;

/// USB Subsystem
///
/// The CDC control-channel wire layer: request decoding and, on the
/// embedded target, the control handler glue.
pub mod usb;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
