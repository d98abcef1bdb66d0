//! USB Subsystem
//!
//! The CDC ACM control-channel wire layer:
//! - class request decoding into dispatcher events
//! - the embedded control handler that plugs into the device stack

pub mod cdc;
