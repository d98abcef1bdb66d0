//! Unrecoverable-fault handling
//!
//! Contract violations (an unexpected control request, or a peripheral
//! read-back outside the enumerated configuration sets) mean the firmware's
//! assumptions about the hardware no longer hold. Continuing could mis-drive
//! the module's boot pins, so the only safe response is to stop in an
//! observable way. Host-input validation errors never come through here;
//! they are returned as typed results.

/// Halt the firmware after a contract violation
///
/// Never returns. On the embedded target the panic is reported through
/// `panic-probe`, which breaks into the debugger and leaves the fault
/// visible; on the host it fails the offending test.
pub fn halt(reason: &'static str) -> ! {
    #[cfg(feature = "embedded")]
    defmt::error!("contract violation: {=str}", reason);

    panic!("contract violation: {reason}");
}
