//! UART control-plane port
//!
//! Register-level implementation of [`UartPort`] over the RP2040's PL011.
//! The bulk data path is owned by the buffered UART driver; this port only
//! touches the control plane: line format, baud divisor, break, RTS, and
//! the busy flag. The [`UartConfig`] format word uses the PL011 LCR layout,
//! so it programs into LCR_H verbatim.

use embassy_rp::pac::uart::Uart as UartRegs;

use crate::bridge::port::{format, UartConfig, UartPort};
use crate::config::UART_CLOCK_HZ;

/// Smallest divisor the 16.6 fixed-point divider accepts (IBRD >= 1)
const MIN_BAUD_DIV: u32 = 64;

/// Largest divisor the 16.6 fixed-point divider holds
const MAX_BAUD_DIV: u32 = 0xFFFF * 64 + 63;

/// Control-plane handle for the bridge UART
pub struct BridgeUart {
    regs: UartRegs,
}

impl BridgeUart {
    /// Take over the control plane of an already-running UART
    ///
    /// Enables CTS flow control toward the module and puts RTS back under
    /// manual control, where the CDC control line state drives it.
    #[must_use]
    pub fn new(regs: UartRegs) -> Self {
        regs.uartcr().modify(|w| {
            w.set_ctsen(true);
            w.set_rtsen(false);
        });
        Self { regs }
    }
}

impl UartPort for BridgeUart {
    #[allow(clippy::cast_possible_truncation)]
    fn apply_config(&mut self, config: UartConfig) {
        let r = self.regs;

        // Let the current character finish, then stop the UART while the
        // divisor and format change.
        while r.uartfr().read().busy() {}
        r.uartcr().modify(|w| w.set_uarten(false));

        // 16.6 fixed-point divisor, rounded to the nearest sixty-fourth.
        let div = ((UART_CLOCK_HZ * 8 / config.baud_rate) + 1) / 2;
        let div = div.clamp(MIN_BAUD_DIV, MAX_BAUD_DIV);
        r.uartibrd().write(|w| w.set_baud_divint((div / 64) as u16));
        r.uartfbrd().write(|w| w.set_baud_divfrac((div % 64) as u8));

        // The divisor latches on the LCR_H write. Keep the FIFOs enabled
        // and an in-progress break asserted.
        let brk = r.uartlcr_h().read().brk();
        r.uartlcr_h().write(|w| {
            w.0 = config.format;
            w.set_fen(true);
            w.set_brk(brk);
        });

        r.uartcr().modify(|w| w.set_uarten(true));
    }

    fn current_config(&self) -> UartConfig {
        let r = self.regs;

        let lcr = r.uartlcr_h().read().0;
        let div = u32::from(r.uartibrd().read().baud_divint()) * 64
            + u32::from(r.uartfbrd().read().baud_divfrac());

        UartConfig {
            baud_rate: UART_CLOCK_HZ * 4 / div.max(MIN_BAUD_DIV),
            format: lcr & (format::WLEN_MASK | format::PAR_MASK | format::STOP_MASK),
        }
    }

    fn set_break(&mut self, enabled: bool) {
        self.regs.uartlcr_h().modify(|w| w.set_brk(enabled));
    }

    fn set_rts(&mut self, asserted: bool) {
        self.regs.uartcr().modify(|w| w.set_rts(asserted));
    }

    fn is_transmitting(&self) -> bool {
        self.regs.uartfr().read().busy()
    }
}
