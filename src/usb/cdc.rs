//! CDC ACM control channel
//!
//! The handler side of the device stack's notification contract. The
//! stack owns enumeration and the bulk data endpoints; this module turns
//! the class control requests it delivers into [`ControlEvent`]s for the
//! dispatcher and answers GET_LINE_CODING from the live UART state.
//!
//! A request this module does not recognize is a contract violation, not
//! host input: the stack only forwards ACM class requests, and the ACM
//! requests a flashing host uses are all enumerated here.

use crate::bridge::dispatch::ControlEvent;
use crate::fault;
use crate::types::{ControlLines, LineCoding};

/// SET_LINE_CODING class request
pub const REQ_SET_LINE_CODING: u8 = 0x20;

/// GET_LINE_CODING class request
pub const REQ_GET_LINE_CODING: u8 = 0x21;

/// SET_CONTROL_LINE_STATE class request
pub const REQ_SET_CONTROL_LINE_STATE: u8 = 0x22;

/// SEND_BREAK class request
pub const REQ_SEND_BREAK: u8 = 0x23;

/// Decode an OUT-direction class request into a dispatcher event
///
/// SEND_BREAK folds its duration into the event pair the dispatcher
/// understands: a flashing host sends 0xFFFF ("break until further
/// notice") to start the wake pulse and duration zero to end it.
///
/// Halts on an unrecognized request code or a truncated SET_LINE_CODING
/// payload; both mean the stack broke its delivery contract.
#[must_use]
pub fn decode_request(request: u8, value: u16, data: &[u8]) -> ControlEvent {
    match request {
        REQ_SET_LINE_CODING => {
            if data.len() < LineCoding::WIRE_LEN {
                fault::halt("truncated line coding payload");
            }
            let mut raw = [0u8; LineCoding::WIRE_LEN];
            raw.copy_from_slice(&data[..LineCoding::WIRE_LEN]);
            ControlEvent::SetLineCoding(LineCoding::from_bytes(&raw))
        }
        REQ_SET_CONTROL_LINE_STATE => {
            ControlEvent::SetControlLineState(ControlLines::from_bits(value))
        }
        REQ_SEND_BREAK => {
            if value == 0 {
                ControlEvent::ClearBreak
            } else {
                ControlEvent::SendBreak
            }
        }
        _ => fault::halt("unexpected CDC control request"),
    }
}

#[cfg(feature = "embedded")]
pub use self::handler::BridgeControl;

#[cfg(feature = "embedded")]
mod handler {
    //! Control handler glue for the embassy-usb device stack.

    use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
    use embassy_usb::Handler;

    use crate::bridge::dispatch::{ControlEvent, SharedBridge};
    use crate::bridge::port::{HandshakeLine, StatusIndicator, UartPort};
    use crate::types::LineCoding;

    /// Routes bus state and class control transfers into the shared bridge
    pub struct BridgeControl<'a, U, H, S> {
        bridge: &'a SharedBridge<U, H, S>,
    }

    impl<'a, U, H, S> BridgeControl<'a, U, H, S>
    where
        U: UartPort,
        H: HandshakeLine,
        S: StatusIndicator,
    {
        /// Create a control handler over the shared bridge
        #[must_use]
        pub const fn new(bridge: &'a SharedBridge<U, H, S>) -> Self {
            Self { bridge }
        }

        fn dispatch(&self, event: ControlEvent) {
            self.bridge.lock(|bridge| bridge.borrow_mut().dispatch(event));
        }

        fn is_class_request(req: &Request) -> bool {
            req.request_type == RequestType::Class && req.recipient == Recipient::Interface
        }
    }

    impl<U, H, S> Handler for BridgeControl<'_, U, H, S>
    where
        U: UartPort,
        H: HandshakeLine,
        S: StatusIndicator,
    {
        fn configured(&mut self, configured: bool) {
            defmt::debug!("host configured: {=bool}", configured);
            self.dispatch(if configured {
                ControlEvent::Connected
            } else {
                ControlEvent::Disconnected
            });
        }

        fn suspended(&mut self, suspended: bool) {
            self.dispatch(if suspended {
                ControlEvent::Suspend
            } else {
                ControlEvent::Resume
            });
        }

        fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
            if !Self::is_class_request(&req) {
                return None;
            }

            let event = super::decode_request(req.request, req.value, data);
            defmt::trace!("control event: {}", event);
            self.dispatch(event);
            Some(OutResponse::Accepted)
        }

        fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
            if !Self::is_class_request(&req) {
                return None;
            }
            if req.request != super::REQ_GET_LINE_CODING {
                crate::fault::halt("unexpected CDC control request");
            }

            let coding = self.bridge.lock(|bridge| bridge.borrow().current_coding());
            buf[..LineCoding::WIRE_LEN].copy_from_slice(&coding.to_bytes());
            Some(InResponse::Accepted(&buf[..LineCoding::WIRE_LEN]))
        }
    }
}
