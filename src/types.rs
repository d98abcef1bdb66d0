//! Shared types used across the bridge firmware
//!
//! This module defines the serial-format types exchanged over the CDC
//! control channel. [`LineCoding`] carries the raw field encoding from the
//! wire so that whatever a host sends is representable; the field enums are
//! the validated view the translator works with.

use core::fmt;

/// Line coding as carried by the CDC SET/GET_LINE_CODING payload
///
/// Fields use the CDC PSTN encoding verbatim: `stop_bits` is the
/// bCharFormat code, `parity` the bParityType code, `data_bits` the literal
/// bit count. Values are validated only when the coding is applied to the
/// UART, so an invalid request can be represented, rejected, and dropped
/// without touching the hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineCoding {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Data bits (5, 6, 7, 8)
    pub data_bits: u8,
    /// Parity code (0 = none, 1 = odd, 2 = even, 3 = mark, 4 = space)
    pub parity: u8,
    /// Stop bits code (0 = one, 1 = one and a half, 2 = two)
    pub stop_bits: u8,
}

impl LineCoding {
    /// Size of the line coding structure on the wire
    pub const WIRE_LEN: usize = 7;

    /// Create a line coding from validated fields
    #[must_use]
    pub const fn new(baud_rate: u32, data_bits: DataBits, parity: Parity, stop_bits: StopBits) -> Self {
        Self {
            baud_rate,
            data_bits: data_bits.count(),
            parity: parity.cdc_code(),
            stop_bits: stop_bits.cdc_code(),
        }
    }

    /// Decode the 7-byte control transfer payload
    ///
    /// The layout is dwDTERate (little endian), bCharFormat, bParityType,
    /// bDataBits. Field values are taken as-is; validation happens when the
    /// coding is applied.
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; Self::WIRE_LEN]) -> Self {
        Self {
            baud_rate: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            stop_bits: bytes[4],
            parity: bytes[5],
            data_bits: bytes[6],
        }
    }

    /// Encode into the 7-byte control transfer payload
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let rate = self.baud_rate.to_le_bytes();
        [
            rate[0],
            rate[1],
            rate[2],
            rate[3],
            self.stop_bits,
            self.parity,
            self.data_bits,
        ]
    }
}

impl Default for LineCoding {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_BAUD_RATE,
            DataBits::Eight,
            Parity::None,
            StopBits::One,
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineCoding {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} baud, {} data bits, parity code {}, stop code {}",
            self.baud_rate,
            self.data_bits,
            self.parity,
            self.stop_bits
        );
    }
}

/// Data bits per character supported by the UART
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataBits {
    /// Five data bits
    Five,
    /// Six data bits
    Six,
    /// Seven data bits
    Seven,
    /// Eight data bits
    #[default]
    Eight,
}

impl DataBits {
    /// Decode a bit count, rejecting anything the UART cannot frame
    #[must_use]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            7 => Some(Self::Seven),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    /// Get the literal bit count
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }
}

/// Parity configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Parity {
    /// No parity
    #[default]
    None,
    /// Odd parity
    Odd,
    /// Even parity
    Even,
    /// Mark parity (parity bit always one)
    Mark,
    /// Space parity (parity bit always zero)
    Space,
}

impl Parity {
    /// Decode the CDC bParityType code
    #[must_use]
    pub const fn from_cdc_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Odd),
            2 => Some(Self::Even),
            3 => Some(Self::Mark),
            4 => Some(Self::Space),
            _ => None,
        }
    }

    /// Get the CDC bParityType code
    #[must_use]
    pub const fn cdc_code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Odd => 1,
            Self::Even => 2,
            Self::Mark => 3,
            Self::Space => 4,
        }
    }
}

/// Stop bits configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StopBits {
    /// One stop bit
    #[default]
    One,
    /// Two stop bits
    Two,
}

impl StopBits {
    /// Decode the CDC bCharFormat code
    ///
    /// Code 1 (one and a half stop bits) has no UART equivalent and is
    /// rejected along with unknown codes.
    #[must_use]
    pub const fn from_cdc_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    /// Get the CDC bCharFormat code
    #[must_use]
    pub const fn cdc_code(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 2,
        }
    }
}

/// Modem control bitmap from the CDC SET_CONTROL_LINE_STATE request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ControlLines(u16);

impl ControlLines {
    /// DTE present (DTR) bit
    pub const DTE_PRESENT: u16 = 1 << 0;

    /// Activate carrier (RTS) bit
    pub const ACTIVATE_CARRIER: u16 = 1 << 1;

    /// Wrap the raw wValue bitmap
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get the raw bitmap
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check whether the host asserted the carrier (RTS) bit
    #[must_use]
    pub const fn carrier_active(self) -> bool {
        self.0 & Self::ACTIVATE_CARRIER != 0
    }

    /// Check whether the host reports a DTE present (DTR)
    #[must_use]
    pub const fn dte_present(self) -> bool {
        self.0 & Self::DTE_PRESENT != 0
    }
}

impl fmt::Display for ControlLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DTR={} RTS={}",
            u8::from(self.dte_present()),
            u8::from(self.carrier_active())
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControlLines {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DTR={} RTS={}",
            u8::from(self.dte_present()),
            u8::from(self.carrier_active())
        );
    }
}
