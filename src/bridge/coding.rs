//! Line-Coding Translator
//!
//! Bidirectional mapping between the CDC line coding and the UART
//! peripheral configuration, plus the modem control line mapping.
//!
//! The two directions are deliberately asymmetric: the write path
//! validates every field and rejects bad requests without touching the
//! peripheral, while the read path treats an out-of-set register value as
//! a contract violation, because nothing but this module ever writes those
//! fields.

use crate::bridge::port::{format, UartConfig, UartPort};
use crate::fault;
use crate::types::{ControlLines, DataBits, LineCoding, Parity, StopBits};

/// A line coding request that cannot be programmed into the UART
///
/// Carries the offending field's raw code. The transport has no error
/// path for the request that produced it, so the caller's only options
/// are to log it and keep the previous configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidCoding {
    /// Baud rate of zero
    BaudRate,
    /// Unsupported data bit count
    DataBits(u8),
    /// Unknown parity code
    Parity(u8),
    /// Unknown or unsupported stop bits code
    StopBits(u8),
}

#[cfg(feature = "embedded")]
impl defmt::Format for InvalidCoding {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::BaudRate => defmt::write!(f, "baud rate 0"),
            Self::DataBits(count) => defmt::write!(f, "{} data bits", count),
            Self::Parity(code) => defmt::write!(f, "parity code {}", code),
            Self::StopBits(code) => defmt::write!(f, "stop bits code {}", code),
        }
    }
}

/// Validate a host line coding request and program the UART
///
/// All fields are checked before anything is written; on any invalid field
/// the peripheral configuration is left exactly as it was.
///
/// # Errors
///
/// Returns [`InvalidCoding`] naming the first field that failed validation.
pub fn apply_coding<U: UartPort>(uart: &mut U, coding: &LineCoding) -> Result<(), InvalidCoding> {
    if coding.baud_rate == 0 {
        return Err(InvalidCoding::BaudRate);
    }
    let data_bits = DataBits::from_count(coding.data_bits)
        .ok_or(InvalidCoding::DataBits(coding.data_bits))?;
    let parity =
        Parity::from_cdc_code(coding.parity).ok_or(InvalidCoding::Parity(coding.parity))?;
    let stop_bits = StopBits::from_cdc_code(coding.stop_bits)
        .ok_or(InvalidCoding::StopBits(coding.stop_bits))?;

    uart.apply_config(UartConfig {
        baud_rate: coding.baud_rate,
        format: word_length_bits(data_bits) | parity_bits(parity) | stop_bits_bits(stop_bits),
    });
    Ok(())
}

/// Read the live UART configuration back as a CDC line coding
///
/// Only this module writes the format fields, so a value outside the
/// enumerated sets means the peripheral was modified behind our back and
/// the firmware halts.
#[must_use]
pub fn read_coding<U: UartPort>(uart: &U) -> LineCoding {
    let config = uart.current_config();

    let data_bits = match config.format & format::WLEN_MASK {
        format::WLEN_5 => DataBits::Five,
        format::WLEN_6 => DataBits::Six,
        format::WLEN_7 => DataBits::Seven,
        format::WLEN_8 => DataBits::Eight,
        _ => fault::halt("unknown word length in UART config"),
    };

    let parity = match config.format & format::PAR_MASK {
        format::PAR_NONE => Parity::None,
        format::PAR_ODD => Parity::Odd,
        format::PAR_EVEN => Parity::Even,
        format::PAR_MARK => Parity::Mark,
        format::PAR_SPACE => Parity::Space,
        _ => fault::halt("unknown parity in UART config"),
    };

    let stop_bits = match config.format & format::STOP_MASK {
        format::STOP_ONE => StopBits::One,
        format::STOP_TWO => StopBits::Two,
        // Single-bit field; both values are enumerated above.
        _ => fault::halt("unknown stop bits in UART config"),
    };

    LineCoding::new(config.baud_rate, data_bits, parity, stop_bits)
}

/// Map the modem control bitmap onto the RTS output
///
/// RTS follows the activate-carrier bit; no state is retained.
pub fn set_control_lines<U: UartPort>(uart: &mut U, lines: ControlLines) {
    uart.set_rts(lines.carrier_active());
}

const fn word_length_bits(data_bits: DataBits) -> u32 {
    match data_bits {
        DataBits::Five => format::WLEN_5,
        DataBits::Six => format::WLEN_6,
        DataBits::Seven => format::WLEN_7,
        DataBits::Eight => format::WLEN_8,
    }
}

const fn parity_bits(parity: Parity) -> u32 {
    match parity {
        Parity::None => format::PAR_NONE,
        Parity::Odd => format::PAR_ODD,
        Parity::Even => format::PAR_EVEN,
        Parity::Mark => format::PAR_MARK,
        Parity::Space => format::PAR_SPACE,
    }
}

const fn stop_bits_bits(stop_bits: StopBits) -> u32 {
    match stop_bits {
        StopBits::One => format::STOP_ONE,
        StopBits::Two => format::STOP_TWO,
    }
}
