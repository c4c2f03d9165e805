//! HID protocol definitions for the media controller
//!
//! The controller talks to the host with two report shapes:
//! - a 2-byte input report `{report_id, code}` carrying the key bitfield
//! - a 64-byte output report `{report_id, command, values[62]}` used by the
//!   host to switch the operating mode
//!
//! Report ID `0x01` is the Youtube collection and `0x02` the generic consumer
//! (volume) collection. The key bitfield is described by [`KeycodeState`].
//!
//! ## Features
//! - `#![no_std]` wire types, usable directly from firmware
//! - Explicit mask operations on the key register (no layout aliasing)
//! - Strict length checks on every parse entry point

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod keycode;
pub mod report;

pub use keycode::*;
pub use report::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaControllerError {
    #[error("Invalid report size: expected {expected}, got {actual}")]
    InvalidReportSize { expected: usize, actual: usize },

    #[error("Invalid report ID: {0:#04x}")]
    InvalidReportId(u8),

    #[error("Invalid mode command: {0:#04x}")]
    InvalidModeCommand(u8),
}

pub type MediaControllerResult<T> = Result<T, MediaControllerError>;

pub const INPUT_REPORT_SIZE: usize = 2;
pub const OUTPUT_REPORT_SIZE: usize = 64;
pub const OUTPUT_REPORT_VALUES: usize = OUTPUT_REPORT_SIZE - 2;

/// Bits compared when deciding whether a new input report is needed.
///
/// Covers the six transient keys and leaves out `reserved` and `func`.
pub const CHANGE_DETECT_MASK: u8 = 0x3F;

/// Bits zeroed after every pass that finds the sender idle.
///
/// The six keys plus `func`; only `reserved` survives.
pub const TRANSIENT_MASK: u8 = 0xBF;

/// Volume-up usage as sent on the consumer collection.
pub const CODE_VOLUME_UP: u8 = 0x10;
/// Volume-down usage as sent on the consumer collection.
pub const CODE_VOLUME_DOWN: u8 = 0x20;
/// Vendor usage the host maps to the full-screen toggle.
pub const CODE_FULL_SCREEN: u8 = 0x81;
pub const CODE_RELEASE: u8 = 0x00;
