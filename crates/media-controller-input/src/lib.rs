//! Input decoding for the media controller
//!
//! Two leaf decoders feed the key register:
//! - [`QuadratureDecoder`] turns 2-bit encoder port samples into volume pulses
//! - [`map_edge`] turns raw active-low pin edges into key flag transitions
//!
//! [`PinMap`] describes how the board wires those signals to GPIO pins.
//! Nothing in this crate touches hardware; callers pass in sampled levels.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod encoder;
pub mod keys;
pub mod pins;

pub use encoder::*;
pub use keys::*;
pub use pins::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Pin {pin} assigned to both {first} and {second}")]
    DuplicatePin {
        pin: u8,
        first: &'static str,
        second: &'static str,
    },

    #[error("Pin {0} is outside the GPIO range")]
    InvalidPin(u8),

    #[error("Encoder mask {0:#x} must select exactly two adjacent bits")]
    InvalidEncoderMask(u32),
}

pub type InputResult<T> = Result<T, InputError>;
