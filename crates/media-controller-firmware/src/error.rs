//! Error types for the firmware core.

use crate::hal::TransportError;
use hid_media_controller_protocol::MediaControllerError;
use media_controller_input::InputError;
use thiserror::Error;

/// Errors raised while building or running the controller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareError {
    /// The USB transport rejected a request.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The board pin or encoder layout is invalid.
    #[error("Input configuration error: {0}")]
    Input(#[from] InputError),
    /// A report on the wire was malformed.
    #[error("Protocol error: {0}")]
    Protocol(#[from] MediaControllerError),
}

/// A specialized `Result` type for firmware operations.
pub type FirmwareResult<T> = core::result::Result<T, FirmwareError>;
