//! Hardware seams: USB device stack, HID function driver and GPIO.
//!
//! Platform glue implements these traits and forwards interrupt callbacks as
//! typed [`DeviceEvent`] / [`HidEvent`] values. The [`sim`](crate::sim)
//! module provides in-memory implementations for tests.

use hid_media_controller_protocol::OUTPUT_REPORT_SIZE;
use media_controller_input::GpioPortId;
use thiserror::Error;

/// Failures reported by the USB transport.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport not ready")]
    NotReady,
    #[error("Transfer already in progress")]
    Busy,
    #[error("Device disconnected")]
    Disconnected,
}

pub type TransportResult<T> = core::result::Result<T, TransportError>;

/// The session's view of the USB device layer and HID endpoint.
pub trait UsbHidTransport {
    /// Open the device layer. Fails with `NotReady` until the stack is up.
    fn open(&mut self) -> TransportResult<()>;

    /// Route device-level events to the controller.
    fn register_event_handler(&mut self);

    /// Arm one outstanding output-report receive of `len` bytes.
    fn request_receive(&mut self, len: usize) -> TransportResult<()>;

    /// Copy the last completed output report into `buffer`, returning its length.
    fn take_received(&mut self, buffer: &mut [u8; OUTPUT_REPORT_SIZE]) -> usize;

    /// Queue one input report. Completion is signalled by [`HidEvent::ReportSent`].
    fn send_report(&mut self, report: &[u8]) -> TransportResult<()>;
}

/// Requests the event handlers make of the device layer.
pub trait UsbBusControl {
    fn attach(&mut self);
    fn detach(&mut self);
    fn register_hid_event_handler(&mut self, instance: u8);
    /// Acknowledge a control request with no data stage.
    fn control_status_ok(&mut self);
    /// Answer a control request with a data stage.
    fn control_send(&mut self, data: &[u8]);
}

pub trait GpioBackend {
    /// Raw input word of a whole port.
    fn port_read(&self, port: GpioPortId) -> u32;
    /// Raw level of one pin, `true` for high.
    fn pin_level(&self, pin: u8) -> bool;
    fn write_pin(&mut self, pin: u8, high: bool);
    fn enable_edge_interrupt(&mut self, pin: u8);
}

/// Device-layer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Configured { configuration_value: u8 },
    Deconfigured,
    Reset,
    /// Start of frame, roughly every millisecond. Used as the encoder tick.
    StartOfFrame,
    PowerDetected,
    PowerRemoved,
    Suspended,
    Resumed,
    Error,
}

/// HID function driver events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidEvent {
    ReportSent,
    ReportReceived,
    SetIdle { duration: u8 },
    GetIdle,
    SetProtocol { protocol: u8 },
    GetProtocol,
    ControlTransferDataSent,
}
