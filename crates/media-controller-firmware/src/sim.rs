//! In-memory transport and GPIO backends.
//!
//! Every call is recorded so tests can assert on what the controller asked of
//! the hardware. Failures are injected by count.

use crate::hal::{GpioBackend, TransportError, TransportResult, UsbBusControl, UsbHidTransport};
use hid_media_controller_protocol::OUTPUT_REPORT_SIZE;
use media_controller_input::{GpioPortId, MAX_PIN, PINS_PER_PORT, PinMap};
use std::vec::Vec;

/// Simulated USB device stack and HID endpoint.
#[derive(Debug, Default)]
pub struct SimTransport {
    open_failures: u32,
    send_failures: u32,
    opened: bool,
    event_handler_registered: bool,
    attached: bool,
    attach_count: u32,
    detach_count: u32,
    receive_requests: u32,
    pending: Option<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    hid_handlers: Vec<u8>,
    control_acks: u32,
    control_replies: Vec<Vec<u8>>,
}

impl SimTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` calls to `open()` fail with `NotReady`.
    pub fn fail_next_opens(&mut self, count: u32) {
        self.open_failures = count;
    }

    /// Make the next `count` calls to `send_report()` fail with `Busy`.
    pub fn fail_next_sends(&mut self, count: u32) {
        self.send_failures = count;
    }

    /// Stage a full output report for the next `take_received`.
    pub fn queue_output_report(&mut self, block: [u8; OUTPUT_REPORT_SIZE]) {
        self.pending = Some(block.to_vec());
    }

    /// Stage a truncated transfer.
    pub fn queue_partial_output_report(&mut self, data: &[u8]) {
        self.pending = Some(data.to_vec());
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.opened
    }

    #[must_use]
    pub fn is_event_handler_registered(&self) -> bool {
        self.event_handler_registered
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn attach_count(&self) -> u32 {
        self.attach_count
    }

    #[must_use]
    pub fn detach_count(&self) -> u32 {
        self.detach_count
    }

    #[must_use]
    pub fn receive_requests(&self) -> u32 {
        self.receive_requests
    }

    /// Reports accepted by `send_report`, oldest first.
    #[must_use]
    pub fn sent_reports(&self) -> &[Vec<u8>] {
        &self.sent
    }

    #[must_use]
    pub fn hid_handlers(&self) -> &[u8] {
        &self.hid_handlers
    }

    #[must_use]
    pub fn control_acks(&self) -> u32 {
        self.control_acks
    }

    #[must_use]
    pub fn control_replies(&self) -> &[Vec<u8>] {
        &self.control_replies
    }
}

impl UsbHidTransport for SimTransport {
    fn open(&mut self) -> TransportResult<()> {
        if self.open_failures > 0 {
            self.open_failures = self.open_failures.saturating_sub(1);
            return Err(TransportError::NotReady);
        }
        self.opened = true;
        Ok(())
    }

    fn register_event_handler(&mut self) {
        self.event_handler_registered = true;
    }

    fn request_receive(&mut self, len: usize) -> TransportResult<()> {
        if !self.opened {
            return Err(TransportError::NotReady);
        }
        if len != OUTPUT_REPORT_SIZE {
            return Err(TransportError::Busy);
        }
        self.receive_requests = self.receive_requests.saturating_add(1);
        Ok(())
    }

    fn take_received(&mut self, buffer: &mut [u8; OUTPUT_REPORT_SIZE]) -> usize {
        let Some(data) = self.pending.take() else {
            return 0;
        };
        let len = data.len().min(OUTPUT_REPORT_SIZE);
        for (dst, src) in buffer.iter_mut().zip(data.iter()) {
            *dst = *src;
        }
        len
    }

    fn send_report(&mut self, report: &[u8]) -> TransportResult<()> {
        if !self.opened {
            return Err(TransportError::Disconnected);
        }
        if self.send_failures > 0 {
            self.send_failures = self.send_failures.saturating_sub(1);
            return Err(TransportError::Busy);
        }
        self.sent.push(report.to_vec());
        Ok(())
    }
}

impl UsbBusControl for SimTransport {
    fn attach(&mut self) {
        self.attached = true;
        self.attach_count = self.attach_count.saturating_add(1);
    }

    fn detach(&mut self) {
        self.attached = false;
        self.detach_count = self.detach_count.saturating_add(1);
    }

    fn register_hid_event_handler(&mut self, instance: u8) {
        self.hid_handlers.push(instance);
    }

    fn control_status_ok(&mut self) {
        self.control_acks = self.control_acks.saturating_add(1);
    }

    fn control_send(&mut self, data: &[u8]) {
        self.control_replies.push(data.to_vec());
    }
}

const PIN_COUNT: usize = MAX_PIN as usize + 1;

/// Simulated GPIO ports A and B.
///
/// All pins idle high, which reads as "released" for the active-low keys.
#[derive(Debug, Clone)]
pub struct SimGpio {
    levels: [bool; PIN_COUNT],
    interrupts: Vec<u8>,
    writes: Vec<(u8, bool)>,
}

impl Default for SimGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGpio {
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: [true; PIN_COUNT],
            interrupts: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Drive an input pin. Out-of-range pins are ignored.
    pub fn set_level(&mut self, pin: u8, high: bool) {
        if let Some(level) = self.levels.get_mut(usize::from(pin)) {
            *level = high;
        }
    }

    /// Drive both encoder channels from a 2-bit `(B << 1) | A` sample.
    pub fn set_encoder(&mut self, pins: &PinMap, sample: u8) {
        self.set_level(pins.encoder_a, sample & 0b01 != 0);
        self.set_level(pins.encoder_b, sample & 0b10 != 0);
    }

    /// Pins that had edge interrupts enabled, in order.
    #[must_use]
    pub fn enabled_interrupts(&self) -> &[u8] {
        &self.interrupts
    }

    /// Output writes as `(pin, high)`, in order.
    #[must_use]
    pub fn pin_writes(&self) -> &[(u8, bool)] {
        &self.writes
    }
}

impl GpioBackend for SimGpio {
    fn port_read(&self, port: GpioPortId) -> u32 {
        let first = usize::from(port.index().saturating_mul(PINS_PER_PORT));
        self.levels
            .iter()
            .skip(first)
            .take(usize::from(PINS_PER_PORT))
            .zip(0u32..)
            .filter(|(high, _)| **high)
            .fold(0u32, |word, (_, bit)| word | 1u32.wrapping_shl(bit))
    }

    fn pin_level(&self, pin: u8) -> bool {
        self.levels.get(usize::from(pin)).copied().unwrap_or(true)
    }

    fn write_pin(&mut self, pin: u8, high: bool) {
        self.set_level(pin, high);
        self.writes.push((pin, high));
    }

    fn enable_edge_interrupt(&mut self, pin: u8) {
        self.interrupts.push(pin);
    }
}
