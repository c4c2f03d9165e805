//! Device session state machine.
//!
//! Advanced only from the polling loop, one transition per [`DeviceSession::step`].
//! Callbacks communicate with it exclusively through [`SharedState`].

use crate::dispatch::{apply_mode, dispatch};
use crate::error::FirmwareResult;
use crate::hal::{GpioBackend, UsbHidTransport};
use crate::report::ReportEncoder;
use crate::shared::SharedState;
use hid_media_controller_protocol::{OUTPUT_REPORT_SIZE, OutputReport};
use media_controller_input::PinMap;
use tracing::{debug, info, trace, warn};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Device layer not yet opened.
    #[default]
    Init,
    /// Opened, waiting for the host to select a configuration.
    WaitForConfiguration,
    /// Re-checked every pass, since the host may deconfigure at any time.
    CheckIfConfigured,
    /// Consume a pending output report and re-arm the receive.
    CheckForOutputReport,
    /// Send the next input report if the sender is idle.
    EmulateKeyboard,
    /// Reserved. No transition leads here.
    Error,
}

impl SessionState {
    /// Get the state as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::WaitForConfiguration => "WaitForConfiguration",
            Self::CheckIfConfigured => "CheckIfConfigured",
            Self::CheckForOutputReport => "CheckForOutputReport",
            Self::EmulateKeyboard => "EmulateKeyboard",
            Self::Error => "Error",
        }
    }

    /// True once the device layer has been opened.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Init)
    }
}

impl core::fmt::Display for SessionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionMetrics {
    /// Calls to `open()`, successful or not.
    pub open_attempts: u64,
    /// Input reports accepted by the transport.
    pub reports_sent: u64,
    /// Input reports the transport rejected.
    pub send_failures: u64,
    /// Receive requests rejected or malformed output reports.
    pub receive_failures: u64,
    /// Output reports taken from the transport.
    pub output_reports: u64,
    /// Resets after the host deconfigured the device.
    pub state_resets: u64,
}

impl SessionMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one call to `open()`.
    pub fn record_open_attempt(&mut self) {
        self.open_attempts = self.open_attempts.saturating_add(1);
    }

    /// Count a report the transport accepted.
    pub fn record_sent(&mut self) {
        self.reports_sent = self.reports_sent.saturating_add(1);
    }

    /// Count a report the transport rejected.
    pub fn record_send_failure(&mut self) {
        self.send_failures = self.send_failures.saturating_add(1);
    }

    /// Count a failed receive request or a malformed output report.
    pub fn record_receive_failure(&mut self) {
        self.receive_failures = self.receive_failures.saturating_add(1);
    }

    /// Count an output report copied out of the transport.
    pub fn record_output_report(&mut self) {
        self.output_reports = self.output_reports.saturating_add(1);
    }

    /// Count a reset after deconfiguration.
    pub fn record_reset(&mut self) {
        self.state_resets = self.state_resets.saturating_add(1);
    }
}

/// The USB session: configuration lifecycle plus the receive/send cycle.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    state: SessionState,
    encoder: ReportEncoder,
    output_buffer: [u8; OUTPUT_REPORT_SIZE],
    previous_code: u8,
    metrics: SessionMetrics,
}

impl DeviceSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Init,
            encoder: ReportEncoder::new(),
            output_buffer: [0; OUTPUT_REPORT_SIZE],
            previous_code: 0,
            metrics: SessionMetrics::new(),
        }
    }

    /// Run one transition and return the new state.
    pub fn step<T, G>(
        &mut self,
        shared: &SharedState,
        transport: &mut T,
        gpio: &mut G,
        pins: &PinMap,
    ) -> SessionState
    where
        T: UsbHidTransport,
        G: GpioBackend,
    {
        match self.state {
            SessionState::Init => {
                self.metrics.record_open_attempt();
                match transport.open() {
                    Ok(()) => {
                        transport.register_event_handler();
                        info!("USB device layer opened");
                        self.transition(SessionState::WaitForConfiguration);
                    }
                    Err(e) => trace!(error = %e, "device layer not ready"),
                }
            }
            SessionState::WaitForConfiguration => {
                if shared.is_configured() {
                    shared.clear_report_received();
                    shared.clear_transient();
                    self.arm_receive(transport);
                    self.transition(SessionState::CheckIfConfigured);
                }
            }
            SessionState::CheckIfConfigured => {
                if shared.is_configured() {
                    self.transition(SessionState::CheckForOutputReport);
                } else {
                    self.reset(shared);
                    self.transition(SessionState::WaitForConfiguration);
                }
            }
            SessionState::CheckForOutputReport => {
                if shared.take_report_received() {
                    self.handle_output_report(shared, transport, gpio, pins);
                }
                self.transition(SessionState::EmulateKeyboard);
            }
            SessionState::EmulateKeyboard => {
                self.emulate_keyboard(shared, transport, gpio, pins);
                self.transition(SessionState::CheckIfConfigured);
            }
            SessionState::Error => {}
        }
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "session transition");
        }
        self.state = next;
    }

    /// Clear receive state, mark the sender idle and zero the output buffer.
    fn reset(&mut self, shared: &SharedState) {
        shared.clear_report_received();
        shared.set_report_sent_complete(true);
        self.output_buffer = [0; OUTPUT_REPORT_SIZE];
        self.metrics.record_reset();
        info!("device deconfigured, session reset");
    }

    fn arm_receive<T: UsbHidTransport>(&mut self, transport: &mut T) {
        if let Err(e) = request_output_report(transport) {
            warn!(error = %e, "failed to arm output report receive");
            self.metrics.record_receive_failure();
        }
    }

    /// Copy the received report, re-arm the receive, then act on the copy.
    fn handle_output_report<T, G>(
        &mut self,
        shared: &SharedState,
        transport: &mut T,
        gpio: &mut G,
        pins: &PinMap,
    ) where
        T: UsbHidTransport,
        G: GpioBackend,
    {
        let received = self.take_output_report(transport);
        self.arm_receive(transport);
        match received {
            Ok(report) => {
                self.metrics.record_output_report();
                if let Some(mode) = dispatch(&report) {
                    apply_mode(shared, gpio, pins, mode);
                }
            }
            Err(e) => {
                warn!(error = %e, "discarding output report");
                self.metrics.record_receive_failure();
            }
        }
    }

    fn take_output_report<T: UsbHidTransport>(
        &mut self,
        transport: &mut T,
    ) -> FirmwareResult<OutputReport> {
        let len = transport.take_received(&mut self.output_buffer);
        let data = self
            .output_buffer
            .get(..len)
            .unwrap_or(self.output_buffer.as_slice());
        Ok(OutputReport::parse(data)?)
    }

    /// Send one report if the sender is idle and there is something new.
    ///
    /// Every pass that finds the sender idle clears the transient key bits,
    /// whether or not it sends.
    fn emulate_keyboard<T, G>(
        &mut self,
        shared: &SharedState,
        transport: &mut T,
        gpio: &mut G,
        pins: &PinMap,
    ) where
        T: UsbHidTransport,
        G: GpioBackend,
    {
        if !shared.is_report_sent_complete() {
            return;
        }

        let keycode = shared.clear_transient();
        let mut previous = keycode.masked();

        if previous != self.previous_code || self.encoder.is_sequence_active() {
            let function_pressed = !gpio.pin_level(pins.function_key);
            let report = self.encoder.encode(keycode, shared.mode(), function_pressed);
            previous = report.keycode().masked();

            match transport.send_report(&report.as_bytes()) {
                Ok(()) => {
                    shared.set_report_sent_complete(false);
                    self.metrics.record_sent();
                    debug!(
                        report_id = report.report_id,
                        code = report.code,
                        "input report sent"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "input report rejected");
                    self.metrics.record_send_failure();
                }
            }
        }

        self.previous_code = previous;
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn metrics(&self) -> SessionMetrics {
        self.metrics
    }

    #[must_use]
    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }

    /// The last output report block copied from the transport.
    #[must_use]
    pub fn output_buffer(&self) -> &[u8; OUTPUT_REPORT_SIZE] {
        &self.output_buffer
    }
}

impl Default for DeviceSession {
    fn default() -> Self {
        Self::new()
    }
}

fn request_output_report<T: UsbHidTransport>(transport: &mut T) -> FirmwareResult<()> {
    transport.request_receive(OUTPUT_REPORT_SIZE)?;
    Ok(())
}
