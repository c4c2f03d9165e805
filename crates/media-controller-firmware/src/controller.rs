//! Top-level controller.
//!
//! `MediaController` owns the hardware backends and wires the interrupt-side
//! handlers and the polling-side session to one [`SharedState`].

use crate::config::ControllerConfig;
use crate::dispatch::apply_mode;
use crate::error::FirmwareResult;
use crate::events::{BusEventHandler, KeyInputHandler};
use crate::hal::{DeviceEvent, GpioBackend, HidEvent, UsbBusControl, UsbHidTransport};
use crate::session::{DeviceSession, SessionMetrics, SessionState};
use crate::shared::SharedState;
use hid_media_controller_protocol::ControllerMode;
use media_controller_input::{ControllerPin, KeyEdge};
use tracing::info;

/// The media controller: session, event handlers and backends.
///
/// # Example
///
/// ```rust
/// use media_controller_firmware::prelude::*;
/// use media_controller_firmware::sim::{SimGpio, SimTransport};
///
/// let shared = SharedState::new();
/// let config = ControllerConfig::builder()
///     .initial_mode(ControllerMode::Youtube)
///     .build()
///     .expect("valid config");
/// let controller = MediaController::new(config, &shared, SimTransport::new(), SimGpio::new())
///     .expect("valid config");
///
/// assert_eq!(controller.mode(), ControllerMode::Youtube);
/// assert_eq!(controller.state(), SessionState::Init);
/// ```
#[derive(Debug)]
pub struct MediaController<'a, T, G>
where
    T: UsbHidTransport + UsbBusControl,
    G: GpioBackend,
{
    config: ControllerConfig,
    shared: &'a SharedState,
    transport: T,
    gpio: G,
    session: DeviceSession,
    bus: BusEventHandler,
    keys: KeyInputHandler,
}

impl<'a, T, G> MediaController<'a, T, G>
where
    T: UsbHidTransport + UsbBusControl,
    G: GpioBackend,
{
    /// Validate `config`, enable edge interrupts on the monitored pins and
    /// apply the initial mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: ControllerConfig,
        shared: &'a SharedState,
        transport: T,
        mut gpio: G,
    ) -> FirmwareResult<Self> {
        config.validate()?;
        let encoder = config.encoder()?;
        let initial_sample = encoder.sample(gpio.port_read(encoder.port()));

        for role in ControllerPin::MONITORED {
            gpio.enable_edge_interrupt(config.pins.pin(role));
        }
        apply_mode(shared, &mut gpio, &config.pins, config.initial_mode);
        info!("Youtube Media Controller {}", config.initial_mode);

        Ok(Self {
            config,
            shared,
            transport,
            gpio,
            session: DeviceSession::new(),
            bus: BusEventHandler::new(
                encoder,
                initial_sample,
                config.hid_instance,
                config.configuration_value,
            ),
            keys: KeyInputHandler::new(config.pins),
        })
    }

    /// Run one session transition. Never blocks.
    pub fn poll(&mut self) -> SessionState {
        self.session.step(
            self.shared,
            &mut self.transport,
            &mut self.gpio,
            &self.config.pins,
        )
    }

    /// Device-layer callback.
    pub fn on_device_event(&mut self, event: DeviceEvent) {
        self.bus
            .on_device_event(event, self.shared, &mut self.transport, &self.gpio);
    }

    /// HID function driver callback.
    pub fn on_hid_event(&mut self, event: HidEvent) {
        self.bus.on_hid_event(event, self.shared, &mut self.transport);
    }

    /// GPIO edge interrupt on `pin`.
    pub fn on_pin_edge(&mut self, pin: u8) -> KeyEdge {
        self.keys.on_edge(pin, self.shared, &mut self.gpio)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn mode(&self) -> ControllerMode {
        self.shared.mode()
    }

    #[must_use]
    pub fn metrics(&self) -> SessionMetrics {
        self.session.metrics()
    }

    #[must_use]
    pub fn session(&self) -> &DeviceSession {
        &self.session
    }

    #[must_use]
    pub fn bus_handler(&self) -> &BusEventHandler {
        &self.bus
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn shared(&self) -> &'a SharedState {
        self.shared
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }
}
