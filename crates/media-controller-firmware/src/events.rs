//! Interrupt-context handlers.
//!
//! These run from the USB and GPIO callbacks. They only touch
//! [`SharedState`] and their own fields; the session state machine is never
//! advanced from here.

use crate::dispatch::apply_mode;
use crate::hal::{DeviceEvent, GpioBackend, HidEvent, UsbBusControl};
use crate::shared::SharedState;
use media_controller_input::{
    EncoderPort, EncoderStep, KeyEdge, PinMap, QuadratureDecoder, key_label, map_edge,
};
use tracing::{debug, info};

/// HID protocol code for report protocol.
pub const HID_PROTOCOL_REPORT: u8 = 1;

/// Handles device-layer and HID function events.
#[derive(Debug, Clone)]
pub struct BusEventHandler {
    decoder: QuadratureDecoder,
    encoder: EncoderPort,
    hid_instance: u8,
    configuration_value: u8,
    idle_rate: u8,
    protocol: u8,
}

impl BusEventHandler {
    #[must_use]
    pub fn new(
        encoder: EncoderPort,
        initial_sample: u8,
        hid_instance: u8,
        configuration_value: u8,
    ) -> Self {
        Self {
            decoder: QuadratureDecoder::new(initial_sample),
            encoder,
            hid_instance,
            configuration_value,
            idle_rate: 0,
            protocol: HID_PROTOCOL_REPORT,
        }
    }

    pub fn on_device_event<B, G>(
        &mut self,
        event: DeviceEvent,
        shared: &SharedState,
        bus: &mut B,
        gpio: &G,
    ) where
        B: UsbBusControl,
        G: GpioBackend,
    {
        match event {
            DeviceEvent::StartOfFrame => {
                self.sample_encoder(shared, gpio);
            }
            DeviceEvent::Reset | DeviceEvent::Deconfigured => {
                shared.set_configured(false);
                info!(?event, "device deconfigured");
            }
            DeviceEvent::Configured {
                configuration_value,
            } => {
                if configuration_value == self.configuration_value {
                    shared.set_configured(true);
                    bus.register_hid_event_handler(self.hid_instance);
                    info!(configuration_value, "device configured");
                }
            }
            DeviceEvent::PowerDetected => bus.attach(),
            DeviceEvent::PowerRemoved => bus.detach(),
            DeviceEvent::Suspended | DeviceEvent::Resumed | DeviceEvent::Error => {}
        }
    }

    pub fn on_hid_event<B: UsbBusControl>(
        &mut self,
        event: HidEvent,
        shared: &SharedState,
        bus: &mut B,
    ) {
        match event {
            HidEvent::ReportSent => shared.set_report_sent_complete(true),
            HidEvent::ReportReceived => shared.mark_report_received(),
            HidEvent::SetIdle { duration } => {
                self.idle_rate = duration;
                bus.control_status_ok();
            }
            HidEvent::GetIdle => bus.control_send(&[self.idle_rate]),
            HidEvent::SetProtocol { protocol } => {
                self.protocol = protocol;
                bus.control_status_ok();
            }
            HidEvent::GetProtocol => bus.control_send(&[self.protocol]),
            HidEvent::ControlTransferDataSent => {}
        }
    }

    fn sample_encoder<G: GpioBackend>(&mut self, shared: &SharedState, gpio: &G) {
        let sample = self.encoder.sample(gpio.port_read(self.encoder.port()));
        let step = self.decoder.update(sample);
        if step != EncoderStep::Unchanged {
            debug!(sample, "encoder");
        }
        shared.apply_encoder_step(step);
    }

    #[must_use]
    pub fn idle_rate(&self) -> u8 {
        self.idle_rate
    }

    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    #[must_use]
    pub fn decoder(&self) -> &QuadratureDecoder {
        &self.decoder
    }
}

/// Handles edge interrupts on the five monitored pins.
#[derive(Debug, Clone, Copy)]
pub struct KeyInputHandler {
    pins: PinMap,
}

impl KeyInputHandler {
    #[must_use]
    pub fn new(pins: PinMap) -> Self {
        Self { pins }
    }

    /// Handle an edge on physical `pin`, reading its current level from `gpio`.
    pub fn on_edge<G: GpioBackend>(&self, pin: u8, shared: &SharedState, gpio: &mut G) -> KeyEdge {
        let Some(role) = self.pins.role(pin) else {
            return KeyEdge::Ignored;
        };
        let edge = map_edge(role, gpio.pin_level(pin));
        match edge {
            KeyEdge::Flag { .. } => {
                debug!("{}", key_label(role));
                shared.apply_key_edge(edge);
            }
            KeyEdge::ToggleMode => {
                debug!("{}", key_label(role));
                apply_mode(shared, gpio, &self.pins, shared.mode().toggled());
            }
            KeyEdge::Ignored => {}
        }
        edge
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::sim::{SimGpio, SimTransport};
    use alloc::vec;
    use hid_media_controller_protocol::{ControllerMode, KeyFlag};

    fn handler() -> BusEventHandler {
        BusEventHandler::new(EncoderPort::default(), 0, 0, 1)
    }

    #[test]
    fn test_configured_registers_hid_handler() {
        let shared = SharedState::new();
        let mut bus = SimTransport::new();
        let gpio = SimGpio::new();
        let mut handler = handler();

        handler.on_device_event(
            DeviceEvent::Configured {
                configuration_value: 2,
            },
            &shared,
            &mut bus,
            &gpio,
        );
        assert!(!shared.is_configured());
        assert!(bus.hid_handlers().is_empty());

        handler.on_device_event(
            DeviceEvent::Configured {
                configuration_value: 1,
            },
            &shared,
            &mut bus,
            &gpio,
        );
        assert!(shared.is_configured());
        assert_eq!(bus.hid_handlers(), &[0u8]);

        handler.on_device_event(DeviceEvent::Reset, &shared, &mut bus, &gpio);
        assert!(!shared.is_configured());
    }

    #[test]
    fn test_power_events_attach_and_detach() {
        let shared = SharedState::new();
        let mut bus = SimTransport::new();
        let gpio = SimGpio::new();
        let mut handler = handler();

        handler.on_device_event(DeviceEvent::PowerDetected, &shared, &mut bus, &gpio);
        assert!(bus.is_attached());
        handler.on_device_event(DeviceEvent::PowerRemoved, &shared, &mut bus, &gpio);
        assert!(!bus.is_attached());
        assert_eq!(bus.attach_count(), 1);
        assert_eq!(bus.detach_count(), 1);
    }

    #[test]
    fn test_start_of_frame_decodes_encoder() {
        let shared = SharedState::new();
        let mut bus = SimTransport::new();
        let mut gpio = SimGpio::new();
        let pins = PinMap::default();
        let mut handler = handler();

        for sample in [0b01, 0b11, 0b10, 0b00] {
            gpio.set_encoder(&pins, sample);
            handler.on_device_event(DeviceEvent::StartOfFrame, &shared, &mut bus, &gpio);
        }
        assert!(shared.keycode().volume_up());

        handler.on_device_event(DeviceEvent::StartOfFrame, &shared, &mut bus, &gpio);
        assert!(!shared.keycode().volume_up());
    }

    #[test]
    fn test_idle_and_protocol_requests() {
        let shared = SharedState::new();
        let mut bus = SimTransport::new();
        let mut handler = handler();

        handler.on_hid_event(HidEvent::GetProtocol, &shared, &mut bus);
        handler.on_hid_event(HidEvent::SetIdle { duration: 25 }, &shared, &mut bus);
        handler.on_hid_event(HidEvent::GetIdle, &shared, &mut bus);
        handler.on_hid_event(HidEvent::SetProtocol { protocol: 0 }, &shared, &mut bus);
        handler.on_hid_event(HidEvent::GetProtocol, &shared, &mut bus);
        handler.on_hid_event(HidEvent::ControlTransferDataSent, &shared, &mut bus);

        assert_eq!(handler.idle_rate(), 25);
        assert_eq!(handler.protocol(), 0);
        assert_eq!(bus.control_acks(), 2);
        assert_eq!(bus.control_replies(), &[vec![1u8], vec![25u8], vec![0u8]]);
    }

    #[test]
    fn test_report_flags() {
        let shared = SharedState::new();
        let mut bus = SimTransport::new();
        let mut handler = handler();
        shared.set_report_sent_complete(false);

        handler.on_hid_event(HidEvent::ReportSent, &shared, &mut bus);
        handler.on_hid_event(HidEvent::ReportReceived, &shared, &mut bus);
        assert!(shared.is_report_sent_complete());
        assert!(shared.is_report_received());
    }

    #[test]
    fn test_key_edges() {
        let shared = SharedState::new();
        let mut gpio = SimGpio::new();
        let pins = PinMap::default();
        let keys = KeyInputHandler::new(pins);

        gpio.set_level(pins.next, false);
        let edge = keys.on_edge(pins.next, &shared, &mut gpio);
        assert_eq!(
            edge,
            KeyEdge::Flag {
                flag: KeyFlag::Next,
                pressed: true
            }
        );
        assert!(shared.keycode().next());

        gpio.set_level(pins.next, true);
        keys.on_edge(pins.next, &shared, &mut gpio);
        assert!(!shared.keycode().next());

        assert_eq!(keys.on_edge(2, &shared, &mut gpio), KeyEdge::Ignored);
    }

    #[test]
    fn test_mode_switch_toggles_on_press_only() {
        let shared = SharedState::new();
        let mut gpio = SimGpio::new();
        let pins = PinMap::default();
        let keys = KeyInputHandler::new(pins);

        gpio.set_level(pins.mode_switch, false);
        keys.on_edge(pins.mode_switch, &shared, &mut gpio);
        assert_eq!(shared.mode(), ControllerMode::Youtube);
        assert!(gpio.pin_level(pins.led));

        gpio.set_level(pins.mode_switch, true);
        keys.on_edge(pins.mode_switch, &shared, &mut gpio);
        assert_eq!(shared.mode(), ControllerMode::Youtube);

        gpio.set_level(pins.mode_switch, false);
        keys.on_edge(pins.mode_switch, &shared, &mut gpio);
        assert_eq!(shared.mode(), ControllerMode::Media);
        assert!(!gpio.pin_level(pins.led));
    }
}
