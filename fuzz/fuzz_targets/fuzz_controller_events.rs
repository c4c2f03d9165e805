//! Fuzzes the controller with arbitrary interleavings of callbacks and polls.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_controller_events
#![no_main]
use libfuzzer_sys::fuzz_target;
use media_controller_firmware::prelude::*;
use media_controller_firmware::sim::{SimGpio, SimTransport};

fuzz_target!(|data: &[u8]| {
    let shared = SharedState::new();
    let Ok(mut controller) = MediaController::new(
        ControllerConfig::default(),
        &shared,
        SimTransport::new(),
        SimGpio::new(),
    ) else {
        return;
    };
    let pins = controller.config().pins;

    let mut completions = 0usize;
    for pair in data.chunks_exact(2) {
        let [op, arg] = [pair[0], pair[1]];
        let idle_before = shared.is_report_sent_complete();
        match op % 8 {
            0 => {
                controller.poll();
            }
            1 => controller.on_device_event(DeviceEvent::Configured {
                configuration_value: arg % 3,
            }),
            2 => controller.on_device_event(DeviceEvent::Deconfigured),
            3 => {
                controller.gpio_mut().set_encoder(&pins, arg);
                controller.on_device_event(DeviceEvent::StartOfFrame);
            }
            4 => controller.on_hid_event(HidEvent::ReportSent),
            5 => {
                let mut block = [0u8; 64];
                block[0] = 0x01;
                block[1] = arg % 4;
                controller.transport_mut().queue_output_report(block);
                controller.on_hid_event(HidEvent::ReportReceived);
            }
            6 => {
                let pin = arg % 32;
                controller.gpio_mut().set_level(pin, arg & 0x80 == 0);
                controller.on_pin_edge(pin);
            }
            _ => controller.on_hid_event(HidEvent::SetIdle { duration: arg }),
        }
        // A deconfigure reset also frees the sender.
        if !idle_before && shared.is_report_sent_complete() {
            completions += 1;
        }
        assert!(controller.transport().sent_reports().len() <= completions + 1);
    }
});
