//! Property-based tests for report encoding and the session send gate.

use hid_media_controller_protocol::{
    ControllerMode, KeyFlag, KeycodeState, OUTPUT_REPORT_SIZE, OutputReport,
};
use media_controller_firmware::sim::{SimGpio, SimTransport};
use media_controller_firmware::{
    ControllerConfig, DeviceEvent, FULL_SCREEN_STEPS, HidEvent, MediaController, ReportEncoder,
    SharedState, dispatch,
};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = ControllerMode> {
    prop_oneof![Just(ControllerMode::Youtube), Just(ControllerMode::Media)]
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Key(u8, bool),
    Ack,
    Poll,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..6, any::<bool>()).prop_map(|(bit, on)| Action::Key(bit, on)),
        Just(Action::Ack),
        Just(Action::Poll),
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Outside a sequence the report carries the keys with `func` taken from
    /// the live level, and the report ID from the mode.
    #[test]
    fn prop_key_frame_mirrors_register(
        code: u8,
        mode in mode_strategy(),
        function_pressed: bool,
    ) {
        let mut encoder = ReportEncoder::new();
        let keycode = KeycodeState::from_code(code);
        let report = encoder.encode(keycode, mode, function_pressed);
        let arms = mode.is_youtube() && function_pressed && keycode.next();

        prop_assert_eq!(report.report_id, mode.report_id().to_raw());
        prop_assert_eq!(encoder.is_sequence_active(), arms);
        if arms {
            prop_assert_eq!(report.code, 0);
        } else {
            prop_assert_eq!(report.code, keycode.with(KeyFlag::Func, function_pressed).code());
        }
    }

    /// Once armed, the sequence plays all six frames regardless of input.
    #[test]
    fn prop_sequence_ignores_input(
        inputs in proptest::collection::vec(
            (any::<u8>(), mode_strategy(), any::<bool>()),
            usize::from(FULL_SCREEN_STEPS),
        ),
    ) {
        let mut encoder = ReportEncoder::new();
        encoder.encode(KeycodeState::from_code(0x01), ControllerMode::Youtube, true);

        let mut frames = Vec::new();
        for (code, mode, function_pressed) in inputs {
            frames.push(encoder.encode(KeycodeState::from_code(code), mode, function_pressed).as_bytes());
        }
        prop_assert_eq!(
            frames,
            vec![[0x02, 0x10], [0x02, 0x00], [0x02, 0x20], [0x02, 0x00], [0x01, 0x81], [0x01, 0x00]]
        );
        prop_assert_eq!(encoder.sequence_remaining(), 0);
    }

    /// Only report ID 0x01 with command 1 or 2 selects a mode.
    #[test]
    fn prop_dispatch_accepts_only_mode_commands(
        block in proptest::collection::vec(any::<u8>(), OUTPUT_REPORT_SIZE),
    ) {
        let report = OutputReport::parse(&block);
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            let expected = match (report.report_id, report.command) {
                (0x01, 0x01) => Some(ControllerMode::Youtube),
                (0x01, 0x02) => Some(ControllerMode::Media),
                _ => None,
            };
            prop_assert_eq!(dispatch(&report), expected);
        }
    }

    /// At most one report is sent per completion event, plus the first.
    #[test]
    fn prop_send_gate_never_overruns(
        actions in proptest::collection::vec(action_strategy(), 0..200),
    ) {
        let shared = SharedState::new();
        let controller = MediaController::new(
            ControllerConfig::default(),
            &shared,
            SimTransport::new(),
            SimGpio::new(),
        );
        prop_assert!(controller.is_ok());
        let Ok(mut controller) = controller else {
            return Ok(());
        };
        controller.poll();
        controller.on_device_event(DeviceEvent::Configured { configuration_value: 1 });

        let mut acks = 0usize;
        for action in actions {
            match action {
                Action::Key(bit, on) => {
                    if let Some(flag) = KeyFlag::ALL.get(usize::from(bit)) {
                        shared.set_key(*flag, on);
                    }
                }
                Action::Ack => {
                    if !shared.is_report_sent_complete() {
                        acks += 1;
                    }
                    controller.on_hid_event(HidEvent::ReportSent);
                }
                Action::Poll => {
                    controller.poll();
                }
            }
            prop_assert!(
                controller.transport().sent_reports().len() <= acks + 1,
                "sent {} reports with {} completions",
                controller.transport().sent_reports().len(),
                acks
            );
        }
    }
}
