//! Property-based tests for the media controller HID protocol.
//!
//! Uses proptest with 500 cases to verify invariants on the key register,
//! report parsing and mode command decoding.

use hid_media_controller_protocol::{
    CHANGE_DETECT_MASK, InputReport, KeyFlag, KeycodeState, ModeCommand, OUTPUT_REPORT_SIZE,
    OutputReport,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// The flag view and the code byte must agree bit for bit for every value.
    #[test]
    fn prop_flags_and_code_are_bit_identical(code: u8) {
        let state = KeycodeState::from_code(code);
        let mut rebuilt = 0u8;
        for flag in KeyFlag::ALL {
            if state.contains(flag) {
                rebuilt |= flag.mask();
            }
        }
        prop_assert_eq!(rebuilt, code, "flag view must rebuild code {:#04x}", code);
        prop_assert_eq!(state.code(), code);
        prop_assert_eq!(state.next(), code & 0x01 != 0);
        prop_assert_eq!(state.prev(), code & 0x02 != 0);
        prop_assert_eq!(state.play(), code & 0x04 != 0);
        prop_assert_eq!(state.mute(), code & 0x08 != 0);
        prop_assert_eq!(state.volume_up(), code & 0x10 != 0);
        prop_assert_eq!(state.volume_down(), code & 0x20 != 0);
        prop_assert_eq!(state.reserved(), code & 0x40 != 0);
        prop_assert_eq!(state.func(), code & 0x80 != 0);
    }

    /// Setting a flag must only touch that flag's bit.
    #[test]
    fn prop_set_touches_one_bit(code: u8, index in 0usize..8, on: bool) {
        let flag = KeyFlag::ALL.get(index).copied().unwrap_or(KeyFlag::Next);
        let mut state = KeycodeState::from_code(code);
        state.set(flag, on);
        prop_assert_eq!(state.contains(flag), on);
        prop_assert_eq!(
            state.code() & !flag.mask(),
            code & !flag.mask(),
            "set({}) must leave the other bits alone",
            flag
        );
    }

    /// masked() must drop exactly the func and reserved bits.
    #[test]
    fn prop_masked_drops_func_and_reserved(code: u8) {
        let state = KeycodeState::from_code(code);
        prop_assert_eq!(state.masked(), code & CHANGE_DETECT_MASK);
        prop_assert_eq!(state.with(KeyFlag::Func, true).masked(), state.masked());
    }

    /// Input report parse must succeed for at least two bytes and keep the header.
    #[test]
    fn prop_input_report_parse(data in proptest::collection::vec(any::<u8>(), 2..=64)) {
        let report = InputReport::parse(&data);
        prop_assert!(report.is_ok(), "parse must succeed for {} bytes", data.len());
        if let Ok(report) = report {
            prop_assert_eq!(Some(&report.report_id), data.first());
            prop_assert_eq!(Some(&report.code), data.get(1));
        }
    }

    /// Output report parse must reject every length other than 64.
    #[test]
    fn prop_output_report_rejects_wrong_length(
        data in proptest::collection::vec(any::<u8>(), 0..=128)
            .prop_filter("not a full block", |d| d.len() != OUTPUT_REPORT_SIZE),
    ) {
        prop_assert!(OutputReport::parse(&data).is_err());
    }

    /// A full block parses and reproduces the same bytes.
    #[test]
    fn prop_output_report_preserves_block(data in proptest::array::uniform32(any::<u8>()), tail in proptest::array::uniform32(any::<u8>())) {
        let mut block = [0u8; OUTPUT_REPORT_SIZE];
        let (head, rest) = block.split_at_mut(32);
        head.copy_from_slice(&data);
        rest.copy_from_slice(&tail);
        let report = OutputReport::parse(&block);
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            prop_assert_eq!(report.to_bytes(), block);
        }
    }

    /// Only report ID 0x01 with command 0x01 or 0x02 decodes to a mode command.
    #[test]
    fn prop_mode_command_requires_youtube_collection(report_id: u8, command: u8) {
        let report = OutputReport { report_id, command, ..OutputReport::default() };
        let expected = if report_id == 0x01 { ModeCommand::from_raw(command) } else { None };
        prop_assert_eq!(report.mode_command(), expected);
        if let Some(cmd) = report.mode_command() {
            prop_assert!(cmd.to_raw() == 0x01 || cmd.to_raw() == 0x02);
        }
    }
}
