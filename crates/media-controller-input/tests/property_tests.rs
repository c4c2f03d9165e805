//! Property-based tests for the encoder decoder and key edge mapper.
//!
//! Uses proptest with 500 cases for sample streams and quickcheck for the
//! smaller per-edge invariants.

use hid_media_controller_protocol::{KeyFlag, KeycodeState};
use media_controller_input::{
    ControllerPin, ENCODER_CCW, ENCODER_CW, EncoderStep, KeyEdge, PinMap, QuadratureDecoder,
    map_edge,
};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// A tick never raises both volume flags, and a detent is only reported
    /// when the history equals one of the two canonical patterns.
    #[test]
    fn prop_decoder_reports_at_most_one_direction(
        initial in 0u8..4,
        samples in proptest::collection::vec(0u8..4, 0..256),
    ) {
        let mut decoder = QuadratureDecoder::new(initial);
        for sample in samples {
            let mut keycode = KeycodeState::EMPTY;
            let step = decoder.update(sample);
            step.apply(&mut keycode);
            prop_assert!(
                !(keycode.volume_up() && keycode.volume_down()),
                "one tick raised both volume flags"
            );
            match step {
                EncoderStep::VolumeUp => prop_assert_eq!(decoder.history(), ENCODER_CW),
                EncoderStep::VolumeDown => prop_assert_eq!(decoder.history(), ENCODER_CCW),
                EncoderStep::Transition => {
                    prop_assert!(decoder.history() != ENCODER_CW && decoder.history() != ENCODER_CCW);
                }
                EncoderStep::Unchanged => {}
            }
        }
    }

    /// Repeating the previous sample always yields Unchanged, keeps the history
    /// and clears any pending volume flags.
    #[test]
    fn prop_repeated_sample_is_idempotent(
        samples in proptest::collection::vec(any::<u8>(), 1..64),
        code: u8,
    ) {
        let mut decoder = QuadratureDecoder::new(0);
        for sample in samples {
            decoder.update(sample);
        }
        let history = decoder.history();
        let previous = decoder.previous_sample();

        let mut keycode = KeycodeState::from_code(code);
        let step = decoder.update(previous);
        step.apply(&mut keycode);

        prop_assert_eq!(step, EncoderStep::Unchanged);
        prop_assert_eq!(decoder.history(), history);
        prop_assert!(!keycode.volume_up() && !keycode.volume_down());
        prop_assert_eq!(keycode.code() & !0x30, code & !0x30, "only volume bits may change");
    }

    /// Upper bits of a raw sample never influence decoding.
    #[test]
    fn prop_upper_bits_are_ignored(samples in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut raw = QuadratureDecoder::new(0);
        let mut masked = QuadratureDecoder::new(0);
        for sample in samples {
            prop_assert_eq!(raw.update(sample), masked.update(sample & 0x03));
        }
    }

    /// Every pin number resolves to the role it was assigned to.
    #[test]
    fn prop_pin_map_roles_resolve(index in 0usize..9) {
        let pins = PinMap::default();
        let role = ControllerPin::ALL.get(index).copied().unwrap_or(ControllerPin::Next);
        prop_assert_eq!(pins.role(pins.pin(role)), Some(role));
    }
}

#[quickcheck]
fn prop_key_pins_are_active_low(level_high: bool) -> bool {
    [
        (ControllerPin::Prev, KeyFlag::Prev),
        (ControllerPin::Next, KeyFlag::Next),
        (ControllerPin::Play, KeyFlag::Play),
        (ControllerPin::EncoderButton, KeyFlag::Mute),
    ]
    .into_iter()
    .all(|(pin, flag)| {
        map_edge(pin, level_high)
            == KeyEdge::Flag {
                flag,
                pressed: !level_high,
            }
    })
}

#[quickcheck]
fn prop_mode_switch_toggles_only_when_low(level_high: bool) -> bool {
    let edge = map_edge(ControllerPin::ModeSwitch, level_high);
    if level_high {
        edge == KeyEdge::Ignored
    } else {
        edge == KeyEdge::ToggleMode
    }
}

#[quickcheck]
fn prop_edge_only_touches_its_flag(code: u8, level_high: bool) -> bool {
    let mut keycode = KeycodeState::from_code(code);
    map_edge(ControllerPin::Play, level_high).apply(&mut keycode);
    keycode.code() & !KeyFlag::Play.mask() == code & !KeyFlag::Play.mask()
}
