//! Fuzzes the quadrature decoder with arbitrary sample streams.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_quadrature_decoder
#![no_main]
use hid_media_controller_protocol::KeycodeState;
use libfuzzer_sys::fuzz_target;
use media_controller_input::{ENCODER_CCW, ENCODER_CW, EncoderStep, QuadratureDecoder};

fuzz_target!(|data: &[u8]| {
    let Some((&initial, samples)) = data.split_first() else {
        return;
    };
    let mut decoder = QuadratureDecoder::new(initial);
    let mut keycode = KeycodeState::EMPTY;
    for &sample in samples {
        let step = decoder.update(sample);
        step.apply(&mut keycode);
        if step == EncoderStep::Unchanged {
            assert!(!keycode.volume_up() && !keycode.volume_down());
        }
        match step {
            EncoderStep::VolumeUp => assert_eq!(decoder.history(), ENCODER_CW),
            EncoderStep::VolumeDown => assert_eq!(decoder.history(), ENCODER_CCW),
            EncoderStep::Unchanged | EncoderStep::Transition => {}
        }
    }
});
