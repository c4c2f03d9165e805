//! Quadrature decoder for the volume encoder.
//!
//! Each distinct 2-bit sample `(B << 1) | A` is shifted into an 8-bit
//! history, so the history always holds the last four distinct samples.
//! A clockwise detent reads `01 -> 11 -> 10 -> 00` and a counter-clockwise
//! one reads `10 -> 11 -> 01 -> 00`, oldest sample in the high bits.

use hid_media_controller_protocol::{KeyFlag, KeycodeState};

/// History after one clockwise detent: `0b01_11_10_00`.
pub const ENCODER_CW: u8 = 0x78;
/// History after one counter-clockwise detent: `0b10_11_01_00`.
pub const ENCODER_CCW: u8 = 0xB4;
/// Bits of a raw sample that carry the two encoder channels.
pub const SAMPLE_MASK: u8 = 0x03;

/// Outcome of feeding one sample to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderStep {
    /// Sample repeated the previous one. Both volume flags must be cleared.
    #[default]
    Unchanged,
    /// Sample changed but the history matches no full detent.
    Transition,
    VolumeUp,
    VolumeDown,
}

impl EncoderStep {
    /// Flag to raise for this step, if any.
    #[must_use]
    pub const fn volume_flag(self) -> Option<KeyFlag> {
        match self {
            Self::VolumeUp => Some(KeyFlag::VolumeUp),
            Self::VolumeDown => Some(KeyFlag::VolumeDown),
            Self::Unchanged | Self::Transition => None,
        }
    }

    /// True when the step cancels any pending volume pulse.
    #[must_use]
    pub const fn clears_volume(self) -> bool {
        matches!(self, Self::Unchanged)
    }

    #[must_use]
    pub const fn is_detent(self) -> bool {
        matches!(self, Self::VolumeUp | Self::VolumeDown)
    }

    /// Apply this step to a key register.
    pub fn apply(self, keycode: &mut KeycodeState) {
        if self.clears_volume() {
            keycode.set(KeyFlag::VolumeUp, false);
            keycode.set(KeyFlag::VolumeDown, false);
        } else if let Some(flag) = self.volume_flag() {
            keycode.set(flag, true);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureDecoder {
    history: u8,
    previous_sample: u8,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the port value read at start-up.
    #[must_use]
    pub const fn new(initial_sample: u8) -> Self {
        Self {
            history: 0,
            previous_sample: initial_sample & SAMPLE_MASK,
        }
    }

    /// Feed one raw sample. Only the low two bits are used.
    pub fn update(&mut self, raw_sample: u8) -> EncoderStep {
        let sample = raw_sample & SAMPLE_MASK;
        if sample == self.previous_sample {
            return EncoderStep::Unchanged;
        }

        self.history = self.history.wrapping_shl(2) | sample;
        self.previous_sample = sample;

        match self.history {
            ENCODER_CW => EncoderStep::VolumeUp,
            ENCODER_CCW => EncoderStep::VolumeDown,
            _ => EncoderStep::Transition,
        }
    }

    #[must_use]
    pub const fn history(&self) -> u8 {
        self.history
    }

    #[must_use]
    pub const fn previous_sample(&self) -> u8 {
        self.previous_sample
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(0)
    }
}
