//! Board pin assignments.
//!
//! Pins are numbered flat across ports: port A is `0..16`, port B `16..32`.
//! `RB2` is therefore pin 18.

use super::{InputError, InputResult};
use serde::{Deserialize, Serialize};

pub const PINS_PER_PORT: u8 = 16;
pub const MAX_PIN: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpioPortId {
    A,
    B,
}

impl GpioPortId {
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    /// Port that owns a flat pin number.
    #[must_use]
    pub const fn of_pin(pin: u8) -> Option<Self> {
        match pin / PINS_PER_PORT {
            0 => Some(Self::A),
            1 => Some(Self::B),
            _ => None,
        }
    }
}

/// Logical role of a pin on the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerPin {
    EncoderA,
    EncoderB,
    EncoderButton,
    ModeSwitch,
    FunctionKey,
    Led,
    Prev,
    Play,
    Next,
}

impl ControllerPin {
    pub const ALL: [ControllerPin; 9] = [
        ControllerPin::EncoderA,
        ControllerPin::EncoderB,
        ControllerPin::EncoderButton,
        ControllerPin::ModeSwitch,
        ControllerPin::FunctionKey,
        ControllerPin::Led,
        ControllerPin::Prev,
        ControllerPin::Play,
        ControllerPin::Next,
    ];

    /// Pins that raise an edge interrupt.
    pub const MONITORED: [ControllerPin; 5] = [
        ControllerPin::Prev,
        ControllerPin::Next,
        ControllerPin::Play,
        ControllerPin::EncoderButton,
        ControllerPin::ModeSwitch,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EncoderA => "encoder_a",
            Self::EncoderB => "encoder_b",
            Self::EncoderButton => "encoder_button",
            Self::ModeSwitch => "mode_switch",
            Self::FunctionKey => "function_key",
            Self::Led => "led",
            Self::Prev => "prev",
            Self::Play => "play",
            Self::Next => "next",
        }
    }

    #[must_use]
    pub const fn is_monitored(self) -> bool {
        matches!(
            self,
            Self::Prev | Self::Next | Self::Play | Self::EncoderButton | Self::ModeSwitch
        )
    }
}

impl core::fmt::Display for ControllerPin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical pin number for every controller signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    pub encoder_a: u8,
    pub encoder_b: u8,
    pub encoder_button: u8,
    pub mode_switch: u8,
    pub function_key: u8,
    pub led: u8,
    pub prev: u8,
    pub play: u8,
    pub next: u8,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            encoder_a: 0,       // RA0
            encoder_b: 1,       // RA1
            encoder_button: 18, // RB2
            mode_switch: 19,    // RB3
            function_key: 20,   // RB4
            led: 4,             // RA4
            prev: 23,           // RB7
            play: 24,           // RB8
            next: 25,           // RB9
        }
    }
}

impl PinMap {
    #[must_use]
    pub const fn pin(&self, role: ControllerPin) -> u8 {
        match role {
            ControllerPin::EncoderA => self.encoder_a,
            ControllerPin::EncoderB => self.encoder_b,
            ControllerPin::EncoderButton => self.encoder_button,
            ControllerPin::ModeSwitch => self.mode_switch,
            ControllerPin::FunctionKey => self.function_key,
            ControllerPin::Led => self.led,
            ControllerPin::Prev => self.prev,
            ControllerPin::Play => self.play,
            ControllerPin::Next => self.next,
        }
    }

    /// Resolve a physical pin number back to its role.
    #[must_use]
    pub fn role(&self, pin: u8) -> Option<ControllerPin> {
        ControllerPin::ALL
            .into_iter()
            .find(|role| self.pin(*role) == pin)
    }

    /// Check every pin is in range and no two roles share a pin.
    pub fn validate(&self) -> InputResult<()> {
        for (index, role) in ControllerPin::ALL.into_iter().enumerate() {
            let pin = self.pin(role);
            if pin > MAX_PIN {
                return Err(InputError::InvalidPin(pin));
            }
            let mut later = ControllerPin::ALL.into_iter().skip(index.saturating_add(1));
            if let Some(other) = later.find(|other| self.pin(*other) == pin) {
                return Err(InputError::DuplicatePin {
                    pin,
                    first: role.as_str(),
                    second: other.as_str(),
                });
            }
        }
        Ok(())
    }
}

/// Where the two encoder channels sit in a GPIO port word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderPort {
    port: GpioPortId,
    mask: u32,
}

impl EncoderPort {
    /// `mask` must cover exactly two adjacent bits, channel A in the lower one.
    pub fn new(port: GpioPortId, mask: u32) -> InputResult<Self> {
        if mask.count_ones() != 2 || mask.checked_shr(mask.trailing_zeros()) != Some(0b11) {
            return Err(InputError::InvalidEncoderMask(mask));
        }
        Ok(Self { port, mask })
    }

    #[must_use]
    pub const fn port(&self) -> GpioPortId {
        self.port
    }

    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Extract the 2-bit `(B << 1) | A` sample from a raw port word.
    #[must_use]
    pub fn sample(&self, port_value: u32) -> u8 {
        let bits = (port_value & self.mask)
            .checked_shr(self.mask.trailing_zeros())
            .unwrap_or(0);
        u8::try_from(bits & 0b11).unwrap_or(0)
    }
}

impl Default for EncoderPort {
    fn default() -> Self {
        Self {
            port: GpioPortId::A,
            mask: 0x03,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_layout() {
        let pins = PinMap::default();
        assert_eq!(pins.pin(ControllerPin::EncoderButton), 18);
        assert_eq!(pins.pin(ControllerPin::Led), 4);
        assert_eq!(pins.role(25), Some(ControllerPin::Next));
        assert_eq!(pins.role(2), None);
        assert_eq!(pins.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let pins = PinMap {
            mode_switch: 18,
            ..PinMap::default()
        };
        assert_eq!(
            pins.validate(),
            Err(InputError::DuplicatePin {
                pin: 18,
                first: "encoder_button",
                second: "mode_switch",
            })
        );
    }

    #[test]
    fn test_out_of_range_pin_rejected() {
        let pins = PinMap {
            led: 32,
            ..PinMap::default()
        };
        assert_eq!(pins.validate(), Err(InputError::InvalidPin(32)));
    }

    #[test]
    fn test_port_of_pin() {
        assert_eq!(GpioPortId::of_pin(0), Some(GpioPortId::A));
        assert_eq!(GpioPortId::of_pin(18), Some(GpioPortId::B));
        assert_eq!(GpioPortId::of_pin(32), None);
    }

    #[test]
    fn test_encoder_port_sampling() -> Result<(), InputError> {
        let encoder = EncoderPort::default();
        assert_eq!(encoder.sample(0xFFFF_FFF2), 0b10);

        let shifted = EncoderPort::new(GpioPortId::B, 0x0C)?;
        assert_eq!(shifted.sample(0b0111), 0b01);
        Ok(())
    }

    #[test]
    fn test_encoder_mask_validation() {
        assert_eq!(
            EncoderPort::new(GpioPortId::A, 0x05),
            Err(InputError::InvalidEncoderMask(0x05))
        );
        assert_eq!(
            EncoderPort::new(GpioPortId::A, 0x07),
            Err(InputError::InvalidEncoderMask(0x07))
        );
        assert_eq!(
            EncoderPort::new(GpioPortId::A, 0),
            Err(InputError::InvalidEncoderMask(0))
        );
        assert!(EncoderPort::new(GpioPortId::A, 0xC000_0000).is_ok());
    }

    #[test]
    fn test_monitored_pins() {
        assert!(ControllerPin::MONITORED.iter().all(|p| p.is_monitored()));
        assert!(!ControllerPin::FunctionKey.is_monitored());
        assert!(!ControllerPin::Led.is_monitored());
    }
}
