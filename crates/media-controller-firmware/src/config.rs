//! Board-level configuration.

use crate::error::{FirmwareError, FirmwareResult};
use hid_media_controller_protocol::ControllerMode;
use media_controller_input::{EncoderPort, GpioPortId, PinMap};
use serde::{Deserialize, Serialize};

/// Controller configuration.
///
/// Fixed per board; there is no runtime configuration source. All fields are
/// plain values so the struct can live in flash as a `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// HID function driver instance the controller reports on.
    ///
    /// Default: 0.
    pub hid_instance: u8,

    /// Configuration value the host must select before reports flow.
    ///
    /// Default: 1.
    pub configuration_value: u8,

    /// Port holding both encoder channels.
    pub encoder_port: GpioPortId,

    /// Bits of `encoder_port` wired to channel A (low bit) and B (high bit).
    ///
    /// Default: `0x03`.
    pub encoder_mask: u32,

    /// Physical pin for every signal.
    pub pins: PinMap,

    /// Mode selected at start-up.
    ///
    /// Default: media.
    pub initial_mode: ControllerMode,
}

impl ControllerConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration value is zero, the encoder mask
    /// is not two adjacent bits, or two signals share a pin.
    pub fn validate(&self) -> FirmwareResult<()> {
        if self.configuration_value == 0 {
            return Err(FirmwareError::InvalidConfiguration(
                "configuration_value must be nonzero",
            ));
        }
        self.encoder()?;
        self.pins.validate()?;
        Ok(())
    }

    /// Encoder channel layout described by `encoder_port` and `encoder_mask`.
    ///
    /// # Errors
    ///
    /// Returns an error if `encoder_mask` is not two adjacent bits.
    pub fn encoder(&self) -> FirmwareResult<EncoderPort> {
        Ok(EncoderPort::new(self.encoder_port, self.encoder_mask)?)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            hid_instance: 0,
            configuration_value: 1,
            encoder_port: GpioPortId::A,
            encoder_mask: 0x03,
            pins: PinMap::default(),
            initial_mode: ControllerMode::Media,
        }
    }
}

/// Builder for `ControllerConfig`.
#[derive(Debug, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    #[must_use]
    pub fn hid_instance(mut self, instance: u8) -> Self {
        self.config.hid_instance = instance;
        self
    }

    #[must_use]
    pub fn configuration_value(mut self, value: u8) -> Self {
        self.config.configuration_value = value;
        self
    }

    /// Set the encoder port and channel mask.
    #[must_use]
    pub fn encoder(mut self, port: GpioPortId, mask: u32) -> Self {
        self.config.encoder_port = port;
        self.config.encoder_mask = mask;
        self
    }

    #[must_use]
    pub fn pins(mut self, pins: PinMap) -> Self {
        self.config.pins = pins;
        self
    }

    #[must_use]
    pub fn initial_mode(mut self, mode: ControllerMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> FirmwareResult<ControllerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
