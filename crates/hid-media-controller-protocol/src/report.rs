//! Input and output report layouts

use super::{
    INPUT_REPORT_SIZE, KeycodeState, MediaControllerError, MediaControllerResult,
    OUTPUT_REPORT_SIZE, OUTPUT_REPORT_VALUES,
};
use serde::{Deserialize, Serialize};

/// Report IDs used by the controller's HID collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReportId {
    Youtube = 0x01,
    Media = 0x02,
}

impl ReportId {
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Youtube),
            0x02 => Some(Self::Media),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_raw(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ReportId {
    type Error = MediaControllerError;

    fn try_from(value: u8) -> MediaControllerResult<Self> {
        Self::from_raw(value).ok_or(MediaControllerError::InvalidReportId(value))
    }
}

/// Operating mode of the controller.
///
/// Youtube mode reports on collection `0x01` and enables the full-screen
/// chord; media mode reports on the generic collection `0x02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    Youtube,
    #[default]
    Media,
}

impl ControllerMode {
    #[must_use]
    pub const fn from_youtube(is_youtube: bool) -> Self {
        if is_youtube { Self::Youtube } else { Self::Media }
    }

    #[must_use]
    pub const fn is_youtube(self) -> bool {
        matches!(self, Self::Youtube)
    }

    /// Report ID used for normal (non-sequence) input reports in this mode.
    #[must_use]
    pub const fn report_id(self) -> ReportId {
        match self {
            Self::Youtube => ReportId::Youtube,
            Self::Media => ReportId::Media,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Youtube => Self::Media,
            Self::Media => Self::Youtube,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Media => "media",
        }
    }
}

impl core::fmt::Display for ControllerMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode selection commands carried in output report byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModeCommand {
    SelectYoutube = 0x01,
    SelectMedia = 0x02,
}

impl ModeCommand {
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::SelectYoutube),
            0x02 => Some(Self::SelectMedia),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn mode(self) -> ControllerMode {
        match self {
            Self::SelectYoutube => ControllerMode::Youtube,
            Self::SelectMedia => ControllerMode::Media,
        }
    }
}

/// Device-to-host report: `{report_id, code}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputReport {
    pub report_id: u8,
    pub code: u8,
}

impl InputReport {
    #[must_use]
    pub const fn new(report_id: ReportId, code: u8) -> Self {
        Self {
            report_id: report_id.to_raw(),
            code,
        }
    }

    #[must_use]
    pub const fn from_keycode(report_id: ReportId, keycode: KeycodeState) -> Self {
        Self::new(report_id, keycode.code())
    }

    #[must_use]
    pub const fn as_bytes(&self) -> [u8; INPUT_REPORT_SIZE] {
        [self.report_id, self.code]
    }

    /// Parse an input report from the first two bytes of `data`.
    pub fn parse(data: &[u8]) -> MediaControllerResult<Self> {
        let [report_id, code, ..] = data else {
            return Err(MediaControllerError::InvalidReportSize {
                expected: INPUT_REPORT_SIZE,
                actual: data.len(),
            });
        };
        Ok(Self {
            report_id: *report_id,
            code: *code,
        })
    }

    #[must_use]
    pub const fn keycode(&self) -> KeycodeState {
        KeycodeState::from_code(self.code)
    }
}

/// Host-to-device report, always transferred as a full 64-byte block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputReport {
    pub report_id: u8,
    pub command: u8,
    pub values: [u8; OUTPUT_REPORT_VALUES],
}

impl Default for OutputReport {
    fn default() -> Self {
        Self::from_bytes([0; OUTPUT_REPORT_SIZE])
    }
}

impl OutputReport {
    #[must_use]
    pub fn from_bytes(bytes: [u8; OUTPUT_REPORT_SIZE]) -> Self {
        let [report_id, command, rest @ ..] = bytes;
        Self {
            report_id,
            command,
            values: rest,
        }
    }

    /// Parse a received block. Anything other than exactly 64 bytes is rejected.
    pub fn parse(data: &[u8]) -> MediaControllerResult<Self> {
        let Ok(bytes) = <[u8; OUTPUT_REPORT_SIZE]>::try_from(data) else {
            return Err(MediaControllerError::InvalidReportSize {
                expected: OUTPUT_REPORT_SIZE,
                actual: data.len(),
            });
        };
        Ok(Self::from_bytes(bytes))
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; OUTPUT_REPORT_SIZE] {
        let mut bytes = [0u8; OUTPUT_REPORT_SIZE];
        let (header, values) = bytes.split_at_mut(2);
        header.copy_from_slice(&[self.report_id, self.command]);
        values.copy_from_slice(&self.values);
        bytes
    }

    /// A mode command, if this report carries one.
    ///
    /// Only reports on the Youtube collection (`0x01`) are commands; every
    /// other ID and every unknown command byte yields `None`.
    #[must_use]
    pub const fn mode_command(&self) -> Option<ModeCommand> {
        if self.report_id != ReportId::Youtube.to_raw() {
            return None;
        }
        ModeCommand::from_raw(self.command)
    }
}
