//! Key register to input report encoding.
//!
//! In Youtube mode, holding the function key while pressing next does not
//! send "next". It arms a scripted six-frame burst instead, which the host
//! helper recognises as "toggle full screen":
//!
//! ```text
//! frame   6     5     4     3     2     1
//! id      02    02    02    02    01    01
//! code    10    00    20    00    81    00
//!         up    -     down  -     fs    -
//! ```
//!
//! One frame is produced per transmission. Frame 1 does not set the report
//! ID and keeps the `0x01` left by frame 2.

use hid_media_controller_protocol::{
    CODE_FULL_SCREEN, CODE_RELEASE, CODE_VOLUME_DOWN, CODE_VOLUME_UP, ControllerMode,
    InputReport, KeyFlag, KeycodeState, ReportId,
};

/// Number of frames in the full-screen sequence.
pub const FULL_SCREEN_STEPS: u8 = 6;

/// Builds input reports into a single reused report buffer.
///
/// The buffer is overwritten in place, so callers must transmit a report
/// before encoding the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportEncoder {
    report: InputReport,
    sequence: u8,
}

impl ReportEncoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: InputReport {
                report_id: 0,
                code: 0,
            },
            sequence: 0,
        }
    }

    /// Encode the next report.
    ///
    /// `function_pressed` is the live level of the function key and replaces
    /// the `func` bit of `keycode` before anything else happens.
    pub fn encode(
        &mut self,
        keycode: KeycodeState,
        mode: ControllerMode,
        function_pressed: bool,
    ) -> InputReport {
        let keycode = keycode.with(KeyFlag::Func, function_pressed);
        if self.sequence > 0 {
            self.full_screen_frame();
        } else {
            self.key_frame(keycode, mode);
        }
        self.report
    }

    fn key_frame(&mut self, keycode: KeycodeState, mode: ControllerMode) {
        self.report.report_id = mode.report_id().to_raw();
        if mode.is_youtube() && keycode.func() && keycode.next() {
            self.sequence = FULL_SCREEN_STEPS;
            self.report.code = CODE_RELEASE;
        } else {
            self.report.code = keycode.code();
        }
    }

    fn full_screen_frame(&mut self) {
        let (report_id, code) = match self.sequence {
            6 => (Some(ReportId::Media), CODE_VOLUME_UP),
            4 => (Some(ReportId::Media), CODE_VOLUME_DOWN),
            5 | 3 => (Some(ReportId::Media), CODE_RELEASE),
            2 => (Some(ReportId::Youtube), CODE_FULL_SCREEN),
            _ => (None, CODE_RELEASE),
        };
        if let Some(report_id) = report_id {
            self.report.report_id = report_id.to_raw();
        }
        self.report.code = code;
        self.sequence = self.sequence.saturating_sub(1);
    }

    /// Frames of the full-screen sequence still to be sent.
    #[must_use]
    pub const fn sequence_remaining(&self) -> u8 {
        self.sequence
    }

    #[must_use]
    pub const fn is_sequence_active(&self) -> bool {
        self.sequence > 0
    }

    /// The report produced by the last `encode` call.
    #[must_use]
    pub const fn last_report(&self) -> InputReport {
        self.report
    }
}
