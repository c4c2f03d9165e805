//! State shared between interrupt context and the polling loop.
//!
//! Every field is a single atomic word. Key bits are changed with
//! `fetch_or`/`fetch_and`, so producers never tear each other's bits. The loop
//! takes the whole register and clears its transient bits in one `fetch_and`,
//! so an edge landing mid-pass is kept for the next pass.

use hid_media_controller_protocol::{ControllerMode, KeyFlag, KeycodeState, TRANSIENT_MASK};
use media_controller_input::{EncoderStep, KeyEdge};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Flags and key register written by callbacks and consumed by the session.
#[derive(Debug)]
pub struct SharedState {
    keycode: AtomicU8,
    youtube_mode: AtomicBool,
    configured: AtomicBool,
    report_sent_complete: AtomicBool,
    report_received: AtomicBool,
}

impl SharedState {
    /// Power-on state: no keys, media mode, unconfigured, sender idle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keycode: AtomicU8::new(0),
            youtube_mode: AtomicBool::new(false),
            configured: AtomicBool::new(false),
            report_sent_complete: AtomicBool::new(true),
            report_received: AtomicBool::new(false),
        }
    }

    pub fn set_key(&self, flag: KeyFlag, on: bool) {
        if on {
            self.keycode.fetch_or(flag.mask(), Ordering::AcqRel);
        } else {
            self.keycode.fetch_and(!flag.mask(), Ordering::AcqRel);
        }
    }

    pub fn apply_key_edge(&self, edge: KeyEdge) {
        if let KeyEdge::Flag { flag, pressed } = edge {
            self.set_key(flag, pressed);
        }
    }

    pub fn apply_encoder_step(&self, step: EncoderStep) {
        if step.clears_volume() {
            self.keycode.fetch_and(
                !(KeyFlag::VolumeUp.mask() | KeyFlag::VolumeDown.mask()),
                Ordering::AcqRel,
            );
        } else if let Some(flag) = step.volume_flag() {
            self.set_key(flag, true);
        }
    }

    #[must_use]
    pub fn keycode(&self) -> KeycodeState {
        KeycodeState::from_code(self.keycode.load(Ordering::Acquire))
    }

    /// Zero the key bits and `func`, returning the register as it was.
    ///
    /// A key is reported once per press; it comes back only on a new edge.
    pub fn clear_transient(&self) -> KeycodeState {
        KeycodeState::from_code(self.keycode.fetch_and(!TRANSIENT_MASK, Ordering::AcqRel))
    }

    #[must_use]
    pub fn mode(&self) -> ControllerMode {
        ControllerMode::from_youtube(self.youtube_mode.load(Ordering::Acquire))
    }

    pub fn set_mode(&self, mode: ControllerMode) {
        self.youtube_mode.store(mode.is_youtube(), Ordering::Release);
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    pub fn set_configured(&self, configured: bool) {
        self.configured.store(configured, Ordering::Release);
    }

    #[must_use]
    pub fn is_report_sent_complete(&self) -> bool {
        self.report_sent_complete.load(Ordering::Acquire)
    }

    pub fn set_report_sent_complete(&self, complete: bool) {
        self.report_sent_complete.store(complete, Ordering::Release);
    }

    #[must_use]
    pub fn is_report_received(&self) -> bool {
        self.report_received.load(Ordering::Acquire)
    }

    pub fn mark_report_received(&self) {
        self.report_received.store(true, Ordering::Release);
    }

    pub fn clear_report_received(&self) {
        self.report_received.store(false, Ordering::Release);
    }

    /// Consume the report-received flag.
    pub fn take_report_received(&self) -> bool {
        self.report_received.swap(false, Ordering::AcqRel)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
