//! Active-low key edge mapping.

use super::ControllerPin;
use hid_media_controller_protocol::{KeyFlag, KeycodeState};

/// What a single pin edge means for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    /// Write `pressed` into the given key flag.
    Flag { flag: KeyFlag, pressed: bool },
    /// Mode switch pressed: flip between Youtube and media mode.
    ToggleMode,
    Ignored,
}

impl KeyEdge {
    /// Apply a flag edge to a key register. Other edges leave it untouched.
    pub fn apply(self, keycode: &mut KeycodeState) {
        if let Self::Flag { flag, pressed } = self {
            keycode.set(flag, pressed);
        }
    }
}

/// Key flag driven by a key pin, if the pin is one.
#[must_use]
pub const fn key_flag(pin: ControllerPin) -> Option<KeyFlag> {
    match pin {
        ControllerPin::Prev => Some(KeyFlag::Prev),
        ControllerPin::Next => Some(KeyFlag::Next),
        ControllerPin::Play => Some(KeyFlag::Play),
        ControllerPin::EncoderButton => Some(KeyFlag::Mute),
        _ => None,
    }
}

/// Label printed when a key pin fires.
#[must_use]
pub const fn key_label(pin: ControllerPin) -> &'static str {
    match pin {
        ControllerPin::Prev => "Previous",
        ControllerPin::Next => "Next",
        ControllerPin::Play => "Play/Pause",
        ControllerPin::EncoderButton => "Encoder",
        ControllerPin::ModeSwitch => "Mode",
        _ => "",
    }
}

/// Map an edge on `pin` with the raw level now at `level_high`.
///
/// Keys are active-low, so a low level means pressed. The mode switch only
/// acts on the low level and has no debounce; a bouncing contact toggles
/// once per low edge.
#[must_use]
pub const fn map_edge(pin: ControllerPin, level_high: bool) -> KeyEdge {
    if let Some(flag) = key_flag(pin) {
        return KeyEdge::Flag {
            flag,
            pressed: !level_high,
        };
    }
    match pin {
        ControllerPin::ModeSwitch if !level_high => KeyEdge::ToggleMode,
        _ => KeyEdge::Ignored,
    }
}
