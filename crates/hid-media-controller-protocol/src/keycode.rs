//! Logical key register
//!
//! One byte, LSB first:
//!
//! ```text
//! bit  7     6        5            4          3     2     1     0
//!      func  reserved volume_down  volume_up  mute  play  prev  next
//! ```
//!
//! The byte and the flag view are the same integer, so they can never
//! disagree. All access goes through explicit masks.

use super::CHANGE_DETECT_MASK;
use serde::{Deserialize, Serialize};

/// One named bit of the key register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyFlag {
    Next = 0x01,
    Prev = 0x02,
    Play = 0x04,
    Mute = 0x08,
    VolumeUp = 0x10,
    VolumeDown = 0x20,
    Reserved = 0x40,
    Func = 0x80,
}

impl KeyFlag {
    /// Every flag, in bit order.
    pub const ALL: [KeyFlag; 8] = [
        KeyFlag::Next,
        KeyFlag::Prev,
        KeyFlag::Play,
        KeyFlag::Mute,
        KeyFlag::VolumeUp,
        KeyFlag::VolumeDown,
        KeyFlag::Reserved,
        KeyFlag::Func,
    ];

    #[must_use]
    pub const fn mask(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Play => "play",
            Self::Mute => "mute",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::Reserved => "reserved",
            Self::Func => "func",
        }
    }
}

impl core::fmt::Display for KeyFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending logical key state, as carried in the `code` byte of an input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeycodeState(u8);

impl KeycodeState {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// The bits used for change detection between two reports.
    #[must_use]
    pub const fn masked(self) -> u8 {
        self.0 & CHANGE_DETECT_MASK
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, flag: KeyFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    pub fn set(&mut self, flag: KeyFlag, on: bool) {
        if on {
            self.0 |= flag.mask();
        } else {
            self.0 &= !flag.mask();
        }
    }

    #[must_use]
    pub const fn with(self, flag: KeyFlag, on: bool) -> Self {
        if on {
            Self(self.0 | flag.mask())
        } else {
            Self(self.0 & !flag.mask())
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub const fn next(self) -> bool {
        self.contains(KeyFlag::Next)
    }

    #[must_use]
    pub const fn prev(self) -> bool {
        self.contains(KeyFlag::Prev)
    }

    #[must_use]
    pub const fn play(self) -> bool {
        self.contains(KeyFlag::Play)
    }

    #[must_use]
    pub const fn mute(self) -> bool {
        self.contains(KeyFlag::Mute)
    }

    #[must_use]
    pub const fn volume_up(self) -> bool {
        self.contains(KeyFlag::VolumeUp)
    }

    #[must_use]
    pub const fn volume_down(self) -> bool {
        self.contains(KeyFlag::VolumeDown)
    }

    #[must_use]
    pub const fn reserved(self) -> bool {
        self.contains(KeyFlag::Reserved)
    }

    #[must_use]
    pub const fn func(self) -> bool {
        self.contains(KeyFlag::Func)
    }

    /// Iterate over the flags currently set, in bit order.
    pub fn flags(self) -> impl Iterator<Item = KeyFlag> {
        KeyFlag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl From<u8> for KeycodeState {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<KeycodeState> for u8 {
    fn from(state: KeycodeState) -> Self {
        state.0
    }
}

impl core::fmt::Display for KeycodeState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for flag in self.flags() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(flag.as_str())?;
            first = false;
        }
        Ok(())
    }
}
