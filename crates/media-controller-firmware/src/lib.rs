//! # media-controller-firmware
//!
//! Control logic for a USB HID media controller: three keys, a mode switch,
//! a function key and a rotary encoder with push button.
//!
//! This crate provides a `#![no_std]`-compatible firmware core with:
//! - `DeviceSession`, the USB configuration and report cycle state machine
//! - `ReportEncoder`, including the six-frame full-screen sequence
//! - Output report dispatch for host-driven mode changes
//! - Bus, HID and pin-edge handlers that feed a lock-free `SharedState`
//! - A `sim` backend (with `std`) for driving the whole loop from tests
//!
//! ## Execution Model
//!
//! One cooperative polling loop calls [`MediaController::poll`], which runs
//! exactly one session transition and never blocks. Interrupt and transport
//! callbacks only touch [`SharedState`] atomics, so the loop always sees a
//! consistent key snapshot without locks.
//!
//! ## State Machine
//!
//! ```text
//! Init ──open()──► WaitForConfiguration ──configured──► CheckIfConfigured
//!                          ▲                               │        │
//!                          └────── deconfigured (reset) ───┘        │ configured
//!                                                                   ▼
//!          CheckIfConfigured ◄── EmulateKeyboard ◄── CheckForOutputReport
//! ```
//!
//! ## Example
//!
//! ```rust
//! use media_controller_firmware::prelude::*;
//! use media_controller_firmware::sim::{SimGpio, SimTransport};
//!
//! static SHARED: SharedState = SharedState::new();
//!
//! let mut controller = MediaController::new(
//!     ControllerConfig::default(),
//!     &SHARED,
//!     SimTransport::new(),
//!     SimGpio::new(),
//! )
//! .expect("valid config");
//!
//! controller.poll();
//! assert_eq!(controller.state(), SessionState::WaitForConfiguration);
//!
//! controller.on_device_event(DeviceEvent::Configured { configuration_value: 1 });
//! controller.poll();
//! assert_eq!(controller.state(), SessionState::CheckIfConfigured);
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod hal;
pub mod prelude;
pub mod report;
pub mod session;
pub mod shared;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod sim;

pub use config::{ControllerConfig, ControllerConfigBuilder};
pub use controller::MediaController;
pub use dispatch::{apply_mode, dispatch};
pub use error::{FirmwareError, FirmwareResult};
pub use events::{BusEventHandler, KeyInputHandler};
pub use hal::{
    DeviceEvent, GpioBackend, HidEvent, TransportError, TransportResult, UsbBusControl,
    UsbHidTransport,
};
pub use report::{FULL_SCREEN_STEPS, ReportEncoder};
pub use session::{DeviceSession, SessionMetrics, SessionState};
pub use shared::SharedState;
