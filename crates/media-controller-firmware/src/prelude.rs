//! Prelude for media-controller-firmware.
//!
//! Re-exports the types needed to build and drive a controller.

pub use crate::config::{ControllerConfig, ControllerConfigBuilder};
pub use crate::controller::MediaController;
pub use crate::error::{FirmwareError, FirmwareResult};
pub use crate::hal::{DeviceEvent, GpioBackend, HidEvent, UsbBusControl, UsbHidTransport};
pub use crate::report::ReportEncoder;
pub use crate::session::{SessionMetrics, SessionState};
pub use crate::shared::SharedState;
pub use hid_media_controller_protocol::{ControllerMode, KeyFlag, KeycodeState};
pub use media_controller_input::{GpioPortId, KeyEdge, PinMap};
