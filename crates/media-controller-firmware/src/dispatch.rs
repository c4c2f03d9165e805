//! Output report handling: host-driven mode selection.

use crate::hal::GpioBackend;
use crate::shared::SharedState;
use hid_media_controller_protocol::{ControllerMode, ModeCommand, OutputReport};
use media_controller_input::PinMap;
use tracing::{debug, info};

/// Decode an output report into the mode it selects, if any.
///
/// Only report ID `0x01` carries commands. Unknown commands are ignored.
#[must_use]
pub fn dispatch(report: &OutputReport) -> Option<ControllerMode> {
    debug!(
        "output report: {:02x} {:02x}",
        report.report_id, report.command
    );
    report.mode_command().map(ModeCommand::mode)
}

/// Switch mode and drive the indicator LED (lit in Youtube mode).
pub fn apply_mode<G: GpioBackend>(
    shared: &SharedState,
    gpio: &mut G,
    pins: &PinMap,
    mode: ControllerMode,
) {
    shared.set_mode(mode);
    gpio.write_pin(pins.led, mode.is_youtube());
    info!(%mode, "mode changed");
}
