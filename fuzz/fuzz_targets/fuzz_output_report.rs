//! Fuzzes output report parsing and mode dispatch.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_output_report
#![no_main]
use hid_media_controller_protocol::{InputReport, OutputReport};
use libfuzzer_sys::fuzz_target;
use media_controller_firmware::dispatch;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes.
    if let Ok(report) = OutputReport::parse(data) {
        let _ = dispatch(&report);
        assert_eq!(report.to_bytes().as_slice(), data);
    }
    let _ = InputReport::parse(data);
});
