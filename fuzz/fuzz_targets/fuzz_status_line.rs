//! Fuzz target: status line parsing and command decoding
//!
//! Feeds arbitrary bytes to `StatusLine::parse` and, when they parse,
//! checks the line survives a re-encode. The first two bytes also go
//! through the command decoder, which must only accept a lone `d`.
//!
//! cargo fuzz run fuzz_status_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartdrain::app::commands::AppCommand;
use smartdrain::app::status::StatusLine;

fuzz_target!(|data: &[u8]| {
    let cmd = AppCommand::decode(data.first().copied(), data.get(1).copied());
    if cmd.is_some() {
        assert_eq!(data, b"d");
    }

    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(line) = StatusLine::parse(text) else {
        return;
    };
    // Non-finite temperatures encode as `null` and cannot come back.
    if line.current_temperature.is_finite() {
        let json = line.to_json().expect("parsed line re-encodes");
        let again = StatusLine::parse(&json).expect("re-encoded line parses");
        assert_eq!(again.message, line.message);
        assert_eq!(again.current_time, line.current_time);
    }
});
