//! Fuzz target: command decoder
//!
//! Drives arbitrary byte sequences into `decode` and asserts that it never
//! panics and only ever answers On for the exact token `1`.
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use serial_relay::app::command::{RelayCommand, decode, normalize};

fuzz_target!(|data: &[u8]| {
    let command = decode(data);
    let normalized = normalize(data);

    assert!(normalized.len() <= data.len());
    assert!(!normalized.ends_with(b"\n") && !normalized.ends_with(b"\r"));
    assert_eq!(command == RelayCommand::On, normalized == b"1");
});
