//! Fuzz target for annotation sidecar parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the sidecar parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use doclabel::ir::io_sidecar::from_sidecar_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_sidecar_slice(data);
});
