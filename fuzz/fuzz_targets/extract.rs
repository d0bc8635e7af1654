#![no_main]

use libfuzzer_sys::fuzz_target;
use oiddir::schema::extract;
use oiddir::{Dialect, Options};

fuzz_target!(|data: &[u8]| {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(_) => return,
    };

    for dialect in [Dialect::OpenLdap, Dialect::Ds389, Dialect::OpenDj] {
        for suppress_newlines in [false, true] {
            let options = Options {
                suppress_newlines,
                include_custom_syntaxes: true,
                suppress_extension_origin: false,
            };
            if let Ok(report) = extract("fuzz", text, dialect, options) {
                assert!(!report.output().is_empty());
            }
        }
    }
});
