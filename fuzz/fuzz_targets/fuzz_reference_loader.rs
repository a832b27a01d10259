#![no_main]

use libfuzzer_sys::fuzz_target;
use lri_screen::fragments::{parse_fragment_field, parse_fragment_input};
use lri_screen::reference::{LoadOptions, ReferenceData};

const ALKANES: &str = "n-Alcano,RT_DB1ms,RT_HP5ms,RT_DB5ms_SID,RT_DB5ms_MARGGIE,RT_4m\n10,5.0,,,,\n11,6.0,,,,\n";

fuzz_target!(|data: &[u8]| {
    // Loading must reject bad tables with an error, never panic
    let _ = ReferenceData::from_readers(data, ALKANES.as_bytes(), &LoadOptions::default());
    let _ = ReferenceData::from_readers(
        "Substância,RT_DB1ms,RT_HP5ms,RT_DB5ms_SID,RT_DB5ms_MARGGIE,RT_4m\n".as_bytes(),
        data,
        &LoadOptions { delimiter: b';' },
    );

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_fragment_field(text);
        let _ = parse_fragment_input(text);
    }
});
