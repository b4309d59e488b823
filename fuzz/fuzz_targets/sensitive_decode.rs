//! Decode arbitrary bytes as a sensitive area and check the
//! re-encoding matches what was consumed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tpmwire::types::TpmtSensitive;
use tpmwire::{Marshal, Reader, Unmarshal};

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    if let Ok(sensitive) = TpmtSensitive::unmarshal(&mut r) {
        let consumed = r.position();
        let encoded = sensitive.to_vec().expect("decoded value must re-encode");
        assert_eq!(encoded, &data[..consumed]);
    }
});
