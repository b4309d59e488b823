//! Feed arbitrary bytes to the public-area decoder. A decoded value
//! must re-encode to exactly the bytes that were consumed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tpmwire::types::TpmtPublic;
use tpmwire::{Marshal, Reader, Unmarshal};

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    if let Ok(public) = TpmtPublic::unmarshal(&mut r) {
        let consumed = r.position();
        let encoded = public.to_vec().expect("decoded value must re-encode");
        assert_eq!(encoded, &data[..consumed]);
    }
});
