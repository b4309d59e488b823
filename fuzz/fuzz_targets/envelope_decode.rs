//! Exercise the length-envelope combinator: a decode must either fail
//! cleanly or yield a body whose envelope re-encodes byte for byte.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tpmwire::buffer::Tpm2bDigest;
use tpmwire::types::NvPublic;
use tpmwire::{Enveloped, Marshal, Unmarshal};

fuzz_target!(|data: &[u8]| {
    if let Ok(wrapped) = Enveloped::<NvPublic>::from_wire(data) {
        let encoded = wrapped.to_vec().expect("decoded value must re-encode");
        assert_eq!(encoded, &data[..encoded.len()]);
    }
    if let Ok(wrapped) = Enveloped::<Tpm2bDigest>::from_wire(data) {
        let encoded = wrapped.to_vec().expect("decoded value must re-encode");
        assert_eq!(encoded, &data[..encoded.len()]);
    }
});
