//! Fixed-vector tests against hand-assembled wire images.
//!
//! Every vector here is written out byte by byte so a regression in
//! field order, width, or endianness shows up as a literal diff.

use hex_literal::hex;
use tpmwire::buffer::{Tpm2bAuth, Tpm2bDigest, Tpm2bPublicKeyRsa};
use tpmwire::types::pcr::{DigestList, PcrSelect, PcrSelection, PcrSelectionList};
use tpmwire::types::{NvIndex, NvPublic, Public, TpmtPublic};
use tpmwire::{
    AlgId, CodecError, Enveloped, HashAlg, Marshal, NvAttributes, ObjectAttributes, Reader,
    Result, SymMode, Unmarshal,
};

#[test]
fn all_clear_pcr_mask_encodes_to_the_canonical_five_bytes() -> Result<()> {
    let select = PcrSelect::from_mask(&hex!("00 00 00"))?;
    let bytes = select.to_vec()?;
    assert_eq!(bytes, hex!("0003 000000"));

    let decoded = PcrSelect::from_wire(&bytes)?;
    assert_eq!(decoded, select);
    assert_eq!(decoded.to_vec()?, bytes);
    Ok(())
}

#[test]
fn empty_sized_buffer_is_two_zero_bytes() -> Result<()> {
    let auth = Tpm2bAuth::new();
    assert_eq!(auth.to_vec()?, hex!("0000"));

    let decoded = Tpm2bAuth::from_wire(&hex!("0000"))?;
    assert!(decoded.is_empty());
    Ok(())
}

#[test]
fn unknown_public_selector_fails_without_consuming_the_body() {
    let body = hex!("0006 0080 0043 0010 0800 00000000 0000");
    let mut r = Reader::new(&body);
    let err = Public::unmarshal(AlgId(0x7fff), &mut r);
    assert_eq!(err.map(|_| ()), Err(CodecError::SelectorUnsupported(0x7fff)));
    assert_eq!(r.remaining(), body.len());
    assert_eq!(r.position(), 0);
}

#[test]
fn string_longer_than_the_capacity_is_rejected() {
    let long = "0123456789abcdef0123456789abcdef01234567";
    assert_eq!(long.len(), 40);
    let err = tpmwire::buffer::Tpm2bSymKey::from_string(Some(long));
    assert_eq!(
        err.map(|_| ()),
        Err(CodecError::InsufficientBuffer {
            len: 40,
            capacity: 32,
        })
    );
}

#[test]
fn digest_count_above_the_maximum_fails_before_element_decode() {
    // count = 9 with enough trailing bytes for nine empty digests.
    let mut bytes = hex!("00000009").to_vec();
    bytes.extend_from_slice(&[0u8; 18]);
    let err = DigestList::from_wire(&bytes);
    assert_eq!(
        err.map(|_| ()),
        Err(CodecError::SizeExceeded {
            size: 9,
            capacity: 8,
        })
    );
}

#[test]
fn selection_list_matches_a_hand_built_image() -> Result<()> {
    let mut select = PcrSelect::all_clear(3)?;
    select.select(0)?;
    select.select(16)?;
    let list = PcrSelectionList::new(&[PcrSelection {
        hash: HashAlg::Sha256,
        select,
    }])?;

    // count | hash alg | mask size | mask bytes
    let expected = hex!("00000001 000b 0003 010001");
    assert_eq!(list.to_vec()?, expected);
    assert_eq!(PcrSelectionList::from_wire(&expected)?, list);
    Ok(())
}

#[test]
fn enveloped_structure_prefixes_the_exact_body_length() -> Result<()> {
    let digest = Tpm2bDigest::from_slice(&hex!("aabbccdd"))?;
    let wrapped = Enveloped(digest);
    let bytes = wrapped.to_vec()?;
    assert_eq!(bytes, hex!("00000006 0004 aabbccdd"));

    let decoded = Enveloped::<Tpm2bDigest>::from_wire(&bytes)?;
    assert_eq!(decoded.0, digest);
    Ok(())
}

#[test]
fn envelope_with_zero_length_is_rejected() {
    let err = Enveloped::<Tpm2bDigest>::from_wire(&hex!("00000000"));
    assert_eq!(err.map(|_| ()), Err(CodecError::ZeroLength));
}

#[test]
fn envelope_length_must_match_the_bytes_consumed() {
    // Body is six bytes; the prefix claims seven.
    let bytes = hex!("00000007 0004 aabbccdd 00");
    let err = Enveloped::<Tpm2bDigest>::from_wire(&bytes);
    assert_eq!(
        err.map(|_| ()),
        Err(CodecError::LengthMismatch {
            declared: 7,
            consumed: 6,
        })
    );
}

#[test]
fn rsa_storage_key_template_matches_its_wire_image() -> Result<()> {
    let public = TpmtPublic {
        name_alg: HashAlg::Sha256,
        attributes: ObjectAttributes::FIXED_TPM
            | ObjectAttributes::FIXED_PARENT
            | ObjectAttributes::SENSITIVE_DATA_ORIGIN
            | ObjectAttributes::USER_WITH_AUTH
            | ObjectAttributes::NO_DA
            | ObjectAttributes::RESTRICTED
            | ObjectAttributes::DECRYPT,
        auth_policy: Tpm2bDigest::new(),
        public: Public::Rsa {
            params: tpmwire::types::RsaParams {
                symmetric: tpmwire::types::SymDefObject::Aes {
                    key_bits: 128,
                    mode: SymMode::Cfb,
                },
                scheme: tpmwire::types::RsaScheme::Null,
                key_bits: 2048,
                exponent: 0,
            },
            unique: Tpm2bPublicKeyRsa::new(),
        },
    };

    // type | name alg | attributes | empty policy
    // | AES 128 CFB | null scheme | 2048 bits | default exponent
    // | empty unique
    let expected = hex!(
        "0001 000b 00030472 0000"
        "0006 0080 0043 0010 0800 00000000"
        "0000"
    );
    assert_eq!(public.to_vec()?, expected);
    assert_eq!(TpmtPublic::from_wire(&expected)?, public);
    Ok(())
}

#[test]
fn nv_public_matches_its_wire_image() -> Result<()> {
    let public = NvPublic {
        nv_index: NvIndex::new(0x0150_0020)?,
        name_alg: HashAlg::Sha256,
        attributes: NvAttributes::OWNERWRITE | NvAttributes::OWNERREAD,
        auth_policy: Tpm2bDigest::new(),
        data_size: 64,
    };

    // index | name alg | attributes | empty policy | data size
    let expected = hex!("01500020 000b 00020002 0000 0040");
    assert_eq!(public.to_vec()?, expected);
    assert_eq!(NvPublic::from_wire(&expected)?, public);
    Ok(())
}

#[test]
fn truncated_public_area_reports_the_missing_bytes() {
    let full = hex!("0001 000b 00030472 0000 0006 0080 0043 0010 0800 00000000 0000");
    let err = TpmtPublic::from_wire(&full[..7]);
    assert_eq!(
        err.map(|_| ()),
        Err(CodecError::InsufficientData {
            needed: 4,
            remaining: 3,
        })
    );
}
