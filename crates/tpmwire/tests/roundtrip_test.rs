//! Property tests: every structure that encodes must decode back to
//! an equal value, and the declared wire size must match the bytes
//! actually produced.

use std::fmt::Debug;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use tpmwire::types::{
    ClockInfo, CreationData, DigestList, EccParams, EccPoint, EccScheme, KdfScheme,
    KeyedHashParams, KeyedHashScheme, NvIndex, NvPublic, PcrSelect, PcrSelection,
    PcrSelectionList, Public, RsaParams, RsaScheme, SensitiveComposite, SensitiveCreate,
    Signature, SignatureEcc, SignatureRsa, SymCipherParams, SymDefObject, TpmtPublic,
    TpmtSensitive,
};
use tpmwire::{
    AlgId, EccCurve, Enveloped, HashAlg, Marshal, NvAttributes, ObjectAttributes, SymMode,
    Unmarshal,
};

fn check_roundtrip<T>(value: &T) -> Result<(), TestCaseError>
where
    T: Marshal + Unmarshal + PartialEq + Debug,
{
    let bytes = value
        .to_vec()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(bytes.len(), value.wire_size());
    let decoded = T::from_wire(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(&decoded, value);

    // The same body under a length envelope must also survive.
    let enveloped = Enveloped(decoded);
    let bytes = enveloped
        .to_vec()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let unwrapped =
        Enveloped::<T>::from_wire(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(&unwrapped.0, value);
    Ok(())
}

fn hash_alg() -> impl Strategy<Value = HashAlg> {
    prop_oneof![
        Just(HashAlg::Sha1),
        Just(HashAlg::Sha256),
        Just(HashAlg::Sha384),
        Just(HashAlg::Sha512),
    ]
}

fn sym_mode() -> impl Strategy<Value = SymMode> {
    prop_oneof![
        Just(SymMode::Ctr),
        Just(SymMode::Ofb),
        Just(SymMode::Cbc),
        Just(SymMode::Cfb),
        Just(SymMode::Ecb),
    ]
}

fn sym_def() -> impl Strategy<Value = SymDefObject> {
    prop_oneof![
        Just(SymDefObject::Null),
        (prop_oneof![Just(128u16), Just(192), Just(256)], sym_mode())
            .prop_map(|(key_bits, mode)| SymDefObject::Aes { key_bits, mode }),
        hash_alg().prop_map(|hash| SymDefObject::Xor { hash }),
    ]
}

fn rsa_scheme() -> impl Strategy<Value = RsaScheme> {
    prop_oneof![
        Just(RsaScheme::Null),
        hash_alg().prop_map(|hash| RsaScheme::RsaSsa { hash }),
        hash_alg().prop_map(|hash| RsaScheme::RsaPss { hash }),
        hash_alg().prop_map(|hash| RsaScheme::Oaep { hash }),
    ]
}

fn ecc_scheme() -> impl Strategy<Value = EccScheme> {
    prop_oneof![
        Just(EccScheme::Null),
        hash_alg().prop_map(|hash| EccScheme::EcDsa { hash }),
    ]
}

fn kdf_scheme() -> impl Strategy<Value = KdfScheme> {
    prop_oneof![
        Just(KdfScheme::Null),
        hash_alg().prop_map(|hash| KdfScheme::Kdf1Sp800_108 { hash }),
        hash_alg().prop_map(|hash| KdfScheme::Kdf1Sp800_56a { hash }),
    ]
}

fn keyedhash_scheme() -> impl Strategy<Value = KeyedHashScheme> {
    prop_oneof![
        Just(KeyedHashScheme::Null),
        hash_alg().prop_map(|hash| KeyedHashScheme::Hmac { hash }),
    ]
}

fn ecc_curve() -> impl Strategy<Value = EccCurve> {
    prop_oneof![Just(EccCurve::NistP256), Just(EccCurve::NistP384)]
}

fn tpm2b<const N: usize>() -> impl Strategy<Value = tpmwire::Tpm2b<N>> {
    proptest::collection::vec(any::<u8>(), 0..=N)
        .prop_filter_map("within capacity", |v| tpmwire::Tpm2b::from_slice(&v).ok())
}

fn object_attributes() -> impl Strategy<Value = ObjectAttributes> {
    any::<u32>().prop_map(ObjectAttributes::from_bits_retain)
}

fn public() -> impl Strategy<Value = Public> {
    prop_oneof![
        (
            sym_def(),
            rsa_scheme(),
            prop_oneof![Just(1024u16), Just(2048), Just(3072)],
            any::<u32>(),
            tpm2b::<512>(),
        )
            .prop_map(|(symmetric, scheme, key_bits, exponent, unique)| Public::Rsa {
                params: RsaParams { symmetric, scheme, key_bits, exponent },
                unique,
            }),
        (
            sym_def(),
            ecc_scheme(),
            ecc_curve(),
            kdf_scheme(),
            tpm2b::<128>(),
            tpm2b::<128>(),
        )
            .prop_map(|(symmetric, scheme, curve, kdf, x, y)| Public::Ecc {
                params: EccParams { symmetric, scheme, curve, kdf },
                unique: EccPoint { x, y },
            }),
        (keyedhash_scheme(), tpm2b::<64>()).prop_map(|(scheme, unique)| Public::KeyedHash {
            params: KeyedHashParams { scheme },
            unique,
        }),
        (sym_def(), tpm2b::<64>()).prop_map(|(sym, unique)| Public::SymCipher {
            params: SymCipherParams { sym },
            unique,
        }),
    ]
}

fn tpmt_public() -> impl Strategy<Value = TpmtPublic> {
    (hash_alg(), object_attributes(), tpm2b::<64>(), public()).prop_map(
        |(name_alg, attributes, auth_policy, public)| TpmtPublic {
            name_alg,
            attributes,
            auth_policy,
            public,
        },
    )
}

fn pcr_selection_list() -> impl Strategy<Value = PcrSelectionList> {
    proptest::collection::vec(
        (hash_alg(), proptest::collection::vec(any::<u8>(), 0..=3)),
        0..=5,
    )
    .prop_filter_map("within bank limit", |banks| {
        let mut selections = Vec::with_capacity(banks.len());
        for (hash, mask) in banks {
            selections.push(PcrSelection {
                hash,
                select: PcrSelect::from_mask(&mask).ok()?,
            });
        }
        PcrSelectionList::new(&selections).ok()
    })
}

fn sensitive_composite() -> impl Strategy<Value = SensitiveComposite> {
    prop_oneof![
        tpm2b::<256>().prop_map(SensitiveComposite::Rsa),
        tpm2b::<128>().prop_map(SensitiveComposite::Ecc),
        tpm2b::<256>().prop_map(SensitiveComposite::Bits),
        tpm2b::<32>().prop_map(SensitiveComposite::Sym),
    ]
}

fn tpmt_sensitive() -> impl Strategy<Value = TpmtSensitive> {
    (tpm2b::<64>(), tpm2b::<64>(), sensitive_composite()).prop_map(
        |(auth_value, seed_value, sensitive)| TpmtSensitive {
            auth_value,
            seed_value,
            sensitive,
        },
    )
}

fn digest_list() -> impl Strategy<Value = DigestList> {
    proptest::collection::vec(tpm2b::<64>(), 0..=8)
        .prop_filter_map("within digest limit", |digests| {
            DigestList::new(&digests).ok()
        })
}

fn signature() -> impl Strategy<Value = Signature> {
    prop_oneof![
        (hash_alg(), tpm2b::<512>()).prop_map(|(hash, sig)| {
            Signature::RsaSsa(SignatureRsa { hash, sig })
        }),
        (hash_alg(), tpm2b::<512>()).prop_map(|(hash, sig)| {
            Signature::RsaPss(SignatureRsa { hash, sig })
        }),
        (hash_alg(), tpm2b::<128>(), tpm2b::<128>()).prop_map(|(hash, r, s)| {
            Signature::EcDsa(SignatureEcc { hash, r, s })
        }),
    ]
}

proptest! {
    #[test]
    fn sized_buffers_roundtrip(buf in tpm2b::<64>()) {
        check_roundtrip(&buf)?;
    }

    #[test]
    fn public_areas_roundtrip(public in tpmt_public()) {
        check_roundtrip(&public)?;
    }

    #[test]
    fn pcr_selection_lists_roundtrip(list in pcr_selection_list()) {
        check_roundtrip(&list)?;
    }

    #[test]
    fn sensitive_areas_roundtrip(sensitive in tpmt_sensitive()) {
        check_roundtrip(&sensitive)?;
    }

    #[test]
    fn digest_lists_roundtrip(list in digest_list()) {
        check_roundtrip(&list)?;
    }

    #[test]
    fn signatures_roundtrip(sig in signature()) {
        check_roundtrip(&sig)?;
    }

    #[test]
    fn clock_info_roundtrips(
        clock in any::<u64>(),
        reset_count in any::<u32>(),
        restart_count in any::<u32>(),
        safe in any::<bool>(),
    ) {
        check_roundtrip(&ClockInfo { clock, reset_count, restart_count, safe })?;
    }

    #[test]
    fn nv_publics_roundtrip(
        low in 0u32..=0x00ff_ffff,
        name_alg in hash_alg(),
        raw_attrs in any::<u32>(),
        policy in tpm2b::<64>(),
        data_size in any::<u16>(),
    ) {
        let nv_index = NvIndex::new(0x0100_0000 | low)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        check_roundtrip(&NvPublic {
            nv_index,
            name_alg,
            attributes: NvAttributes::from_bits_retain(raw_attrs),
            auth_policy: policy,
            data_size,
        })?;
    }

    #[test]
    fn sensitive_create_roundtrips(auth in tpm2b::<64>(), data in tpm2b::<256>()) {
        check_roundtrip(&SensitiveCreate {
            user_auth: auth,
            data,
        })?;
    }

    #[test]
    fn creation_data_roundtrips(
        list in pcr_selection_list(),
        digest in tpm2b::<64>(),
        locality in any::<u8>(),
        name in tpm2b::<66>(),
        qualified in tpm2b::<66>(),
        outside in tpm2b::<64>(),
    ) {
        check_roundtrip(&CreationData {
            pcr_select: list,
            pcr_digest: digest,
            locality,
            parent_name_alg: AlgId::SHA256,
            parent_name: name,
            parent_qualified_name: qualified,
            outside_info: outside,
        })?;
    }
}
