//! Public key areas: symmetric definitions, scheme unions, and
//! per-algorithm parameter blocks.
//!
//! The scheme and parameter unions carry their own leading algorithm
//! tag on the wire, so they implement [`Unmarshal`] directly. [`Public`]
//! is different: its tag lives at the front of the enclosing
//! [`TpmtPublic`], two fields away from the union body, so it decodes
//! through a selector-taking constructor instead.

use crate::algs::{AlgId, EccCurve, HashAlg, SymMode};
use crate::attributes::ObjectAttributes;
use crate::buffer::{Tpm2bDigest, Tpm2bEccParameter, Tpm2bPublicKeyRsa};
use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// A symmetric algorithm definition for an object (`TPMT_SYM_DEF_OBJECT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymDefObject {
    /// No symmetric algorithm.
    Null,
    /// AES with a key size and block mode.
    Aes {
        /// Key size in bits.
        key_bits: u16,
        /// Block-cipher mode.
        mode: SymMode,
    },
    /// XOR obfuscation keyed off a hash algorithm.
    Xor {
        /// The hash driving the XOR KDF.
        hash: HashAlg,
    },
}

impl SymDefObject {
    /// The leading algorithm tag for this definition.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Null => AlgId::NULL,
            Self::Aes { .. } => AlgId::AES,
            Self::Xor { .. } => AlgId::XOR,
        }
    }
}

impl Marshal for SymDefObject {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::Null => Ok(()),
            Self::Aes { key_bits, mode } => {
                w.put_u16(*key_bits)?;
                mode.marshal(w)
            }
            Self::Xor { hash } => hash.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        2 + match self {
            Self::Null => 0,
            Self::Aes { .. } => 4,
            Self::Xor { .. } => 2,
        }
    }
}

impl Unmarshal for SymDefObject {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let alg = AlgId::unmarshal(r)?;
        match alg {
            AlgId::NULL => Ok(Self::Null),
            AlgId::AES => {
                let key_bits = r.read_u16()?;
                let mode = SymMode::unmarshal(r)?;
                Ok(Self::Aes { key_bits, mode })
            }
            AlgId::XOR => Ok(Self::Xor {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

/// An RSA signing or encryption scheme (`TPMT_RSA_SCHEME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaScheme {
    /// No scheme; the key is unrestricted.
    Null,
    /// RSASSA-PKCS1-v1_5 over the named hash.
    RsaSsa {
        /// Hash the signature is computed over.
        hash: HashAlg,
    },
    /// RSASSA-PSS over the named hash.
    RsaPss {
        /// Hash the signature is computed over.
        hash: HashAlg,
    },
    /// RSAES-OAEP with the named hash.
    Oaep {
        /// Hash used by the OAEP mask generation.
        hash: HashAlg,
    },
}

impl RsaScheme {
    /// The leading algorithm tag for this scheme.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Null => AlgId::NULL,
            Self::RsaSsa { .. } => AlgId::RSASSA,
            Self::RsaPss { .. } => AlgId::RSAPSS,
            Self::Oaep { .. } => AlgId::OAEP,
        }
    }
}

impl Marshal for RsaScheme {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::Null => Ok(()),
            Self::RsaSsa { hash } | Self::RsaPss { hash } | Self::Oaep { hash } => hash.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Null => 2,
            _ => 4,
        }
    }
}

impl Unmarshal for RsaScheme {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let alg = AlgId::unmarshal(r)?;
        match alg {
            AlgId::NULL => Ok(Self::Null),
            AlgId::RSASSA => Ok(Self::RsaSsa {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId::RSAPSS => Ok(Self::RsaPss {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId::OAEP => Ok(Self::Oaep {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

/// An ECC signing scheme (`TPMT_ECC_SCHEME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccScheme {
    /// No scheme; the key is unrestricted.
    Null,
    /// ECDSA over the named hash.
    EcDsa {
        /// Hash the signature is computed over.
        hash: HashAlg,
    },
}

impl EccScheme {
    /// The leading algorithm tag for this scheme.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Null => AlgId::NULL,
            Self::EcDsa { .. } => AlgId::ECDSA,
        }
    }
}

impl Marshal for EccScheme {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::Null => Ok(()),
            Self::EcDsa { hash } => hash.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Null => 2,
            Self::EcDsa { .. } => 4,
        }
    }
}

impl Unmarshal for EccScheme {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let alg = AlgId::unmarshal(r)?;
        match alg {
            AlgId::NULL => Ok(Self::Null),
            AlgId::ECDSA => Ok(Self::EcDsa {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

/// A key derivation scheme (`TPMT_KDF_SCHEME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfScheme {
    /// No key derivation.
    Null,
    /// SP800-108 counter-mode KDF.
    Kdf1Sp800_108 {
        /// Hash underlying the KDF.
        hash: HashAlg,
    },
    /// SP800-56A concatenation KDF.
    Kdf1Sp800_56a {
        /// Hash underlying the KDF.
        hash: HashAlg,
    },
}

impl KdfScheme {
    /// The leading algorithm tag for this scheme.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Null => AlgId::NULL,
            Self::Kdf1Sp800_108 { .. } => AlgId::KDF1_SP800_108,
            Self::Kdf1Sp800_56a { .. } => AlgId::KDF1_SP800_56A,
        }
    }
}

impl Marshal for KdfScheme {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::Null => Ok(()),
            Self::Kdf1Sp800_108 { hash } | Self::Kdf1Sp800_56a { hash } => hash.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Null => 2,
            _ => 4,
        }
    }
}

impl Unmarshal for KdfScheme {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let alg = AlgId::unmarshal(r)?;
        match alg {
            AlgId::NULL => Ok(Self::Null),
            AlgId::KDF1_SP800_108 => Ok(Self::Kdf1Sp800_108 {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId::KDF1_SP800_56A => Ok(Self::Kdf1Sp800_56a {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

/// A keyed-hash scheme (`TPMT_KEYEDHASH_SCHEME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyedHashScheme {
    /// No scheme; a sealed data blob.
    Null,
    /// HMAC over the named hash.
    Hmac {
        /// Hash underlying the HMAC.
        hash: HashAlg,
    },
}

impl KeyedHashScheme {
    /// The leading algorithm tag for this scheme.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Null => AlgId::NULL,
            Self::Hmac { .. } => AlgId::HMAC,
        }
    }
}

impl Marshal for KeyedHashScheme {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::Null => Ok(()),
            Self::Hmac { hash } => hash.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Null => 2,
            Self::Hmac { .. } => 4,
        }
    }
}

impl Unmarshal for KeyedHashScheme {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let alg = AlgId::unmarshal(r)?;
        match alg {
            AlgId::NULL => Ok(Self::Null),
            AlgId::HMAC => Ok(Self::Hmac {
                hash: HashAlg::unmarshal(r)?,
            }),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

/// RSA key parameters (`TPMS_RSA_PARMS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaParams {
    /// Symmetric algorithm for a restricted decryption key.
    pub symmetric: SymDefObject,
    /// Signing or encryption scheme.
    pub scheme: RsaScheme,
    /// Modulus size in bits.
    pub key_bits: u16,
    /// Public exponent; zero selects the default (65537).
    pub exponent: u32,
}

impl Marshal for RsaParams {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.symmetric.marshal(w)?;
        self.scheme.marshal(w)?;
        w.put_u16(self.key_bits)?;
        w.put_u32(self.exponent)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.symmetric.wire_size() + self.scheme.wire_size() + 6
    }
}

impl Unmarshal for RsaParams {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let symmetric = SymDefObject::unmarshal(r)?;
        let scheme = RsaScheme::unmarshal(r)?;
        let key_bits = r.read_u16()?;
        let exponent = r.read_u32()?;
        Ok(Self {
            symmetric,
            scheme,
            key_bits,
            exponent,
        })
    }
}

/// ECC key parameters (`TPMS_ECC_PARMS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccParams {
    /// Symmetric algorithm for a restricted decryption key.
    pub symmetric: SymDefObject,
    /// Signing scheme.
    pub scheme: EccScheme,
    /// The curve the key lives on.
    pub curve: EccCurve,
    /// Key derivation scheme.
    pub kdf: KdfScheme,
}

impl Marshal for EccParams {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.symmetric.marshal(w)?;
        self.scheme.marshal(w)?;
        self.curve.marshal(w)?;
        self.kdf.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.symmetric.wire_size()
            + self.scheme.wire_size()
            + self.curve.wire_size()
            + self.kdf.wire_size()
    }
}

impl Unmarshal for EccParams {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let symmetric = SymDefObject::unmarshal(r)?;
        let scheme = EccScheme::unmarshal(r)?;
        let curve = EccCurve::unmarshal(r)?;
        let kdf = KdfScheme::unmarshal(r)?;
        Ok(Self {
            symmetric,
            scheme,
            curve,
            kdf,
        })
    }
}

/// Keyed-hash object parameters (`TPMS_KEYEDHASH_PARMS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedHashParams {
    /// The keyed-hash scheme.
    pub scheme: KeyedHashScheme,
}

impl Marshal for KeyedHashParams {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.scheme.marshal(w)
    }

    fn wire_size(&self) -> usize {
        self.scheme.wire_size()
    }
}

impl Unmarshal for KeyedHashParams {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            scheme: KeyedHashScheme::unmarshal(r)?,
        })
    }
}

/// Symmetric-cipher object parameters (`TPMS_SYMCIPHER_PARMS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymCipherParams {
    /// The cipher definition.
    pub sym: SymDefObject,
}

impl Marshal for SymCipherParams {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.sym.marshal(w)
    }

    fn wire_size(&self) -> usize {
        self.sym.wire_size()
    }
}

impl Unmarshal for SymCipherParams {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            sym: SymDefObject::unmarshal(r)?,
        })
    }
}

/// An ECC point as two sized coordinates (`TPMS_ECC_POINT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EccPoint {
    /// X coordinate.
    pub x: Tpm2bEccParameter,
    /// Y coordinate.
    pub y: Tpm2bEccParameter,
}

impl Marshal for EccPoint {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.x.marshal(w)?;
        self.y.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.x.wire_size() + self.y.wire_size()
    }
}

impl Unmarshal for EccPoint {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let x = Tpm2bEccParameter::unmarshal(r)?;
        let y = Tpm2bEccParameter::unmarshal(r)?;
        Ok(Self { x, y })
    }
}

/// The algorithm-specific body of a public area: parameters and unique
/// value together, so a parameter block can never pair with the wrong
/// kind of unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Public {
    /// An RSA key: parameters plus the public modulus.
    Rsa {
        /// Key parameters.
        params: RsaParams,
        /// The public modulus.
        unique: Tpm2bPublicKeyRsa,
    },
    /// An ECC key: parameters plus the public point.
    Ecc {
        /// Key parameters.
        params: EccParams,
        /// The public point.
        unique: EccPoint,
    },
    /// A keyed-hash object: scheme plus the unique digest.
    KeyedHash {
        /// Object parameters.
        params: KeyedHashParams,
        /// Digest binding the sensitive data.
        unique: Tpm2bDigest,
    },
    /// A symmetric-cipher object: cipher definition plus unique digest.
    SymCipher {
        /// Object parameters.
        params: SymCipherParams,
        /// Digest binding the sensitive key.
        unique: Tpm2bDigest,
    },
}

impl Public {
    /// The object-type selector this body encodes under.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Rsa { .. } => AlgId::RSA,
            Self::Ecc { .. } => AlgId::ECC,
            Self::KeyedHash { .. } => AlgId::KEYEDHASH,
            Self::SymCipher { .. } => AlgId::SYMCIPHER,
        }
    }

    /// Decode the body for a previously read object-type selector.
    ///
    /// Rejects an unknown selector before consuming any body bytes.
    pub fn unmarshal(selector: AlgId, r: &mut Reader<'_>) -> Result<Self> {
        match selector {
            AlgId::RSA => {
                let params = RsaParams::unmarshal(r)?;
                let unique = Tpm2bPublicKeyRsa::unmarshal(r)?;
                Ok(Self::Rsa { params, unique })
            }
            AlgId::ECC => {
                let params = EccParams::unmarshal(r)?;
                let unique = EccPoint::unmarshal(r)?;
                Ok(Self::Ecc { params, unique })
            }
            AlgId::KEYEDHASH => {
                let params = KeyedHashParams::unmarshal(r)?;
                let unique = Tpm2bDigest::unmarshal(r)?;
                Ok(Self::KeyedHash { params, unique })
            }
            AlgId::SYMCIPHER => {
                let params = SymCipherParams::unmarshal(r)?;
                let unique = Tpm2bDigest::unmarshal(r)?;
                Ok(Self::SymCipher { params, unique })
            }
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

impl Marshal for Public {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        match self {
            Self::Rsa { params, unique } => {
                params.marshal(w)?;
                unique.marshal(w)
            }
            Self::Ecc { params, unique } => {
                params.marshal(w)?;
                unique.marshal(w)
            }
            Self::KeyedHash { params, unique } => {
                params.marshal(w)?;
                unique.marshal(w)
            }
            Self::SymCipher { params, unique } => {
                params.marshal(w)?;
                unique.marshal(w)
            }
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Rsa { params, unique } => params.wire_size() + unique.wire_size(),
            Self::Ecc { params, unique } => params.wire_size() + unique.wire_size(),
            Self::KeyedHash { params, unique } => params.wire_size() + unique.wire_size(),
            Self::SymCipher { params, unique } => params.wire_size() + unique.wire_size(),
        }
    }
}

/// A complete public area (`TPMT_PUBLIC`).
///
/// The object-type selector at the front governs the [`Public`] body
/// that follows the attributes and policy digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpmtPublic {
    /// Hash used to compute the object's name.
    pub name_alg: HashAlg,
    /// Object attribute word.
    pub attributes: ObjectAttributes,
    /// Policy digest gating use of the object; may be empty.
    pub auth_policy: Tpm2bDigest,
    /// Algorithm-specific parameters and unique value.
    pub public: Public,
}

impl Marshal for TpmtPublic {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.public.alg_id().marshal(w)?;
        self.name_alg.marshal(w)?;
        self.attributes.marshal(w)?;
        self.auth_policy.marshal(w)?;
        self.public.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        2 + self.name_alg.wire_size()
            + self.attributes.wire_size()
            + self.auth_policy.wire_size()
            + self.public.wire_size()
    }
}

impl Unmarshal for TpmtPublic {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let object_type = AlgId::unmarshal(r)?;
        let name_alg = HashAlg::unmarshal(r)?;
        let attributes = ObjectAttributes::unmarshal(r)?;
        let auth_policy = Tpm2bDigest::unmarshal(r)?;
        let public = Public::unmarshal(object_type, r)?;
        Ok(Self {
            name_alg,
            attributes,
            auth_policy,
            public,
        })
    }
}
