//! Algorithm identifiers and their validated interface forms.
//!
//! On the wire an algorithm is a bare big-endian u16. Fields that only
//! admit a subset of algorithms (the `TPMI_*` interface types) decode
//! through an enum whose constructor rejects everything outside the
//! permitted set with [`CodecError::ValueOutOfRange`].

use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// A raw algorithm identifier (`TPM_ALG_ID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgId(pub u16);

impl AlgId {
    /// RSA asymmetric algorithm.
    pub const RSA: Self = Self(0x0001);
    /// SHA-1 hash.
    pub const SHA1: Self = Self(0x0004);
    /// HMAC keyed hash.
    pub const HMAC: Self = Self(0x0005);
    /// AES block cipher.
    pub const AES: Self = Self(0x0006);
    /// Keyed-hash object family.
    pub const KEYEDHASH: Self = Self(0x0008);
    /// XOR obfuscation scheme.
    pub const XOR: Self = Self(0x000a);
    /// SHA-256 hash.
    pub const SHA256: Self = Self(0x000b);
    /// SHA-384 hash.
    pub const SHA384: Self = Self(0x000c);
    /// SHA-512 hash.
    pub const SHA512: Self = Self(0x000d);
    /// The null algorithm: no scheme / no parameters follow.
    pub const NULL: Self = Self(0x0010);
    /// RSASSA-PKCS1-v1_5 signature scheme.
    pub const RSASSA: Self = Self(0x0014);
    /// RSAES-PKCS1-v1_5 encryption scheme.
    pub const RSAES: Self = Self(0x0015);
    /// RSASSA-PSS signature scheme.
    pub const RSAPSS: Self = Self(0x0016);
    /// RSAES-OAEP encryption scheme.
    pub const OAEP: Self = Self(0x0017);
    /// ECDSA signature scheme.
    pub const ECDSA: Self = Self(0x0018);
    /// ECDH key exchange.
    pub const ECDH: Self = Self(0x0019);
    /// SP800-56A concatenation KDF.
    pub const KDF1_SP800_56A: Self = Self(0x0020);
    /// SP800-108 counter-mode KDF.
    pub const KDF1_SP800_108: Self = Self(0x0022);
    /// ECC asymmetric algorithm.
    pub const ECC: Self = Self(0x0023);
    /// Symmetric-cipher object family.
    pub const SYMCIPHER: Self = Self(0x0025);
    /// CFB block-cipher mode.
    pub const CFB: Self = Self(0x0043);
}

impl Marshal for AlgId {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u16(self.0)
    }

    fn wire_size(&self) -> usize {
        2
    }
}

impl Unmarshal for AlgId {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self(r.read_u16()?))
    }
}

/// A hash algorithm (`TPMI_ALG_HASH`, null not permitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-1 (20-byte digest).
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-384 (48-byte digest).
    Sha384,
    /// SHA-512 (64-byte digest).
    Sha512,
}

impl HashAlg {
    /// Validate a raw algorithm identifier as a hash algorithm.
    pub fn from_alg(alg: AlgId) -> Result<Self> {
        match alg {
            AlgId::SHA1 => Ok(Self::Sha1),
            AlgId::SHA256 => Ok(Self::Sha256),
            AlgId::SHA384 => Ok(Self::Sha384),
            AlgId::SHA512 => Ok(Self::Sha512),
            AlgId(other) => Err(CodecError::ValueOutOfRange {
                field: "hash algorithm",
                value: u32::from(other),
            }),
        }
    }

    /// The wire identifier for this hash.
    pub fn alg_id(self) -> AlgId {
        match self {
            Self::Sha1 => AlgId::SHA1,
            Self::Sha256 => AlgId::SHA256,
            Self::Sha384 => AlgId::SHA384,
            Self::Sha512 => AlgId::SHA512,
        }
    }

    /// Digest size in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl Marshal for HashAlg {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)
    }

    fn wire_size(&self) -> usize {
        2
    }
}

impl Unmarshal for HashAlg {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Self::from_alg(AlgId::unmarshal(r)?)
    }
}

/// An ECC curve identifier (`TPMI_ECC_CURVE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccCurve {
    /// NIST P-256.
    NistP256,
    /// NIST P-384.
    NistP384,
}

impl EccCurve {
    /// Validate a raw curve identifier.
    pub fn from_u16(value: u16) -> Result<Self> {
        match value {
            0x0003 => Ok(Self::NistP256),
            0x0004 => Ok(Self::NistP384),
            other => Err(CodecError::ValueOutOfRange {
                field: "ECC curve",
                value: u32::from(other),
            }),
        }
    }

    /// The wire identifier for this curve.
    pub fn to_u16(self) -> u16 {
        match self {
            Self::NistP256 => 0x0003,
            Self::NistP384 => 0x0004,
        }
    }
}

impl Marshal for EccCurve {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u16(self.to_u16())
    }

    fn wire_size(&self) -> usize {
        2
    }
}

impl Unmarshal for EccCurve {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Self::from_u16(r.read_u16()?)
    }
}

/// A block-cipher mode (`TPMI_ALG_SYM_MODE`, null not permitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymMode {
    /// Counter mode.
    Ctr,
    /// Output feedback mode.
    Ofb,
    /// Cipher block chaining mode.
    Cbc,
    /// Cipher feedback mode.
    Cfb,
    /// Electronic codebook mode.
    Ecb,
}

impl SymMode {
    /// Validate a raw algorithm identifier as a cipher mode.
    pub fn from_alg(alg: AlgId) -> Result<Self> {
        match alg.0 {
            0x0040 => Ok(Self::Ctr),
            0x0041 => Ok(Self::Ofb),
            0x0042 => Ok(Self::Cbc),
            0x0043 => Ok(Self::Cfb),
            0x0044 => Ok(Self::Ecb),
            other => Err(CodecError::ValueOutOfRange {
                field: "symmetric mode",
                value: u32::from(other),
            }),
        }
    }

    /// The wire identifier for this mode.
    pub fn alg_id(self) -> AlgId {
        match self {
            Self::Ctr => AlgId(0x0040),
            Self::Ofb => AlgId(0x0041),
            Self::Cbc => AlgId(0x0042),
            Self::Cfb => AlgId(0x0043),
            Self::Ecb => AlgId(0x0044),
        }
    }
}

impl Marshal for SymMode {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)
    }

    fn wire_size(&self) -> usize {
        2
    }
}

impl Unmarshal for SymMode {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Self::from_alg(AlgId::unmarshal(r)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{AlgId, CodecError, HashAlg, Result};
    use crate::wire::Unmarshal;

    #[test]
    fn hash_alg_rejects_non_hash_values() {
        let err = HashAlg::from_alg(AlgId::RSA);
        assert_eq!(
            err.map(|_| ()),
            Err(CodecError::ValueOutOfRange {
                field: "hash algorithm",
                value: 0x0001,
            })
        );
        // The null algorithm is not a valid hash either.
        assert!(HashAlg::from_alg(AlgId::NULL).is_err());
    }

    #[test]
    fn hash_alg_decodes_from_wire_identifier() -> Result<()> {
        let alg = HashAlg::from_wire(&[0x00, 0x0b])?;
        assert_eq!(alg, HashAlg::Sha256);
        assert_eq!(alg.digest_size(), 32);
        Ok(())
    }
}
