//! Signature structures.

use crate::algs::{AlgId, HashAlg};
use crate::buffer::{Tpm2bEccParameter, Tpm2bPublicKeyRsa};
use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// An RSA signature with its hash (`TPMS_SIGNATURE_RSA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRsa {
    /// Hash the signature was computed over.
    pub hash: HashAlg,
    /// The signature, one modulus in length.
    pub sig: Tpm2bPublicKeyRsa,
}

impl Marshal for SignatureRsa {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.hash.marshal(w)?;
        self.sig.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.hash.wire_size() + self.sig.wire_size()
    }
}

impl Unmarshal for SignatureRsa {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let hash = HashAlg::unmarshal(r)?;
        let sig = Tpm2bPublicKeyRsa::unmarshal(r)?;
        Ok(Self { hash, sig })
    }
}

/// An ECDSA signature with its hash (`TPMS_SIGNATURE_ECC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureEcc {
    /// Hash the signature was computed over.
    pub hash: HashAlg,
    /// The r component.
    pub r: Tpm2bEccParameter,
    /// The s component.
    pub s: Tpm2bEccParameter,
}

impl Marshal for SignatureEcc {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.hash.marshal(w)?;
        self.r.marshal(w)?;
        self.s.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.hash.wire_size() + self.r.wire_size() + self.s.wire_size()
    }
}

impl Unmarshal for SignatureEcc {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let hash = HashAlg::unmarshal(r)?;
        let sig_r = Tpm2bEccParameter::unmarshal(r)?;
        let sig_s = Tpm2bEccParameter::unmarshal(r)?;
        Ok(Self {
            hash,
            r: sig_r,
            s: sig_s,
        })
    }
}

/// A tagged signature (`TPMT_SIGNATURE`).
///
/// On the wire the scheme tag leads; [`Unmarshal`] reads it and hands
/// off to [`Signature::unmarshal_body`], which callers can also use
/// when the tag was consumed elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// RSASSA-PKCS1-v1_5.
    RsaSsa(SignatureRsa),
    /// RSASSA-PSS.
    RsaPss(SignatureRsa),
    /// ECDSA.
    EcDsa(SignatureEcc),
}

impl Signature {
    /// The scheme tag this signature encodes under.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::RsaSsa(_) => AlgId::RSASSA,
            Self::RsaPss(_) => AlgId::RSAPSS,
            Self::EcDsa(_) => AlgId::ECDSA,
        }
    }

    /// Decode the signature body for a previously read scheme tag.
    ///
    /// Rejects an unknown tag before consuming any body bytes.
    pub fn unmarshal_body(selector: AlgId, r: &mut Reader<'_>) -> Result<Self> {
        match selector {
            AlgId::RSASSA => Ok(Self::RsaSsa(SignatureRsa::unmarshal(r)?)),
            AlgId::RSAPSS => Ok(Self::RsaPss(SignatureRsa::unmarshal(r)?)),
            AlgId::ECDSA => Ok(Self::EcDsa(SignatureEcc::unmarshal(r)?)),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

impl Marshal for Signature {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.alg_id().marshal(w)?;
        match self {
            Self::RsaSsa(sig) | Self::RsaPss(sig) => sig.marshal(w),
            Self::EcDsa(sig) => sig.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        2 + match self {
            Self::RsaSsa(sig) | Self::RsaPss(sig) => sig.wire_size(),
            Self::EcDsa(sig) => sig.wire_size(),
        }
    }
}

impl Unmarshal for Signature {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let sig_alg = AlgId::unmarshal(r)?;
        Self::unmarshal_body(sig_alg, r)
    }
}
