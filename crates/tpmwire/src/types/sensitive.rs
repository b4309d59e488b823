//! Sensitive areas: creation input and the private portion of a key.

use crate::algs::AlgId;
use crate::buffer::{
    Tpm2bAuth, Tpm2bDigest, Tpm2bEccParameter, Tpm2bPrivateKeyRsa, Tpm2bSensitiveData, Tpm2bSymKey,
};
use crate::errors::{CodecError, Result};
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

/// Caller-supplied secrets for object creation (`TPMS_SENSITIVE_CREATE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensitiveCreate {
    /// Authorization value for the new object.
    pub user_auth: Tpm2bAuth,
    /// Data to seal, or the empty buffer for a generated key.
    pub data: Tpm2bSensitiveData,
}

impl Marshal for SensitiveCreate {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.user_auth.marshal(w)?;
        self.data.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        self.user_auth.wire_size() + self.data.wire_size()
    }
}

impl Unmarshal for SensitiveCreate {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let user_auth = Tpm2bAuth::unmarshal(r)?;
        let data = Tpm2bSensitiveData::unmarshal(r)?;
        Ok(Self { user_auth, data })
    }
}

/// The type-specific secret of a sensitive area (`TPMU_SENSITIVE_COMPOSITE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensitiveComposite {
    /// An RSA prime.
    Rsa(Tpm2bPrivateKeyRsa),
    /// An ECC private scalar.
    Ecc(Tpm2bEccParameter),
    /// A keyed-hash key or sealed data.
    Bits(Tpm2bSensitiveData),
    /// A symmetric key.
    Sym(Tpm2bSymKey),
}

impl SensitiveComposite {
    /// The object-type selector this secret encodes under.
    pub fn alg_id(&self) -> AlgId {
        match self {
            Self::Rsa(_) => AlgId::RSA,
            Self::Ecc(_) => AlgId::ECC,
            Self::Bits(_) => AlgId::KEYEDHASH,
            Self::Sym(_) => AlgId::SYMCIPHER,
        }
    }

    /// Decode the secret for a previously read object-type selector.
    ///
    /// Rejects an unknown selector before consuming any body bytes.
    pub fn unmarshal(selector: AlgId, r: &mut Reader<'_>) -> Result<Self> {
        match selector {
            AlgId::RSA => Ok(Self::Rsa(Tpm2bPrivateKeyRsa::unmarshal(r)?)),
            AlgId::ECC => Ok(Self::Ecc(Tpm2bEccParameter::unmarshal(r)?)),
            AlgId::KEYEDHASH => Ok(Self::Bits(Tpm2bSensitiveData::unmarshal(r)?)),
            AlgId::SYMCIPHER => Ok(Self::Sym(Tpm2bSymKey::unmarshal(r)?)),
            AlgId(other) => Err(CodecError::SelectorUnsupported(u32::from(other))),
        }
    }
}

impl Marshal for SensitiveComposite {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        match self {
            Self::Rsa(buf) => buf.marshal(w),
            Self::Ecc(buf) => buf.marshal(w),
            Self::Bits(buf) => buf.marshal(w),
            Self::Sym(buf) => buf.marshal(w),
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Rsa(buf) => buf.wire_size(),
            Self::Ecc(buf) => buf.wire_size(),
            Self::Bits(buf) => buf.wire_size(),
            Self::Sym(buf) => buf.wire_size(),
        }
    }
}

/// A complete sensitive area (`TPMT_SENSITIVE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpmtSensitive {
    /// Authorization value.
    pub auth_value: Tpm2bAuth,
    /// Obfuscation seed for asymmetric keys; HMAC key otherwise.
    pub seed_value: Tpm2bDigest,
    /// The type-specific secret.
    pub sensitive: SensitiveComposite,
}

impl Marshal for TpmtSensitive {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        self.sensitive.alg_id().marshal(w)?;
        self.auth_value.marshal(w)?;
        self.seed_value.marshal(w)?;
        self.sensitive.marshal(w)?;
        Ok(())
    }

    fn wire_size(&self) -> usize {
        2 + self.auth_value.wire_size() + self.seed_value.wire_size() + self.sensitive.wire_size()
    }
}

impl Unmarshal for TpmtSensitive {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        let object_type = AlgId::unmarshal(r)?;
        let auth_value = Tpm2bAuth::unmarshal(r)?;
        let seed_value = Tpm2bDigest::unmarshal(r)?;
        let sensitive = SensitiveComposite::unmarshal(object_type, r)?;
        Ok(Self {
            auth_value,
            seed_value,
            sensitive,
        })
    }
}
