//! Object and NV attribute words.
//!
//! Attributes travel as plain big-endian u32 words. Unknown bits are
//! preserved on decode rather than rejected: the attribute registries
//! grow across protocol revisions and a peer setting a newer bit is not
//! malformed.

use bitflags::bitflags;

use crate::errors::Result;
use crate::wire::{Marshal, Reader, Unmarshal, Writer};

bitflags! {
    /// Object attributes (`TPMA_OBJECT`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjectAttributes: u32 {
        /// Hierarchy of the object may not change.
        const FIXED_TPM = 1 << 1;
        /// Saved contexts of this object are invalidated on startup-clear.
        const ST_CLEAR = 1 << 2;
        /// Parent of the object may not change.
        const FIXED_PARENT = 1 << 4;
        /// Sensitive area was generated by the module.
        const SENSITIVE_DATA_ORIGIN = 1 << 5;
        /// Auth value may authorize user actions.
        const USER_WITH_AUTH = 1 << 6;
        /// Admin actions require a policy session.
        const ADMIN_WITH_POLICY = 1 << 7;
        /// Exempt from dictionary-attack protections.
        const NO_DA = 1 << 10;
        /// Duplication requires an inner wrapper.
        const ENCRYPTED_DUPLICATION = 1 << 11;
        /// Key usage is restricted to structures of known format.
        const RESTRICTED = 1 << 16;
        /// Private portion may be used to decrypt.
        const DECRYPT = 1 << 17;
        /// Private portion may be used to sign or encrypt.
        const SIGN_ENCRYPT = 1 << 18;
    }
}

bitflags! {
    /// NV index attributes (`TPMA_NV`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NvAttributes: u32 {
        /// Platform authorization may write.
        const PPWRITE = 1 << 0;
        /// Owner authorization may write.
        const OWNERWRITE = 1 << 1;
        /// Index auth value may write.
        const AUTHWRITE = 1 << 2;
        /// Index policy may write.
        const POLICYWRITE = 1 << 3;
        /// Index may only be deleted with policy authorization.
        const POLICY_DELETE = 1 << 10;
        /// Index is write-locked.
        const WRITELOCKED = 1 << 11;
        /// Partial writes are not permitted.
        const WRITEALL = 1 << 12;
        /// Index may be write-locked until the next define.
        const WRITEDEFINE = 1 << 13;
        /// Index may be write-locked until startup-clear.
        const WRITE_STCLEAR = 1 << 14;
        /// Index is locked by the global lock.
        const GLOBALLOCK = 1 << 15;
        /// Platform authorization may read.
        const PPREAD = 1 << 16;
        /// Owner authorization may read.
        const OWNERREAD = 1 << 17;
        /// Index auth value may read.
        const AUTHREAD = 1 << 18;
        /// Index policy may read.
        const POLICYREAD = 1 << 19;
        /// Exempt from dictionary-attack protections.
        const NO_DA = 1 << 25;
        /// Contents persist only through an orderly shutdown.
        const ORDERLY = 1 << 26;
        /// Written-state is cleared on startup-clear.
        const CLEAR_STCLEAR = 1 << 27;
        /// Index is read-locked.
        const READLOCKED = 1 << 28;
        /// Index has been written.
        const WRITTEN = 1 << 29;
        /// Index was defined with platform authorization.
        const PLATFORMCREATE = 1 << 30;
        /// Index may be read-locked until startup-clear.
        const READ_STCLEAR = 1 << 31;
    }
}

impl Marshal for ObjectAttributes {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u32(self.bits())
    }

    fn wire_size(&self) -> usize {
        4
    }
}

impl Unmarshal for ObjectAttributes {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self::from_bits_retain(r.read_u32()?))
    }
}

impl Marshal for NvAttributes {
    fn marshal(&self, w: &mut Writer<'_>) -> Result<()> {
        w.put_u32(self.bits())
    }

    fn wire_size(&self) -> usize {
        4
    }
}

impl Unmarshal for NvAttributes {
    fn unmarshal(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self::from_bits_retain(r.read_u32()?))
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectAttributes;
    use crate::errors::Result;
    use crate::wire::{Marshal, Unmarshal};

    #[test]
    fn unknown_bits_survive_a_round_trip() -> Result<()> {
        // Bit 3 is reserved today; a future peer may set it.
        let raw = ObjectAttributes::FIXED_TPM.bits() | (1 << 3);
        let decoded = ObjectAttributes::from_wire(&raw.to_be_bytes())?;
        assert_eq!(decoded.bits(), raw);
        assert_eq!(decoded.to_vec()?, raw.to_be_bytes());
        Ok(())
    }
}
